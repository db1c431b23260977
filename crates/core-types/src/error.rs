use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid {0} selection: '{1}' is not present in the dataset")]
    UnknownSelectionValue(String, String),
}
