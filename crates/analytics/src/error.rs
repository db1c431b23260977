use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("An unexpected error occurred during report calculation: {0}")]
    InternalError(String),
}
