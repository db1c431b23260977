use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read dataset file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse dataset CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid record on line {line}: {reason}")]
    InvalidRecord { line: u64, reason: String },
}
