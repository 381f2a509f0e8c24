use thiserror::Error;

#[derive(Error, Debug)]
pub enum FarmError {
    #[error("invalid job #{id}: {reason}")]
    InvalidJob { id: u32, reason: String },

    #[error("printer not found: {0}")]
    PrinterNotFound(String),
}

pub type Result<T> = std::result::Result<T, FarmError>;
