use thiserror::Error;

use crate::receipt::ReceiptId;

/// Errors raised by intake, lookup, and storage
#[derive(Error, Debug)]
pub enum ReceiptError {
    #[error("Receipt not found: {0}")]
    NotFound(ReceiptId),

    #[error("Invalid receipt: {0}")]
    InvalidReceipt(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<serde_json::Error> for ReceiptError {
    fn from(err: serde_json::Error) -> Self {
        ReceiptError::InvalidReceipt(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ReceiptError>;
