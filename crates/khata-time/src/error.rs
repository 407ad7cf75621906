//! Error types for khata-time operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KhataTimeError {
    #[error("Invalid date key: {0}")]
    InvalidDateKey(String),
}

pub type Result<T> = std::result::Result<T, KhataTimeError>;
