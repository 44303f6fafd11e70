use mwdisplay_store::Field;
use thiserror::Error;

/// Errors that can occur during CSV parsing, image generation, or image
/// parsing.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to parse CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("hex decoding error: {0}")]
    HexError(#[from] hex::FromHexError),

    #[error("store error: {0}")]
    StoreError(#[from] mwdisplay_store::error::Error),

    #[error("unknown field: {0}")]
    InvalidField(String),

    #[error("invalid value: {0}")]
    InvalidValue(String),

    #[error("field {0} is listed more than once")]
    DuplicateField(Field),

    #[error("invalid image size {0}: must be exactly 1024 bytes")]
    InvalidImageSize(usize),
}
