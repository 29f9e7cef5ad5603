//! error types shared by the gcl codecs

use thiserror::Error;

/// result alias used across the library
pub type Result<T> = std::result::Result<T, Error>;

/// everything that can go fatally wrong while encoding or decoding
#[derive(Error, Debug)]
pub enum Error {
    /// underlying file or stream I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// magic mismatch, unknown version or impossible header fields
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// caller-supplied value outside the supported range
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// the bit stream ran out in the middle of a codeword
    #[error("unexpected end of stream")]
    UnexpectedEndOfStream,
}

impl Error {
    /// build an `InvalidFormat` error
    pub fn invalid_format<S: Into<String>>(msg: S) -> Self {
        Error::InvalidFormat(msg.into())
    }

    /// build an `InvalidParameter` error
    pub fn invalid_parameter<S: Into<String>>(msg: S) -> Self {
        Error::InvalidParameter(msg.into())
    }
}
