//! Binary codec for the block-scan exchange with a Monero-family remote
//! node: request framing on the encode side, a block/tx/output walker with a
//! caller-supplied ownership filter on the decode side.

mod request;
mod response;

use std::fmt;

pub use request::{ScanRequest, HEIGHT_OFFSET, REQUEST_LEN, STORAGE_SIGNATURE};
pub use response::{parse_scan_response, ScanOutcome, UtxoRecord};

use fastcrypto_encoding::DecodeError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    /// The buffer ended while a declared field was still being read.
    Truncated,
    /// The buffer is internally inconsistent; every later offset is suspect,
    /// so the whole decode is abandoned.
    Malformed(&'static str),
    /// Caller-provided output buffer cannot hold the encoded request.
    BufferTooSmall { needed: usize, available: usize },
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireError::Truncated => write!(f, "input ended inside a declared field"),
            WireError::Malformed(message) => write!(f, "malformed response: {message}"),
            WireError::BufferTooSmall { needed, available } => {
                write!(f, "request buffer too small: need {needed}, have {available}")
            }
        }
    }
}

impl std::error::Error for WireError {}

impl From<DecodeError> for WireError {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::UnexpectedEof => WireError::Truncated,
            DecodeError::NonCanonicalVarInt => WireError::Malformed("non-canonical varint"),
            DecodeError::SizeTooLarge => WireError::Malformed("length field exceeds maximum"),
        }
    }
}
