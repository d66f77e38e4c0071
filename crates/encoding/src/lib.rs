//! Text codecs (hex, base64) and the little-endian wire codec shared by the
//! scan request/response format.

pub mod b64;
pub mod buffer;
pub mod hex;

pub use buffer::{DecodeError, Decoder, EncodeError, Encoder, MAX_VARINT_VALUE};

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    OddHexLength,
    InvalidHexDigit,
    InvalidLength { expected: usize, actual: usize },
    InvalidBase64,
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingError::OddHexLength => write!(f, "hex string has odd length"),
            EncodingError::InvalidHexDigit => write!(f, "invalid hex digit"),
            EncodingError::InvalidLength { expected, actual } => {
                write!(f, "expected {expected} bytes, got {actual}")
            }
            EncodingError::InvalidBase64 => write!(f, "invalid base64 string"),
        }
    }
}

impl std::error::Error for EncodingError {}

/// Decodes a string that may be either hex or base64. Well-formed hex wins;
/// anything else is handed to the base64 decoder.
pub fn decode_hex_or_base64(input: &str) -> Result<Vec<u8>, EncodingError> {
    if input.len() % 2 == 0 && input.bytes().all(|b| b.is_ascii_hexdigit()) {
        return hex::decode(input);
    }
    b64::decode(input)
}
