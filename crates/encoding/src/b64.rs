use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::EncodingError;

pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn decode(input: &str) -> Result<Vec<u8>, EncodingError> {
    STANDARD
        .decode(input)
        .map_err(|_| EncodingError::InvalidBase64)
}
