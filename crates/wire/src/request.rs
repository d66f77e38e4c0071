//! Scan-request framing.
//!
//! Requests and responses open with the 9-byte epee portable-storage header
//! Monero-family daemons put on every binary RPC payload: an 8-byte
//! signature plus a format version byte. The body past the header is this
//! library's own fixed layout:
//!
//! | offset | width | field                    |
//! |--------|-------|--------------------------|
//! | 0      | 9     | storage header           |
//! | 9      | 8     | start height, u64 LE     |
//! | 17     | 1     | prune flag (0/1)         |
//! | 18     | 1     | no-miner-tx flag (0/1)   |

use fastcrypto_encoding::{Decoder, Encoder};

use crate::WireError;

/// Portable-storage signature (`0x0111010101010201`) followed by format
/// version 1.
pub const STORAGE_SIGNATURE: [u8; 9] = [0x01, 0x11, 0x01, 0x01, 0x01, 0x01, 0x02, 0x01, 0x01];

pub const REQUEST_LEN: usize = 19;

/// Byte offset of the start-height field inside an encoded request.
pub const HEIGHT_OFFSET: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanRequest {
    pub start_height: u64,
    pub prune: bool,
    pub no_miner_tx: bool,
}

impl ScanRequest {
    /// Request with the flag defaults the daemon expects from a lightweight
    /// wallet: pruned blocks, miner transactions included.
    pub fn new(start_height: u64) -> Self {
        Self {
            start_height,
            prune: true,
            no_miner_tx: false,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut encoder = Encoder::new();
        encoder.write_bytes(&STORAGE_SIGNATURE);
        encoder.write_u64_le(self.start_height);
        encoder.write_u8(u8::from(self.prune));
        encoder.write_u8(u8::from(self.no_miner_tx));
        encoder.into_inner()
    }

    /// Encodes into a caller-allocated buffer and reports the used length,
    /// so a transport working from a larger scratch buffer sends only the
    /// written prefix rather than uninitialized trailing bytes.
    pub fn encode_into(&self, buf: &mut [u8]) -> Result<usize, WireError> {
        if buf.len() < REQUEST_LEN {
            return Err(WireError::BufferTooSmall {
                needed: REQUEST_LEN,
                available: buf.len(),
            });
        }
        let encoded = self.encode();
        buf[..REQUEST_LEN].copy_from_slice(&encoded);
        Ok(REQUEST_LEN)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        let mut decoder = Decoder::new(bytes);
        let header = decoder.read_fixed::<9>()?;
        if header != STORAGE_SIGNATURE {
            return Err(WireError::Malformed("bad storage signature"));
        }
        let start_height = decoder.read_u64_le()?;
        let prune = decode_flag(decoder.read_u8()?)?;
        let no_miner_tx = decode_flag(decoder.read_u8()?)?;
        if !decoder.is_empty() {
            return Err(WireError::Malformed("trailing bytes after request"));
        }
        Ok(Self {
            start_height,
            prune,
            no_miner_tx,
        })
    }
}

fn decode_flag(byte: u8) -> Result<bool, WireError> {
    match byte {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(WireError::Malformed("flag byte must be 0 or 1")),
    }
}
