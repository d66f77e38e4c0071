//! Scan-response decoding.
//!
//! The body after the storage header is a sequence of nested records:
//!
//! ```text
//! block_count: varint
//! block_count * {
//!     height:     varint
//!     block_hash: 32 bytes
//!     tx_count:   varint
//!     tx_count * {
//!         tx_id:        32 bytes
//!         output_count: varint
//!         output_count * {
//!             output_index: varint
//!             amount:       u64 LE
//!             output_key:   32 bytes
//!             commitment:   32 bytes
//!         }
//!     }
//! }
//! ```
//!
//! Decoding aborts on the first inconsistency and returns nothing: a corrupt
//! length prefix shifts every later offset, so records past it would be
//! garbage dressed up as data.

use fastcrypto_encoding::Decoder;

use crate::{WireError, STORAGE_SIGNATURE};

// Smallest possible footprint of each record kind, with every varint at its
// 1-byte width. A count whose implied minimum exceeds the remaining buffer
// is a lie, not a short read.
const MIN_BLOCK_BYTES: u64 = 1 + 32 + 1;
const MIN_TX_BYTES: u64 = 32 + 1;
const MIN_OUTPUT_BYTES: u64 = 1 + 8 + 32 + 32;

/// One candidate unspent output, before any ownership check the caller's
/// filter did not already apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtxoRecord {
    pub block_height: u64,
    pub tx_id: [u8; 32],
    pub output_index: u64,
    pub amount: u64,
    pub output_key: [u8; 32],
    pub commitment: [u8; 32],
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    pub utxos: Vec<UtxoRecord>,
    pub blocks_scanned: u64,
    pub outputs_seen: u64,
}

/// Walks the response and collects the outputs accepted by `filter`.
///
/// `start_height` is the height the request asked for; a block below it
/// means the daemon answered a different question than the one asked, and
/// the response is rejected as malformed.
pub fn parse_scan_response<F>(
    bytes: &[u8],
    start_height: u64,
    mut filter: F,
) -> Result<ScanOutcome, WireError>
where
    F: FnMut(&UtxoRecord) -> bool,
{
    let mut decoder = Decoder::new(bytes);

    let header = decoder.read_fixed::<9>()?;
    if header != STORAGE_SIGNATURE {
        return Err(WireError::Malformed("bad storage signature"));
    }

    let mut outcome = ScanOutcome::default();
    let block_count = decoder.read_varint()?;
    if block_count * MIN_BLOCK_BYTES > decoder.remaining() as u64 {
        return Err(WireError::Malformed("block count exceeds remaining buffer"));
    }
    for _ in 0..block_count {
        let block_height = decoder.read_varint()?;
        if block_height < start_height {
            return Err(WireError::Malformed("block height below requested start"));
        }
        // The block hash is part of the record layout but not of any
        // extracted output.
        let _block_hash = decoder.read_fixed::<32>()?;

        let tx_count = decoder.read_varint()?;
        if tx_count * MIN_TX_BYTES > decoder.remaining() as u64 {
            return Err(WireError::Malformed(
                "transaction count exceeds remaining buffer",
            ));
        }
        for _ in 0..tx_count {
            let tx_id = decoder.read_fixed::<32>()?;
            let output_count = decoder.read_varint()?;
            if output_count * MIN_OUTPUT_BYTES > decoder.remaining() as u64 {
                return Err(WireError::Malformed(
                    "output count exceeds remaining buffer",
                ));
            }
            for _ in 0..output_count {
                let output_index = decoder.read_varint()?;
                let amount = decoder.read_u64_le()?;
                let output_key = decoder.read_fixed::<32>()?;
                let commitment = decoder.read_fixed::<32>()?;

                let record = UtxoRecord {
                    block_height,
                    tx_id,
                    output_index,
                    amount,
                    output_key,
                    commitment,
                };
                outcome.outputs_seen += 1;
                if filter(&record) {
                    outcome.utxos.push(record);
                }
            }
        }
        outcome.blocks_scanned += 1;
    }

    if !decoder.is_empty() {
        return Err(WireError::Malformed("trailing bytes after last block"));
    }
    Ok(outcome)
}
