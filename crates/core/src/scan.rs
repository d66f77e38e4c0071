use std::collections::HashSet;
use std::io::{self, Read};

use serde_json::{json, Value};

use fastcrypto_encoding::hex;
use fastcrypto_wire::{parse_scan_response, ScanOutcome, ScanRequest, UtxoRecord};

use crate::dispatch::{require_str, require_u64, CoreError, ErrorKind};

const USER_AGENT: &str = concat!("fastcrypto-rust/", env!("CARGO_PKG_VERSION"));

/// Overall deadline for the POST and response download. Remote nodes stream
/// large ranges slowly, hence the generous bound.
const RESPONSE_TIMEOUT_SECS: u64 = 240;

/// Guard on the declared response size before any allocation happens.
const MAX_RESPONSE_SIZE: usize = 64 * 1024 * 1024;

pub(crate) fn download_and_process_method(params: &Value) -> Result<Value, CoreError> {
    let url = require_str(params, "url")?;
    let start_height = require_u64(params, "start_height")?;
    let output_keys = output_key_set(params)?;

    let outcome = download_and_process(url, start_height, &output_keys)?;
    let utxos: Vec<Value> = outcome.utxos.iter().map(utxo_to_json).collect();
    Ok(json!({
        "utxos": utxos,
        "blocks_scanned": outcome.blocks_scanned,
    }))
}

/// Runs the full exchange against `url`: POST the encoded request, read
/// exactly the declared `Content-Length`, hand the bytes to the wire codec.
/// The declared length is authoritative; a stream that ends earlier is a
/// truncated response, not a transport hiccup to paper over.
///
/// An empty `output_keys` set keeps every candidate output; otherwise only
/// outputs whose one-time key is in the set survive.
pub fn download_and_process(
    url: &str,
    start_height: u64,
    output_keys: &HashSet<[u8; 32]>,
) -> Result<ScanOutcome, CoreError> {
    let request = ScanRequest::new(start_height).encode();
    fastcrypto_log::log_debug!(
        "scan request built: {} bytes, start height {start_height}",
        request.len()
    );

    let response = minreq::post(url)
        .with_header("Content-Type", "application/octet-stream")
        .with_header("User-Agent", USER_AGENT)
        .with_timeout(RESPONSE_TIMEOUT_SECS)
        .with_body(request)
        .send_lazy()
        .map_err(|err| {
            CoreError::new(ErrorKind::Transport, format!("scan request failed: {err}"))
        })?;

    if response.status_code != 200 {
        return Err(CoreError::new(
            ErrorKind::Transport,
            format!("scan request failed: HTTP {}", response.status_code),
        ));
    }

    let declared = content_length(response.headers.get("content-length"))?;
    if declared > MAX_RESPONSE_SIZE {
        return Err(CoreError::new(
            ErrorKind::Transport,
            format!("declared response size {declared} exceeds limit"),
        ));
    }

    let body = read_declared_body(response, declared)?;
    fastcrypto_log::log_debug!("scan response downloaded: {declared} bytes");

    let outcome = parse_scan_response(&body, start_height, |record| {
        output_keys.is_empty() || output_keys.contains(&record.output_key)
    })?;
    fastcrypto_log::log_info!(
        "scanned {} blocks, kept {} of {} outputs",
        outcome.blocks_scanned,
        outcome.utxos.len(),
        outcome.outputs_seen
    );
    Ok(outcome)
}

fn content_length(header: Option<&String>) -> Result<usize, CoreError> {
    header
        .and_then(|value| value.trim().parse::<usize>().ok())
        .ok_or_else(|| {
            CoreError::new(
                ErrorKind::Transport,
                "missing or invalid Content-Length header",
            )
        })
}

/// Reads exactly `declared` bytes from the response stream. Surplus bytes
/// past the declared length are left unread.
fn read_declared_body(mut response: impl Read, declared: usize) -> Result<Vec<u8>, CoreError> {
    let mut body = vec![0u8; declared];
    let mut filled = 0usize;
    while filled < declared {
        let read = match response.read(&mut body[filled..]) {
            Ok(read) => read,
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => 0,
            Err(err) => {
                return Err(CoreError::new(
                    ErrorKind::Transport,
                    format!("response read failed: {err}"),
                ));
            }
        };
        if read == 0 {
            return Err(CoreError::new(
                ErrorKind::TruncatedInput,
                format!("response body ended at {filled} of {declared} declared bytes"),
            ));
        }
        filled += read;
    }
    Ok(body)
}

fn output_key_set(params: &Value) -> Result<HashSet<[u8; 32]>, CoreError> {
    let mut keys = HashSet::new();
    let Some(raw) = params.get("output_keys") else {
        return Ok(keys);
    };
    let entries = raw.as_array().ok_or_else(|| {
        CoreError::invalid_parameter("parameter 'output_keys' must be an array of hex strings")
    })?;
    for entry in entries {
        let text = entry.as_str().ok_or_else(|| {
            CoreError::invalid_parameter("parameter 'output_keys' must be an array of hex strings")
        })?;
        let key = hex::decode_fixed::<32>(text).map_err(|err| {
            CoreError::invalid_parameter(format!("invalid entry in 'output_keys': {err}"))
        })?;
        keys.insert(key);
    }
    Ok(keys)
}

fn utxo_to_json(record: &UtxoRecord) -> Value {
    json!({
        "block_height": record.block_height,
        "tx_id": hex::encode(&record.tx_id),
        "output_index": record.output_index,
        "amount": record.amount,
        "output_key": hex::encode(&record.output_key),
        "commitment": hex::encode(&record.commitment),
    })
}
