use std::fmt;

use serde_json::{json, Value};

use fastcrypto_encoding::{b64, decode_hex_or_base64, hex};
use fastcrypto_kdf::{KdfError, ScryptParams};
use fastcrypto_secp::SecpError;
use fastcrypto_wire::WireError;

use crate::scan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidParameter,
    InvalidScalar,
    InvalidResult,
    TruncatedInput,
    MalformedResponse,
    UnsupportedMethod,
    Transport,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidParameter => "InvalidParameter",
            Self::InvalidScalar => "InvalidScalar",
            Self::InvalidResult => "InvalidResult",
            Self::TruncatedInput => "TruncatedInput",
            Self::MalformedResponse => "MalformedResponse",
            Self::UnsupportedMethod => "UnsupportedMethod",
            Self::Transport => "Transport",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreError {
    pub kind: ErrorKind,
    pub message: String,
}

impl CoreError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidParameter, message)
    }

    pub fn to_json(&self) -> Value {
        json!({
            "error": {
                "kind": self.kind.as_str(),
                "message": self.message,
            }
        })
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.as_str(), self.message)
    }
}

impl std::error::Error for CoreError {}

impl From<KdfError> for CoreError {
    fn from(err: KdfError) -> Self {
        Self::new(ErrorKind::InvalidParameter, err.to_string())
    }
}

impl From<SecpError> for CoreError {
    fn from(err: SecpError) -> Self {
        let kind = match err {
            SecpError::InvalidScalar => ErrorKind::InvalidScalar,
            // The caller handed over bytes that never were a point; that is
            // an argument problem, not a cryptographic dead end.
            SecpError::InvalidPoint => ErrorKind::InvalidParameter,
            SecpError::InvalidResult => ErrorKind::InvalidResult,
        };
        Self::new(kind, err.to_string())
    }
}

impl From<WireError> for CoreError {
    fn from(err: WireError) -> Self {
        let kind = match err {
            WireError::Truncated => ErrorKind::TruncatedInput,
            WireError::Malformed(_) => ErrorKind::MalformedResponse,
            WireError::BufferTooSmall { .. } => ErrorKind::InvalidParameter,
        };
        Self::new(kind, err.to_string())
    }
}

/// Routes a `(method, params)` pair to the matching primitive. Every
/// caller-visible failure is a [`CoreError`] carrying a stable kind plus a
/// human-readable detail; component errors are folded into that shape here
/// and never escape as panics or foreign error types.
pub fn dispatch(method: &str, params: &Value) -> Result<Value, CoreError> {
    fastcrypto_log::log_debug!("dispatching method {method}");
    match method {
        "scrypt" => scrypt_method(params),
        "pbkdf2Sha512" => pbkdf2_method(params),
        "secp256k1EcPubkeyCreate" => pubkey_create_method(params),
        "secp256k1EcPrivkeyTweakAdd" => privkey_tweak_add_method(params),
        "secp256k1EcPubkeyTweakAdd" => pubkey_tweak_add_method(params),
        "download_and_process" => scan::download_and_process_method(params),
        _ => Err(CoreError::new(
            ErrorKind::UnsupportedMethod,
            format!("unknown method '{method}'"),
        )),
    }
}

fn scrypt_method(params: &Value) -> Result<Value, CoreError> {
    let password = require_str(params, "password")?;
    let salt = require_str(params, "salt")?;
    let kdf_params = ScryptParams {
        n: require_u64(params, "n")?,
        r: require_u32(params, "r")?,
        p: require_u32(params, "p")?,
        len: require_len(params, "size")?,
    };
    let key = fastcrypto_kdf::scrypt(password.as_bytes(), salt.as_bytes(), &kdf_params)?;
    Ok(json!({ "result": b64::encode(&key) }))
}

fn pbkdf2_method(params: &Value) -> Result<Value, CoreError> {
    let password = bytes_param(params, "password")?;
    let salt = bytes_param(params, "salt")?;
    let iterations = require_u32(params, "iterations")?;
    let len = require_len(params, "size")?;
    let key = fastcrypto_kdf::pbkdf2_hmac_sha512(&password, &salt, iterations, len)?;
    Ok(json!({ "result": b64::encode(&key) }))
}

fn pubkey_create_method(params: &Value) -> Result<Value, CoreError> {
    let private_key = scalar_param(params, "private_key_hex")?;
    let compressed = require_bool(params, "compressed")?;
    let public_key = fastcrypto_secp::public_key_create(&private_key, compressed)?;
    Ok(json!({ "result": hex::encode(&public_key) }))
}

fn privkey_tweak_add_method(params: &Value) -> Result<Value, CoreError> {
    let private_key = scalar_param(params, "private_key_hex")?;
    let tweak = scalar_param(params, "tweak_hex")?;
    let tweaked = fastcrypto_secp::private_key_tweak_add(&private_key, &tweak)?;
    Ok(json!({ "result": hex::encode(&tweaked) }))
}

fn pubkey_tweak_add_method(params: &Value) -> Result<Value, CoreError> {
    let public_key = require_str(params, "public_key_hex")?;
    let public_key = hex::decode(public_key)
        .map_err(|err| CoreError::invalid_parameter(format!("invalid public_key_hex: {err}")))?;
    let tweak = scalar_param(params, "tweak_hex")?;
    let compressed = require_bool(params, "compressed")?;
    let tweaked = fastcrypto_secp::public_key_tweak_add(&public_key, &tweak, compressed)?;
    Ok(json!({ "result": hex::encode(&tweaked) }))
}

pub(crate) fn require_str<'a>(params: &'a Value, name: &str) -> Result<&'a str, CoreError> {
    params
        .get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| CoreError::invalid_parameter(format!("missing string parameter '{name}'")))
}

pub(crate) fn require_u64(params: &Value, name: &str) -> Result<u64, CoreError> {
    params
        .get(name)
        .and_then(Value::as_u64)
        .ok_or_else(|| CoreError::invalid_parameter(format!("missing integer parameter '{name}'")))
}

fn require_u32(params: &Value, name: &str) -> Result<u32, CoreError> {
    let value = require_u64(params, name)?;
    u32::try_from(value)
        .map_err(|_| CoreError::invalid_parameter(format!("parameter '{name}' out of range")))
}

fn require_len(params: &Value, name: &str) -> Result<usize, CoreError> {
    let value = require_u64(params, name)?;
    usize::try_from(value)
        .map_err(|_| CoreError::invalid_parameter(format!("parameter '{name}' out of range")))
}

fn require_bool(params: &Value, name: &str) -> Result<bool, CoreError> {
    params
        .get(name)
        .and_then(Value::as_bool)
        .ok_or_else(|| CoreError::invalid_parameter(format!("missing boolean parameter '{name}'")))
}

fn bytes_param(params: &Value, name: &str) -> Result<Vec<u8>, CoreError> {
    let text = require_str(params, name)?;
    decode_hex_or_base64(text)
        .map_err(|err| CoreError::invalid_parameter(format!("invalid parameter '{name}': {err}")))
}

fn scalar_param(params: &Value, name: &str) -> Result<[u8; 32], CoreError> {
    let text = require_str(params, name)?;
    hex::decode_fixed::<32>(text)
        .map_err(|err| CoreError::invalid_parameter(format!("invalid parameter '{name}': {err}")))
}
