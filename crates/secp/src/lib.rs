//! secp256k1 key derivation and tweak arithmetic.
//!
//! Thin, validated surface over libsecp256k1. The scalar multiplication and
//! point addition paths run in constant time with respect to secret data,
//! which matters here: every scalar passing through this crate derives from
//! wallet key material.

use std::fmt;
use std::sync::OnceLock;

use secp256k1::{All, PublicKey, Scalar, Secp256k1, SecretKey};

pub const COMPRESSED_PUBLIC_KEY_SIZE: usize = 33;
pub const UNCOMPRESSED_PUBLIC_KEY_SIZE: usize = 65;

static SECP256K1: OnceLock<Secp256k1<All>> = OnceLock::new();

fn secp256k1() -> &'static Secp256k1<All> {
    SECP256K1.get_or_init(Secp256k1::new)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecpError {
    /// Scalar is zero or not below the curve order.
    InvalidScalar,
    /// Byte sequence does not encode a curve point.
    InvalidPoint,
    /// Inputs were valid but the operation landed on zero or the point at
    /// infinity.
    InvalidResult,
}

impl fmt::Display for SecpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecpError::InvalidScalar => write!(f, "scalar out of range for secp256k1"),
            SecpError::InvalidPoint => write!(f, "byte sequence is not a secp256k1 point"),
            SecpError::InvalidResult => write!(f, "operation produced an invalid key"),
        }
    }
}

impl std::error::Error for SecpError {}

/// Derives the public key for a private scalar, serialized compressed
/// (33 bytes, 0x02/0x03 prefix) or uncompressed (65 bytes, 0x04 prefix).
pub fn public_key_create(private_key: &[u8; 32], compressed: bool) -> Result<Vec<u8>, SecpError> {
    let secret = SecretKey::from_slice(private_key).map_err(|_| SecpError::InvalidScalar)?;
    let public = PublicKey::from_secret_key(secp256k1(), &secret);
    Ok(serialize_point(&public, compressed))
}

/// Computes `(private_key + tweak) mod n`.
pub fn private_key_tweak_add(
    private_key: &[u8; 32],
    tweak: &[u8; 32],
) -> Result<[u8; 32], SecpError> {
    let secret = SecretKey::from_slice(private_key).map_err(|_| SecpError::InvalidScalar)?;
    let tweak = Scalar::from_be_bytes(*tweak).map_err(|_| SecpError::InvalidScalar)?;
    let tweaked = secret
        .add_tweak(&tweak)
        .map_err(|_| SecpError::InvalidResult)?;
    Ok(tweaked.secret_bytes())
}

/// Computes `P + tweak * G` for a serialized point `P`.
pub fn public_key_tweak_add(
    public_key: &[u8],
    tweak: &[u8; 32],
    compressed: bool,
) -> Result<Vec<u8>, SecpError> {
    let point = PublicKey::from_slice(public_key).map_err(|_| SecpError::InvalidPoint)?;
    let tweak = Scalar::from_be_bytes(*tweak).map_err(|_| SecpError::InvalidScalar)?;
    let tweaked = point
        .add_exp_tweak(secp256k1(), &tweak)
        .map_err(|_| SecpError::InvalidResult)?;
    Ok(serialize_point(&tweaked, compressed))
}

fn serialize_point(point: &PublicKey, compressed: bool) -> Vec<u8> {
    if compressed {
        point.serialize().to_vec()
    } else {
        point.serialize_uncompressed().to_vec()
    }
}
