//! Password-based key derivation: scrypt and PBKDF2-HMAC-SHA512.
//!
//! Both functions are deterministic and side-effect free. Parameters are
//! validated here before any work is scheduled, so a hostile cost setting is
//! rejected instead of exhausting memory. Nothing in this crate logs; the
//! inputs and outputs are key material.

use std::fmt;

use sha2::Sha512;

/// Ceiling for the scrypt scratch region (`128 * n * r` bytes). The scratch
/// allocation is attacker-influenced through the cost parameters, so calls
/// past this bound fail instead of allocating.
pub const SCRYPT_MEMORY_CEILING: u64 = 1 << 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KdfError {
    InvalidParameter(&'static str),
}

impl fmt::Display for KdfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KdfError::InvalidParameter(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for KdfError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScryptParams {
    /// CPU/memory cost. Must be a power of two, at least 2.
    pub n: u64,
    /// Block size.
    pub r: u32,
    /// Parallelization.
    pub p: u32,
    /// Derived key length in bytes.
    pub len: usize,
}

pub fn scrypt(password: &[u8], salt: &[u8], params: &ScryptParams) -> Result<Vec<u8>, KdfError> {
    if params.n < 2 || !params.n.is_power_of_two() {
        return Err(KdfError::InvalidParameter(
            "scrypt n must be a power of two >= 2",
        ));
    }
    if params.r == 0 {
        return Err(KdfError::InvalidParameter("scrypt r must be >= 1"));
    }
    if params.p == 0 {
        return Err(KdfError::InvalidParameter("scrypt p must be >= 1"));
    }
    if params.len == 0 {
        return Err(KdfError::InvalidParameter(
            "scrypt output length must be >= 1",
        ));
    }
    let scratch = 128u64
        .checked_mul(params.n)
        .and_then(|bytes| bytes.checked_mul(u64::from(params.r)))
        .ok_or(KdfError::InvalidParameter("scrypt cost overflows"))?;
    if scratch > SCRYPT_MEMORY_CEILING {
        return Err(KdfError::InvalidParameter(
            "scrypt cost exceeds the memory ceiling",
        ));
    }

    // n is a power of two below the ceiling, so trailing_zeros fits u8.
    let log_n = params.n.trailing_zeros() as u8;
    // The length field of ::scrypt::Params only constrains its PHC-string
    // API; the raw call below takes the output length from the slice.
    let inner = ::scrypt::Params::new(log_n, params.r, params.p, 32)
        .map_err(|_| KdfError::InvalidParameter("scrypt parameters rejected"))?;

    let mut out = vec![0u8; params.len];
    ::scrypt::scrypt(password, salt, &inner, &mut out)
        .map_err(|_| KdfError::InvalidParameter("scrypt output length rejected"))?;
    Ok(out)
}

pub fn pbkdf2_hmac_sha512(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    len: usize,
) -> Result<Vec<u8>, KdfError> {
    if iterations == 0 {
        return Err(KdfError::InvalidParameter(
            "pbkdf2 iterations must be >= 1",
        ));
    }
    if len == 0 {
        return Err(KdfError::InvalidParameter(
            "pbkdf2 output length must be >= 1",
        ));
    }

    let mut out = vec![0u8; len];
    pbkdf2::pbkdf2_hmac::<Sha512>(password, salt, iterations, &mut out);
    Ok(out)
}
