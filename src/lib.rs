//! An implementation of the [Elligator Squared](https://eprint.iacr.org/2014/043.pdf)
//! algorithm for encoding NIST P-256 elliptic curve points as uniformly distributed
//! bitstrings, allowing public keys to be sent over channels which must look like
//! random noise.
//!
//! ```
//! use hex_literal::hex;
//!
//! // An uncompressed SEC1-encoded P-256 public key.
//! let pk = hex!(
//!     "04083c0f5503e23eaabca86f32cbf603eb1fbb037701b9bf94d053ce57a84e367c"
//!     "f2e282d17fd64220c64c9fe12e347971b86760d30821f75cdae9bfb0294ab5df"
//! );
//!
//! // Encode it as 64 bytes which are indistinguishable from random.
//! let encoded = elligator_squared::encode(&pk, rand::thread_rng())?;
//!
//! // Decode the bitstring back into the public key.
//! let decoded = elligator_squared::decode(&encoded)?;
//! assert_eq!(pk, decoded);
//! # Ok::<(), elligator_squared::Error>(())
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

use core::fmt;

use rand_core::{CryptoRng, RngCore};

use crate::fp::FieldElement;
use crate::map::{f, r};
use crate::point::AffinePoint;

mod fp;
mod map;
mod point;

/// The error type for malformed inputs and RNG failures.
#[derive(Debug)]
pub enum Error {
    /// The encoded point is not 64 bytes long.
    InvalidEncoding,
    /// The point is not a 65-byte uncompressed SEC1 point.
    InvalidPoint,
    /// The random number generator returned an error.
    Rng(rand_core::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidEncoding => f.write_str("invalid encoding"),
            Error::InvalidPoint => f.write_str("invalid point"),
            Error::Rng(e) => write!(f, "rng failure: {e}"),
        }
    }
}

impl From<rand_core::Error> for Error {
    fn from(e: rand_core::Error) -> Error {
        Error::Rng(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Rng(e) => Some(e),
            _ => None,
        }
    }
}

/// The number of candidates to try before concluding the RNG is broken. The
/// expected number of candidates per encoding is small and constant, so the
/// odds of a healthy RNG exhausting this are negligible (less than 2⁻²⁰⁰).
const RETRY_LIMIT: usize = 1_000;

/// Maps the given uncompressed SEC1-encoded point to a random 64-byte
/// bitstring which is indistinguishable from uniform random data.
///
/// Returns [Error::InvalidPoint] if `p` is not 65 bytes with an `0x04` prefix,
/// or [Error::Rng] if reading from `rng` fails.
///
/// Panics if no candidate encoding is found after a thousand attempts, which
/// indicates a catastrophically broken RNG.
pub fn encode(p: &[u8], mut rng: impl RngCore + CryptoRng) -> Result<[u8; 64], Error> {
    if p.len() != 65 || p[0] != 4 {
        return Err(Error::InvalidPoint);
    }
    let p = AffinePoint {
        x: FieldElement::from_bytes(&p[1..33]),
        y: FieldElement::from_bytes(&p[33..]),
    };

    let mut buf = [0u8; 64];
    for _ in 0..RETRY_LIMIT {
        // Generate a random field element \not\in {-1, 0, 1}, the singular
        // points of f.
        rng.try_fill_bytes(&mut buf[..32])?;
        let u = FieldElement::from_bytes(&buf[..32]);
        if u == FieldElement::MINUS_ONE || u == FieldElement::ZERO || u == FieldElement::ONE {
            continue;
        }

        // Map the field element to a point and calculate the difference between
        // the random point and the input point.
        let q = &p + &-&f(&u);

        // If we managed to randomly generate -p, congratulate ourselves on the
        // improbable and keep trying.
        if q.is_identity() {
            continue;
        }

        // Pick a random biquadratic root from [0,4).
        rng.try_fill_bytes(&mut buf[32..33])?;
        let j = buf[32] % 4;

        // If the jth biquadratic root exists for the delta point, return our
        // random field element and our preimage field element.
        if let Some(v) = r(&q.x, &q.y, j) {
            buf[..32].copy_from_slice(&u.to_bytes());
            buf[32..].copy_from_slice(&v.to_bytes());
            return Ok(buf);
        }
    }

    // Statistically, it's more likely the RNG is broken than that a thousand
    // candidates in a row had no valid preimage.
    unreachable!("failed to find candidate, suspect RNG failure")
}

/// Maps the given Elligator Squared-encoded bitstring to an uncompressed
/// SEC1-encoded point.
///
/// Returns [Error::InvalidEncoding] if `b` is not 64 bytes long.
pub fn decode(b: &[u8]) -> Result<[u8; 65], Error> {
    if b.len() != 64 {
        return Err(Error::InvalidEncoding);
    }

    let u = FieldElement::from_bytes(&b[..32]);
    let v = FieldElement::from_bytes(&b[32..]);
    let p = &f(&u) + &f(&v);

    let mut out = [0u8; 65];
    out[0] = 4;
    out[1..33].copy_from_slice(&p.x.to_bytes());
    out[33..].copy_from_slice(&p.y.to_bytes());
    Ok(out)
}
