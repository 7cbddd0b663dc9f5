//! Hex-string entry points used by the ledger.
//!
//! Each call loads its own key, decodes and range-checks every input, and
//! returns the canonical hex of the aggregate. Errors abort the whole call.

use crate::algebra::PaillierAlgebra;
use crate::cipher::Ciphertext;
use crate::error::{AggregateError, Result};
use crate::key::PublicKey;

/// Homomorphic Σ wᵢ·cᵢ under `pub_key`.
///
/// # Errors
/// `TruncatedInput`, then `MalformedPublicKey`, then per-ciphertext
/// `MalformedCiphertext` / `CiphertextOutOfRange`, checked in that order.
pub fn weighted_add<S: AsRef<str>>(ciphertexts: &[S], weights: &[u64], pub_key: &str) -> Result<String> {
    if ciphertexts.len() != weights.len() {
        return Err(AggregateError::TruncatedInput {
            ciphertexts: ciphertexts.len(),
            weights: weights.len(),
        });
    }
    let key = PublicKey::from_hex(pub_key)?;
    let cts = decode_all(ciphertexts)?;
    PaillierAlgebra::new(&key)
        .sum_weighted(&cts, weights)
        .map(|c| c.to_hex())
}

/// Homomorphic Σ cᵢ under `pub_key`; `"1"` (E(0)) for an empty list.
///
/// # Errors
/// As [`weighted_add`], minus the length check.
pub fn add<S: AsRef<str>>(ciphertexts: &[S], pub_key: &str) -> Result<String> {
    let key = PublicKey::from_hex(pub_key)?;
    let cts = decode_all(ciphertexts)?;
    PaillierAlgebra::new(&key).sum(&cts).map(|c| c.to_hex())
}

/// Homomorphic s·c under `pub_key`.
///
/// # Errors
/// `MalformedPublicKey`, `MalformedCiphertext` or `CiphertextOutOfRange`.
pub fn scalar_mul(ciphertext: &str, scalar: u64, pub_key: &str) -> Result<String> {
    let key = PublicKey::from_hex(pub_key)?;
    let c = Ciphertext::from_hex(ciphertext)?;
    PaillierAlgebra::new(&key)
        .scalar_mul(&c, scalar)
        .map(|c| c.to_hex())
}

fn decode_all<S: AsRef<str>>(hexes: &[S]) -> Result<Vec<Ciphertext>> {
    hexes
        .iter()
        .enumerate()
        .map(|(i, h)| Ciphertext::from_hex(h.as_ref()).map_err(|e| e.at(i)))
        .collect()
}
