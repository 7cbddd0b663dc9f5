//! Homomorphic add / scale over Paillier ciphertexts.
//!
//! Multiplying ciphertexts mod n² adds plaintexts; raising a ciphertext to w
//! mod n² multiplies its plaintext by w.

use num_bigint::BigUint;

use crate::cipher::Ciphertext;
use crate::error::{AggregateError, Result};
use crate::key::PublicKey;

/// Aggregation engine bound to one public key.
#[derive(Clone, Copy, Debug)]
pub struct PaillierAlgebra<'k> {
    key: &'k PublicKey,
}

impl<'k> PaillierAlgebra<'k> {
    /// Bind the operations to `key`'s n².
    pub fn new(key: &'k PublicKey) -> Self {
        Self { key }
    }

    /// Key the operations reduce under.
    pub fn key(&self) -> &'k PublicKey {
        self.key
    }

    /// E(a) ⊕ E(b) = E(a + b)
    ///
    /// # Errors
    /// [`AggregateError::CiphertextOutOfRange`] with index 0 or 1.
    pub fn add(&self, a: &Ciphertext, b: &Ciphertext) -> Result<Ciphertext> {
        self.key.check(a).map_err(|e| e.at(0))?;
        self.key.check(b).map_err(|e| e.at(1))?;
        Ok(Ciphertext::new(self.mul_mod(a.value(), b.value())))
    }

    /// E(a)^w = E(a · w)
    ///
    /// # Errors
    /// [`AggregateError::CiphertextOutOfRange`] if `c` is not below n².
    pub fn scalar_mul(&self, c: &Ciphertext, scalar: u64) -> Result<Ciphertext> {
        self.key.check(c)?;
        tracing::debug!(scalar, "paillier scalar multiply");
        let out = self.pow_mod(c.value(), scalar);
        tracing::debug!(bits = out.bits(), "paillier scalar multiply done");
        Ok(Ciphertext::new(out))
    }

    /// Σ cᵢ, or E(0) for an empty slice.
    ///
    /// # Errors
    /// [`AggregateError::CiphertextOutOfRange`] for the first input not below n².
    pub fn sum(&self, ciphertexts: &[Ciphertext]) -> Result<Ciphertext> {
        self.check_all(ciphertexts)?;
        tracing::debug!(inputs = ciphertexts.len(), "paillier sum");
        let acc = ciphertexts
            .iter()
            .fold(self.key.encrypt_zero().into_value(), |acc, c| {
                self.mul_mod(&acc, c.value())
            });
        tracing::debug!(bits = acc.bits(), "paillier sum done");
        Ok(Ciphertext::new(acc))
    }

    /// Σ wᵢ·cᵢ, or E(0) for empty slices.
    ///
    /// Nothing is computed unless the lengths agree and every ciphertext is in
    /// range; a failure never exposes a partial sum.
    ///
    /// # Errors
    /// [`AggregateError::TruncatedInput`] on a length mismatch, otherwise
    /// [`AggregateError::CiphertextOutOfRange`] for the first bad input.
    pub fn sum_weighted(&self, ciphertexts: &[Ciphertext], weights: &[u64]) -> Result<Ciphertext> {
        if ciphertexts.len() != weights.len() {
            return Err(AggregateError::TruncatedInput {
                ciphertexts: ciphertexts.len(),
                weights: weights.len(),
            });
        }
        self.check_all(ciphertexts)?;
        tracing::debug!(inputs = ciphertexts.len(), "paillier weighted sum");
        let acc = ciphertexts
            .iter()
            .zip(weights)
            .map(|(c, &w)| self.pow_mod(c.value(), w))
            .fold(self.key.encrypt_zero().into_value(), |acc, term| {
                self.mul_mod(&acc, &term)
            });
        tracing::debug!(bits = acc.bits(), "paillier weighted sum done");
        Ok(Ciphertext::new(acc))
    }

    fn check_all(&self, ciphertexts: &[Ciphertext]) -> Result<()> {
        ciphertexts
            .iter()
            .enumerate()
            .try_for_each(|(i, c)| self.key.check(c).map_err(|e| e.at(i)))
    }

    fn mul_mod(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % self.key.modulus_squared()
    }

    fn pow_mod(&self, base: &BigUint, exp: u64) -> BigUint {
        base.modpow(&BigUint::from(exp), self.key.modulus_squared())
    }
}
