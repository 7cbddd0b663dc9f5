//! Public key handle.

use std::str::FromStr;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;

use crate::cipher::{parse_hex, Ciphertext};
use crate::error::{AggregateError, Result};

/// Paillier public key: modulus n plus the values derived from it.
///
/// Built per call from its hex form; n² and g = n + 1 are computed once at
/// load time and live as long as the handle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    n: BigUint,
    n_squared: BigUint,
    g: BigUint,
}

impl PublicKey {
    /// Wrap a modulus.
    ///
    /// # Errors
    /// [`AggregateError::MalformedPublicKey`] for n < 2, which has no
    /// ciphertext space, and for even n, which cannot be a product of two odd
    /// primes.
    pub fn new(n: BigUint) -> Result<Self> {
        if n <= BigUint::one() {
            return Err(AggregateError::MalformedPublicKey {
                reason: format!("modulus {n:x} is too small"),
            });
        }
        if n.is_even() {
            return Err(AggregateError::MalformedPublicKey {
                reason: format!("modulus {n:x} is even"),
            });
        }
        let n_squared = &n * &n;
        let g = &n + 1u32;
        Ok(Self { n, n_squared, g })
    }

    /// Load a key from the hex of its modulus.
    ///
    /// # Errors
    /// [`AggregateError::MalformedPublicKey`] if the hex or the modulus is bad.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let n = parse_hex(hex).map_err(|reason| AggregateError::MalformedPublicKey { reason })?;
        Self::new(n)
    }

    /// Canonical hex of n.
    pub fn to_hex(&self) -> String {
        self.n.to_str_radix(16)
    }

    /// n
    pub fn modulus(&self) -> &BigUint {
        &self.n
    }

    /// n², the ciphertext modulus.
    pub fn modulus_squared(&self) -> &BigUint {
        &self.n_squared
    }

    /// g = n + 1
    pub fn generator(&self) -> &BigUint {
        &self.g
    }

    /// E(0) with randomness 1, the additive identity for sums.
    pub fn encrypt_zero(&self) -> Ciphertext {
        Ciphertext::new(BigUint::one())
    }

    /// Reject ciphertexts outside [0, n²).
    ///
    /// # Errors
    /// [`AggregateError::CiphertextOutOfRange`] with no index.
    pub fn check(&self, c: &Ciphertext) -> Result<()> {
        if c.value() >= &self.n_squared {
            tracing::warn!(bits = c.value().bits(), "cipher is greater than or equal to n_squared");
            return Err(AggregateError::CiphertextOutOfRange { index: None });
        }
        Ok(())
    }
}

impl FromStr for PublicKey {
    type Err = AggregateError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}
