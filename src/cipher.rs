//! Paillier ciphertext container and its hex wire form.
//!
//! Wire form is base-16 with no prefix. Decoding is lenient (mixed case,
//! leading zeros); encoding is canonical (lowercase, no leading zeros, zero
//! renders as `"0"`).

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;

use crate::error::{AggregateError, Result};

/// c ∈ [0, n²) under some public key.
///
/// The range is not known until the ciphertext meets a key; see
/// [`PublicKey::check`](crate::PublicKey::check).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ciphertext {
    value: BigUint,
}

impl Ciphertext {
    /// Wrap a raw integer. Range is checked later, against a key.
    pub fn new(value: BigUint) -> Self {
        Self { value }
    }

    /// Parse a hex string. Accepts `[0-9a-fA-F]+` and nothing else.
    ///
    /// # Errors
    /// [`AggregateError::MalformedCiphertext`] for empty input or any other
    /// character.
    pub fn from_hex(hex: &str) -> Result<Self> {
        parse_hex(hex)
            .map(Self::new)
            .map_err(|reason| AggregateError::MalformedCiphertext {
                index: None,
                reason,
            })
    }

    /// Canonical lowercase hex.
    pub fn to_hex(&self) -> String {
        self.value.to_str_radix(16)
    }

    /// The integer c.
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// Unwrap into the integer c.
    pub fn into_value(self) -> BigUint {
        self.value
    }
}

/// Shared by ciphertext and key decoding. `BigUint::parse_bytes` alone would
/// also accept `_` separators, so the alphabet is checked first.
pub(crate) fn parse_hex(hex: &str) -> std::result::Result<BigUint, String> {
    if hex.is_empty() {
        return Err("empty string".into());
    }
    if let Some((pos, ch)) = hex.char_indices().find(|(_, c)| !c.is_ascii_hexdigit()) {
        return Err(format!("invalid hex digit {ch:?} at offset {pos}"));
    }
    BigUint::parse_bytes(hex.as_bytes(), 16).ok_or_else(|| "not a base-16 integer".into())
}

impl From<BigUint> for Ciphertext {
    fn from(value: BigUint) -> Self {
        Self::new(value)
    }
}

impl FromStr for Ciphertext {
    type Err = AggregateError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::LowerHex for Ciphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.value, f)
    }
}

impl fmt::Display for Ciphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
