//! Contract layer settings.

use serde::{Deserialize, Serialize};

/// Tunables for [`PaillierContract`](crate::contract::PaillierContract).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContractConfig {
    /// Flat gas charged for any non-empty input.
    pub gas: u64,
    /// Largest ciphertext list a single call may carry.
    pub max_inputs: usize,
    /// Write successful results to the state store.
    pub persist_results: bool,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            gas: 21_000,
            max_inputs: 1024,
            persist_results: true,
        }
    }
}

impl ContractConfig {
    /// Parse from JSON; absent fields take their defaults.
    ///
    /// # Errors
    /// Any `serde_json` error, e.g. a field of the wrong type.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}
