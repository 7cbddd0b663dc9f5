//! Homomorphic aggregation over Paillier ciphertexts.
//!
//! Ciphertexts and public keys travel as hex strings. The crate combines
//! them (sum, weighted sum, scalar multiply) without decrypting, working
//! modulo n² of the supplied key. Key generation, encryption and decryption
//! live elsewhere.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, missing_docs)]

pub mod algebra;
pub mod cipher;
pub mod config;
pub mod contract;
pub mod error;
pub mod key;
pub mod ops;

pub use algebra::PaillierAlgebra;
pub use cipher::Ciphertext;
pub use config::ContractConfig;
pub use contract::{Call, MemoryState, PaillierContract, StateStore};
pub use error::{AggregateError, ContractError, Result};
pub use key::PublicKey;
pub use ops::{add, scalar_mul, weighted_add};
