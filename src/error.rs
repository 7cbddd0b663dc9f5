//! Error kinds for aggregation and contract dispatch.

use thiserror::Error;

/// Failures of the aggregation layer.
///
/// Every variant is a deterministic function of the input: retrying the same
/// call fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    /// The public key hex does not describe a usable modulus.
    #[error("malformed public key: {reason}")]
    MalformedPublicKey {
        /// What was wrong with it.
        reason: String,
    },

    /// A ciphertext hex string failed to parse.
    #[error("malformed ciphertext{}: {reason}", fmt_index(*.index))]
    MalformedCiphertext {
        /// Position in the input list, if the call took a list.
        index: Option<usize>,
        /// What was wrong with it.
        reason: String,
    },

    /// A ciphertext is not below n² for the supplied key.
    #[error("ciphertext{} is greater than or equal to n_squared", fmt_index(*.index))]
    CiphertextOutOfRange {
        /// Position in the input list, if the call took a list.
        index: Option<usize>,
    },

    /// Ciphertext and weight sequences disagree in length.
    #[error("truncated input: {ciphertexts} ciphertexts but {weights} weights")]
    TruncatedInput {
        /// Number of ciphertexts supplied.
        ciphertexts: usize,
        /// Number of weights supplied.
        weights: usize,
    },
}

impl AggregateError {
    /// Attach the list position to a per-ciphertext error.
    pub(crate) fn at(self, i: usize) -> Self {
        match self {
            Self::MalformedCiphertext { reason, .. } => Self::MalformedCiphertext {
                index: Some(i),
                reason,
            },
            Self::CiphertextOutOfRange { .. } => Self::CiphertextOutOfRange { index: Some(i) },
            other => other,
        }
    }
}

fn fmt_index(index: Option<usize>) -> String {
    index.map(|i| format!(" #{i}")).unwrap_or_default()
}

/// Failures of the string-argument contract layer.
#[derive(Debug, Error)]
pub enum ContractError {
    /// No function by that name.
    #[error("unknown function `{0}`")]
    UnknownFunction(String),

    /// Fewer arguments than the function takes.
    #[error("missing argument `{0}`")]
    MissingArgument(&'static str),

    /// An argument did not parse.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Argument name.
        name: &'static str,
        /// Parser message.
        reason: String,
    },

    /// The ciphertext list is longer than configured.
    #[error("too many inputs: {got} exceeds limit {limit}")]
    TooManyInputs {
        /// Ciphertexts supplied.
        got: usize,
        /// Configured maximum.
        limit: usize,
    },

    /// The aggregate itself failed.
    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    /// The state key could not be serialized.
    #[error("failed to encode state record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result alias for the aggregation layer.
pub type Result<T> = std::result::Result<T, AggregateError>;
