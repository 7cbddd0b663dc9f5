//! String-argument contract front end for the three aggregate calls.
//!
//! A ledger invokes functions by name with plain string arguments:
//!
//! | function            | args                                   |
//! |---------------------|----------------------------------------|
//! | `paillierWeightAdd` | `"c1,c2,.."`, `"w1,w2,.."`, `pubKey`   |
//! | `paillierAdd`       | `"c1,c2,.."`, `pubKey`                 |
//! | `paillierMul`       | `c`, `scalar`, `pubKey`                |
//!
//! Failures are reported as events on the state store and nothing is
//! written; successes may be recorded under a JSON key describing the call.

use std::collections::HashMap;

use itertools::Itertools;
use serde::Serialize;

use crate::config::ContractConfig;
use crate::error::ContractError;
use crate::ops;

/// Weighted sum entry point.
pub const FN_WEIGHT_ADD: &str = "paillierWeightAdd";
/// Plain sum entry point.
pub const FN_ADD: &str = "paillierAdd";
/// Scalar multiply entry point.
pub const FN_MUL: &str = "paillierMul";

/// Topic used when a failure cannot be tied to a known function.
pub const NOTIFY_TOPIC: &str = "Notify";
/// Event code for a failed call.
pub const OPERATE_FAIL: u32 = 1;

/// A parsed contract invocation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "call", rename_all = "camelCase")]
pub enum Call {
    /// `paillierWeightAdd`
    WeightedAdd {
        /// Hex ciphertexts.
        ciphertexts: Vec<String>,
        /// One weight per ciphertext.
        weights: Vec<u64>,
        /// Hex modulus.
        #[serde(skip)]
        pub_key: String,
    },
    /// `paillierAdd`
    Add {
        /// Hex ciphertexts.
        ciphertexts: Vec<String>,
        /// Hex modulus.
        #[serde(skip)]
        pub_key: String,
    },
    /// `paillierMul`
    Mul {
        /// Hex ciphertext.
        ciphertext: String,
        /// Multiplier.
        scalar: u64,
        /// Hex modulus.
        #[serde(skip)]
        pub_key: String,
    },
}

impl Call {
    /// Build a call from a function name and its string arguments.
    ///
    /// # Errors
    /// `UnknownFunction`, `MissingArgument`, or `InvalidArgument`.
    pub fn parse(fn_name: &str, args: &[&str]) -> Result<Self, ContractError> {
        let arg = |i: usize, name: &'static str| args.get(i).copied().ok_or(ContractError::MissingArgument(name));
        match fn_name {
            FN_WEIGHT_ADD => Ok(Self::WeightedAdd {
                ciphertexts: split_list(arg(0, "ciphertexts")?),
                weights: split_list(arg(1, "weights")?)
                    .iter()
                    .map(|w| parse_u64("weights", w))
                    .collect::<Result<_, _>>()?,
                pub_key: arg(2, "pubKey")?.trim().to_owned(),
            }),
            FN_ADD => Ok(Self::Add {
                ciphertexts: split_list(arg(0, "ciphertexts")?),
                pub_key: arg(1, "pubKey")?.trim().to_owned(),
            }),
            FN_MUL => Ok(Self::Mul {
                ciphertext: arg(0, "ciphertext")?.trim().to_owned(),
                scalar: parse_u64("scalar", arg(1, "scalar")?)?,
                pub_key: arg(2, "pubKey")?.trim().to_owned(),
            }),
            other => Err(ContractError::UnknownFunction(other.to_owned())),
        }
    }

    /// Name the call is dispatched under.
    pub fn fn_name(&self) -> &'static str {
        match self {
            Self::WeightedAdd { .. } => FN_WEIGHT_ADD,
            Self::Add { .. } => FN_ADD,
            Self::Mul { .. } => FN_MUL,
        }
    }

    /// Hex modulus the call runs under.
    pub fn pub_key(&self) -> &str {
        match self {
            Self::WeightedAdd { pub_key, .. } | Self::Add { pub_key, .. } | Self::Mul { pub_key, .. } => pub_key,
        }
    }

    fn input_count(&self) -> usize {
        match self {
            Self::WeightedAdd { ciphertexts, .. } | Self::Add { ciphertexts, .. } => ciphertexts.len(),
            Self::Mul { .. } => 1,
        }
    }

    fn execute(&self) -> Result<String, ContractError> {
        let out = match self {
            Self::WeightedAdd { ciphertexts, weights, pub_key } => {
                ops::weighted_add(ciphertexts, weights, pub_key)?
            }
            Self::Add { ciphertexts, pub_key } => ops::add(ciphertexts, pub_key)?,
            Self::Mul { ciphertext, scalar, pub_key } => ops::scalar_mul(ciphertext, *scalar, pub_key)?,
        };
        Ok(out)
    }
}

/// Empty or blank lists mean "no elements"; entries are trimmed.
fn split_list(s: &str) -> Vec<String> {
    if s.trim().is_empty() {
        return Vec::new();
    }
    s.split(',').map(|p| p.trim().to_owned()).collect()
}

fn parse_u64(name: &'static str, s: &str) -> Result<u64, ContractError> {
    s.trim().parse().map_err(|e: std::num::ParseIntError| ContractError::InvalidArgument {
        name,
        reason: format!("{s:?}: {e}"),
    })
}

/// Key under which a successful result is stored.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaillierRecord<'a> {
    /// Function name.
    pub paillier_type: &'a str,
    /// Hex modulus.
    pub pub_key: &'a str,
    /// Call arguments.
    pub data: &'a Call,
    /// Block number at execution.
    pub timestamp: u64,
}

/// Log entry emitted on failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    /// Function name, or [`NOTIFY_TOPIC`].
    pub topic: String,
    /// Block the failure happened in.
    pub block_number: u64,
    /// Always [`OPERATE_FAIL`] for now.
    pub code: u32,
    /// Error text.
    pub message: String,
}

/// Host state the contract writes to.
pub trait StateStore {
    /// Write `value` under `key`, replacing any previous value.
    fn set_state(&mut self, key: Vec<u8>, value: Vec<u8>);
    /// Read the value under `key`.
    fn get_state(&self, key: &[u8]) -> Option<&[u8]>;
    /// Append a log entry.
    fn add_event(&mut self, event: Event);
}

/// In-process [`StateStore`].
#[derive(Debug, Default)]
pub struct MemoryState {
    entries: HashMap<Vec<u8>, Vec<u8>>,
    events: Vec<Event>,
}

impl MemoryState {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Events in emission order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StateStore for MemoryState {
    fn set_state(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.entries.insert(key, value);
    }

    fn get_state(&self, key: &[u8]) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    fn add_event(&mut self, event: Event) {
        self.events.push(event);
    }
}

/// Dispatches named calls onto [`ops`] and records outcomes in `S`.
pub struct PaillierContract<S> {
    state: S,
    config: ContractConfig,
    block_number: u64,
}

impl<S: StateStore> PaillierContract<S> {
    /// Contract over `state` at block 0.
    pub fn new(state: S, config: ContractConfig) -> Self {
        Self {
            state,
            config,
            block_number: 0,
        }
    }

    /// Block number recorded in keys and events.
    pub fn set_block_number(&mut self, block_number: u64) {
        self.block_number = block_number;
    }

    /// Borrow the store.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Give back the store.
    pub fn into_state(self) -> S {
        self.state
    }

    /// Gas for `input`: zero when empty, else the configured flat rate.
    pub fn required_gas(&self, input: &[u8]) -> u64 {
        if input.is_empty() {
            0
        } else {
            self.config.gas
        }
    }

    /// Run `fn_name(args..)`. On error an event is emitted and no state
    /// changes.
    ///
    /// # Errors
    /// Any [`ContractError`]; aggregate failures arrive as
    /// [`ContractError::Aggregate`].
    pub fn run(&mut self, fn_name: &str, args: &[&str]) -> Result<String, ContractError> {
        match self.dispatch(fn_name, args) {
            Ok(result) => {
                tracing::debug!(fn_name, %result, "paillier contract call succeeded");
                Ok(result)
            }
            Err(err) => {
                let topic = match err {
                    ContractError::UnknownFunction(_) => NOTIFY_TOPIC,
                    _ => fn_name,
                };
                tracing::warn!(fn_name, error = %err, "paillier contract call failed");
                self.state.add_event(Event {
                    topic: topic.to_owned(),
                    block_number: self.block_number,
                    code: OPERATE_FAIL,
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// State key a successful `call` is stored under.
    ///
    /// # Errors
    /// [`ContractError::Encode`] if serialization fails.
    pub fn record_key(&self, call: &Call) -> Result<Vec<u8>, ContractError> {
        let record = PaillierRecord {
            paillier_type: call.fn_name(),
            pub_key: call.pub_key(),
            data: call,
            timestamp: self.block_number,
        };
        Ok(serde_json::to_vec(&record)?)
    }

    fn dispatch(&mut self, fn_name: &str, args: &[&str]) -> Result<String, ContractError> {
        let call = Call::parse(fn_name, args)?;
        let count = call.input_count();
        if count > self.config.max_inputs {
            return Err(ContractError::TooManyInputs {
                got: count,
                limit: self.config.max_inputs,
            });
        }
        if let Call::WeightedAdd { weights, .. } = &call {
            tracing::debug!(inputs = count, weights = %weights.iter().join(","), "dispatch {}", fn_name);
        } else {
            tracing::debug!(inputs = count, "dispatch {}", fn_name);
        }
        let result = call.execute()?;
        if self.config.persist_results {
            let key = self.record_key(&call)?;
            self.state.set_state(key, result.clone().into_bytes());
        }
        Ok(result)
    }
}
