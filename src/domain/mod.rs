//! Domain layer - Core pool models and rules
//!
//! This module contains the account, amount and mining models and the
//! deadline normalization rule. Nothing here knows about HTTP.

pub mod address;
pub mod amount;
pub mod deadline;
pub mod mining;

pub use address::{Address, AddressError};
pub use amount::Amount;
pub use deadline::{default_ln_factor, normalize_deadline, CommitmentModel, PowerLawCommitment};
pub use mining::{Deadline, Miner, MiningInfo, NonceSubmissionResponse, Submission, WonBlock};
