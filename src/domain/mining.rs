//! Mining domain models
//!
//! Snapshots of pool state owned by external collaborators, plus the
//! per-request submission and its response.

use serde::{Deserialize, Serialize};

use crate::domain::{address::Address, amount::Amount};
use crate::shared::error::SubmissionError;

/// Current round parameters as announced by the chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MiningInfo {
    pub height: u64,
    #[serde(with = "hex_bytes")]
    pub generation_signature: Vec<u8>,
    pub base_target: u64,
    #[serde(rename = "averageCommitmentNQT")]
    pub average_commitment_nqt: u64,
}

/// One deadline a miner achieved in a recent round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deadline {
    /// Seconds until the block could be forged
    pub deadline: u64,
    pub share_percent: u32,
    pub height: u64,
}

/// Read-only view of a tracked miner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Miner {
    pub address: Address,
    pub pending_balance: Amount,
    pub total_capacity: f64,
    pub commitment: Amount,
    pub committed_balance: Amount,
    pub shared_capacity: f64,
    pub share_percent: u32,
    pub donation_percent: u32,
    pub n_conf: u32,
    /// Fraction of the round reward, never negative
    pub share: f64,
    pub minimum_payout: Amount,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub user_agent: String,
    #[serde(default)]
    pub deadlines: Vec<Deadline>,
}

impl Miner {
    /// Smallest deadline recorded at `height`
    pub fn best_deadline(&self, height: u64) -> Option<u64> {
        self.deadlines
            .iter()
            .filter(|d| d.height == height)
            .map(|d| d.deadline)
            .min()
    }

    pub fn display_name(&self) -> Option<&str> {
        (!self.name.is_empty()).then_some(self.name.as_str())
    }
}

/// A block forged by the pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WonBlock {
    pub block_height: u64,
    pub block_id: u64,
    pub generator_id: Address,
    pub full_reward: Amount,
    pub pool_share: Amount,
}

/// A validated nonce submission, consumed once by the scoring collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission {
    pub miner: Address,
    pub nonce: u64,
}

impl Submission {
    /// Build a submission from raw protocol parameters.
    ///
    /// The account is checked first, so a missing account is reported even
    /// when the nonce is also bad.
    pub fn parse(account_id: Option<&str>, nonce: Option<&str>) -> Result<Self, SubmissionError> {
        let miner = account_id
            .and_then(|raw| Address::from_either(raw).ok())
            .ok_or(SubmissionError::AccountIdNotSet)?;
        let nonce = nonce
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .ok_or(SubmissionError::NonceNotSet)?;

        Ok(Self { miner, nonce })
    }
}

/// Body of every `submitNonce` reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonceSubmissionResponse {
    pub result: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<u64>,
}

impl NonceSubmissionResponse {
    pub const SUCCESS: &'static str = "success";

    pub fn accepted(deadline: u64) -> Self {
        Self {
            result: Self::SUCCESS.to_string(),
            deadline: Some(deadline),
        }
    }

    pub fn refused(reason: &SubmissionError) -> Self {
        Self {
            result: reason.to_string(),
            deadline: None,
        }
    }
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        hex::decode(text).map_err(serde::de::Error::custom)
    }
}
