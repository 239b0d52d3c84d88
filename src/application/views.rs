//! Client-facing JSON shapes
//!
//! Projections of collaborator snapshots into what the dashboard and miner
//! clients consume. 64-bit ids and round numbers are rendered as decimal
//! strings so JavaScript clients do not lose precision.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::domain::{normalize_deadline, CommitmentModel, Miner, MiningInfo, WonBlock};

/// Round parameters as served to mining software
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MiningInfoView {
    pub height: String,
    pub generation_signature: String,
    pub base_target: String,
    #[serde(rename = "averageCommitmentNQT")]
    pub average_commitment_nqt: String,
}

impl From<&MiningInfo> for MiningInfoView {
    fn from(info: &MiningInfo) -> Self {
        Self {
            height: info.height.to_string(),
            generation_signature: hex::encode(&info.generation_signature),
            base_target: info.base_target.to_string(),
            average_commitment_nqt: info.average_commitment_nqt.to_string(),
        }
    }
}

/// One miner as shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinerView {
    pub address: String,
    #[serde(rename = "addressRS")]
    pub address_rs: String,
    pub pending_balance: String,
    pub total_capacity: f64,
    pub commitment: String,
    pub committed_balance: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commitment_ratio: Option<f64>,
    pub commitment_factor: f64,
    pub shared_capacity: f64,
    pub share_percent: u32,
    pub donation_percent: u32,
    pub n_conf: u32,
    pub share: f64,
    pub minimum_payout: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_round_best_deadline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadlines: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shares: Option<Vec<u32>>,
}

/// Builds [`MinerView`]s, applying deadline normalization
#[derive(Clone)]
pub struct MinerViewBuilder {
    commitment_model: Arc<dyn CommitmentModel>,
    ln_factor: f64,
}

impl MinerViewBuilder {
    pub fn new(commitment_model: Arc<dyn CommitmentModel>, ln_factor: f64) -> Self {
        Self {
            commitment_model,
            ln_factor,
        }
    }

    pub fn project(&self, miner: &Miner, mining_info: Option<&MiningInfo>, with_deadlines: bool) -> MinerView {
        let commitment_factor = self.commitment_model.factor(miner.commitment, mining_info);
        let commitment_ratio = mining_info
            .filter(|info| info.average_commitment_nqt > 0)
            .map(|info| miner.commitment.planck() as f64 / info.average_commitment_nqt as f64);

        let height = mining_info.map(|info| info.height).unwrap_or(0);
        let current_round_best_deadline = miner
            .best_deadline(height)
            .map(|raw| normalize_deadline(raw as f64, commitment_factor, self.ln_factor).to_string());

        let (deadlines, shares) = if with_deadlines {
            let (deadlines, shares): (Vec<u64>, Vec<u32>) = miner
                .deadlines
                .iter()
                .map(|d| (d.deadline, d.share_percent))
                .unzip();
            (Some(deadlines), Some(shares))
        } else {
            (None, None)
        };

        MinerView {
            address: miner.address.id_string(),
            address_rs: miner.address.full_address(),
            pending_balance: miner.pending_balance.to_formatted_string(),
            total_capacity: miner.total_capacity,
            commitment: miner.commitment.to_formatted_string(),
            committed_balance: miner.committed_balance.to_formatted_string(),
            commitment_ratio,
            commitment_factor,
            shared_capacity: miner.shared_capacity,
            share_percent: miner.share_percent,
            donation_percent: miner.donation_percent,
            n_conf: miner.n_conf,
            share: miner.share,
            minimum_payout: miner.minimum_payout.to_formatted_string(),
            current_round_best_deadline,
            name: miner.display_name().map(str::to_string),
            user_agent: (!miner.user_agent.is_empty()).then(|| miner.user_agent.clone()),
            deadlines,
            shares,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinersResponse {
    pub miners: Vec<MinerView>,
    pub explorer: String,
    pub pool_capacity: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopMinersResponse {
    pub top_miners: Vec<MinerView>,
    pub explorer: String,
    pub others_share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WonBlockView {
    pub height: u64,
    pub id: String,
    pub generator: String,
    #[serde(rename = "generatorRS")]
    pub generator_rs: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub reward: String,
    pub pool_share: String,
}

impl WonBlockView {
    pub fn new(block: &WonBlock, generator_name: Option<String>) -> Self {
        Self {
            height: block.block_height,
            id: block.block_id.to_string(),
            generator: block.generator_id.id_string(),
            generator_rs: block.generator_id.full_address(),
            name: generator_name,
            reward: block.full_reward.to_formatted_string(),
            pool_share: block.pool_share.to_formatted_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WonBlocksResponse {
    pub won_blocks: Vec<WonBlockView>,
    pub explorer: String,
}

/// Flat pool settings snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolConfigView {
    pub version: String,
    pub explorer: String,
    pub pool_name: String,
    pub pool_account: String,
    #[serde(rename = "poolAccountRS")]
    pub pool_account_rs: String,
    pub n_avg: u32,
    pub n_min: u32,
    pub max_deadline: u64,
    pub process_lag: u32,
    pub fee_recipient: String,
    #[serde(rename = "feeRecipientRS")]
    pub fee_recipient_rs: String,
    pub pool_fee_percentage: f64,
    pub donation_recipient: String,
    #[serde(rename = "donationRecipientRS")]
    pub donation_recipient_rs: String,
    pub donation_percent: u32,
    pub winner_reward_percentage: f64,
    pub default_minimum_payout: f64,
    pub minimum_minimum_payout: f64,
    pub min_payouts_per_transaction: u32,
    pub transaction_fee: String,
}

/// Current round summary, passed through untouched
pub type CurrentRoundView = Value;
