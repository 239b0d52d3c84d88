//! Collaborator interfaces
//!
//! The ledger, miner tracker and scoring engine live outside this service.
//! They are reached only through these traits; implementations are
//! responsible for their own synchronization.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::domain::{
    default_ln_factor, Address, Amount, CommitmentModel, Miner, MiningInfo, PowerLawCommitment, Submission, WonBlock,
};
use crate::shared::error::AppResult;

/// Query side of the pool's persistent storage
#[async_trait]
pub trait MinerStore: Send + Sync {
    /// Miners currently qualified for the round
    async fn miners_filtered(&self) -> AppResult<Vec<Miner>>;

    async fn miner(&self, address: Address) -> AppResult<Option<Miner>>;

    /// Most recent won blocks, newest first
    async fn won_blocks(&self, limit: usize) -> AppResult<Vec<WonBlock>>;
}

/// The pool engine: round state, accounts and scoring
#[async_trait]
pub trait PoolService: Send + Sync {
    /// `None` until the first round is known
    async fn mining_info(&self) -> AppResult<Option<MiningInfo>>;

    /// Score a submission and return the accepted deadline.
    ///
    /// Business refusals come back as `AppError::Submission`.
    async fn check_submission(&self, submission: &Submission, client_id: &str) -> AppResult<u64>;

    /// Round summary, already in its wire shape
    async fn current_round_info(&self) -> AppResult<Value>;

    async fn transaction_fee(&self) -> AppResult<Amount>;

    fn account(&self) -> Address;

    fn ln_factor(&self) -> f64 {
        default_ln_factor()
    }

    /// Commitment weighting the engine scores deadlines with
    fn commitment_model(&self) -> Arc<dyn CommitmentModel> {
        Arc::new(PowerLawCommitment::default())
    }
}
