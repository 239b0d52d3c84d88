//! In-memory collaborator doubles
//!
//! Stand-ins for the pool core and the asset directory, recording what the
//! code under test asked of them.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::application::ports::{MinerStore, PoolService};
use crate::domain::{
    default_ln_factor, Address, Amount, CommitmentModel, Miner, MiningInfo, PowerLawCommitment, Submission, WonBlock,
};
use crate::infrastructure::adapters::AssetSource;
use crate::shared::error::{AppError, AppResult, SubmissionError};

enum Scoring {
    Accept(u64),
    Reject(String),
    Fail(String),
}

/// Pool engine double
pub struct MockPool {
    mining_info: Option<MiningInfo>,
    scoring: Scoring,
    current_round: Value,
    transaction_fee: Amount,
    account: Address,
    ln_factor: f64,
    commitment: PowerLawCommitment,
    submissions: Mutex<Vec<(Submission, String)>>,
}

impl MockPool {
    pub fn new() -> Self {
        Self {
            mining_info: None,
            scoring: Scoring::Accept(0),
            current_round: Value::Null,
            transaction_fee: Amount::from_planck(735_000),
            account: Address::from_id(1_000),
            ln_factor: default_ln_factor(),
            commitment: PowerLawCommitment::default(),
            submissions: Mutex::new(Vec::new()),
        }
    }

    pub fn with_mining_info(mut self, info: MiningInfo) -> Self {
        self.mining_info = Some(info);
        self
    }

    pub fn with_deadline(mut self, deadline: u64) -> Self {
        self.scoring = Scoring::Accept(deadline);
        self
    }

    pub fn with_rejection(mut self, reason: &str) -> Self {
        self.scoring = Scoring::Reject(reason.to_string());
        self
    }

    pub fn with_failure(mut self, message: &str) -> Self {
        self.scoring = Scoring::Fail(message.to_string());
        self
    }

    pub fn with_current_round(mut self, round: Value) -> Self {
        self.current_round = round;
        self
    }

    pub fn with_transaction_fee(mut self, fee: Amount) -> Self {
        self.transaction_fee = fee;
        self
    }

    pub fn with_account(mut self, account: Address) -> Self {
        self.account = account;
        self
    }

    pub fn with_commitment_exponent(mut self, exponent: f64) -> Self {
        self.commitment = PowerLawCommitment::new(exponent);
        self
    }

    /// Submissions that reached scoring, with their client ids
    pub fn submissions(&self) -> Vec<(Submission, String)> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl PoolService for MockPool {
    async fn mining_info(&self) -> AppResult<Option<MiningInfo>> {
        Ok(self.mining_info.clone())
    }

    async fn check_submission(&self, submission: &Submission, client_id: &str) -> AppResult<u64> {
        self.submissions
            .lock()
            .unwrap()
            .push((*submission, client_id.to_string()));

        match &self.scoring {
            Scoring::Accept(deadline) => Ok(*deadline),
            Scoring::Reject(reason) => Err(SubmissionError::Rejected(reason.clone()).into()),
            Scoring::Fail(message) => Err(AppError::Upstream(message.clone())),
        }
    }

    async fn current_round_info(&self) -> AppResult<Value> {
        Ok(self.current_round.clone())
    }

    async fn transaction_fee(&self) -> AppResult<Amount> {
        Ok(self.transaction_fee)
    }

    fn account(&self) -> Address {
        self.account
    }

    fn ln_factor(&self) -> f64 {
        self.ln_factor
    }

    fn commitment_model(&self) -> Arc<dyn CommitmentModel> {
        Arc::new(self.commitment)
    }
}

/// Storage double
#[derive(Default)]
pub struct MockStore {
    miners: Vec<Miner>,
    won_blocks: Vec<WonBlock>,
    failure: Option<AppError>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_miners(mut self, miners: Vec<Miner>) -> Self {
        self.miners = miners;
        self
    }

    pub fn with_won_blocks(mut self, blocks: Vec<WonBlock>) -> Self {
        self.won_blocks = blocks;
        self
    }

    /// Every query fails with `error`
    pub fn failing(error: AppError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    fn check(&self) -> AppResult<()> {
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl MinerStore for MockStore {
    async fn miners_filtered(&self) -> AppResult<Vec<Miner>> {
        self.check()?;
        Ok(self.miners.clone())
    }

    async fn miner(&self, address: Address) -> AppResult<Option<Miner>> {
        self.check()?;
        Ok(self.miners.iter().find(|m| m.address == address).cloned())
    }

    async fn won_blocks(&self, limit: usize) -> AppResult<Vec<WonBlock>> {
        self.check()?;
        Ok(self.won_blocks.iter().take(limit).cloned().collect())
    }
}

/// Asset source that counts reads
#[derive(Default)]
pub struct CountingAssetSource {
    files: HashMap<PathBuf, Vec<u8>>,
    reads: AtomicUsize,
    failure: Option<AppError>,
}

impl CountingAssetSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl AsRef<Path>, contents: &str) -> Self {
        self.with_bytes(path, contents.as_bytes().to_vec())
    }

    pub fn with_bytes(mut self, path: impl AsRef<Path>, contents: Vec<u8>) -> Self {
        self.files.insert(path.as_ref().to_path_buf(), contents);
        self
    }

    /// Every read fails with `error`
    pub fn failing(error: AppError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssetSource for CountingAssetSource {
    async fn read(&self, path: &Path) -> AppResult<Option<Vec<u8>>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        Ok(self.files.get(path).cloned())
    }
}
