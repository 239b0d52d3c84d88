//! Submission protocol use case
//!
//! Validates nonce submissions, hands them to the scoring collaborator and
//! reports round metadata to mining software.

use std::sync::Arc;
use tracing::{debug, info};

use crate::application::ports::PoolService;
use crate::application::views::MiningInfoView;
use crate::domain::{NonceSubmissionResponse, Submission};
use crate::shared::error::{AppError, AppResult};

pub struct SubmitNonceUseCase {
    pool: Arc<dyn PoolService>,
}

impl SubmitNonceUseCase {
    pub fn new(pool: Arc<dyn PoolService>) -> Self {
        Self { pool }
    }

    /// Validate and score one submission.
    ///
    /// Input and business failures come back as a refused response, never
    /// as an error; only unexpected collaborator failures are `Err`.
    pub async fn submit_nonce(
        &self,
        account_id: Option<&str>,
        nonce: Option<&str>,
        client_id: &str,
    ) -> AppResult<NonceSubmissionResponse> {
        let submission = match Submission::parse(account_id, nonce) {
            Ok(submission) => submission,
            Err(reason) => {
                debug!(reason = %reason, "Rejected malformed submission");
                return Ok(NonceSubmissionResponse::refused(&reason));
            }
        };

        match self.pool.check_submission(&submission, client_id).await {
            Ok(deadline) => {
                info!(
                    miner = %submission.miner,
                    nonce = submission.nonce,
                    deadline = deadline,
                    client = %client_id,
                    "Accepted submission"
                );
                Ok(NonceSubmissionResponse::accepted(deadline))
            }
            Err(AppError::Submission(reason)) => {
                debug!(miner = %submission.miner, reason = %reason, "Scoring refused submission");
                Ok(NonceSubmissionResponse::refused(&reason))
            }
            Err(e) => Err(e),
        }
    }

    /// Current round parameters, `None` before the first round
    pub async fn mining_info(&self) -> AppResult<Option<MiningInfoView>> {
        let info = self.pool.mining_info().await?;
        Ok(info.as_ref().map(MiningInfoView::from))
    }
}
