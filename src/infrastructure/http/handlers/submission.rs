//! Mining protocol handler (`/burst`)

use std::sync::Arc;

use crate::application::use_cases::SubmitNonceUseCase;
use crate::infrastructure::http::models::{PoolRequest, PoolResponse};
use crate::shared::error::AppResult;

/// Body for any request the protocol does not know. Sent with status 200.
pub const UNKNOWN_REQUEST_BODY: &str = "404 not found";

pub struct SubmissionHandler {
    use_case: Arc<SubmitNonceUseCase>,
}

impl SubmissionHandler {
    pub fn new(use_case: Arc<SubmitNonceUseCase>) -> Self {
        Self { use_case }
    }

    pub async fn handle(&self, request: &PoolRequest) -> AppResult<PoolResponse> {
        match request.param("requestType") {
            Some("submitNonce") if request.is_post() => {
                let response = self
                    .use_case
                    .submit_nonce(request.param("accountId"), request.param("nonce"), request.client_id())
                    .await?;
                Ok(PoolResponse::json(serde_json::to_vec(&response)?))
            }
            Some("getMiningInfo") => {
                let info = self.use_case.mining_info().await?;
                Ok(PoolResponse::json(serde_json::to_vec(&info)?))
            }
            _ => Ok(PoolResponse::json(UNKNOWN_REQUEST_BODY)),
        }
    }
}
