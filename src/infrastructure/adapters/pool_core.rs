//! Pool core adapter
//!
//! JSON-RPC 2.0 client for the external pool core, which owns the ledger,
//! the miner tracker and the scoring engine. Requests are sent once; a slow
//! or failing pool core simply fails the request that needed it.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::application::ports::{MinerStore, PoolService};
use crate::config::AppConfig;
use crate::domain::{Address, Amount, CommitmentModel, Miner, MiningInfo, PowerLawCommitment, Submission, WonBlock};
use crate::shared::error::{AppError, AppResult, SubmissionError};

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: Value,
    id: u64,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// Client for the pool core's JSON-RPC endpoint
pub struct PoolCoreClient {
    client: Client,
    rpc_url: String,
    account: Address,
    ln_factor: f64,
    commitment: PowerLawCommitment,
    next_id: AtomicU64,
}

impl PoolCoreClient {
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.pool_core.timeout_seconds))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            rpc_url: config.pool_core.rpc_url.clone(),
            account: config.pool.pool_account(),
            ln_factor: config.pool.ln_factor(),
            commitment: config.pool.commitment_model(),
            next_id: AtomicU64::new(1),
        })
    }

    /// One JSON-RPC round trip. The inner `Err` is an error object from the
    /// pool core; transport and decoding failures are the outer `Err`.
    async fn call(&self, method: &str, params: Value) -> AppResult<Result<Value, JsonRpcError>> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
        };

        debug!(method = %method, id = request.id, "Calling pool core");

        let response = self
            .client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(format!("HTTP error: {}", response.status())));
        }

        let envelope: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse response: {}", e)))?;

        Ok(interpret(envelope))
    }

    /// Like [`call`](Self::call), treating an error object as a failure
    async fn call_typed<T: DeserializeOwned>(&self, method: &str, params: Value) -> AppResult<T> {
        match self.call(method, params).await? {
            Ok(result) => serde_json::from_value(result)
                .map_err(|e| AppError::Upstream(format!("Unexpected {} result: {}", method, e))),
            Err(error) => {
                warn!(method = %method, code = error.code, message = %error.message, "Pool core returned an error");
                Err(AppError::Upstream(format!("{} failed: {}", method, error.message)))
            }
        }
    }
}

fn interpret(envelope: JsonRpcResponse) -> Result<Value, JsonRpcError> {
    match (envelope.error, envelope.result) {
        (Some(error), _) => Err(error),
        (None, Some(result)) => Ok(result),
        // A bare `null` result deserializes as a missing field
        (None, None) => Ok(Value::Null),
    }
}

/// Deadlines may come back as a JSON number or a decimal string
fn deadline_from(value: &Value) -> AppResult<u64> {
    value
        .as_u64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
        .ok_or_else(|| AppError::Upstream(format!("Invalid deadline in checkSubmission result: {}", value)))
}

#[async_trait]
impl MinerStore for PoolCoreClient {
    async fn miners_filtered(&self) -> AppResult<Vec<Miner>> {
        self.call_typed("getMinersFiltered", json!({})).await
    }

    async fn miner(&self, address: Address) -> AppResult<Option<Miner>> {
        self.call_typed("getMiner", json!({ "accountId": address.id_string() }))
            .await
    }

    async fn won_blocks(&self, limit: usize) -> AppResult<Vec<WonBlock>> {
        self.call_typed("getWonBlocks", json!({ "limit": limit })).await
    }
}

#[async_trait]
impl PoolService for PoolCoreClient {
    async fn mining_info(&self) -> AppResult<Option<MiningInfo>> {
        self.call_typed("getMiningInfo", json!({})).await
    }

    async fn check_submission(&self, submission: &Submission, client_id: &str) -> AppResult<u64> {
        let params = json!({
            "accountId": submission.miner.id_string(),
            "nonce": submission.nonce.to_string(),
            "clientId": client_id,
        });

        match self.call("checkSubmission", params).await? {
            Ok(result) => deadline_from(&result),
            Err(error) => Err(SubmissionError::Rejected(error.message).into()),
        }
    }

    async fn current_round_info(&self) -> AppResult<Value> {
        self.call_typed("getCurrentRoundInfo", json!({})).await
    }

    async fn transaction_fee(&self) -> AppResult<Amount> {
        self.call_typed("getTransactionFee", json!({})).await
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
