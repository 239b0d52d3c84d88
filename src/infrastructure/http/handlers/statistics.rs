//! Statistics API handler (`/api`)

use serde::Serialize;
use std::sync::Arc;

use crate::application::use_cases::StatisticsUseCase;
use crate::infrastructure::http::models::{PoolRequest, PoolResponse};
use crate::shared::error::AppResult;

pub const API_PREFIX: &str = "/api";

pub struct StatisticsHandler {
    use_case: Arc<StatisticsUseCase>,
}

impl StatisticsHandler {
    pub fn new(use_case: Arc<StatisticsUseCase>) -> Self {
        Self { use_case }
    }

    pub async fn handle(&self, request: &PoolRequest) -> AppResult<PoolResponse> {
        let route = request.path.strip_prefix(API_PREFIX).unwrap_or(&request.path);

        // Prefix matches; `/getMiners` must be tried before `/getMiner/`
        if route.starts_with("/getMiners") {
            json(&self.use_case.miners().await?)
        } else if let Some(address) = route.strip_prefix("/getMiner/") {
            json(&self.use_case.miner(address).await?)
        } else if route.starts_with("/getConfig") {
            json(&self.use_case.pool_config().await?)
        } else if route.starts_with("/getCurrentRound") {
            json(&self.use_case.current_round().await?)
        } else if route.starts_with("/getTop10Miners") {
            json(&self.use_case.top_miners().await?)
        } else if route.starts_with("/getWonBlocks") {
            json(&self.use_case.won_blocks().await?)
        } else {
            Ok(PoolResponse::json("null"))
        }
    }
}

fn json<T: Serialize>(value: &T) -> AppResult<PoolResponse> {
    Ok(PoolResponse::json(serde_json::to_vec(value)?))
}
