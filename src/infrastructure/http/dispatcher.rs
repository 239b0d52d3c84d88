//! Request dispatcher
//!
//! Picks one handler per request by path prefix and turns any failure into
//! a best-effort 200 reply. Nothing is retried.

use std::sync::Arc;
use std::time::Instant;

use crate::infrastructure::http::handlers::{AssetServer, StatisticsHandler, SubmissionHandler};
use crate::infrastructure::http::handlers::statistics::API_PREFIX;
use crate::infrastructure::http::models::{PoolRequest, PoolResponse, CONTENT_TYPE_HTML};
use crate::shared::error::AppError;
use crate::shared::logging::LoggingUtils;

pub const PROTOCOL_PREFIX: &str = "/burst";

pub struct Dispatcher {
    submission: SubmissionHandler,
    statistics: StatisticsHandler,
    assets: AssetServer,
}

impl Dispatcher {
    pub fn new(submission: SubmissionHandler, statistics: StatisticsHandler, assets: AssetServer) -> Self {
        Self {
            submission,
            statistics,
            assets,
        }
    }

    pub async fn dispatch(&self, request: PoolRequest) -> PoolResponse {
        let started = Instant::now();
        LoggingUtils::log_request(
            &request.request_id,
            &request.method,
            &request.path,
            request.user_agent.as_deref(),
        );

        let result = if request.path.starts_with(PROTOCOL_PREFIX) {
            self.submission.handle(&request).await
        } else if request.path.starts_with(API_PREFIX) {
            self.statistics.handle(&request).await
        } else {
            self.assets.serve(&request.path).await
        };

        let response = match result {
            Ok(response) => response,
            Err(error) => best_effort(&request.request_id, &request.path, &error),
        };

        LoggingUtils::log_completed(
            &request.request_id,
            &request.path,
            response.status,
            started.elapsed().as_millis() as u64,
        );
        response
    }
}

/// Reply for a failed request: empty when the client went away, otherwise
/// the error text
pub fn best_effort(request_id: &str, path: &str, error: &AppError) -> PoolResponse {
    LoggingUtils::log_failure(request_id, path, error);

    if error.is_disconnect() {
        PoolResponse::new(200, CONTENT_TYPE_HTML, "")
    } else {
        PoolResponse::new(200, CONTENT_TYPE_HTML, error.to_string())
    }
}

/// Shared handle for the warp filters
pub type SharedDispatcher = Arc<Dispatcher>;
