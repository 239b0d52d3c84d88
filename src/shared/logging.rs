//! Logging utilities module
//!
//! This module provides centralized logging functionality and utilities.

use tracing::{debug, warn};

use crate::shared::error::AppError;

/// Logging utilities for the application
pub struct LoggingUtils;

impl LoggingUtils {
    /// Initialize logging with the specified configuration
    pub fn initialize(level: &str, format: &str) -> crate::Result<()> {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level));

        let builder = fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false);

        let result = if format.eq_ignore_ascii_case("json") {
            tracing::subscriber::set_global_default(builder.json().finish())
        } else {
            tracing::subscriber::set_global_default(builder.finish())
        };

        result.map_err(|e| AppError::Internal(format!("Failed to initialize logging: {}", e)))
    }

    /// Log an incoming request
    pub fn log_request(request_id: &str, method: &str, path: &str, user_agent: Option<&str>) {
        debug!(
            request_id = %request_id,
            method = %method,
            path = %path,
            user_agent = user_agent,
            "Handling request"
        );
    }

    /// Log a completed request
    pub fn log_completed(request_id: &str, path: &str, status: u16, duration_ms: u64) {
        debug!(
            request_id = %request_id,
            path = %path,
            status = status,
            duration_ms = %duration_ms,
            "Request completed"
        );
    }

    /// Log a handler failure that was turned into a best-effort response
    pub fn log_failure(request_id: &str, path: &str, error: &AppError) {
        if error.is_disconnect() {
            warn!(
                request_id = %request_id,
                path = %path,
                error = %error,
                "Client disconnected"
            );
        } else {
            warn!(
                request_id = %request_id,
                path = %path,
                error = %error,
                "Error getting response"
            );
        }
    }

    /// Generate a unique request ID
    pub fn generate_request_id() -> String {
        format!("req_{}", uuid::Uuid::new_v4().simple())
    }
}
