//! HTTP responses module
//!
//! Turns dispatcher output and warp rejections into wire replies.

use std::convert::Infallible;
use warp::http::header::{HeaderValue, CONTENT_TYPE, LOCATION};
use warp::http::StatusCode;
use warp::reject::{InvalidHeader, MissingHeader};
use warp::{Rejection, Reply};

use crate::infrastructure::http::dispatcher::best_effort;
use crate::infrastructure::http::models::PoolResponse;
use crate::shared::error::AppError;
use crate::shared::logging::LoggingUtils;

/// Response formatter for HTTP responses
pub struct ResponseFormatter;

impl ResponseFormatter {
    pub fn into_reply(response: PoolResponse) -> warp::reply::Response {
        let mut reply = response.body.to_vec().into_response();
        *reply.status_mut() = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let headers = reply.headers_mut();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(response.content_type));
        if let Some(location) = response.location.as_deref() {
            if let Ok(value) = HeaderValue::from_str(location) {
                headers.insert(LOCATION, value);
            }
        }

        reply
    }

    /// Rejections never reach the dispatcher, so map them here. Only an
    /// oversized body leaves with a non-200 status.
    pub fn from_rejection(rejection: &Rejection) -> PoolResponse {
        let request_id = LoggingUtils::generate_request_id();
        match rejection.find::<AppError>() {
            Some(error) if matches!(error, AppError::RequestTooLarge { .. }) => PoolResponse::text(413, error.to_string()),
            Some(error) => best_effort(&request_id, "-", error),
            None => best_effort(&request_id, "-", &rejection_error(rejection)),
        }
    }
}

/// Readable error for a rejection raised by warp itself
fn rejection_error(rejection: &Rejection) -> AppError {
    if let Some(header) = rejection.find::<InvalidHeader>() {
        AppError::Validation(header.to_string())
    } else if let Some(header) = rejection.find::<MissingHeader>() {
        AppError::Validation(header.to_string())
    } else if rejection.is_not_found() {
        AppError::Validation("Not Found".to_string())
    } else {
        AppError::Validation("Malformed request".to_string())
    }
}

pub async fn handle_rejection(rejection: Rejection) -> Result<warp::reply::Response, Infallible> {
    Ok(ResponseFormatter::into_reply(ResponseFormatter::from_rejection(&rejection)))
}
