//! HTTP utilities - Common filter helpers

use bytes::Bytes;
use std::convert::Infallible;
use warp::http::header::{HeaderMap, USER_AGENT};
use warp::{Filter, Rejection};

use crate::infrastructure::http::dispatcher::SharedDispatcher;
use crate::shared::error::AppError;

/// Helper function to inject the dispatcher into a route
pub fn with_dispatcher(
    dispatcher: SharedDispatcher,
) -> impl Filter<Extract = (SharedDispatcher,), Error = Infallible> + Clone {
    warp::any().map(move || dispatcher.clone())
}

/// Raw query string, empty when the URL has none
pub fn raw_query() -> impl Filter<Extract = (String,), Error = Infallible> + Clone {
    warp::query::raw()
        .or(warp::any().map(String::new))
        .unify()
}

/// Client identifier from `User-Agent`. Non-UTF-8 bytes are replaced
/// rather than failing the request.
pub fn user_agent() -> impl Filter<Extract = (Option<String>,), Error = Infallible> + Clone {
    warp::header::headers_cloned().map(|headers: HeaderMap| {
        headers
            .get(USER_AGENT)
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
    })
}

/// Full request body. A body that ends before its declared length means
/// the client went away.
pub fn request_body() -> impl Filter<Extract = (Bytes,), Error = Rejection> + Clone {
    warp::body::bytes().or_else(|rejection: Rejection| async move {
        tracing::debug!(?rejection, "Request body could not be read");
        Err::<(Bytes,), _>(warp::reject::custom(AppError::Disconnected(
            "request body ended early".to_string(),
        )))
    })
}

/// Rejects a declared body above `limit` before it is read.
///
/// Requests without a `Content-Length` pass; the mining protocol is mostly GET.
pub fn request_size_limit(limit: u64) -> impl Filter<Extract = (), Error = Rejection> + Clone {
    warp::header::optional::<u64>("content-length")
        .and_then(move |length: Option<u64>| async move {
            match length {
                Some(size) if size > limit => Err(warp::reject::custom(AppError::RequestTooLarge { size, limit })),
                _ => Ok(()),
            }
        })
        .untuple_one()
}
