//! Catch-all pool route
//!
//! Every method and path lands here; the dispatcher does the routing.

use bytes::Bytes;
use warp::http::Method;
use warp::path::FullPath;
use warp::{Filter, Rejection};

use crate::infrastructure::http::dispatcher::SharedDispatcher;
use crate::infrastructure::http::models::PoolRequest;
use crate::infrastructure::http::query::parse_params;
use crate::infrastructure::http::responses::ResponseFormatter;
use crate::infrastructure::http::utils::{raw_query, request_body, request_size_limit, user_agent, with_dispatcher};
use crate::shared::logging::LoggingUtils;

/// Pool routes configuration
pub struct PoolRoutes;

impl PoolRoutes {
    pub fn create_pool_route(
        dispatcher: SharedDispatcher,
        max_request_size: u64,
    ) -> impl Filter<Extract = (warp::reply::Response,), Error = Rejection> + Clone {
        warp::method()
            .and(warp::path::full())
            .and(raw_query())
            .and(user_agent())
            .and(request_size_limit(max_request_size))
            .and(request_body())
            .and(with_dispatcher(dispatcher))
            .and_then(handle_pool_request)
    }
}

async fn handle_pool_request(
    method: Method,
    path: FullPath,
    query: String,
    user_agent: Option<String>,
    body: Bytes,
    dispatcher: SharedDispatcher,
) -> Result<warp::reply::Response, Rejection> {
    let request = PoolRequest {
        request_id: LoggingUtils::generate_request_id(),
        method: method.as_str().to_string(),
        path: path.as_str().to_string(),
        params: parse_params(Some(&query), &body),
        user_agent,
    };

    let response = dispatcher.dispatch(request).await;
    Ok(ResponseFormatter::into_reply(response))
}
