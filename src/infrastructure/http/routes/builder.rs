//! Route builder module
//!
//! This module contains the main route builder that assembles the
//! application routes and their rejection handling.

use warp::Filter;

use crate::config::AppConfig;
use crate::infrastructure::http::dispatcher::SharedDispatcher;
use crate::infrastructure::http::responses::handle_rejection;
use crate::infrastructure::http::routes::PoolRoutes;

/// Route builder that orchestrates the creation of all application routes
pub struct RouteBuilder;

impl RouteBuilder {
    /// Build all application routes
    pub fn build_routes(
        config: &AppConfig,
        dispatcher: SharedDispatcher,
    ) -> impl Filter<Extract = impl warp::Reply, Error = std::convert::Infallible> + Clone {
        PoolRoutes::create_pool_route(dispatcher, config.server.max_request_size).recover(handle_rejection)
    }
}
