//! HTTP infrastructure module
//!
//! This module contains HTTP-related concerns including models, parameter
//! decoding, handlers, the dispatcher, routes and the server.

pub mod dispatcher;
pub mod handlers;
pub mod models;
pub mod query;
pub mod responses;
pub mod routes;
pub mod server;
pub mod utils;

pub use dispatcher::Dispatcher;
pub use models::{PoolRequest, PoolResponse};
pub use responses::ResponseFormatter;
pub use server::HttpServer;
