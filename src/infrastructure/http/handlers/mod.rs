//! HTTP handlers module
//!
//! One handler per path family: the mining protocol, the statistics API and
//! the dashboard assets.

pub mod assets;
pub mod statistics;
pub mod submission;

pub use assets::AssetServer;
pub use statistics::StatisticsHandler;
pub use submission::SubmissionHandler;
