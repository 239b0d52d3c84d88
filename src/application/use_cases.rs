//! Use cases - Application business operations

pub mod statistics;
pub mod submission;

pub use statistics::StatisticsUseCase;
pub use submission::SubmitNonceUseCase;
