pub mod app;
pub mod config;
pub mod constants;
pub mod domain;
pub mod error;
pub mod infra;
pub mod logging;
pub mod observability;
pub mod response;
pub mod transform;

pub use app::EditorialAggregator;
pub use error::{EditorialError, Result};
