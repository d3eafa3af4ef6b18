//! Article credibility checks: claim extraction, web evidence retrieval and
//! evidence-grounded claim verification behind a per-client daily quota.

pub mod config;
pub mod error;
pub mod limiter;
pub mod models;
pub mod pipeline;
pub mod server;

pub use error::{Error, Result};
