pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod handlers;
pub mod jobs;
pub mod logging;
pub mod ports;
pub mod response;

// Infrastructure implementations of the external-service ports
pub mod infra;

pub use error::{GlueError, Result};
