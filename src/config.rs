use crate::constants;
use crate::error::{GlueError, Result};
use std::env;
use std::path::PathBuf;

/// Settings for the CSV forwarder function, sourced from the environment
/// (the invoking platform's configuration channel).
#[derive(Debug, Clone)]
pub struct ForwarderConfig {
    /// Name of the stream the ingestion service should write to.
    pub stream_name: String,
    /// Records accumulated before a flush. Defaults to the ingestion
    /// service's per-call cap; tests lower it to exercise batching.
    pub batch_size: usize,
}

impl ForwarderConfig {
    pub fn from_env() -> Result<Self> {
        let stream_name = env::var(constants::STREAM_NAME_VAR).map_err(|_| {
            GlueError::Config(format!(
                "{} must name the target ingestion stream",
                constants::STREAM_NAME_VAR
            ))
        })?;

        let batch_size = match env::var(constants::STREAM_BATCH_SIZE_VAR) {
            Ok(raw) => raw.parse().map_err(|_| {
                GlueError::Config(format!(
                    "{} must be a positive integer, got '{raw}'",
                    constants::STREAM_BATCH_SIZE_VAR
                ))
            })?,
            Err(_) => constants::DEFAULT_BATCH_SIZE,
        };

        Ok(Self {
            stream_name,
            batch_size,
        })
    }
}

/// Settings for the table projection job.
#[derive(Debug, Clone)]
pub struct WarehouseConfig {
    /// Root directory under which managed tables live, addressed as
    /// `<root>/<database>/<table>`.
    pub root: PathBuf,
}

impl WarehouseConfig {
    pub fn from_env() -> Self {
        let root = env::var(constants::WAREHOUSE_ROOT_VAR)
            .unwrap_or_else(|_| constants::DEFAULT_WAREHOUSE_ROOT.to_string());
        Self { root: root.into() }
    }
}
