use thiserror::Error;

#[derive(Error, Debug)]
pub enum GlueError {
    #[error("Malformed notification event: {0}")]
    Event(String),

    #[error("Object store request failed: {0}")]
    ObjectStore(String),

    #[error("Stream write failed: {0}")]
    Stream(String),

    #[error("Query engine error: {0}")]
    Catalog(#[from] datafusion::error::DataFusionError),

    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Environment variable error: {0}")]
    Env(#[from] std::env::VarError),
}

pub type Result<T> = std::result::Result<T, GlueError>;
