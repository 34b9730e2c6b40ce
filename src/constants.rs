/// Shared constants for the event functions and the batch job.

/// Records accumulated per streaming PutRecords call. The ingestion
/// service caps a single call at 500 entries.
pub const DEFAULT_BATCH_SIZE: usize = 500;

// Environment variables recognized by the binaries
pub const STREAM_NAME_VAR: &str = "STREAM_NAME";
pub const STREAM_BATCH_SIZE_VAR: &str = "STREAM_BATCH_SIZE";
pub const WAREHOUSE_ROOT_VAR: &str = "WAREHOUSE_ROOT";

pub const DEFAULT_WAREHOUSE_ROOT: &str = "warehouse";

/// Content type reported when the object store has none on record.
pub const DEFAULT_CONTENT_TYPE: &str = "binary/octet-stream";
