use crate::error::Result;
use async_trait::async_trait;
use bytes::Bytes;
use datafusion::prelude::DataFrame;

/// Object fetched from the store: its recorded content type and full body.
#[derive(Clone, Debug)]
pub struct FetchedObject {
    pub content_type: String,
    pub body: Bytes,
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<FetchedObject>;
}

/// One entry of a streaming batch: opaque payload bytes plus the key the
/// ingestion service distributes on.
#[derive(Clone, Debug)]
pub struct StreamRecord {
    pub data: Vec<u8>,
    pub partition_key: String,
}

/// Per-entry rejection detail reported by the ingestion service.
#[derive(Clone, Debug)]
pub struct RecordFailure {
    pub index: usize,
    pub code: String,
    pub message: String,
}

#[derive(Clone, Debug, Default)]
pub struct BatchOutcome {
    pub failed: usize,
    pub failures: Vec<RecordFailure>,
}

#[async_trait]
pub trait StreamSink: Send + Sync {
    /// Writes one batch. An `Ok` outcome may still carry rejected entries;
    /// an `Err` means the call itself failed.
    async fn put_batch(&self, stream: &str, records: Vec<StreamRecord>) -> Result<BatchOutcome>;
}

#[async_trait]
pub trait TableCatalog: Send + Sync {
    async fn read_table(&self, database: &str, table: &str) -> Result<DataFrame>;

    /// Persists the frame under the qualified name, replacing any existing
    /// table wholesale.
    async fn write_table(&self, database: &str, table: &str, frame: DataFrame) -> Result<()>;
}
