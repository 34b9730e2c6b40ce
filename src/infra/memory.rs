//! In-memory port implementations for development and testing.

use crate::error::{GlueError, Result};
use crate::ports::{
    BatchOutcome, FetchedObject, ObjectStore, StreamRecord, StreamSink, TableCatalog,
};
use async_trait::async_trait;
use bytes::Bytes;
use datafusion::arrow::datatypes::{Schema, SchemaRef};
use datafusion::arrow::record_batch::RecordBatch;
use datafusion::datasource::{MemTable, TableProvider};
use datafusion::prelude::{DataFrame, SessionContext};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Object store fake keyed by (bucket, key), with a fetch counter so tests
/// can assert that validation short-circuits before any fetch.
#[derive(Default)]
pub struct InMemoryObjectStore {
    objects: Mutex<HashMap<(String, String), FetchedObject>>,
    fetches: Mutex<usize>,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, bucket: &str, key: &str, content_type: &str, body: &[u8]) {
        let object = FetchedObject {
            content_type: content_type.to_string(),
            body: Bytes::copy_from_slice(body),
        };
        let mut objects = self.objects.lock().unwrap();
        objects.insert((bucket.to_string(), key.to_string()), object);
    }

    pub fn fetch_count(&self) -> usize {
        *self.fetches.lock().unwrap()
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<FetchedObject> {
        *self.fetches.lock().unwrap() += 1;
        let objects = self.objects.lock().unwrap();
        objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| GlueError::ObjectStore(format!("no such object s3://{bucket}/{key}")))
    }
}

/// Scripted reply for one `put_batch` call against the sink fake.
#[derive(Clone, Debug)]
pub enum SinkReply {
    Accepted,
    Rejected(BatchOutcome),
    Unavailable(String),
}

/// Stream sink fake that records every batch it is handed. Replies are
/// popped from a script queue; once the queue is empty every call is
/// accepted.
#[derive(Default)]
pub struct InMemoryStreamSink {
    batches: Mutex<Vec<(String, Vec<StreamRecord>)>>,
    replies: Mutex<VecDeque<SinkReply>>,
}

impl InMemoryStreamSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_reply(&self, reply: SinkReply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn batches(&self) -> Vec<(String, Vec<StreamRecord>)> {
        self.batches.lock().unwrap().clone()
    }

    pub fn batch_count(&self) -> usize {
        self.batches.lock().unwrap().len()
    }
}

#[async_trait]
impl StreamSink for InMemoryStreamSink {
    async fn put_batch(&self, stream: &str, records: Vec<StreamRecord>) -> Result<BatchOutcome> {
        let mut batches = self.batches.lock().unwrap();
        batches.push((stream.to_string(), records));
        drop(batches);

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            None | Some(SinkReply::Accepted) => Ok(BatchOutcome::default()),
            Some(SinkReply::Rejected(outcome)) => Ok(outcome),
            Some(SinkReply::Unavailable(reason)) => Err(GlueError::Stream(reason)),
        }
    }
}

/// Table catalog fake holding MemTables keyed by qualified name.
pub struct InMemoryCatalog {
    ctx: SessionContext,
    tables: Mutex<HashMap<(String, String), Arc<MemTable>>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self {
            ctx: SessionContext::new(),
            tables: Mutex::new(HashMap::new()),
        }
    }

    pub fn register(
        &self,
        database: &str,
        table: &str,
        schema: SchemaRef,
        batches: Vec<RecordBatch>,
    ) -> Result<()> {
        let provider = Arc::new(MemTable::try_new(schema, vec![batches])?);
        let mut tables = self.tables.lock().unwrap();
        tables.insert((database.to_string(), table.to_string()), provider);
        Ok(())
    }

    /// Column names of a stored table, in schema order.
    pub fn columns(&self, database: &str, table: &str) -> Option<Vec<String>> {
        let tables = self.tables.lock().unwrap();
        tables
            .get(&(database.to_string(), table.to_string()))
            .map(|provider| {
                provider
                    .schema()
                    .fields()
                    .iter()
                    .map(|field| field.name().clone())
                    .collect()
            })
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TableCatalog for InMemoryCatalog {
    async fn read_table(&self, database: &str, table: &str) -> Result<DataFrame> {
        let provider = {
            let tables = self.tables.lock().unwrap();
            tables
                .get(&(database.to_string(), table.to_string()))
                .cloned()
        };
        let provider = provider.ok_or_else(|| {
            datafusion::error::DataFusionError::Plan(format!("no such table {database}.{table}"))
        })?;
        Ok(self.ctx.read_table(provider as Arc<dyn TableProvider>)?)
    }

    async fn write_table(&self, database: &str, table: &str, frame: DataFrame) -> Result<()> {
        let schema: SchemaRef = Arc::new(Schema::from(frame.schema()));
        let batches = frame.collect().await?;
        self.register(database, table, schema, batches)
    }
}
