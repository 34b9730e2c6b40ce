use crate::error::{GlueError, Result};
use crate::ports::{BatchOutcome, RecordFailure, StreamRecord, StreamSink};
use async_trait::async_trait;
use aws_sdk_kinesis::primitives::Blob;
use aws_sdk_kinesis::types::PutRecordsRequestEntry;
use aws_sdk_kinesis::Client;

/// Streaming sink backed by Kinesis PutRecords. Callers keep batches at or
/// below the service's 500-entry cap.
pub struct KinesisSink {
    client: Client,
}

impl KinesisSink {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StreamSink for KinesisSink {
    async fn put_batch(&self, stream: &str, records: Vec<StreamRecord>) -> Result<BatchOutcome> {
        let mut entries = Vec::with_capacity(records.len());
        for record in records {
            let entry = PutRecordsRequestEntry::builder()
                .data(Blob::new(record.data))
                .partition_key(record.partition_key)
                .build()
                .map_err(|e| GlueError::Stream(e.to_string()))?;
            entries.push(entry);
        }

        let output = self
            .client
            .put_records()
            .stream_name(stream)
            .set_records(Some(entries))
            .send()
            .await
            .map_err(|e| GlueError::Stream(format!("put_records to {stream}: {e}")))?;

        let failed = output.failed_record_count().unwrap_or(0) as usize;
        let failures = output
            .records()
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.error_code().is_some())
            .map(|(index, entry)| RecordFailure {
                index,
                code: entry.error_code().unwrap_or_default().to_string(),
                message: entry.error_message().unwrap_or_default().to_string(),
            })
            .collect();

        Ok(BatchOutcome { failed, failures })
    }
}
