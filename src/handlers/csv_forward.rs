use crate::config::ForwarderConfig;
use crate::error::Result;
use crate::event::StorageEvent;
use crate::ports::{ObjectStore, StreamRecord, StreamSink};
use crate::response::{ForwardReport, FunctionResponse};
use csv::StringRecord;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// CSV-to-Stream Forwarder: reads a delimited object, turns each data row
/// into a keyed JSON record, and hands them to the streaming sink in
/// fixed-size batches.
///
/// Delivery is best-effort by design: rejected records and failed batch
/// calls are logged and skipped, never retried or re-queued.
pub struct CsvForwarder {
    store: Arc<dyn ObjectStore>,
    sink: Arc<dyn StreamSink>,
    config: ForwarderConfig,
}

impl CsvForwarder {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        sink: Arc<dyn StreamSink>,
        config: ForwarderConfig,
    ) -> Self {
        Self {
            store,
            sink,
            config,
        }
    }

    /// Handles one notification. Never fails the invocation: a malformed
    /// payload yields a 400 (before any fetch), fetch/parse trouble yields
    /// a 500, and anything else yields a 200 carrying the count of records
    /// handed to the sink.
    #[instrument(skip(self, payload))]
    pub async fn handle(&self, payload: Value) -> FunctionResponse {
        let event: StorageEvent = match serde_json::from_value(payload) {
            Ok(event) => event,
            Err(e) => {
                warn!("rejecting malformed notification: {e}");
                return FunctionResponse::client_error(format!("malformed notification: {e}"));
            }
        };
        let location = match event.first_object() {
            Ok(location) => location,
            Err(e) => {
                warn!("rejecting malformed notification: {e}");
                return FunctionResponse::client_error(e.to_string());
            }
        };

        let object = match self.store.fetch(&location.bucket, &location.key).await {
            Ok(object) => object,
            Err(e) => {
                error!(bucket = %location.bucket, key = %location.key, "fetch failed: {e}");
                return FunctionResponse::server_error(e.to_string());
            }
        };

        match self.forward(&object.body).await {
            Ok(forwarded) => {
                info!(records = forwarded, "forwarding complete");
                FunctionResponse::ok(
                    serde_json::to_value(&ForwardReport {
                        records_forwarded: forwarded,
                    })
                    .unwrap_or_default(),
                )
            }
            Err(e) => {
                error!(bucket = %location.bucket, key = %location.key, "forwarding failed: {e}");
                FunctionResponse::server_error(e.to_string())
            }
        }
    }

    /// Parses the object body (first line is the header) and streams the
    /// data rows out in batches. Returns the number of records handed to
    /// the sink.
    async fn forward(&self, body: &[u8]) -> Result<usize> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(body);
        let headers = reader.headers()?.clone();

        let mut batch = Vec::with_capacity(self.config.batch_size);
        let mut forwarded = 0;
        for row in reader.records() {
            let row = row?;
            batch.push(to_stream_record(&headers, &row)?);
            if batch.len() >= self.config.batch_size {
                forwarded += self.flush(&mut batch).await;
            }
        }
        if !batch.is_empty() {
            forwarded += self.flush(&mut batch).await;
        }

        Ok(forwarded)
    }

    /// Sends the accumulated batch and empties it. Failures are logged and
    /// swallowed so later batches still go out.
    async fn flush(&self, batch: &mut Vec<StreamRecord>) -> usize {
        let records = std::mem::take(batch);
        let attempted = records.len();

        match self.sink.put_batch(&self.config.stream_name, records).await {
            Ok(outcome) if outcome.failed > 0 => {
                warn!(
                    failed = outcome.failed,
                    attempted, "stream rejected records in this batch"
                );
                for failure in &outcome.failures {
                    warn!(
                        index = failure.index,
                        code = %failure.code,
                        "record rejected: {}",
                        failure.message
                    );
                }
            }
            Ok(_) => debug!(records = attempted, "batch delivered"),
            Err(e) => error!(records = attempted, "batch send failed, continuing: {e}"),
        }

        attempted
    }
}

/// Zips header fields positionally with row values into a JSON object and
/// pairs the newline-terminated encoding with a fresh random partition key.
/// Rows shorter than the header lose their trailing fields; values beyond
/// the header are dropped. Kept as-is on purpose (see DESIGN.md).
fn to_stream_record(headers: &StringRecord, row: &StringRecord) -> Result<StreamRecord> {
    let mut fields = Map::new();
    for (name, value) in headers.iter().zip(row.iter()) {
        fields.insert(name.to_string(), Value::String(value.to_string()));
    }

    let mut data = serde_json::to_vec(&Value::Object(fields))?;
    data.push(b'\n');

    Ok(StreamRecord {
        data,
        partition_key: Uuid::new_v4().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::{InMemoryObjectStore, InMemoryStreamSink, SinkReply};
    use crate::ports::{BatchOutcome, RecordFailure};
    use serde_json::json;
    use std::collections::HashSet;

    fn forwarder(batch_size: usize) -> (Arc<InMemoryObjectStore>, Arc<InMemoryStreamSink>, CsvForwarder) {
        let store = Arc::new(InMemoryObjectStore::new());
        let sink = Arc::new(InMemoryStreamSink::new());
        let config = ForwarderConfig {
            stream_name: "events".to_string(),
            batch_size,
        };
        let handler = CsvForwarder::new(store.clone(), sink.clone(), config);
        (store, sink, handler)
    }

    fn notification(bucket: &str, key: &str) -> Value {
        json!({
            "Records": [{"s3": {"bucket": {"name": bucket}, "object": {"key": key}}}]
        })
    }

    fn forwarded_count(response: &FunctionResponse) -> usize {
        let report: ForwardReport = serde_json::from_str(&response.body).unwrap();
        report.records_forwarded
    }

    #[tokio::test]
    async fn missing_bucket_yields_400_without_fetching() {
        let (store, sink, handler) = forwarder(500);
        let payload = json!({
            "Records": [{"s3": {"bucket": {}, "object": {"key": "rows.csv"}}}]
        });

        let response = handler.handle(payload).await;

        assert_eq!(response.status_code, 400);
        assert_eq!(store.fetch_count(), 0);
        assert_eq!(sink.batch_count(), 0);
    }

    #[tokio::test]
    async fn empty_record_list_yields_400_without_fetching() {
        let (store, _, handler) = forwarder(500);
        let response = handler.handle(json!({ "Records": [] })).await;
        assert_eq!(response.status_code, 400);
        assert_eq!(store.fetch_count(), 0);
    }

    #[tokio::test]
    async fn missing_object_yields_500() {
        let (_, sink, handler) = forwarder(500);
        let response = handler.handle(notification("uploads", "absent.csv")).await;
        assert_eq!(response.status_code, 500);
        assert_eq!(sink.batch_count(), 0);
    }

    #[tokio::test]
    async fn header_only_input_sends_nothing() {
        let (store, sink, handler) = forwarder(500);
        store.put("uploads", "rows.csv", "text/csv", b"id,name,value\n");

        let response = handler.handle(notification("uploads", "rows.csv")).await;

        assert_eq!(response.status_code, 200);
        assert_eq!(forwarded_count(&response), 0);
        assert_eq!(sink.batch_count(), 0);
    }

    #[tokio::test]
    async fn rows_are_batched_at_the_threshold() {
        let (store, sink, handler) = forwarder(500);
        let mut body = String::from("id,name\n");
        for i in 0..1200 {
            body.push_str(&format!("{i},row{i}\n"));
        }
        store.put("uploads", "rows.csv", "text/csv", body.as_bytes());

        let response = handler.handle(notification("uploads", "rows.csv")).await;

        assert_eq!(response.status_code, 200);
        assert_eq!(forwarded_count(&response), 1200);
        let batches = sink.batches();
        let sizes: Vec<usize> = batches.iter().map(|(_, records)| records.len()).collect();
        assert_eq!(sizes, vec![500, 500, 200]);
        assert!(batches.iter().all(|(stream, _)| stream == "events"));
    }

    #[tokio::test]
    async fn threshold_of_one_sends_each_row_alone() {
        let (store, sink, handler) = forwarder(1);
        store.put(
            "uploads",
            "rows.csv",
            "text/csv",
            b"id,name,value\n1,a,10\n2,b,20\n",
        );

        let response = handler.handle(notification("uploads", "rows.csv")).await;

        assert_eq!(response.status_code, 200);
        assert_eq!(forwarded_count(&response), 2);

        let batches = sink.batches();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].1.len(), 1);
        assert_eq!(batches[1].1.len(), 1);

        let first: Value = serde_json::from_slice(&batches[0].1[0].data).unwrap();
        let second: Value = serde_json::from_slice(&batches[1].1[0].data).unwrap();
        assert_eq!(first, json!({"id": "1", "name": "a", "value": "10"}));
        assert_eq!(second, json!({"id": "2", "name": "b", "value": "20"}));
        assert!(batches[0].1[0].data.ends_with(b"\n"));
    }

    #[tokio::test]
    async fn short_and_long_rows_zip_positionally() {
        let (store, sink, handler) = forwarder(500);
        store.put(
            "uploads",
            "rows.csv",
            "text/csv",
            b"a,b,c\n1,2\n1,2,3,4\n",
        );

        let response = handler.handle(notification("uploads", "rows.csv")).await;
        assert_eq!(response.status_code, 200);

        let batches = sink.batches();
        let short: Value = serde_json::from_slice(&batches[0].1[0].data).unwrap();
        let long: Value = serde_json::from_slice(&batches[0].1[1].data).unwrap();
        assert_eq!(short, json!({"a": "1", "b": "2"}));
        assert_eq!(long, json!({"a": "1", "b": "2", "c": "3"}));
    }

    #[tokio::test]
    async fn partition_keys_are_unique_within_a_run() {
        let (store, sink, handler) = forwarder(500);
        let mut body = String::from("id\n");
        for i in 0..100 {
            body.push_str(&format!("{i}\n"));
        }
        store.put("uploads", "rows.csv", "text/csv", body.as_bytes());

        handler.handle(notification("uploads", "rows.csv")).await;

        let keys: HashSet<String> = sink
            .batches()
            .into_iter()
            .flat_map(|(_, records)| records)
            .map(|record| record.partition_key)
            .collect();
        assert_eq!(keys.len(), 100);
    }

    #[tokio::test]
    async fn failed_batches_do_not_halt_later_ones() {
        let (store, sink, handler) = forwarder(1);
        store.put("uploads", "rows.csv", "text/csv", b"id\n1\n2\n3\n");
        sink.push_reply(SinkReply::Unavailable("throughput exceeded".to_string()));
        sink.push_reply(SinkReply::Rejected(BatchOutcome {
            failed: 1,
            failures: vec![RecordFailure {
                index: 0,
                code: "ProvisionedThroughputExceededException".to_string(),
                message: "slow down".to_string(),
            }],
        }));

        let response = handler.handle(notification("uploads", "rows.csv")).await;

        // Every row is still attempted and counted.
        assert_eq!(response.status_code, 200);
        assert_eq!(forwarded_count(&response), 3);
        assert_eq!(sink.batch_count(), 3);
    }
}
