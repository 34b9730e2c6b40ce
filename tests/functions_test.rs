//! End-to-end runs of both event functions against a realistic trigger
//! payload, with in-memory service fakes standing in for S3 and Kinesis.

use anyhow::Result;
use lakeglue::config::ForwarderConfig;
use lakeglue::handlers::content_type::report_content_type;
use lakeglue::handlers::csv_forward::CsvForwarder;
use lakeglue::infra::memory::{InMemoryObjectStore, InMemoryStreamSink};
use lakeglue::response::ContentTypeReport;
use serde_json::{json, Value};
use std::sync::Arc;

/// The full notification shape the trigger actually delivers; the handlers
/// only read the bucket and key and must tolerate the rest.
fn full_notification(bucket: &str, key: &str) -> Value {
    json!({
        "Records": [{
            "eventVersion": "2.1",
            "eventSource": "aws:s3",
            "awsRegion": "us-west-2",
            "eventTime": "2024-06-01T12:00:00.000Z",
            "eventName": "ObjectCreated:Put",
            "requestParameters": {"sourceIPAddress": "203.0.113.10"},
            "s3": {
                "s3SchemaVersion": "1.0",
                "configurationId": "upload-events",
                "bucket": {
                    "name": bucket,
                    "ownerIdentity": {"principalId": "EXAMPLE"},
                    "arn": format!("arn:aws:s3:::{bucket}")
                },
                "object": {
                    "key": key,
                    "size": 1024,
                    "eTag": "0123456789abcdef0123456789abcdef",
                    "sequencer": "0A1B2C3D4E5F678901"
                }
            }
        }]
    })
}

#[tokio::test]
async fn reporter_reads_content_type_from_a_full_notification() -> Result<()> {
    let store = InMemoryObjectStore::new();
    store.put("uploads", "exports/daily report.csv", "text/csv", b"a,b\n1,2\n");

    let response = report_content_type(
        &store,
        full_notification("uploads", "exports/daily+report.csv"),
    )
    .await?;

    assert_eq!(response.status_code, 200);
    let report: ContentTypeReport = serde_json::from_str(&response.body)?;
    assert_eq!(report.bucket, "uploads");
    assert_eq!(report.key, "exports/daily report.csv");
    assert_eq!(report.content_type, "text/csv");
    Ok(())
}

#[tokio::test]
async fn forwarder_streams_a_csv_from_a_full_notification() -> Result<()> {
    let store = Arc::new(InMemoryObjectStore::new());
    let sink = Arc::new(InMemoryStreamSink::new());
    store.put(
        "uploads",
        "exports/orders.csv",
        "text/csv",
        b"order_id,sku,qty\n1001,widget,2\n1002,gadget,1\n1003,widget,5\n",
    );

    let forwarder = CsvForwarder::new(
        store.clone(),
        sink.clone(),
        ForwarderConfig {
            stream_name: "order-events".to_string(),
            batch_size: 500,
        },
    );

    let response = forwarder
        .handle(full_notification("uploads", "exports/orders.csv"))
        .await;

    assert_eq!(response.status_code, 200);
    let batches = sink.batches();
    assert_eq!(batches.len(), 1);
    let (stream, records) = &batches[0];
    assert_eq!(stream, "order-events");
    assert_eq!(records.len(), 3);

    let first: Value = serde_json::from_slice(&records[0].data)?;
    assert_eq!(
        first,
        json!({"order_id": "1001", "sku": "widget", "qty": "2"})
    );
    Ok(())
}
