use aws_config::BehaviorVersion;
use aws_sdk_kinesis::Client as KinesisClient;
use aws_sdk_s3::Client as S3Client;
use lakeglue::config::ForwarderConfig;
use lakeglue::handlers::csv_forward::CsvForwarder;
use lakeglue::infra::kinesis::KinesisSink;
use lakeglue::infra::s3::S3ObjectStore;
use lakeglue::logging;
use lakeglue::response::FunctionResponse;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::Value;
use std::sync::Arc;

async fn handler(
    event: LambdaEvent<Value>,
    forwarder: &CsvForwarder,
) -> Result<FunctionResponse, Error> {
    Ok(forwarder.handle(event.payload).await)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init();

    let config = ForwarderConfig::from_env()?;
    let shared_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let forwarder = CsvForwarder::new(
        Arc::new(S3ObjectStore::new(S3Client::new(&shared_config))),
        Arc::new(KinesisSink::new(KinesisClient::new(&shared_config))),
        config,
    );

    run(service_fn(|event| handler(event, &forwarder))).await
}
