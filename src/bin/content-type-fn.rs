use aws_config::BehaviorVersion;
use aws_sdk_s3::Client as S3Client;
use lakeglue::handlers::content_type::report_content_type;
use lakeglue::infra::s3::S3ObjectStore;
use lakeglue::logging;
use lakeglue::response::FunctionResponse;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::Value;

async fn handler(
    event: LambdaEvent<Value>,
    store: &S3ObjectStore,
) -> Result<FunctionResponse, Error> {
    report_content_type(store, event.payload)
        .await
        .map_err(Error::from)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init();

    let shared_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let store = S3ObjectStore::new(S3Client::new(&shared_config));

    run(service_fn(|event| handler(event, &store))).await
}
