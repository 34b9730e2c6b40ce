use crate::error::{GlueError, Result};
use crate::event::StorageEvent;
use crate::ports::ObjectStore;
use crate::response::{ContentTypeReport, FunctionResponse};
use serde_json::Value;
use tracing::{error, info, instrument};

/// Metadata Reporter: fetches the object named by the notification and
/// reports its content type. Fetch failures are logged and re-raised so the
/// platform records a failed invocation; retries are the trigger's job.
#[instrument(skip(store, payload))]
pub async fn report_content_type(
    store: &dyn ObjectStore,
    payload: Value,
) -> Result<FunctionResponse> {
    let event: StorageEvent =
        serde_json::from_value(payload).map_err(|e| GlueError::Event(e.to_string()))?;
    let location = event.first_object()?;

    let object = match store.fetch(&location.bucket, &location.key).await {
        Ok(object) => object,
        Err(e) => {
            error!(
                bucket = %location.bucket,
                key = %location.key,
                "failed to fetch object; make sure it exists and the bucket is in the same region as this function: {e}"
            );
            return Err(e);
        }
    };

    info!(content_type = %object.content_type, "reporting content type");

    let report = ContentTypeReport {
        bucket: location.bucket,
        key: location.key,
        content_type: object.content_type,
    };
    Ok(FunctionResponse::ok(serde_json::to_value(&report)?))
}
