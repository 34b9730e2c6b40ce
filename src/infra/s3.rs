use crate::constants;
use crate::error::{GlueError, Result};
use crate::ports::{FetchedObject, ObjectStore};
use async_trait::async_trait;
use aws_sdk_s3::Client;

/// Object-store port backed by S3. One GetObject per fetch; both the
/// content type and the body come from the same response.
pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<FetchedObject> {
        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| GlueError::ObjectStore(format!("get s3://{bucket}/{key}: {e}")))?;

        let content_type = response
            .content_type()
            .unwrap_or(constants::DEFAULT_CONTENT_TYPE)
            .to_string();

        let body = response
            .body
            .collect()
            .await
            .map_err(|e| GlueError::ObjectStore(format!("read s3://{bucket}/{key} body: {e}")))?
            .into_bytes();

        Ok(FetchedObject { content_type, body })
    }
}
