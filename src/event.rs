use crate::error::{GlueError, Result};
use serde::Deserialize;

/// Object-storage notification payload, as delivered to the functions by
/// the trigger: a list of records, each naming a bucket and an object key.
#[derive(Debug, Deserialize)]
pub struct StorageEvent {
    #[serde(rename = "Records")]
    pub records: Vec<StorageRecord>,
}

#[derive(Debug, Deserialize)]
pub struct StorageRecord {
    pub s3: ObjectEntity,
}

#[derive(Debug, Deserialize)]
pub struct ObjectEntity {
    pub bucket: BucketRef,
    pub object: ObjectRef,
}

#[derive(Debug, Deserialize)]
pub struct BucketRef {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ObjectRef {
    /// URL-escaped key, exactly as the notification carries it.
    pub key: String,
}

/// Bucket and decoded key of the object a notification refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLocation {
    pub bucket: String,
    pub key: String,
}

impl StorageEvent {
    /// Resolves the object referenced by the first record. Notifications
    /// from the trigger carry exactly one record per invocation.
    pub fn first_object(&self) -> Result<ObjectLocation> {
        let record = self
            .records
            .first()
            .ok_or_else(|| GlueError::Event("notification carries no records".to_string()))?;

        Ok(ObjectLocation {
            bucket: record.s3.bucket.name.clone(),
            key: decode_key(&record.s3.object.key)?,
        })
    }
}

/// Decodes a URL-escaped object key. Keys are escaped form-style, so `+`
/// stands for a space.
fn decode_key(raw: &str) -> Result<String> {
    let plus_decoded = raw.replace('+', " ");
    let decoded = urlencoding::decode(&plus_decoded)
        .map_err(|e| GlueError::Event(format!("object key is not valid UTF-8: {e}")))?;
    Ok(decoded.into_owned())
}
