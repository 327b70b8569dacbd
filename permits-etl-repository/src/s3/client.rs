//! S3 implementation of [`RawStore`].
//!
//! Targets S3-compatible endpoints (LocalStack, MinIO, AWS) via the
//! AWS SDK with an endpoint override and path-style addressing.

use std::path::Path;

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use tracing::{debug, info};

use crate::errors::StoreError;
use crate::interfaces::RawStore;
use permits_etl_shared::RawRecord;

/// S3 connection configuration.
#[derive(Debug, Clone)]
pub struct S3Config {
    /// Endpoint override (e.g. LocalStack at `http://localstack:4566`).
    pub endpoint: String,
    /// Bucket holding the raw dataset.
    pub bucket: String,
    /// Object key of the raw newline-delimited JSON file.
    pub object_key: String,
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
}

/// S3-backed raw object store.
pub struct S3RawStore {
    client: Client,
    bucket: String,
    object_key: String,
}

impl S3RawStore {
    /// Create a new client from the given configuration.
    pub async fn new(config: S3Config) -> Result<Self, StoreError> {
        let credentials = aws_sdk_s3::config::Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            "permits-etl",
        );

        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_sdk_s3::config::Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .endpoint_url(&config.endpoint)
            .load()
            .await;

        // Path-style addressing: LocalStack does not resolve
        // virtual-hosted bucket names.
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(true)
            .build();

        info!(
            endpoint = %config.endpoint,
            bucket = %config.bucket,
            "Created S3 client"
        );

        Ok(Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket,
            object_key: config.object_key,
        })
    }

    /// Create the bucket if it is not listed yet.
    async fn ensure_bucket(&self) -> Result<(), StoreError> {
        let response = self
            .client
            .list_buckets()
            .send()
            .await
            .map_err(|e| StoreError::connection(e.to_string()))?;

        let exists = response
            .buckets()
            .iter()
            .any(|b| b.name() == Some(self.bucket.as_str()));

        if exists {
            debug!(bucket = %self.bucket, "Bucket already exists");
            return Ok(());
        }

        self.client
            .create_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|e| StoreError::write(e.to_string()))?;

        info!(bucket = %self.bucket, "Bucket created");
        Ok(())
    }
}

#[async_trait]
impl RawStore for S3RawStore {
    async fn upload(&self, path: &Path) -> Result<(), StoreError> {
        if !path.exists() {
            return Err(StoreError::missing_input(format!(
                "raw file not found: {}",
                path.display()
            )));
        }

        self.ensure_bucket().await?;

        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| StoreError::read(e.to_string()))?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&self.object_key)
            .body(body)
            .send()
            .await
            .map_err(|e| StoreError::write(e.to_string()))?;

        info!(
            file = %path.display(),
            bucket = %self.bucket,
            key = %self.object_key,
            "Uploaded raw file"
        );
        Ok(())
    }

    async fn verify_upload(&self) -> Result<bool, StoreError> {
        let response = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|e| StoreError::read(e.to_string()))?;

        Ok(response
            .contents()
            .iter()
            .any(|object| object.key() == Some(self.object_key.as_str())))
    }

    async fn fetch_records(&self) -> Result<Vec<RawRecord>, StoreError> {
        debug!(bucket = %self.bucket, key = %self.object_key, "Downloading raw object");

        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&self.object_key)
            .send()
            .await
            .map_err(|e| {
                let not_found = e
                    .as_service_error()
                    .map(|se| se.is_no_such_key())
                    .unwrap_or(false);
                if not_found {
                    StoreError::missing_input(format!(
                        "object '{}' not found in bucket '{}'",
                        self.object_key, self.bucket
                    ))
                } else {
                    StoreError::connection(e.to_string())
                }
            })?;

        let bytes = response
            .body
            .collect()
            .await
            .map_err(|e| StoreError::read(e.to_string()))?
            .into_bytes();

        let text = String::from_utf8(bytes.to_vec())
            .map_err(|e| StoreError::serialization(e.to_string()))?;

        let mut records = Vec::new();
        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let record: RawRecord = serde_json::from_str(line)
                .map_err(|e| StoreError::serialization(format!("invalid raw record: {}", e)))?;
            records.push(record);
        }

        info!(count = records.len(), "Loaded raw records from object store");
        Ok(records)
    }

    async fn object_count(&self) -> Result<u64, StoreError> {
        let response = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|e| StoreError::read(e.to_string()))?;

        Ok(response.key_count().unwrap_or(0) as u64)
    }
}
