use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::{Client, config::SharedCredentialsProvider, primitives::ByteStream};
use tracing::info;

use crate::{
  models::{
    config::StorageConfig,
    errors::{ErrorType, InternalError},
  },
  store::storage::{BlobStore, StorageError},
  utils::net::validate_url_target,
};

/// S3 compatible storage (AWS, MinIO) for product images.
#[derive(Debug)]
pub struct ObjectStorage {
  client: Client,
  config: StorageConfig,
}

impl ObjectStorage {
  pub async fn new(cfg: StorageConfig) -> Result<Self, InternalError> {
    let path = "products.server.object_storage";
    validate_url_target(&cfg.endpoint).map_err(|e| {
      InternalError::new(path, Box::new(e), ErrorType::InvalidUrl, false, "invalid storage endpoint")
    })?;

    let cred = Credentials::new(&cfg.access_key_id, &cfg.secret_access_key, None, None, "market");

    let cred_provider = SharedCredentialsProvider::new(cred);
    let s3_config = aws_sdk_s3::Config::builder()
      .behavior_version(BehaviorVersion::latest())
      .credentials_provider(cred_provider)
      .region(Region::new(cfg.region.clone()))
      .endpoint_url(&cfg.endpoint)
      .force_path_style(true)
      .build();

    let client = Client::from_conf(s3_config);
    Self::ensure_bucket(&client, &cfg.bucket).await?;
    Ok(Self { client, config: cfg })
  }

  pub async fn ensure_bucket(client: &Client, bucket: &str) -> Result<(), InternalError> {
    match client.head_bucket().bucket(bucket).send().await {
      Ok(_) => {
        info!(bucket, "bucket already exists");
        Ok(())
      }
      Err(_) => {
        client.create_bucket().bucket(bucket).send().await.map_err(|err| {
          InternalError::new(
            "products.server.ensure_bucket",
            Box::new(err),
            ErrorType::ObjectStorage,
            false,
            "failed to create a bucket",
          )
        })?;

        info!(bucket, "bucket created");
        Ok(())
      }
    }
  }

  fn full_key(&self, key: &str) -> String {
    format!("{}{}", self.config.path_prefix, key)
  }

  /// Public url of an object, `{public_url}/{bucket}/{key}`.
  pub fn object_url(&self, full_key: &str) -> String {
    let base = self.config.public_url.as_deref().unwrap_or(&self.config.endpoint);
    format!("{}/{}/{}", base.trim_end_matches('/'), self.config.bucket, full_key)
  }
}

#[async_trait::async_trait]
impl BlobStore for ObjectStorage {
  async fn upload(
    &self,
    path: &str,
    name: &str,
    content_type: &str,
    body: Vec<u8>,
  ) -> Result<String, StorageError> {
    let key = self.full_key(&format!("{}{}", path, name));

    self
      .client
      .put_object()
      .bucket(&self.config.bucket)
      .key(&key)
      .content_type(content_type)
      .body(ByteStream::from(body))
      .send()
      .await
      .map_err(|e| StorageError::Upload { key: key.clone(), source: Box::new(e) })?;

    Ok(self.object_url(&key))
  }
}
