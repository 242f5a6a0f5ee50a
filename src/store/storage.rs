mod memory;

pub use memory::{MemoryBlobStore, StoredBlob};

use std::fmt;

use thiserror::Error;

use crate::models::errors::BoxedErr;

#[derive(Debug, Error)]
pub enum StorageError {
  #[error("failed to upload {key}: {source}")]
  Upload {
    key: String,
    #[source]
    source: BoxedErr,
  },
}

/// Client of the object storage that holds product images.
#[async_trait::async_trait]
pub trait BlobStore: fmt::Debug + Send + Sync {
  /// Stores `body` as `{path}{name}` and returns the url it can be fetched from.
  async fn upload(
    &self,
    path: &str,
    name: &str,
    content_type: &str,
    body: Vec<u8>,
  ) -> Result<String, StorageError>;
}
