use parking_lot::Mutex;

use crate::store::storage::{BlobStore, StorageError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
  pub key: String,
  pub content_type: String,
  pub body: Vec<u8>,
}

/// Keeps uploaded objects in memory, serves them from `memory://`.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
  blobs: Mutex<Vec<StoredBlob>>,
  fail_matching: Mutex<Option<String>>,
}

impl MemoryBlobStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Makes every upload whose key contains `pattern` fail.
  pub fn fail_uploads_matching(&self, pattern: impl Into<String>) {
    *self.fail_matching.lock() = Some(pattern.into());
  }

  pub fn clear_failures(&self) {
    *self.fail_matching.lock() = None;
  }

  pub fn uploads(&self) -> Vec<StoredBlob> {
    self.blobs.lock().clone()
  }

  pub fn upload_count(&self) -> usize {
    self.blobs.lock().len()
  }
}

#[async_trait::async_trait]
impl BlobStore for MemoryBlobStore {
  async fn upload(
    &self,
    path: &str,
    name: &str,
    content_type: &str,
    body: Vec<u8>,
  ) -> Result<String, StorageError> {
    let key = format!("{}{}", path, name);

    if let Some(pattern) = self.fail_matching.lock().as_deref() {
      if key.contains(pattern) {
        return Err(StorageError::Upload { key, source: "upload rejected by storage".into() });
      }
    }

    let url = format!("memory://{}", key);
    self.blobs.lock().push(StoredBlob { key, content_type: content_type.to_string(), body });
    Ok(url)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn upload_returns_url_and_records_blob() {
    let store = MemoryBlobStore::new();
    let url = store.upload("products/imgs/original/", "a.png", "image/png", vec![1, 2]).await.unwrap();
    assert_eq!(url, "memory://products/imgs/original/a.png");
    assert_eq!(store.upload_count(), 1);
    assert_eq!(store.uploads()[0].key, "products/imgs/original/a.png");
  }

  #[tokio::test]
  async fn matching_uploads_fail() {
    let store = MemoryBlobStore::new();
    store.fail_uploads_matching("resized/");
    assert!(store.upload("products/imgs/original/", "a.png", "image/png", vec![]).await.is_ok());
    let err = store.upload("products/imgs/resized/", "a.png", "image/png", vec![]).await;
    assert!(matches!(err, Err(StorageError::Upload { .. })));
  }
}
