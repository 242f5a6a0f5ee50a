use futures::future::{try_join, try_join_all};
use tracing::{debug, info};

use crate::{
  models::{
    images::{ImageSlot, ImageState},
    products::{PRODUCT_IMAGES_ORIGINAL_PATH, PRODUCT_IMAGES_RESIZED_PATH, ProductImage},
  },
  store::storage::{BlobStore, StorageError},
  utils::slug::object_name,
};

/// Uploads both variants of every pending slot concurrently and returns the url pairs
/// in slot order. Existing slots are passed through without touching the storage.
/// The first failed upload fails the whole batch.
pub async fn upload_slots(
  storage: &dyn BlobStore,
  slots: &[ImageSlot],
) -> Result<Vec<ProductImage>, StorageError> {
  let uploads = slots.iter().map(|slot| async move {
    match slot {
      ImageSlot::Existing(img) => Ok::<ProductImage, StorageError>(img.clone()),
      ImageSlot::Pending(img) => {
        let name = object_name(&img.name);
        debug!(name = %img.name, object = %name, state = %ImageState::Uploading, "uploading image");

        let (original, resized) = try_join(
          storage.upload(PRODUCT_IMAGES_ORIGINAL_PATH, &name, &img.content_type, img.large.clone()),
          storage.upload(PRODUCT_IMAGES_RESIZED_PATH, &name, &img.content_type, img.small.clone()),
        )
        .await?;

        Ok(ProductImage { original, resized })
      }
    }
  });

  let images = try_join_all(uploads).await?;
  let uploaded = slots.iter().filter(|s| !s.is_existing()).count();
  info!(uploaded, kept = slots.len() - uploaded, "product images ready");

  Ok(images)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{models::images::ResizedImage, store::storage::MemoryBlobStore};

  fn pending(name: &str) -> ImageSlot {
    ImageSlot::Pending(ResizedImage {
      name: name.into(),
      content_type: "image/png".into(),
      large: vec![1],
      small: vec![2],
      state: ImageState::Resized,
    })
  }

  fn existing(n: u8) -> ImageSlot {
    ImageSlot::Existing(ProductImage {
      original: format!("https://cdn/o{}.png", n),
      resized: format!("https://cdn/r{}.png", n),
    })
  }

  #[tokio::test]
  async fn existing_images_are_not_uploaded_again() {
    let storage = MemoryBlobStore::new();
    let slots = vec![existing(1), existing(2)];

    let images = upload_slots(&storage, &slots).await.unwrap();

    assert_eq!(storage.upload_count(), 0);
    assert_eq!(images[0].original, "https://cdn/o1.png");
    assert_eq!(images[1].resized, "https://cdn/r2.png");
  }

  #[tokio::test]
  async fn pending_images_get_both_variants_in_order() {
    let storage = MemoryBlobStore::new();
    let slots = vec![pending("new.png"), existing(7)];

    let images = upload_slots(&storage, &slots).await.unwrap();

    assert_eq!(storage.upload_count(), 2);
    assert!(images[0].original.starts_with("memory://products/imgs/original/"));
    assert!(images[0].resized.starts_with("memory://products/imgs/resized/"));
    assert!(images[0].original.ends_with("-new.png"));
    assert_eq!(images[1].original, "https://cdn/o7.png");

    let blobs = storage.uploads();
    let original = blobs.iter().find(|b| b.key.starts_with(PRODUCT_IMAGES_ORIGINAL_PATH)).unwrap();
    assert_eq!(original.body, vec![1]);
    assert_eq!(original.content_type, "image/png");
  }

  #[tokio::test]
  async fn any_failed_upload_fails_the_batch() {
    let storage = MemoryBlobStore::new();
    storage.fail_uploads_matching("-b.png");
    let slots = vec![pending("a.png"), pending("b.png")];

    assert!(upload_slots(&storage, &slots).await.is_err());
  }
}
