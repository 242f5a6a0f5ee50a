use derive_more::Display;

use crate::models::products::ProductImage;

/// Lifecycle of one selected file on its way into a listing.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum ImageState {
  Selected,
  Resizing,
  Resized,
  Uploading,
  Uploaded,
  Failed,
}

/// A file the user picked, before any processing.
#[derive(Debug, Clone)]
pub struct ImageFile {
  pub name: String,
  pub content_type: String,
  pub data: Vec<u8>,
}

impl ImageFile {
  pub fn new(name: impl Into<String>, content_type: impl Into<String>, data: Vec<u8>) -> Self {
    Self { name: name.into(), content_type: content_type.into(), data }
  }
}

/// A selected file after both resize passes.
#[derive(Debug, Clone)]
pub struct ResizedImage {
  pub name: String,
  pub content_type: String,
  pub large: Vec<u8>,
  pub small: Vec<u8>,
  pub state: ImageState,
}

#[derive(Debug, Clone)]
pub enum ImageSlot {
  /// Already uploaded, e.g. when editing a listing; passed through as is.
  Existing(ProductImage),
  Pending(ResizedImage),
}

impl ImageSlot {
  pub fn is_existing(&self) -> bool {
    matches!(self, ImageSlot::Existing(_))
  }

  pub fn state(&self) -> ImageState {
    match self {
      ImageSlot::Existing(_) => ImageState::Uploaded,
      ImageSlot::Pending(img) => img.state,
    }
  }
}

/// A file that was dropped from a selection because it could not be resized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedImage {
  pub name: String,
  pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionReport {
  pub accepted: usize,
  pub skipped_non_images: usize,
  pub failed: Vec<FailedImage>,
}
