//! Image pipeline of the listing form: pick the image files out of a selection, resize
//! each of them to a large and a small variant, then upload both variants.

pub(crate) mod resize;
mod selection;
mod upload;

pub use resize::{ResizeConfig, resize_batch, resize_image, resize_to_width};
pub use selection::{Selection, SelectionError, is_image, select_images};
pub use upload::upload_slots;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
  #[error("failed to decode image: {0}")]
  Decode(#[source] image::ImageError),
  #[error("failed to encode image: {0}")]
  Encode(#[source] image::ImageError),
  #[error("unsupported image format: {0}")]
  UnsupportedFormat(String),
  #[error("resize task failed: {0}")]
  Task(#[from] tokio::task::JoinError),
}
