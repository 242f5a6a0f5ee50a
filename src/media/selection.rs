use mime::Mime;
use thiserror::Error;

use crate::models::images::ImageFile;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
  #[error("too many images: {selected} selected, at most {max} allowed")]
  TooMany { selected: usize, max: usize },
}

#[derive(Debug)]
pub struct Selection {
  pub images: Vec<ImageFile>,
  pub skipped_non_images: usize,
}

pub fn is_image(content_type: &str) -> bool {
  content_type.parse::<Mime>().map(|m| m.type_() == mime::IMAGE).unwrap_or(false)
}

/// Keeps the image files of a selection. The batch is refused as a whole when it
/// would take the total past `max_images`, nothing of it is kept then.
pub fn select_images(
  files: Vec<ImageFile>,
  already_selected: usize,
  max_images: usize,
) -> Result<Selection, SelectionError> {
  let total = files.len();
  let images: Vec<ImageFile> = files.into_iter().filter(|f| is_image(&f.content_type)).collect();
  let skipped_non_images = total - images.len();

  let selected = already_selected + images.len();
  if selected > max_images {
    return Err(SelectionError::TooMany { selected, max: max_images });
  }

  Ok(Selection { images, skipped_non_images })
}
