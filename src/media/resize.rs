use std::io::Cursor;

use futures::future::join_all;
use image::{DynamicImage, GenericImageView, ImageFormat, imageops::FilterType};
use tracing::{debug, warn};

use crate::{
  media::MediaError,
  models::{
    config::ProductsConfig,
    images::{FailedImage, ImageFile, ImageState, ResizedImage},
  },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeConfig {
  pub large_width: u32,
  pub small_width: u32,
}

impl Default for ResizeConfig {
  fn default() -> Self {
    Self { large_width: 980, small_width: 300 }
  }
}

impl From<&ProductsConfig> for ResizeConfig {
  fn from(cfg: &ProductsConfig) -> Self {
    Self { large_width: cfg.large_width, small_width: cfg.small_width }
  }
}

/// Scales an encoded image down to `max_width` keeping its aspect ratio, then encodes
/// it back in the format it came in. Narrower images keep their size.
pub fn resize_to_width(data: &[u8], content_type: &str, max_width: u32) -> Result<Vec<u8>, MediaError> {
  let format = ImageFormat::from_mime_type(content_type)
    .or_else(|| image::guess_format(data).ok())
    .ok_or_else(|| MediaError::UnsupportedFormat(content_type.to_string()))?;

  let img = image::load_from_memory(data).map_err(MediaError::Decode)?;
  let (width, height) = img.dimensions();

  let resized = if width > max_width && max_width > 0 {
    let new_height = ((height as f64) * (max_width as f64) / (width as f64)).round().max(1.0) as u32;
    img.resize_exact(max_width, new_height, FilterType::Triangle)
  } else {
    img
  };

  // jpeg has no alpha channel
  let resized = match format {
    ImageFormat::Jpeg => DynamicImage::ImageRgb8(resized.to_rgb8()),
    _ => resized,
  };

  let mut out = Cursor::new(Vec::new());
  resized.write_to(&mut out, format).map_err(MediaError::Encode)?;
  Ok(out.into_inner())
}

/// Produces the large and the small variant of one file off the async runtime.
pub async fn resize_image(file: ImageFile, cfg: ResizeConfig) -> Result<ResizedImage, MediaError> {
  debug!(name = %file.name, state = %ImageState::Resizing, "resizing image");

  tokio::task::spawn_blocking(move || -> Result<ResizedImage, MediaError> {
    let large = resize_to_width(&file.data, &file.content_type, cfg.large_width)?;
    let small = resize_to_width(&file.data, &file.content_type, cfg.small_width)?;
    debug!(name = %file.name, state = %ImageState::Resized, large = large.len(), small = small.len(), "image resized");
    Ok(ResizedImage {
      name: file.name,
      content_type: file.content_type,
      large,
      small,
      state: ImageState::Resized,
    })
  })
  .await?
}

/// Resizes every file concurrently. A file that fails is left out and reported,
/// the others carry on; the order of the successful ones is kept.
pub async fn resize_batch(files: Vec<ImageFile>, cfg: ResizeConfig) -> (Vec<ResizedImage>, Vec<FailedImage>) {
  let names: Vec<String> = files.iter().map(|f| f.name.clone()).collect();
  let results = join_all(files.into_iter().map(|f| resize_image(f, cfg))).await;

  let mut resized = Vec::with_capacity(results.len());
  let mut failed = Vec::new();
  for (name, result) in names.into_iter().zip(results) {
    match result {
      Ok(img) => resized.push(img),
      Err(err) => {
        warn!(name = %name, state = %ImageState::Failed, error = %err, "image dropped from selection");
        failed.push(FailedImage { name, reason: err.to_string() });
      }
    }
  }

  (resized, failed)
}

#[cfg(test)]
pub(crate) mod tests {
  use image::{ImageBuffer, Rgb, RgbImage};

  use super::*;

  pub(crate) fn png(width: u32, height: u32) -> Vec<u8> {
    let img: RgbImage = ImageBuffer::from_fn(width, height, |x, y| Rgb([(x % 255) as u8, (y % 255) as u8, 90]));
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img).write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
  }

  fn dimensions(data: &[u8]) -> (u32, u32) {
    image::load_from_memory(data).unwrap().dimensions()
  }

  #[test]
  fn wide_images_are_scaled_down() {
    let out = resize_to_width(&png(1200, 600), "image/png", 300).unwrap();
    assert_eq!(dimensions(&out), (300, 150));
  }

  #[test]
  fn narrow_images_are_not_upscaled() {
    let out = resize_to_width(&png(200, 100), "image/png", 980).unwrap();
    assert_eq!(dimensions(&out), (200, 100));
  }

  #[test]
  fn jpeg_keeps_its_format() {
    let out = resize_to_width(&png(400, 400), "image/jpeg", 100).unwrap();
    assert_eq!(image::guess_format(&out).unwrap(), ImageFormat::Jpeg);
    assert_eq!(dimensions(&out), (100, 100));
  }

  #[test]
  fn garbage_fails_to_decode() {
    let err = resize_to_width(b"definitely not a picture", "image/png", 100).unwrap_err();
    assert!(matches!(err, MediaError::Decode(_)));
  }

  #[tokio::test]
  async fn one_broken_file_out_of_three_leaves_two() {
    let files = vec![
      ImageFile::new("a.png", "image/png", png(1000, 500)),
      ImageFile::new("broken.png", "image/png", b"nope".to_vec()),
      ImageFile::new("c.png", "image/png", png(120, 80)),
    ];

    let (resized, failed) = resize_batch(files, ResizeConfig::default()).await;

    assert_eq!(resized.len(), 2);
    assert_eq!(resized[0].name, "a.png");
    assert_eq!(resized[1].name, "c.png");
    assert!(resized.iter().all(|r| r.state == ImageState::Resized));
    assert_eq!(dimensions(&resized[0].large), (980, 490));
    assert_eq!(dimensions(&resized[0].small), (300, 150));
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].name, "broken.png");
  }
}
