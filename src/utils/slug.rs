use std::sync::OnceLock;

use regex::Regex;
use ulid::Ulid;
use unidecode::unidecode;

const MAX_STEM_LENGTH: usize = 60;
const FALLBACK_STEM: &str = "image";

// Any run of characters that are neither letters nor digits (unicode aware).
fn non_alnum_regex() -> &'static Regex {
  static RE_NON_ALNUM: OnceLock<Regex> = OnceLock::new();
  RE_NON_ALNUM.get_or_init(|| Regex::new(r"[^\p{L}\p{N}]+").unwrap())
}

fn extension_regex() -> &'static Regex {
  static RE_EXT: OnceLock<Regex> = OnceLock::new();
  RE_EXT.get_or_init(|| Regex::new(r"^[a-z0-9]{1,5}$").unwrap())
}

/// Turns free text into a lowercase, ascii, hyphen separated slug.
///
/// " Café Zelda 2.0: Special_Edition! " becomes "cafe-zelda-2-0-special-edition".
pub fn slugify(input: &str, max_length: usize) -> String {
  let ascii = unidecode(input);
  let mut slug = non_alnum_regex().replace_all(&ascii, "-").to_lowercase();
  slug = slug.trim_matches('-').to_string();

  if slug.len() > max_length {
    slug = slug.chars().take(max_length).collect();
    slug = slug.trim_end_matches('-').to_string();
  }
  slug
}

/// Storage object name for an uploaded file: `{ulid}-{slug of the stem}.{ext}`.
///
/// The ulid keeps two uploads of the same file apart, the extension is only kept
/// when it looks like one.
pub fn object_name(file_name: &str) -> String {
  object_name_with_id(&Ulid::new().to_string().to_lowercase(), file_name)
}

fn object_name_with_id(id: &str, file_name: &str) -> String {
  let (stem, ext) = match file_name.rsplit_once('.') {
    Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext.to_lowercase())),
    _ => (file_name, None),
  };

  let mut stem = slugify(stem, MAX_STEM_LENGTH);
  if stem.is_empty() {
    stem = FALLBACK_STEM.to_string();
  }

  match ext.filter(|e| extension_regex().is_match(e)) {
    Some(ext) => format!("{}-{}.{}", id, stem, ext),
    None => format!("{}-{}", id, stem),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_slugify_basic() {
    assert_eq!(slugify("My _Fancy_ Product!", 60), "my-fancy-product");
  }

  #[test]
  fn test_slugify_unicode() {
    assert_eq!(slugify("Café au Lait", 60), "cafe-au-lait");
  }

  #[test]
  fn test_slugify_max_length() {
    assert_eq!(slugify("Very Long Product Name", 10), "very-long");
  }

  #[test]
  fn test_slugify_whitespace_only() {
    assert_eq!(slugify("   ", 10), "");
  }

  #[test]
  fn test_object_name_keeps_extension() {
    assert_eq!(object_name_with_id("01j", "IMG 2024 (1).JPG"), "01j-img-2024-1.jpg");
  }

  #[test]
  fn test_object_name_without_extension() {
    assert_eq!(object_name_with_id("01j", "photo"), "01j-photo");
    assert_eq!(object_name_with_id("01j", ".hidden"), "01j-hidden");
  }

  #[test]
  fn test_object_name_falls_back_for_empty_stem() {
    assert_eq!(object_name_with_id("01j", "!!!.png"), "01j-image.png");
  }

  #[test]
  fn test_object_name_drops_odd_extension() {
    assert_eq!(object_name_with_id("01j", "a.b c d e f"), "01j-a");
  }

  #[test]
  fn test_object_names_are_unique() {
    assert_ne!(object_name("a.png"), object_name("a.png"));
  }
}
