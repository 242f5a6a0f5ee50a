use chrono::{DateTime, Utc, serde::ts_milliseconds};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::context::Context;

pub const PRODUCTS_COLLECTION: &str = "products";

/// Field the listing feed is ordered by.
pub const PRODUCT_ORDER_FIELD: &str = "timestamp";

/// Blob path prefixes for the two variants of every product image.
pub const PRODUCT_IMAGES_ORIGINAL_PATH: &str = "products/imgs/original/";
pub const PRODUCT_IMAGES_RESIZED_PATH: &str = "products/imgs/resized/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
  pub original: String,
  pub resized: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  /// Assigned by the store, never part of the stored document.
  #[serde(skip)]
  pub id: String,
  pub title: String,
  pub body: String,
  pub price: u64,
  #[serde(default)]
  pub sell: String,
  #[serde(default)]
  pub want: String,
  #[serde(default)]
  pub imgs: Vec<ProductImage>,
  pub uid: String,
  #[serde(default)]
  pub user: String,
  #[serde(default)]
  pub user_photo: String,
  #[serde(with = "ts_milliseconds")]
  pub timestamp: DateTime<Utc>,
  #[serde(default = "default_opened")]
  pub opened: bool,
  #[serde(default)]
  pub sold_out: bool,
}

fn default_opened() -> bool {
  true
}

impl Product {
  /// An empty listing owned by the session user, as a new form starts out.
  pub fn draft(ctx: &Context, timestamp: DateTime<Utc>) -> Self {
    let session = ctx.session();
    Self {
      id: String::new(),
      title: String::new(),
      body: String::new(),
      price: 0,
      sell: String::new(),
      want: String::new(),
      imgs: vec![],
      uid: session.user_id.clone(),
      user: session.display_name.clone(),
      user_photo: session.photo_url.clone(),
      timestamp,
      opened: true,
      sold_out: false,
    }
  }
}

/// Partial product used for in-place updates, only the set fields are merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub body: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub price: Option<u64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub sell: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub want: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub imgs: Option<Vec<ProductImage>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub uid: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub user: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub user_photo: Option<String>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none",
    with = "chrono::serde::ts_milliseconds_option"
  )]
  pub timestamp: Option<DateTime<Utc>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub opened: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub sold_out: Option<bool>,
}

impl ProductPatch {
  pub fn is_empty(&self) -> bool {
    *self == ProductPatch::default()
  }

  pub fn to_fields(&self) -> Result<Map<String, Value>, serde_json::Error> {
    match serde_json::to_value(self)? {
      Value::Object(map) => Ok(map),
      _ => Ok(Map::new()),
    }
  }
}

impl From<Product> for ProductPatch {
  fn from(p: Product) -> Self {
    Self {
      title: Some(p.title),
      body: Some(p.body),
      price: Some(p.price),
      sell: Some(p.sell),
      want: Some(p.want),
      imgs: Some(p.imgs),
      uid: Some(p.uid),
      user: Some(p.user),
      user_photo: Some(p.user_photo),
      timestamp: Some(p.timestamp),
      opened: Some(p.opened),
      sold_out: Some(p.sold_out),
    }
  }
}
