mod product_create;
mod product_delete;
mod product_get;
mod product_like;
mod product_update;
mod products_liked;
mod products_page;
mod router;

use std::sync::Arc;

use serde_json::{from_value, Value};

use crate::{
  models::products::Product,
  store::{
    database::errors::{DBError, DBErrorType},
    documents::{Document, DocumentStore},
  },
};

#[derive(Debug)]
pub struct ProductsStoreImpl {
  pub(crate) docs: Arc<dyn DocumentStore>,
}

#[derive(Debug)]
pub struct ProductsStoreImplArgs {
  pub docs: Arc<dyn DocumentStore>,
}

impl ProductsStoreImpl {
  pub fn new(args: ProductsStoreImplArgs) -> Self {
    Self { docs: args.docs }
  }
}

/// Stored documents are untrusted until they deserialize into a `Product`.
fn decode_product(doc: Document, path: &str) -> Result<Product, DBError> {
  let id = doc.id;
  let mut product: Product = from_value(Value::Object(doc.data)).map_err(|err| {
    DBError::new(
      DBErrorType::JsonUnmarshal,
      Some(Box::new(err)),
      "failed to deserialize product",
      path,
      format!("id: {}", id),
    )
  })?;
  product.id = id;
  Ok(product)
}
