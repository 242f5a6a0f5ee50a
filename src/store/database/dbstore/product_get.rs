use std::sync::Arc;

use tracing::debug;

use crate::{
  models::{
    context::Context,
    products::{PRODUCTS_COLLECTION, Product},
  },
  store::database::{
    dbstore::{ProductsStoreImpl, decode_product},
    errors::DBError,
  },
};

pub(super) async fn product_get(
  s: &ProductsStoreImpl,
  _ctx: Arc<Context>,
  id: &str,
) -> Result<Option<Product>, DBError> {
  let path = "products.store.product_get";

  match s.docs.get(PRODUCTS_COLLECTION, id).await? {
    Some(doc) => decode_product(doc, path).map(Some),
    None => {
      debug!(id, "no such product");
      Ok(None)
    }
  }
}
