use std::sync::Arc;

use tracing::info;

use crate::{
  models::{context::Context, products::PRODUCTS_COLLECTION},
  store::database::{dbstore::ProductsStoreImpl, errors::DBError},
};

pub(super) async fn product_delete(
  s: &ProductsStoreImpl,
  ctx: Arc<Context>,
  id: &str,
) -> Result<(), DBError> {
  let path = "products.store.product_delete";

  if !s.docs.delete(PRODUCTS_COLLECTION, id).await? {
    return Err(DBError::no_rows("product not found", path, format!("id: {}", id)));
  }

  info!(id, request_id = %ctx.request_id, "product deleted");
  Ok(())
}
