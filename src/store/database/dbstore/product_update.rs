use std::sync::Arc;

use tracing::info;

use crate::{
  models::{
    context::Context,
    products::{PRODUCTS_COLLECTION, ProductPatch},
  },
  store::database::{
    dbstore::ProductsStoreImpl,
    errors::{DBError, DBErrorType},
  },
};

pub(super) async fn product_update(
  s: &ProductsStoreImpl,
  ctx: Arc<Context>,
  id: &str,
  patch: &ProductPatch,
) -> Result<(), DBError> {
  let path = "products.store.product_update";

  let fields = patch.to_fields().map_err(|err| {
    DBError::new(DBErrorType::JsonMarshal, Some(Box::new(err)), "failed to serialize patch", path, "")
  })?;

  s.docs.update(PRODUCTS_COLLECTION, id, fields).await?;
  info!(id, request_id = %ctx.request_id, "product updated");

  Ok(())
}
