use std::sync::Arc;

use tracing::{error, info};

use crate::{
  controller::{Controller, helpers::check_product_id},
  models::{context::Context, errors::AppError},
};

pub(super) async fn product_delete(c: &Controller, ctx: Arc<Context>, id: &str) -> Result<(), AppError> {
  let path = "products.controller.product_delete";
  check_product_id(path, id)?;

  c.store.product_delete(ctx.clone(), id).await.map_err(|err| {
    error!(request_id = %ctx.request_id, product_id = %id, error = %err, "failed to delete a product");
    err.to_app_error(path, "products.delete.failed")
  })?;

  info!(request_id = %ctx.request_id, product_id = %id, "product deleted");
  Ok(())
}

#[cfg(test)]
mod tests {
  use ulid::Ulid;

  use crate::{
    controller::tests::{ctx, harness, seed},
    models::{errors::ErrorKind, products::PRODUCTS_COLLECTION},
  };

  #[tokio::test]
  async fn deleted_product_is_gone() {
    let h = harness();
    let ctx = ctx("u1");
    let ids = seed(&h.controller, ctx.clone(), 2).await;

    h.controller.product_delete(ctx.clone(), &ids[0]).await.unwrap();
    assert!(h.controller.product_get(ctx, &ids[0]).await.unwrap().is_none());
    assert_eq!(h.docs.count(PRODUCTS_COLLECTION), 1);
  }

  #[tokio::test]
  async fn deleting_a_missing_product_is_not_found() {
    let h = harness();
    let err = h.controller.product_delete(ctx("u1"), &Ulid::new().to_string()).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(err.id, "products.delete.failed");
  }
}
