use std::sync::Arc;

use tracing::{error, info};

use crate::{
  controller::{Controller, helpers::check_product_id},
  models::{
    context::Context,
    errors::{AppError, ErrorKind},
    products::ProductPatch,
  },
};

pub(super) async fn product_update(
  c: &Controller,
  ctx: Arc<Context>,
  id: &str,
  patch: &ProductPatch,
) -> Result<(), AppError> {
  let path = "products.controller.product_update";
  check_product_id(path, id)?;

  if patch.is_empty() {
    return Err(AppError::new(path, "products.update.empty", ErrorKind::InvalidArgument, "", None));
  }

  c.store.product_update(ctx.clone(), id, patch).await.map_err(|err| {
    error!(request_id = %ctx.request_id, product_id = %id, error = %err, "failed to update a product");
    err.to_app_error(path, "products.update.failed")
  })?;

  info!(request_id = %ctx.request_id, product_id = %id, "product updated");
  Ok(())
}

#[cfg(test)]
mod tests {
  use ulid::Ulid;

  use crate::{
    controller::tests::{ctx, harness, seed},
    models::{errors::ErrorKind, products::ProductPatch},
  };

  #[tokio::test]
  async fn only_present_fields_change() {
    let h = harness();
    let ctx = ctx("u1");
    let ids = seed(&h.controller, ctx.clone(), 1).await;

    let patch = ProductPatch { sold_out: Some(true), price: Some(7), ..Default::default() };
    h.controller.product_update(ctx.clone(), &ids[0], &patch).await.unwrap();

    let got = h.controller.product_get(ctx, &ids[0]).await.unwrap().unwrap();
    assert!(got.sold_out);
    assert_eq!(got.price, 7);
    assert_eq!(got.title, "item 0");
  }

  #[tokio::test]
  async fn updating_a_missing_product_is_not_found() {
    let h = harness();
    let patch = ProductPatch { title: Some("x".into()), ..Default::default() };
    let err = h.controller.product_update(ctx("u1"), &Ulid::new().to_string(), &patch).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
  }

  #[tokio::test]
  async fn empty_patch_is_rejected() {
    let h = harness();
    let err = h
      .controller
      .product_update(ctx("u1"), &Ulid::new().to_string(), &ProductPatch::default())
      .await
      .unwrap_err();
    assert_eq!(err.id, "products.update.empty");
  }
}
