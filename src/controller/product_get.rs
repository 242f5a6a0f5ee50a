use std::sync::Arc;

use tracing::{debug, error};

use crate::{
  controller::{Controller, helpers::check_product_id},
  models::{context::Context, errors::AppError, products::Product},
};

pub(super) async fn product_get(
  c: &Controller,
  ctx: Arc<Context>,
  id: &str,
) -> Result<Option<Product>, AppError> {
  let path = "products.controller.product_get";
  check_product_id(path, id)?;

  let product = c.store.product_get(ctx.clone(), id).await.map_err(|err| {
    error!(request_id = %ctx.request_id, product_id = %id, error = %err, "failed to get a product");
    err.to_app_error(path, "products.get.failed")
  })?;

  debug!(request_id = %ctx.request_id, product_id = %id, found = product.is_some(), "product lookup");
  Ok(product)
}
