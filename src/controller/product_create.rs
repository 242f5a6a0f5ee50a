use std::sync::Arc;

use tracing::{error, info};

use crate::{
  controller::Controller,
  models::{context::Context, errors::AppError, products::Product},
};

pub(super) async fn product_create(
  c: &Controller,
  ctx: Arc<Context>,
  product: &Product,
) -> Result<String, AppError> {
  let path = "products.controller.product_create";

  let id = c.store.product_create(ctx.clone(), product).await.map_err(|err| {
    error!(request_id = %ctx.request_id, error = %err, "failed to create a product");
    err.to_app_error(path, "products.create.failed")
  })?;

  info!(request_id = %ctx.request_id, product_id = %id, images = product.imgs.len(), "product listed");
  Ok(id)
}
