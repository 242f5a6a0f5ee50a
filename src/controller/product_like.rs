use std::sync::Arc;

use tracing::{error, info};

use crate::{
  controller::{
    Controller,
    helpers::{check_product_id, check_signed_in},
  },
  models::{context::Context, errors::AppError, likes::LikeRecord},
};

pub(super) async fn product_like(
  c: &Controller,
  ctx: Arc<Context>,
  product_id: &str,
) -> Result<LikeRecord, AppError> {
  let path = "products.controller.product_like";
  check_signed_in(path, &ctx)?;
  check_product_id(path, product_id)?;

  let user_id = ctx.user_id();
  let record = c.store.product_like(ctx.clone(), user_id, product_id).await.map_err(|err| {
    error!(request_id = %ctx.request_id, product_id = %product_id, error = %err, "failed to like a product");
    err.to_app_error(path, "products.like.failed")
  })?;

  info!(request_id = %ctx.request_id, user_id = %user_id, product_id = %product_id, "product liked");
  Ok(record)
}
