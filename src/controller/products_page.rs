use std::sync::Arc;

use tracing::{debug, error};

use crate::{
  controller::{
    Controller,
    helpers::{check_cursor, check_page_size},
  },
  models::{
    context::Context,
    errors::AppError,
    page::{Page, PageCursor},
    products::Product,
  },
};

pub(super) async fn products_page(
  c: &Controller,
  ctx: Arc<Context>,
  cursor: Option<&PageCursor>,
  page_size: Option<usize>,
) -> Result<Page<Product>, AppError> {
  let path = "products.controller.products_page";
  let page_size = page_size.unwrap_or(c.cfg.page_size);
  check_page_size(path, page_size, c.cfg.max_page_size)?;
  check_cursor(path, cursor)?;

  let page = c.store.products_page(ctx.clone(), cursor, page_size).await.map_err(|err| {
    error!(request_id = %ctx.request_id, error = %err, "failed to list products");
    err.to_app_error(path, "products.list.failed")
  })?;

  debug!(
    request_id = %ctx.request_id,
    items = page.items.len(),
    has_more = page.has_more,
    "products page"
  );
  Ok(page)
}
