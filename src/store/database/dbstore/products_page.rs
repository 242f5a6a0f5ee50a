use std::sync::Arc;

use tracing::debug;

use crate::{
  models::{
    context::Context,
    page::{Page, PageCursor},
    products::{PRODUCT_ORDER_FIELD, PRODUCTS_COLLECTION, Product},
  },
  store::{
    database::{
      dbstore::{ProductsStoreImpl, decode_product},
      errors::DBError,
    },
    documents::DocumentQuery,
  },
};

/// Newest first page of the feed, starting strictly after `cursor`.
pub(super) async fn products_page(
  s: &ProductsStoreImpl,
  _ctx: Arc<Context>,
  cursor: Option<&PageCursor>,
  page_size: usize,
) -> Result<Page<Product>, DBError> {
  let path = "products.store.products_page";

  let query = DocumentQuery {
    order_by: PRODUCT_ORDER_FIELD.to_string(),
    start_after: cursor.cloned(),
    limit: page_size,
  };

  let docs = s.docs.query(PRODUCTS_COLLECTION, &query).await?;
  if docs.is_empty() {
    debug!(cursor = ?cursor.map(|c| c.token()), "no products left");
    return Ok(Page::empty());
  }

  let next_cursor = docs.last().and_then(|d| d.cursor(PRODUCT_ORDER_FIELD));
  let items =
    docs.into_iter().map(|d| decode_product(d, path)).collect::<Result<Vec<Product>, DBError>>()?;

  // a full page is taken as a sign there is more, the last full page gets this wrong
  let has_more = items.len() == page_size;
  debug!(count = items.len(), has_more, "products page fetched");

  Ok(Page { items, next_cursor, has_more })
}
