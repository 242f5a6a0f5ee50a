use std::sync::Arc;

use crate::{
  controller::{
    Controller, product_create::product_create, product_delete::product_delete,
    product_get::product_get, product_like::product_like, product_update::product_update,
    products_liked::products_liked, products_page::products_page,
  },
  models::{
    context::Context,
    errors::AppError,
    likes::LikeRecord,
    page::{Page, PageCursor},
    products::{Product, ProductPatch},
  },
};

impl Controller {
  pub async fn product_create(&self, ctx: Arc<Context>, product: &Product) -> Result<String, AppError> {
    product_create(self, ctx, product).await
  }

  pub async fn product_get(&self, ctx: Arc<Context>, id: &str) -> Result<Option<Product>, AppError> {
    product_get(self, ctx, id).await
  }

  pub async fn product_update(
    &self,
    ctx: Arc<Context>,
    id: &str,
    patch: &ProductPatch,
  ) -> Result<(), AppError> {
    product_update(self, ctx, id, patch).await
  }

  pub async fn product_delete(&self, ctx: Arc<Context>, id: &str) -> Result<(), AppError> {
    product_delete(self, ctx, id).await
  }

  /// One page of the feed, newest first. `page_size` falls back to the configured size.
  pub async fn products_page(
    &self,
    ctx: Arc<Context>,
    cursor: Option<&PageCursor>,
    page_size: Option<usize>,
  ) -> Result<Page<Product>, AppError> {
    products_page(self, ctx, cursor, page_size).await
  }

  /// Marks `product_id` as liked by the signed in user.
  pub async fn product_like(&self, ctx: Arc<Context>, product_id: &str) -> Result<LikeRecord, AppError> {
    product_like(self, ctx, product_id).await
  }

  pub async fn products_liked(&self, ctx: Arc<Context>) -> Result<Vec<LikeRecord>, AppError> {
    products_liked(self, ctx).await
  }
}
