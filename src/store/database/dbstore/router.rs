use std::sync::Arc;

use crate::{
  models::{
    context::Context,
    likes::LikeRecord,
    page::{Page, PageCursor},
    products::{Product, ProductPatch},
  },
  store::database::{
    ProductsStore,
    dbstore::{
      ProductsStoreImpl, product_create::product_create, product_delete::product_delete,
      product_get::product_get, product_like::product_like, product_update::product_update,
      products_liked::products_liked, products_page::products_page,
    },
    errors::DBError,
  },
};

#[async_trait::async_trait]
impl ProductsStore for ProductsStoreImpl {
  async fn product_create(&self, ctx: Arc<Context>, product: &Product) -> Result<String, DBError> {
    product_create(self, ctx, product).await
  }
  async fn product_get(&self, ctx: Arc<Context>, id: &str) -> Result<Option<Product>, DBError> {
    product_get(self, ctx, id).await
  }
  async fn product_update(
    &self,
    ctx: Arc<Context>,
    id: &str,
    patch: &ProductPatch,
  ) -> Result<(), DBError> {
    product_update(self, ctx, id, patch).await
  }
  async fn product_delete(&self, ctx: Arc<Context>, id: &str) -> Result<(), DBError> {
    product_delete(self, ctx, id).await
  }
  async fn products_page(
    &self,
    ctx: Arc<Context>,
    cursor: Option<&PageCursor>,
    page_size: usize,
  ) -> Result<Page<Product>, DBError> {
    products_page(self, ctx, cursor, page_size).await
  }
  async fn product_like(
    &self,
    ctx: Arc<Context>,
    user_id: &str,
    product_id: &str,
  ) -> Result<LikeRecord, DBError> {
    product_like(self, ctx, user_id, product_id).await
  }
  async fn products_liked(&self, ctx: Arc<Context>, user_id: &str) -> Result<Vec<LikeRecord>, DBError> {
    products_liked(self, ctx, user_id).await
  }
}
