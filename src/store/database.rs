pub mod dbstore;
pub mod errors;

use std::{fmt, sync::Arc};

use crate::{
  models::{
    context::Context,
    likes::LikeRecord,
    page::{Page, PageCursor},
    products::{Product, ProductPatch},
  },
  store::database::errors::DBError,
};

#[async_trait::async_trait]
pub trait ProductsStore: fmt::Debug + Send + Sync {
  async fn product_create(&self, ctx: Arc<Context>, product: &Product) -> Result<String, DBError>;
  async fn product_get(&self, ctx: Arc<Context>, id: &str) -> Result<Option<Product>, DBError>;
  async fn product_update(
    &self,
    ctx: Arc<Context>,
    id: &str,
    patch: &ProductPatch,
  ) -> Result<(), DBError>;
  async fn product_delete(&self, ctx: Arc<Context>, id: &str) -> Result<(), DBError>;
  async fn products_page(
    &self,
    ctx: Arc<Context>,
    cursor: Option<&PageCursor>,
    page_size: usize,
  ) -> Result<Page<Product>, DBError>;
  async fn product_like(
    &self,
    ctx: Arc<Context>,
    user_id: &str,
    product_id: &str,
  ) -> Result<LikeRecord, DBError>;
  async fn products_liked(&self, ctx: Arc<Context>, user_id: &str) -> Result<Vec<LikeRecord>, DBError>;
}
