mod feed;
mod helpers;
mod product_create;
mod product_delete;
mod product_form;
mod product_get;
mod product_like;
mod product_update;
mod products_liked;
mod products_page;
mod router;

pub use feed::FeedPager;
pub use product_form::{ProductForm, SubmitOutcome};

use std::sync::Arc;

use crate::{
  models::config::ProductsConfig,
  store::{database::ProductsStore, storage::BlobStore},
};

/// Entry point of every caller-facing operation. Owns the stores it talks to, there is
/// no process wide instance.
#[derive(Debug)]
pub struct Controller {
  pub(super) cfg: Arc<ProductsConfig>,
  pub(super) store: Arc<dyn ProductsStore>,
  pub(super) storage: Arc<dyn BlobStore>,
}

#[derive(Debug)]
pub struct ControllerArgs {
  pub cfg: ProductsConfig,
  pub store: Arc<dyn ProductsStore>,
  pub storage: Arc<dyn BlobStore>,
}

impl Controller {
  pub fn new(args: ControllerArgs) -> Controller {
    Controller { cfg: Arc::new(args.cfg), store: args.store, storage: args.storage }
  }

  pub fn config(&self) -> &ProductsConfig {
    &self.cfg
  }
}

#[cfg(test)]
pub(crate) mod tests {
  use std::sync::Arc;

  use chrono::{Duration, Utc};

  use super::*;
  use crate::{
    models::{
      context::{Context, Session},
      products::Product,
    },
    store::{
      database::dbstore::{ProductsStoreImpl, ProductsStoreImplArgs},
      documents::MemoryDocumentStore,
      storage::MemoryBlobStore,
    },
  };

  pub(crate) struct Harness {
    pub docs: Arc<MemoryDocumentStore>,
    pub blobs: Arc<MemoryBlobStore>,
    pub controller: Arc<Controller>,
  }

  pub(crate) fn harness() -> Harness {
    let docs = Arc::new(MemoryDocumentStore::new());
    let blobs = Arc::new(MemoryBlobStore::new());
    let store = ProductsStoreImpl::new(ProductsStoreImplArgs { docs: docs.clone() });
    let controller = Arc::new(Controller::new(ControllerArgs {
      cfg: ProductsConfig::default(),
      store: Arc::new(store),
      storage: blobs.clone(),
    }));
    Harness { docs, blobs, controller }
  }

  pub(crate) fn ctx(user_id: &str) -> Arc<Context> {
    let session = Session {
      user_id: user_id.into(),
      display_name: format!("{}-name", user_id),
      photo_url: format!("https://img.test/{}.png", user_id),
    };
    Arc::new(Context::new(session, "req-1"))
  }

  /// `count` products one minute apart, newest first.
  pub(crate) async fn seed(c: &Controller, ctx: Arc<Context>, count: usize) -> Vec<String> {
    let now = Utc::now();
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
      let mut p = Product::draft(&ctx, now - Duration::minutes(i as i64));
      p.title = format!("item {}", i);
      p.body = "good condition".into();
      p.price = 1000 * (i as u64 + 1);
      ids.push(c.product_create(ctx.clone(), &p).await.unwrap());
    }
    ids
  }
}
