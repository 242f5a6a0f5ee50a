mod config;
mod database;
pub mod object_storage;

use std::{error::Error, path::PathBuf, sync::Arc};

use sqlx::{Pool, Postgres};
use tracing::info;

use crate::{
  controller::{Controller, ControllerArgs},
  models::{
    config::Config,
    errors::{ErrorType, InternalError},
  },
  server::object_storage::ObjectStorage,
  store::{
    database::dbstore::{ProductsStoreImpl, ProductsStoreImplArgs},
    documents::PostgresDocumentStore,
  },
};

/// Wires the configured database and object storage into a `Controller`.
pub struct Server {
  pub(crate) config: Arc<Config>,
  pub(crate) db: Option<Arc<Pool<Postgres>>>,
}

#[derive(Debug, Default)]
pub struct ServerArgs {
  /// Falls back to `MARKET_CONFIG`, then to `config.yaml`.
  pub config_path: Option<PathBuf>,
}

impl Server {
  pub async fn new(args: ServerArgs) -> Result<Self, Box<dyn Error>> {
    let config = Self::init_service_config(args.config_path)?;
    info!(env = %config.service.env, "service config loaded");

    Ok(Self { config: Arc::new(config), db: None })
  }

  pub async fn run(&mut self) -> Result<Arc<Controller>, Box<dyn Error>> {
    let path = "products.server.run";
    self.init_database().await?;

    let db = self.db.clone().ok_or_else(|| {
      InternalError::new(path, "database is not initialized".into(), ErrorType::Internal, false, "no database pool")
    })?;

    let docs = PostgresDocumentStore::new(db);
    docs.migrate().await.map_err(|e| {
      InternalError::new(path, Box::new(e), ErrorType::DBConnectionError, false, "failed to migrate documents table")
    })?;

    let store = ProductsStoreImpl::new(ProductsStoreImplArgs { docs: Arc::new(docs) });
    let storage = ObjectStorage::new(self.config.storage.clone()).await?;

    let controller = Controller::new(ControllerArgs {
      cfg: self.config.products.clone(),
      store: Arc::new(store),
      storage: Arc::new(storage),
    });

    info!(bucket = %self.config.storage.bucket, "products controller ready");
    Ok(Arc::new(controller))
  }
}
