use std::{error::Error, sync::Arc, time::Duration};

use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::{
  models::errors::{ErrorType, InternalError},
  server::Server,
};

impl Server {
  pub(super) async fn init_database(&mut self) -> Result<(), Box<dyn Error>> {
    let cfg = &self.config.database;

    let db = PgPoolOptions::new()
      .max_connections(cfg.max_open_conns)
      .min_connections(cfg.max_idle_conns)
      .max_lifetime(Duration::from_millis(cfg.conn_max_lifetime_milliseconds))
      .idle_timeout(Duration::from_millis(cfg.conn_max_idle_time_milliseconds))
      .connect(&cfg.data_source)
      .await
      .map_err(|e| {
        InternalError::new(
          "products.server.init_database",
          Box::new(e),
          ErrorType::DBConnectionError,
          true,
          "failed to connect to database",
        )
      })?;

    info!(max_connections = cfg.max_open_conns, "database pool ready");
    self.db = Some(Arc::new(db));

    Ok(())
  }
}
