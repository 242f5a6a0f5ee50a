use std::{env, fs, path::PathBuf};

use crate::{
  models::{
    config::Config,
    errors::{ErrorType, InternalError},
  },
  server::Server,
};

pub const CONFIG_PATH_ENV: &str = "MARKET_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

fn config_path(explicit: Option<PathBuf>) -> PathBuf {
  explicit
    .or_else(|| env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
    .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

pub(super) fn parse_config(yaml: &str) -> Result<Config, InternalError> {
  let mk_err = |msg: &str, e: serde_yaml::Error| {
    InternalError::new("products.server.parse_config", Box::new(e), ErrorType::Config, false, msg)
  };

  serde_yaml::from_str(yaml).map_err(|e| mk_err("failed to parse config data", e))
}

impl Server {
  pub(super) fn init_service_config(path: Option<PathBuf>) -> Result<Config, InternalError> {
    let path = config_path(path);

    let yaml = fs::read_to_string(&path).map_err(|e| {
      InternalError::new(
        "products.server.init_service_config",
        Box::new(e),
        ErrorType::Config,
        false,
        format!("failed to load service config file {}", path.display()),
      )
    })?;

    parse_config(&yaml)
  }
}
