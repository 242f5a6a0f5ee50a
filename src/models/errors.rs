use std::{collections::HashMap, error::Error, fmt};

use derive_more::Display;
use serde_json::Value;

const MAX_ERROR_LENGTH: usize = 1024;

pub const MSG_ID_ERR_INTERNAL: &str = "server.internal.error";

pub type BoxedErr = Box<dyn Error + Send + Sync>;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
  #[display("internal")]
  Internal,
  #[display("config_error")]
  Config,
  #[display("db_connection_error")]
  DBConnectionError,
  #[display("object_storage_error")]
  ObjectStorage,
  #[display("invalid_url")]
  InvalidUrl,
}

#[derive(Debug, Display)]
#[display("InternalError: {} {} {} {} {}", path, err_type, temp, msg, err)]
pub struct InternalError {
  pub temp: bool,
  pub err_type: ErrorType,
  pub err: BoxedErr,
  pub msg: String,
  pub path: String,
}

impl InternalError {
  pub fn new(
    path: impl Into<String>,
    err: BoxedErr,
    err_type: ErrorType,
    temp: bool,
    msg: impl Into<String>,
  ) -> Self {
    Self { temp, err_type, err, msg: msg.into(), path: path.into() }
  }
}

impl Error for InternalError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    Some(&*self.err)
  }
}

/// Broad category of a caller-facing failure, used by callers to decide what to tell the user.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  #[display("not_found")]
  NotFound,
  #[display("invalid_argument")]
  InvalidArgument,
  #[display("failed_precondition")]
  FailedPrecondition,
  #[display("unavailable")]
  Unavailable,
  #[display("internal")]
  Internal,
}

#[derive(Debug)]
pub struct AppError {
  pub id: String,
  pub kind: ErrorKind,
  pub detailed_error: String,
  pub params: HashMap<String, Value>,
  pub where_: String,
  pub wrapped: Option<BoxedErr>,
}

impl AppError {
  pub fn new(
    where_: impl Into<String>,
    id: impl Into<String>,
    kind: ErrorKind,
    details: impl Into<String>,
    wrapped: Option<BoxedErr>,
  ) -> Self {
    Self {
      id: id.into(),
      kind,
      detailed_error: details.into(),
      params: HashMap::new(),
      where_: where_.into(),
      wrapped,
    }
  }

  pub fn internal(where_: impl Into<String>, err: BoxedErr) -> Self {
    Self::new(where_, MSG_ID_ERR_INTERNAL, ErrorKind::Internal, "", Some(err))
  }

  pub fn with_params(mut self, params: HashMap<String, Value>) -> Self {
    self.params = params;
    self
  }

  pub fn error_string(&self) -> String {
    let mut s = String::new();

    if !self.where_.is_empty() {
      s.push_str(&self.where_);
      s.push_str(": ");
    }

    s.push_str(&self.id);

    if !self.detailed_error.is_empty() {
      s.push_str(", ");
      s.push_str(&self.detailed_error);
    }

    if let Some(ref wrapped) = self.wrapped {
      s.push_str(", ");
      s.push_str(&wrapped.to_string());
    }

    if s.len() > MAX_ERROR_LENGTH {
      let mut cut = MAX_ERROR_LENGTH;
      while !s.is_char_boundary(cut) {
        cut -= 1;
      }
      s.truncate(cut);
      s.push_str("...");
    }

    s
  }

  pub fn unwrap(&self) -> Option<&(dyn Error + Send + Sync)> {
    self.wrapped.as_deref()
  }

  pub fn wipe_detailed(&mut self) {
    self.wrapped = None;
    self.detailed_error.clear();
  }
}

impl fmt::Display for AppError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.error_string())
  }
}

impl Error for AppError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    self.wrapped.as_ref().map(|e| e.as_ref() as &(dyn Error + 'static))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn error_string_joins_parts() {
    let err = AppError::new(
      "products.controller.product_get",
      "products.get.failed",
      ErrorKind::Unavailable,
      "store down",
      Some("connection refused".into()),
    );
    assert_eq!(
      err.error_string(),
      "products.controller.product_get: products.get.failed, store down, connection refused"
    );
  }

  #[test]
  fn error_string_is_truncated() {
    let err = AppError::new("", "x", ErrorKind::Internal, "é".repeat(MAX_ERROR_LENGTH), None);
    let s = err.error_string();
    assert!(s.ends_with("..."));
    assert!(s.len() <= MAX_ERROR_LENGTH + 3);
  }

  #[test]
  fn wipe_detailed_clears_internals() {
    let mut err = AppError::internal("where", "boom".into());
    err.detailed_error = "secret".into();
    err.wipe_detailed();
    assert!(err.unwrap().is_none());
    assert_eq!(err.error_string(), format!("where: {}", MSG_ID_ERR_INTERNAL));
  }
}
