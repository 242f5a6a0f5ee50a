use std::error::Error;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use sqlx::error::Error as SqlxError;
use sqlx::postgres::PgDatabaseError;

use crate::models::errors::{AppError, BoxedErr, ErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DBErrorType {
  NoRows,
  UniqueViolation,
  NotNullViolation,
  JsonMarshal,
  JsonUnmarshal,
  Connection,
  Privileges,
  Internal,
}

impl fmt::Display for DBErrorType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      DBErrorType::NoRows => write!(f, "no_rows"),
      DBErrorType::UniqueViolation => write!(f, "unique_violation"),
      DBErrorType::NotNullViolation => write!(f, "not_null_violation"),
      DBErrorType::JsonMarshal => write!(f, "json_marshal"),
      DBErrorType::JsonUnmarshal => write!(f, "json_unmarshal"),
      DBErrorType::Connection => write!(f, "connection_exception"),
      DBErrorType::Privileges => write!(f, "insufficient_privilege"),
      DBErrorType::Internal => write!(f, "internal_error"),
    }
  }
}

#[derive(Debug)]
pub struct DBError {
  pub err_type: DBErrorType,
  pub err: Option<BoxedErr>,
  pub msg: String,
  pub path: String,
  pub details: String,
}

impl fmt::Display for DBError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut parts = Vec::new();

    if !self.path.is_empty() {
      parts.push(format!("path: {}", self.path));
    }

    parts.push(format!("err_type: {}", self.err_type));

    if !self.msg.is_empty() {
      parts.push(format!("msg: {}", self.msg));
    }

    if !self.details.is_empty() {
      parts.push(format!("details: {}", self.details));
    }

    if let Some(ref err) = self.err {
      parts.push(format!("err: {}", err));
    }

    write!(f, "{}", parts.join(", "))
  }
}

impl Error for DBError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    self.err.as_ref().map(|e| &**e as &dyn Error)
  }
}

impl DBError {
  pub fn new(
    err_type: DBErrorType,
    err: Option<BoxedErr>,
    msg: impl Into<String>,
    path: impl Into<String>,
    details: impl Into<String>,
  ) -> Self {
    Self { err_type, err, msg: msg.into(), path: path.into(), details: details.into() }
  }

  pub fn no_rows(msg: impl Into<String>, path: impl Into<String>, details: impl Into<String>) -> Self {
    Self::new(DBErrorType::NoRows, None, msg, path, details)
  }

  pub fn is_not_found(&self) -> bool {
    self.err_type == DBErrorType::NoRows
  }

  /// Converts the store failure into a caller-facing error raised at `where_`.
  pub fn to_app_error(self, where_: &str, id: &str) -> AppError {
    let kind = match self.err_type {
      DBErrorType::NoRows => ErrorKind::NotFound,
      DBErrorType::Connection => ErrorKind::Unavailable,
      DBErrorType::UniqueViolation | DBErrorType::NotNullViolation => ErrorKind::InvalidArgument,
      _ => ErrorKind::Internal,
    };
    let details = self.msg.clone();
    AppError::new(where_, id, kind, details, Some(Box::new(self)))
  }
}

pub fn handle_db_error(err: SqlxError, path: &str) -> DBError {
  match err {
    SqlxError::Database(db_err) => {
      let pg_err = db_err.downcast_ref::<PgDatabaseError>();

      let details = pg_err.detail().unwrap_or("").to_string();
      let msg = match pg_err.code() {
        // unique_violation
        "23505" => parse_duplicate_field_db_error(pg_err),
        // not_null_violation
        "23502" => format!("{} cannot be null", parse_db_field_name(pg_err)),
        "08000" | "08003" | "08006" => "database connection exception".to_string(),
        "42501" => "insufficient permissions to perform an action".to_string(),
        _ => "database error".to_string(),
      };

      let err_type = match pg_err.code() {
        "23505" => DBErrorType::UniqueViolation,
        "23502" => DBErrorType::NotNullViolation,
        "08000" | "08003" | "08006" => DBErrorType::Connection,
        "42501" => DBErrorType::Privileges,
        _ => DBErrorType::Internal,
      };

      DBError::new(err_type, Some(Box::new(SqlxError::Database(db_err))), msg, path, details)
    }

    SqlxError::RowNotFound => DBError::new(
      DBErrorType::NoRows,
      Some(Box::new(SqlxError::RowNotFound)),
      "the requested resource is not found",
      path,
      "",
    ),

    SqlxError::Io(_)
    | SqlxError::Tls(_)
    | SqlxError::PoolTimedOut
    | SqlxError::PoolClosed
    | SqlxError::WorkerCrashed => DBError::new(
      DBErrorType::Connection,
      Some(Box::new(err)),
      "database connection exception",
      path,
      "",
    ),

    _ => DBError::new(DBErrorType::Internal, Some(Box::new(err)), "database error", path, ""),
  }
}

// Extract the duplicate field from error detail
// Example: "Key (collection, id)=(products, 01J...) already exists."
fn parse_duplicate_field_db_error(err: &PgDatabaseError) -> String {
  if let Some(detail) = err.detail() {
    if let Some(parts) = detail.split(")=(").next() {
      let field = parts.trim_start_matches("Key (");
      return format!("{} already exists", field);
    }
  }
  err.detail().unwrap_or("").to_string()
}

fn column_regex() -> &'static Regex {
  static RE_COLUMN: OnceLock<Regex> = OnceLock::new();
  RE_COLUMN.get_or_init(|| Regex::new(r#"column "(.+?)""#).unwrap())
}

// Example: "null value in column \"data\" violates not-null constraint
fn parse_db_field_name(err: &PgDatabaseError) -> String {
  column_name_from_message(err.message())
}

fn column_name_from_message(message: &str) -> String {
  column_regex()
    .captures(message)
    .and_then(|c| c.get(1))
    .map(|m| m.as_str().to_string())
    .unwrap_or_else(|| "field".to_string())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn pool_timeouts_are_connection_errors() {
    let err = handle_db_error(SqlxError::PoolTimedOut, "products.store.test");
    assert_eq!(err.err_type, DBErrorType::Connection);
    assert_eq!(err.to_app_error("w", "id").kind, ErrorKind::Unavailable);
  }

  #[test]
  fn row_not_found_maps_to_not_found() {
    let err = handle_db_error(SqlxError::RowNotFound, "products.store.test");
    assert!(err.is_not_found());
    assert_eq!(err.to_app_error("w", "id").kind, ErrorKind::NotFound);
  }

  #[test]
  fn column_is_extracted_from_message() {
    let msg = r#"null value in column "data" violates not-null constraint"#;
    assert_eq!(column_name_from_message(msg), "data");
    assert_eq!(column_name_from_message("something else"), "field");
  }

  #[test]
  fn display_lists_parts() {
    let err = DBError::no_rows("product not found", "products.store.product_delete", "id: 1");
    assert_eq!(
      err.to_string(),
      "path: products.store.product_delete, err_type: no_rows, msg: product not found, details: id: 1"
    );
  }
}
