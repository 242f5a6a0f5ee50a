use std::collections::HashMap;

use serde_json::json;
use ulid::Ulid;

use crate::models::{
  context::Context,
  errors::{AppError, ErrorKind},
  page::PageCursor,
};

fn invalid(where_: &str, id: &str) -> AppError {
  AppError::new(where_, id, ErrorKind::InvalidArgument, "", None)
}

pub(super) fn check_product_id(where_: &str, id: &str) -> Result<(), AppError> {
  if id.is_empty() {
    return Err(invalid(where_, "request.product_id.missing"));
  }

  Ulid::from_string(id).map_err(|_| invalid(where_, "request.product_id.invalid"))?;
  Ok(())
}

pub(super) fn check_page_size(where_: &str, page_size: usize, max: usize) -> Result<(), AppError> {
  if page_size == 0 || page_size > max {
    let params = HashMap::from([("Max".to_string(), json!(max))]);
    return Err(invalid(where_, "request.page_size.invalid").with_params(params));
  }
  Ok(())
}

pub(super) fn check_cursor(where_: &str, cursor: Option<&PageCursor>) -> Result<(), AppError> {
  if let Some(cursor) = cursor {
    Ulid::from_string(cursor.id()).map_err(|_| invalid(where_, "request.cursor.invalid"))?;
  }
  Ok(())
}

pub(super) fn check_signed_in(where_: &str, ctx: &Context) -> Result<(), AppError> {
  if !ctx.is_signed_in() {
    return Err(AppError::new(
      where_,
      "request.session.missing",
      ErrorKind::FailedPrecondition,
      "",
      None,
    ));
  }
  Ok(())
}
