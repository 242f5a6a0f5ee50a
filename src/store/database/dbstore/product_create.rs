use std::sync::Arc;

use serde_json::{to_value, Value};
use tracing::info;

use crate::{
  models::{
    context::Context,
    products::{PRODUCTS_COLLECTION, Product},
  },
  store::database::{
    dbstore::ProductsStoreImpl,
    errors::{DBError, DBErrorType},
  },
};

pub(super) async fn product_create(
  s: &ProductsStoreImpl,
  ctx: Arc<Context>,
  pro: &Product,
) -> Result<String, DBError> {
  let path = "products.store.product_create";
  let mk_err = |msg: &str, err: serde_json::Error| {
    DBError::new(DBErrorType::JsonMarshal, Some(Box::new(err)), msg, path, "")
  };

  let fields = match to_value(pro).map_err(|e| mk_err("failed to serialize the product", e))? {
    Value::Object(map) => map,
    _ => return Err(DBError::new(DBErrorType::JsonMarshal, None, "product is not an object", path, "")),
  };

  let id = s.docs.add(PRODUCTS_COLLECTION, fields).await?;
  info!(id = %id, request_id = %ctx.request_id, uid = %pro.uid, "product created");

  Ok(id)
}
