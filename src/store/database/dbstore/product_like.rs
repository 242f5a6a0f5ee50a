use std::sync::Arc;

use serde_json::{to_value, Value};
use tracing::info;

use crate::{
  models::{
    context::Context,
    likes::{LikeRecord, likes_collection},
  },
  store::database::{
    dbstore::ProductsStoreImpl,
    errors::{DBError, DBErrorType},
  },
  utils::time::time_now,
};

/// Upserts the like, liking twice only refreshes `liked_at`.
pub(super) async fn product_like(
  s: &ProductsStoreImpl,
  _ctx: Arc<Context>,
  user_id: &str,
  product_id: &str,
) -> Result<LikeRecord, DBError> {
  let path = "products.store.product_like";

  let record = LikeRecord { product_id: product_id.to_string(), liked_at: time_now() };
  let fields = match to_value(&record) {
    Ok(Value::Object(map)) => map,
    Ok(_) => return Err(DBError::new(DBErrorType::JsonMarshal, None, "like is not an object", path, "")),
    Err(err) => {
      return Err(DBError::new(
        DBErrorType::JsonMarshal,
        Some(Box::new(err)),
        "failed to serialize like",
        path,
        "",
      ));
    }
  };

  s.docs.set(&likes_collection(user_id), product_id, fields).await?;
  info!(user_id, product_id, "product liked");

  Ok(record)
}
