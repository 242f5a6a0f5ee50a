use std::sync::Arc;

use serde_json::{from_value, Value};
use tracing::debug;

use crate::{
  models::{
    context::Context,
    likes::{LikeRecord, likes_collection},
  },
  store::database::{
    dbstore::ProductsStoreImpl,
    errors::{DBError, DBErrorType},
  },
};

pub(super) async fn products_liked(
  s: &ProductsStoreImpl,
  _ctx: Arc<Context>,
  user_id: &str,
) -> Result<Vec<LikeRecord>, DBError> {
  let path = "products.store.products_liked";

  let docs = s.docs.list(&likes_collection(user_id)).await?;

  let mut likes = docs
    .into_iter()
    .map(|doc| {
      let mut like: LikeRecord = from_value(Value::Object(doc.data)).map_err(|err| {
        DBError::new(
          DBErrorType::JsonUnmarshal,
          Some(Box::new(err)),
          "failed to deserialize like",
          path,
          format!("product_id: {}", doc.id),
        )
      })?;
      like.product_id = doc.id;
      Ok(like)
    })
    .collect::<Result<Vec<LikeRecord>, DBError>>()?;

  likes.sort_by(|a, b| b.liked_at.cmp(&a.liked_at).then_with(|| a.product_id.cmp(&b.product_id)));
  debug!(user_id, count = likes.len(), "liked products listed");

  Ok(likes)
}
