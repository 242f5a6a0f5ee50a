use chrono::{DateTime, Utc, serde::ts_milliseconds};
use serde::{Deserialize, Serialize};

/// A user's favorite, stored at `user/{user_id}/like/{product_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeRecord {
  #[serde(skip)]
  pub product_id: String,
  #[serde(with = "ts_milliseconds")]
  pub liked_at: DateTime<Utc>,
}

pub fn likes_collection(user_id: &str) -> String {
  format!("user/{}/like", user_id)
}
