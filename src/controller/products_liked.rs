use std::sync::Arc;

use tracing::{debug, error};

use crate::{
  controller::{Controller, helpers::check_signed_in},
  models::{context::Context, errors::AppError, likes::LikeRecord},
};

pub(super) async fn products_liked(c: &Controller, ctx: Arc<Context>) -> Result<Vec<LikeRecord>, AppError> {
  let path = "products.controller.products_liked";
  check_signed_in(path, &ctx)?;

  let user_id = ctx.user_id();
  let likes = c.store.products_liked(ctx.clone(), user_id).await.map_err(|err| {
    error!(request_id = %ctx.request_id, user_id = %user_id, error = %err, "failed to list liked products");
    err.to_app_error(path, "products.likes.failed")
  })?;

  debug!(request_id = %ctx.request_id, user_id = %user_id, likes = likes.len(), "liked products");
  Ok(likes)
}

#[cfg(test)]
mod tests {
  use crate::{
    controller::tests::{ctx, harness, seed},
    models::errors::ErrorKind,
  };

  #[tokio::test]
  async fn no_likes_is_empty() {
    let h = harness();
    assert!(h.controller.products_liked(ctx("u1")).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn each_distinct_like_is_listed_once() {
    let h = harness();
    let ctx = ctx("u1");
    let ids = seed(&h.controller, ctx.clone(), 3).await;
    for id in &ids {
      h.controller.product_like(ctx.clone(), id).await.unwrap();
    }

    let liked = h.controller.products_liked(ctx.clone()).await.unwrap();
    assert_eq!(liked.len(), 3);
    assert!(liked.windows(2).all(|w| w[0].liked_at >= w[1].liked_at));

    // other users see their own set
    assert!(h.controller.products_liked(crate::controller::tests::ctx("u2")).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn unreachable_store_fails_the_listing() {
    let h = harness();
    h.docs.set_unavailable(true);
    let err = h.controller.products_liked(ctx("u1")).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unavailable);
  }
}
