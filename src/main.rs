use std::error::Error;

use market_products::{
  models::context::Context,
  server::{Server, ServerArgs},
};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
  let subscriber = FmtSubscriber::builder()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .finish();
  tracing::subscriber::set_global_default(subscriber)?;

  let mut server = Server::new(ServerArgs::default()).await?;
  let controller = server.run().await?;

  let ctx = std::sync::Arc::new(Context::default());
  let page = controller.products_page(ctx, None, None).await?;
  info!(items = page.items.len(), has_more = page.has_more, "feed is reachable");

  Ok(())
}
