use std::{collections::HashSet, io::Cursor, sync::Arc};

use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb, RgbImage};
use market_products::{
  controller::{Controller, ControllerArgs, FeedPager, ProductForm, SubmitOutcome},
  models::{
    config::ProductsConfig,
    context::{Context, Session},
    errors::ErrorKind,
    images::{ImageFile, ImageSlot},
    products::PRODUCTS_COLLECTION,
  },
  store::{
    database::dbstore::{ProductsStoreImpl, ProductsStoreImplArgs},
    documents::MemoryDocumentStore,
    storage::MemoryBlobStore,
  },
};

struct App {
  docs: Arc<MemoryDocumentStore>,
  blobs: Arc<MemoryBlobStore>,
  controller: Arc<Controller>,
}

fn app() -> App {
  let docs = Arc::new(MemoryDocumentStore::new());
  let blobs = Arc::new(MemoryBlobStore::new());
  let store = ProductsStoreImpl::new(ProductsStoreImplArgs { docs: docs.clone() });
  let controller = Arc::new(Controller::new(ControllerArgs {
    cfg: ProductsConfig::default(),
    store: Arc::new(store),
    storage: blobs.clone(),
  }));
  App { docs, blobs, controller }
}

fn seller(id: &str) -> Arc<Context> {
  let session = Session { user_id: id.into(), display_name: "seller".into(), photo_url: String::new() };
  Arc::new(Context::new(session, "it"))
}

fn photo(name: &str, width: u32) -> ImageFile {
  let img: RgbImage = ImageBuffer::from_fn(width, width / 2, |x, _| Rgb([(x % 200) as u8, 10, 10]));
  let mut out = Cursor::new(Vec::new());
  DynamicImage::ImageRgb8(img).write_to(&mut out, ImageFormat::Png).unwrap();
  ImageFile::new(name, "image/png", out.into_inner())
}

async fn list_one(app: &App, ctx: Arc<Context>, title: &str) -> String {
  let form = ProductForm::new(app.controller.clone(), ctx);
  form.set_title(title);
  form.set_body("in the original box");
  form.set_price(5000);
  form.select_images(vec![photo("cover.png", 400)]).await.unwrap();
  form.submit().await.unwrap().id().to_string()
}

#[tokio::test]
async fn five_images_at_once_are_rejected_whole() {
  let app = app();
  let form = ProductForm::new(app.controller.clone(), seller("u1"));
  let files = (0..5).map(|i| photo(&format!("{}.png", i), 200)).collect();

  let err = form.select_images(files).await.unwrap_err();

  assert_eq!(err.kind, ErrorKind::InvalidArgument);
  assert!(form.images().is_empty());
}

#[tokio::test]
async fn one_unreadable_file_out_of_three_leaves_two_images() {
  let app = app();
  let form = ProductForm::new(app.controller.clone(), seller("u1"));
  let files = vec![
    photo("a.png", 1200),
    ImageFile::new("b.png", "image/png", b"truncated".to_vec()),
    photo("c.png", 200),
  ];

  let report = form.select_images(files).await.unwrap();

  assert_eq!(report.accepted, 2);
  assert_eq!(report.failed.len(), 1);
  assert_eq!(report.failed[0].name, "b.png");
  assert_eq!(form.images().len(), 2);
}

#[tokio::test]
async fn editing_with_only_existing_images_uploads_nothing() {
  let app = app();
  let ctx = seller("u1");
  let id = list_one(&app, ctx.clone(), "desk").await;
  let uploads_after_create = app.blobs.upload_count();
  let before = app.controller.product_get(ctx.clone(), &id).await.unwrap().unwrap();

  let form = ProductForm::load(app.controller.clone(), ctx.clone(), &id).await.unwrap();
  assert!(form.images().iter().all(ImageSlot::is_existing));
  form.set_sold_out(true);
  let outcome = form.submit().await.unwrap();

  assert_eq!(outcome, SubmitOutcome::Updated(id.clone()));
  assert_eq!(app.blobs.upload_count(), uploads_after_create);
  let after = app.controller.product_get(ctx, &id).await.unwrap().unwrap();
  assert_eq!(after.imgs, before.imgs);
  assert!(after.sold_out);
}

#[tokio::test]
async fn failed_upload_leaves_no_listing_behind() {
  let app = app();
  app.blobs.fail_uploads_matching("products/imgs/original/");
  let form = ProductForm::new(app.controller.clone(), seller("u1"));
  form.set_title("chair");
  form.set_body("sturdy");
  form.select_images(vec![photo("chair.png", 300)]).await.unwrap();

  let err = form.submit().await.unwrap_err();

  assert_eq!(err.id, "products.images.upload.failed");
  assert_eq!(app.docs.count(PRODUCTS_COLLECTION), 0);
  assert!(!form.is_loading());

  app.blobs.clear_failures();
  assert!(matches!(form.submit().await.unwrap(), SubmitOutcome::Created(_)));
  assert_eq!(app.docs.count(PRODUCTS_COLLECTION), 1);
}

#[tokio::test]
async fn feed_walks_every_listing_once_newest_first() {
  let app = app();
  let ctx = seller("u1");
  let mut listed = Vec::new();
  for i in 0..5 {
    listed.push(list_one(&app, ctx.clone(), &format!("item {}", i)).await);
    tokio::time::sleep(std::time::Duration::from_millis(2)).await;
  }

  let mut pager = FeedPager::new(app.controller.clone(), ctx.clone(), Some(2));
  let mut seen = Vec::new();
  while pager.has_next() {
    let page = pager.next().await.unwrap();
    seen.extend(page.items);
  }

  let ids: Vec<String> = seen.iter().map(|p| p.id.clone()).collect();
  listed.reverse();
  assert_eq!(ids, listed);
  assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 5);
  assert!(seen.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
}

#[tokio::test]
async fn likes_are_a_per_user_set() {
  let app = app();
  let seller_ctx = seller("u1");
  let a = list_one(&app, seller_ctx.clone(), "a").await;
  let b = list_one(&app, seller_ctx, "b").await;

  let buyer = seller("u2");
  app.controller.product_like(buyer.clone(), &a).await.unwrap();
  app.controller.product_like(buyer.clone(), &b).await.unwrap();
  tokio::time::sleep(std::time::Duration::from_millis(2)).await;
  app.controller.product_like(buyer.clone(), &a).await.unwrap();

  let liked = app.controller.products_liked(buyer).await.unwrap();
  assert_eq!(liked.len(), 2);
  assert_eq!(liked[0].product_id, a);
}
