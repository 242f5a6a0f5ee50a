use std::{
  collections::HashMap,
  sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
  },
};

use parking_lot::Mutex;
use scopeguard::defer;
use serde_json::{Value, json};
use tracing::{error, info};

use crate::{
  controller::Controller,
  media::{ResizeConfig, resize_batch, select_images, upload_slots},
  models::{
    context::Context,
    errors::{AppError, ErrorKind},
    images::{ImageFile, ImageSlot, ImageState, SelectionReport},
    products::{Product, ProductPatch},
  },
  utils::time::time_now,
};

/// What a finished submit did, and where the caller should go next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
  Created(String),
  Updated(String),
}

impl SubmitOutcome {
  pub fn id(&self) -> &str {
    match self {
      SubmitOutcome::Created(id) | SubmitOutcome::Updated(id) => id,
    }
  }

  pub fn redirect_path(&self) -> String {
    match self {
      SubmitOutcome::Created(_) => "/".to_string(),
      SubmitOutcome::Updated(id) => format!("/detail/{}", id),
    }
  }
}

/// State of the create/edit listing form.
///
/// Holds the field values and the image slots in memory until `submit`, which uploads
/// the new images and then writes the product in one go. A form accepts a single
/// submit or image selection at a time, `is_loading` reports whether one is running.
#[derive(Debug)]
pub struct ProductForm {
  controller: Arc<Controller>,
  ctx: Arc<Context>,
  product_id: Option<String>,
  draft: Mutex<Product>,
  slots: Mutex<Vec<ImageSlot>>,
  loading: AtomicBool,
}

fn busy(where_: &str) -> AppError {
  AppError::new(where_, "products.form.busy", ErrorKind::FailedPrecondition, "", None)
}

impl ProductForm {
  /// A blank listing owned by the session user.
  pub fn new(controller: Arc<Controller>, ctx: Arc<Context>) -> Self {
    let draft = Product::draft(&ctx, time_now());
    Self {
      controller,
      ctx,
      product_id: None,
      draft: Mutex::new(draft),
      slots: Mutex::new(vec![]),
      loading: AtomicBool::new(false),
    }
  }

  /// A form seeded from a stored listing, its images become pass-through slots.
  pub fn edit(controller: Arc<Controller>, ctx: Arc<Context>, mut product: Product) -> Self {
    if product.uid.is_empty() {
      let session = ctx.session();
      product.uid = session.user_id.clone();
      product.user = session.display_name.clone();
      product.user_photo = session.photo_url.clone();
    }

    let slots = product.imgs.iter().cloned().map(ImageSlot::Existing).collect();
    Self {
      controller,
      ctx,
      product_id: Some(product.id.clone()),
      draft: Mutex::new(product),
      slots: Mutex::new(slots),
      loading: AtomicBool::new(false),
    }
  }

  pub async fn load(controller: Arc<Controller>, ctx: Arc<Context>, id: &str) -> Result<Self, AppError> {
    let path = "products.controller.product_form.load";
    match controller.product_get(ctx.clone(), id).await? {
      Some(product) => Ok(Self::edit(controller, ctx, product)),
      None => Err(AppError::new(path, "products.get.not_found", ErrorKind::NotFound, "", None)),
    }
  }

  pub fn product_id(&self) -> Option<&str> {
    self.product_id.as_deref()
  }

  pub fn is_loading(&self) -> bool {
    self.loading.load(Ordering::SeqCst)
  }

  /// Current field values; `imgs` is only filled on submit.
  pub fn draft(&self) -> Product {
    self.draft.lock().clone()
  }

  pub fn set_title(&self, title: impl Into<String>) {
    self.draft.lock().title = title.into();
  }

  pub fn set_body(&self, body: impl Into<String>) {
    self.draft.lock().body = body.into();
  }

  pub fn set_price(&self, price: u64) {
    self.draft.lock().price = price;
  }

  pub fn set_sell(&self, sell: impl Into<String>) {
    self.draft.lock().sell = sell.into();
  }

  pub fn set_want(&self, want: impl Into<String>) {
    self.draft.lock().want = want.into();
  }

  pub fn set_opened(&self, opened: bool) {
    self.draft.lock().opened = opened;
  }

  pub fn set_sold_out(&self, sold_out: bool) {
    self.draft.lock().sold_out = sold_out;
  }

  pub fn images(&self) -> Vec<ImageSlot> {
    self.slots.lock().clone()
  }

  pub fn image_states(&self) -> Vec<ImageState> {
    self.slots.lock().iter().map(|s| s.state()).collect()
  }

  /// Adds the image files of `files` to the form, resized. Nothing is added when the
  /// batch would go past the image limit; a file that cannot be resized is left out and
  /// listed in the report. The form is busy until the resize is done.
  pub async fn select_images(&self, files: Vec<ImageFile>) -> Result<SelectionReport, AppError> {
    let path = "products.controller.product_form.select_images";
    if self.loading.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst).is_err() {
      return Err(busy(path));
    }
    defer! {
      self.loading.store(false, Ordering::SeqCst);
    }

    let max = self.controller.cfg.max_images;
    let too_many = |details: String| {
      let params = HashMap::from([("Max".to_string(), json!(max))]);
      AppError::new(path, "products.images.too_many", ErrorKind::InvalidArgument, details, None)
        .with_params(params)
    };

    let present = self.slots.lock().len();
    let selection = select_images(files, present, max).map_err(|err| too_many(err.to_string()))?;
    let (resized, failed) =
      resize_batch(selection.images, ResizeConfig::from(self.controller.config())).await;

    let mut slots = self.slots.lock();
    let accepted = resized.len();
    slots.extend(resized.into_iter().map(ImageSlot::Pending));

    Ok(SelectionReport { accepted, skipped_non_images: selection.skipped_non_images, failed })
  }

  pub fn remove_image(&self, index: usize) -> Result<ImageSlot, AppError> {
    let path = "products.controller.product_form.remove_image";
    if self.is_loading() {
      return Err(busy(path));
    }

    let mut slots = self.slots.lock();
    if index >= slots.len() {
      return Err(AppError::new(path, "products.images.index.invalid", ErrorKind::InvalidArgument, "", None));
    }
    Ok(slots.remove(index))
  }

  /// Checks the fields the way the listing form requires them, every violation ends
  /// up in the error params keyed by field name.
  pub fn validate(&self) -> Result<(), AppError> {
    let path = "products.controller.product_form.validate";
    let cfg = self.controller.config();
    let mut params: HashMap<String, Value> = HashMap::new();

    if self.slots.lock().is_empty() {
      params.insert("imgs".into(), json!("products.images.required"));
    }

    let draft = self.draft.lock();
    if draft.title.trim().chars().count() < cfg.title_min_length {
      params.insert("title".into(), json!("products.title.too_short"));
    }

    let body_len = draft.body.trim().chars().count();
    if body_len < cfg.body_min_length || body_len > cfg.body_max_length {
      params.insert("body".into(), json!("products.body.length"));
    }

    if draft.price > cfg.price_max {
      params.insert("price".into(), json!("products.price.too_high"));
    }

    if params.is_empty() {
      return Ok(());
    }
    Err(AppError::new(path, "products.form.invalid", ErrorKind::InvalidArgument, "", None).with_params(params))
  }

  fn set_pending_state(&self, state: ImageState) {
    for slot in self.slots.lock().iter_mut() {
      if let ImageSlot::Pending(img) = slot {
        img.state = state;
      }
    }
  }

  /// Uploads the new images and writes the listing: created when the form is new,
  /// updated in place otherwise. A failed upload leaves the store untouched.
  pub async fn submit(&self) -> Result<SubmitOutcome, AppError> {
    let path = "products.controller.product_form.submit";
    if self.loading.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst).is_err() {
      return Err(busy(path));
    }
    defer! {
      self.loading.store(false, Ordering::SeqCst);
    }

    self.validate()?;

    self.set_pending_state(ImageState::Uploading);
    let slots = self.images();

    let imgs = match upload_slots(self.controller.storage.as_ref(), &slots).await {
      Ok(imgs) => imgs,
      Err(err) => {
        error!(request_id = %self.ctx.request_id, error = %err, "failed to upload product images");
        self.set_pending_state(ImageState::Resized);
        return Err(AppError::new(
          path,
          "products.images.upload.failed",
          ErrorKind::Internal,
          "",
          Some(Box::new(err)),
        ));
      }
    };

    // uploaded slots now live in the storage
    *self.slots.lock() = imgs.iter().cloned().map(ImageSlot::Existing).collect();

    let mut product = self.draft();
    product.imgs = imgs;

    let outcome = match &self.product_id {
      Some(id) => {
        self.controller.product_update(self.ctx.clone(), id, &ProductPatch::from(product)).await?;
        SubmitOutcome::Updated(id.clone())
      }
      None => SubmitOutcome::Created(self.controller.product_create(self.ctx.clone(), &product).await?),
    };

    info!(request_id = %self.ctx.request_id, product_id = %outcome.id(), "listing form submitted");
    Ok(outcome)
  }
}
