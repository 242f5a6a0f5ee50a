use std::sync::Arc;

use tracing::debug;

use crate::{
  controller::Controller,
  models::{
    context::Context,
    errors::{AppError, ErrorKind},
    page::{Page, PageCursor},
    products::Product,
  },
};

/// Numbered pages over the cursor paginated feed.
///
/// Remembers the cursor each visited page starts at, so going back to page 2 after
/// page 5 is a single query. Pages past the furthest known one are reached by walking
/// forward from it.
#[derive(Debug)]
pub struct FeedPager {
  controller: Arc<Controller>,
  ctx: Arc<Context>,
  page_size: usize,
  // starts[n - 1] is where page n begins
  starts: Vec<Option<PageCursor>>,
  current: usize,
  exhausted: bool,
}

impl FeedPager {
  pub fn new(controller: Arc<Controller>, ctx: Arc<Context>, page_size: Option<usize>) -> Self {
    let page_size = page_size.unwrap_or(controller.config().page_size);
    Self { controller, ctx, page_size, starts: vec![None], current: 0, exhausted: false }
  }

  /// Pages whose start is known.
  pub fn known_pages(&self) -> usize {
    self.starts.len()
  }

  /// Last page fetched, 0 before the first fetch.
  pub fn current_page(&self) -> usize {
    self.current
  }

  pub fn has_next(&self) -> bool {
    !self.exhausted || self.current < self.starts.len()
  }

  fn out_of_range(number: usize) -> AppError {
    AppError::new(
      "products.controller.feed.page",
      "products.feed.page.out_of_range",
      ErrorKind::NotFound,
      format!("page {}", number),
      None,
    )
  }

  fn remember(&mut self, number: usize, page: &Page<Product>) {
    if !page.has_more {
      self.exhausted = true;
      self.starts.truncate(number);
      return;
    }
    if let Some(next) = &page.next_cursor {
      if self.starts.len() == number {
        self.starts.push(Some(next.clone()));
      }
    }
  }

  pub async fn page(&mut self, number: usize) -> Result<Page<Product>, AppError> {
    if number == 0 {
      return Err(Self::out_of_range(number));
    }

    while self.starts.len() < number {
      if self.exhausted {
        return Err(Self::out_of_range(number));
      }
      let known = self.starts.len();
      let cursor = self.starts[known - 1].clone();
      let page = self.controller.products_page(self.ctx.clone(), cursor.as_ref(), Some(self.page_size)).await?;
      self.remember(known, &page);
    }

    let cursor = self.starts[number - 1].clone();
    let page = self.controller.products_page(self.ctx.clone(), cursor.as_ref(), Some(self.page_size)).await?;
    self.remember(number, &page);
    self.current = number;

    debug!(page = number, known = self.starts.len(), items = page.items.len(), "feed page");
    Ok(page)
  }

  pub async fn next(&mut self) -> Result<Page<Product>, AppError> {
    self.page(self.current + 1).await
  }
}
