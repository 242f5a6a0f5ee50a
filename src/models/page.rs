use std::fmt;

use thiserror::Error;

/// Opaque position in the listing feed: the last document a page returned.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageCursor {
  pub(crate) order_value: i64,
  pub(crate) id: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CursorError {
  #[error("malformed page cursor token")]
  Malformed,
  #[error("page cursor token has an invalid position")]
  InvalidPosition,
  #[error("page cursor token has an empty document id")]
  MissingId,
}

impl PageCursor {
  pub(crate) fn new(order_value: i64, id: impl Into<String>) -> Self {
    Self { order_value, id: id.into() }
  }

  /// Renders the cursor as a token a caller can hand back on the next request.
  pub fn token(&self) -> String {
    format!("{}.{}", self.order_value, self.id)
  }

  pub fn from_token(token: &str) -> Result<Self, CursorError> {
    let (position, id) = token.split_once('.').ok_or(CursorError::Malformed)?;
    let order_value = position.parse::<i64>().map_err(|_| CursorError::InvalidPosition)?;
    if id.is_empty() {
      return Err(CursorError::MissingId);
    }
    Ok(Self { order_value, id: id.to_string() })
  }

  pub(crate) fn id(&self) -> &str {
    &self.id
  }
}

impl fmt::Display for PageCursor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.token())
  }
}

/// One page of an ordered listing.
///
/// `has_more` is only an estimate: a page that exactly fills the requested size is
/// assumed to be followed by more data, which is wrong when the final page is full.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
  pub items: Vec<T>,
  pub next_cursor: Option<PageCursor>,
  pub has_more: bool,
}

impl<T> Page<T> {
  pub fn empty() -> Self {
    Self { items: vec![], next_cursor: None, has_more: false }
  }

  pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
    Page {
      items: self.items.into_iter().map(f).collect(),
      next_cursor: self.next_cursor,
      has_more: self.has_more,
    }
  }
}
