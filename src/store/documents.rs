mod memory;
mod postgres;

pub use memory::MemoryDocumentStore;
pub use postgres::PostgresDocumentStore;

use std::fmt;

use serde_json::{Map, Value};

use crate::{models::page::PageCursor, store::database::errors::DBError};

pub type Fields = Map<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
  pub id: String,
  pub data: Fields,
}

impl Document {
  /// Integer value of `field`, used as the sort key of ordered queries.
  pub fn order_value(&self, field: &str) -> Option<i64> {
    self.data.get(field).and_then(Value::as_i64)
  }

  pub fn cursor(&self, field: &str) -> Option<PageCursor> {
    self.order_value(field).map(|v| PageCursor::new(v, self.id.clone()))
  }
}

/// Descending ordered, cursor paginated read over one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentQuery {
  pub order_by: String,
  pub start_after: Option<PageCursor>,
  pub limit: usize,
}

/// Client of the document database. Documents are addressed by a collection path
/// (e.g. `products` or `user/{id}/like`) and an id unique inside that collection.
#[async_trait::async_trait]
pub trait DocumentStore: fmt::Debug + Send + Sync {
  /// Inserts a document under a freshly generated id and returns that id.
  async fn add(&self, collection: &str, data: Fields) -> Result<String, DBError>;

  /// Creates or fully replaces the document at `id`.
  async fn set(&self, collection: &str, id: &str, data: Fields) -> Result<(), DBError>;

  async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, DBError>;

  /// Merges `fields` into an existing document, `NoRows` if it does not exist.
  async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), DBError>;

  /// Removes the document, returning whether it existed.
  async fn delete(&self, collection: &str, id: &str) -> Result<bool, DBError>;

  async fn list(&self, collection: &str) -> Result<Vec<Document>, DBError>;

  /// Documents ordered by `order_by` descending, ties by id descending, strictly after
  /// `start_after` when present, at most `limit` of them.
  async fn query(&self, collection: &str, query: &DocumentQuery) -> Result<Vec<Document>, DBError>;
}
