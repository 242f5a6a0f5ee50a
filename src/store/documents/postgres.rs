use std::sync::Arc;

use serde_json::Value;
use sqlx::{FromRow, Pool, Postgres};
use tracing::debug;
use ulid::Ulid;

use crate::store::{
  database::errors::{handle_db_error, DBError, DBErrorType},
  documents::{Document, DocumentQuery, DocumentStore, Fields},
};

/// Order values the feed query accepts: integers of at most 18 digits, so the BIGINT
/// cast never fails. Fractions and exponents are skipped like the in-memory store does.
pub(crate) const ORDER_VALUE_PATTERN: &str = r"^-?[0-9]{1,18}$";

/// Documents kept as JSONB rows of a single `documents` table keyed by (collection, id).
#[derive(Debug)]
pub struct PostgresDocumentStore {
  pub(crate) db: Arc<Pool<Postgres>>,
}

#[derive(FromRow)]
struct DocumentRow {
  id: String,
  data: Value,
}

impl DocumentRow {
  fn into_document(self, path: &str) -> Result<Document, DBError> {
    match self.data {
      Value::Object(data) => Ok(Document { id: self.id, data }),
      other => Err(DBError::new(
        DBErrorType::JsonUnmarshal,
        None,
        "stored document is not a json object",
        path,
        format!("id: {}, type: {}", self.id, json_type(&other)),
      )),
    }
  }
}

fn json_type(v: &Value) -> &'static str {
  match v {
    Value::Null => "null",
    Value::Bool(_) => "bool",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}

impl PostgresDocumentStore {
  pub fn new(db: Arc<Pool<Postgres>>) -> Self {
    Self { db }
  }

  /// Creates the documents table when it is missing.
  pub async fn migrate(&self) -> Result<(), DBError> {
    let path = "products.store.documents.migrate";

    sqlx::query(
      r#"
        CREATE TABLE IF NOT EXISTS documents (
            collection TEXT NOT NULL,
            id TEXT NOT NULL,
            data JSONB NOT NULL,
            PRIMARY KEY (collection, id)
        )
      "#,
    )
    .execute(self.db.as_ref())
    .await
    .map_err(|e| handle_db_error(e, path))?;

    sqlx::query(
      r#"
        CREATE INDEX IF NOT EXISTS documents_timestamp_idx
        ON documents (collection, ((data ->> 'timestamp')::BIGINT) DESC, id DESC)
      "#,
    )
    .execute(self.db.as_ref())
    .await
    .map_err(|e| handle_db_error(e, path))?;

    Ok(())
  }
}

#[async_trait::async_trait]
impl DocumentStore for PostgresDocumentStore {
  async fn add(&self, collection: &str, data: Fields) -> Result<String, DBError> {
    let id = Ulid::new().to_string();

    sqlx::query(r#" INSERT INTO documents (collection, id, data) VALUES ($1, $2, $3) "#)
      .bind(collection)
      .bind(&id)
      .bind(Value::Object(data))
      .execute(self.db.as_ref())
      .await
      .map_err(|e| handle_db_error(e, "products.store.documents.add"))?;

    debug!(collection, id = %id, "document added");
    Ok(id)
  }

  async fn set(&self, collection: &str, id: &str, data: Fields) -> Result<(), DBError> {
    sqlx::query(
      r#"
        INSERT INTO documents (collection, id, data) VALUES ($1, $2, $3)
        ON CONFLICT (collection, id) DO UPDATE SET data = EXCLUDED.data
      "#,
    )
    .bind(collection)
    .bind(id)
    .bind(Value::Object(data))
    .execute(self.db.as_ref())
    .await
    .map_err(|e| handle_db_error(e, "products.store.documents.set"))?;

    Ok(())
  }

  async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, DBError> {
    let path = "products.store.documents.get";

    let row = sqlx::query_as::<_, DocumentRow>(
      r#" SELECT id, data FROM documents WHERE collection = $1 AND id = $2 "#,
    )
    .bind(collection)
    .bind(id)
    .fetch_optional(self.db.as_ref())
    .await
    .map_err(|e| handle_db_error(e, path))?;

    row.map(|r| r.into_document(path)).transpose()
  }

  async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), DBError> {
    let path = "products.store.documents.update";

    let res = sqlx::query(
      r#" UPDATE documents SET data = data || $3 WHERE collection = $1 AND id = $2 "#,
    )
    .bind(collection)
    .bind(id)
    .bind(Value::Object(fields))
    .execute(self.db.as_ref())
    .await
    .map_err(|e| handle_db_error(e, path))?;

    if res.rows_affected() == 0 {
      return Err(DBError::no_rows("no document to update", path, format!("{}/{}", collection, id)));
    }

    Ok(())
  }

  async fn delete(&self, collection: &str, id: &str) -> Result<bool, DBError> {
    let res = sqlx::query(r#" DELETE FROM documents WHERE collection = $1 AND id = $2 "#)
      .bind(collection)
      .bind(id)
      .execute(self.db.as_ref())
      .await
      .map_err(|e| handle_db_error(e, "products.store.documents.delete"))?;

    Ok(res.rows_affected() > 0)
  }

  async fn list(&self, collection: &str) -> Result<Vec<Document>, DBError> {
    let path = "products.store.documents.list";

    let rows = sqlx::query_as::<_, DocumentRow>(
      r#" SELECT id, data FROM documents WHERE collection = $1 ORDER BY id "#,
    )
    .bind(collection)
    .fetch_all(self.db.as_ref())
    .await
    .map_err(|e| handle_db_error(e, path))?;

    rows.into_iter().map(|r| r.into_document(path)).collect()
  }

  async fn query(&self, collection: &str, query: &DocumentQuery) -> Result<Vec<Document>, DBError> {
    let path = "products.store.documents.query";
    let (after_value, after_id) = match &query.start_after {
      Some(c) => (Some(c.order_value), Some(c.id().to_string())),
      None => (None, None),
    };

    // the CASE keeps the cast away from values that are not integers
    let rows = sqlx::query_as::<_, DocumentRow>(
      r#"
        SELECT id, data
        FROM (
          SELECT id, data,
            CASE
              WHEN jsonb_typeof(data -> $2) = 'number' AND (data ->> $2) ~ $6
              THEN (data ->> $2)::BIGINT
            END AS order_value
          FROM documents
          WHERE collection = $1
        ) docs
        WHERE order_value IS NOT NULL
          AND ($3::BIGINT IS NULL OR (order_value, id) < ($3::BIGINT, $4::TEXT))
        ORDER BY order_value DESC, id DESC
        LIMIT $5
      "#,
    )
    .bind(collection)
    .bind(&query.order_by)
    .bind(after_value)
    .bind(after_id)
    .bind(query.limit as i64)
    .bind(ORDER_VALUE_PATTERN)
    .fetch_all(self.db.as_ref())
    .await
    .map_err(|e| handle_db_error(e, path))?;

    rows.into_iter().map(|r| r.into_document(path)).collect()
  }
}
