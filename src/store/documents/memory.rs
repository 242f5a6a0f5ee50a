use std::{
  collections::{BTreeMap, HashMap},
  sync::atomic::{AtomicBool, Ordering},
};

use parking_lot::RwLock;
use ulid::Ulid;

use crate::store::{
  database::errors::{DBError, DBErrorType},
  documents::{Document, DocumentQuery, DocumentStore, Fields},
};

/// Process local document store, mirrors the semantics of the database backed one.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
  collections: RwLock<HashMap<String, BTreeMap<String, Fields>>>,
  unavailable: AtomicBool,
}

impl MemoryDocumentStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// While set, every call fails the way an unreachable database does.
  pub fn set_unavailable(&self, unavailable: bool) {
    self.unavailable.store(unavailable, Ordering::SeqCst);
  }

  pub fn count(&self, collection: &str) -> usize {
    self.collections.read().get(collection).map(|c| c.len()).unwrap_or(0)
  }

  fn check(&self, path: &str) -> Result<(), DBError> {
    if self.unavailable.load(Ordering::SeqCst) {
      return Err(DBError::new(
        DBErrorType::Connection,
        Some("document store is unreachable".into()),
        "database connection exception",
        path,
        "",
      ));
    }
    Ok(())
  }
}

#[async_trait::async_trait]
impl DocumentStore for MemoryDocumentStore {
  async fn add(&self, collection: &str, data: Fields) -> Result<String, DBError> {
    self.check("products.store.documents.add")?;
    let id = Ulid::new().to_string();
    self.collections.write().entry(collection.to_string()).or_default().insert(id.clone(), data);
    Ok(id)
  }

  async fn set(&self, collection: &str, id: &str, data: Fields) -> Result<(), DBError> {
    self.check("products.store.documents.set")?;
    self.collections.write().entry(collection.to_string()).or_default().insert(id.to_string(), data);
    Ok(())
  }

  async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, DBError> {
    self.check("products.store.documents.get")?;
    let collections = self.collections.read();
    let doc = collections
      .get(collection)
      .and_then(|c| c.get(id))
      .map(|data| Document { id: id.to_string(), data: data.clone() });
    Ok(doc)
  }

  async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), DBError> {
    let path = "products.store.documents.update";
    self.check(path)?;
    let mut collections = self.collections.write();
    let doc = collections
      .get_mut(collection)
      .and_then(|c| c.get_mut(id))
      .ok_or_else(|| DBError::no_rows("no document to update", path, format!("{}/{}", collection, id)))?;
    doc.extend(fields);
    Ok(())
  }

  async fn delete(&self, collection: &str, id: &str) -> Result<bool, DBError> {
    self.check("products.store.documents.delete")?;
    let mut collections = self.collections.write();
    Ok(collections.get_mut(collection).and_then(|c| c.remove(id)).is_some())
  }

  async fn list(&self, collection: &str) -> Result<Vec<Document>, DBError> {
    self.check("products.store.documents.list")?;
    let collections = self.collections.read();
    let docs = collections
      .get(collection)
      .map(|c| {
        c.iter().map(|(id, data)| Document { id: id.clone(), data: data.clone() }).collect()
      })
      .unwrap_or_default();
    Ok(docs)
  }

  async fn query(&self, collection: &str, query: &DocumentQuery) -> Result<Vec<Document>, DBError> {
    self.check("products.store.documents.query")?;
    let collections = self.collections.read();
    let Some(docs) = collections.get(collection) else {
      return Ok(vec![]);
    };

    // documents without the order field never show up in an ordered query
    let mut keyed: Vec<(i64, &String, &Fields)> = docs
      .iter()
      .filter_map(|(id, data)| data.get(&query.order_by).and_then(|v| v.as_i64()).map(|v| (v, id, data)))
      .collect();
    keyed.sort_by(|a, b| (b.0, b.1).cmp(&(a.0, a.1)));

    let after = query.start_after.as_ref();
    let page = keyed
      .into_iter()
      .filter(|(v, id, _)| match after {
        Some(c) => (*v, id.as_str()) < (c.order_value, c.id()),
        None => true,
      })
      .take(query.limit)
      .map(|(_, id, data)| Document { id: id.clone(), data: data.clone() })
      .collect();

    Ok(page)
  }
}
