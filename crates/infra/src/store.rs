use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document not found: {collection}/{id}")]
    NotFound { collection: &'static str, id: Uuid },
    #[error("{0}")]
    Conflict(String),
    #[error("invalid document: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// In-memory document database: named collections of JSON documents keyed by
/// id. Stands in for the hosted document store the club app persists to; the
/// async surface matches what a remote backend would expose.
///
/// Collections are created lazily on first write; reads against an unknown
/// collection see an empty one. Individual operations are serialized by an
/// internal lock, but there is no transaction spanning multiple calls.
#[derive(Clone, Default)]
pub struct DocumentStore {
    collections: Arc<RwLock<HashMap<&'static str, BTreeMap<Uuid, serde_json::Value>>>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new document. Fails with `Conflict` if the id is already taken.
    pub async fn insert<T: Serialize>(
        &self,
        collection: &'static str,
        id: Uuid,
        doc: &T,
    ) -> Result<()> {
        let value = serde_json::to_value(doc)?;
        let mut collections = self.collections.write();
        let docs = collections.entry(collection).or_default();
        if docs.contains_key(&id) {
            return Err(StoreError::Conflict(format!(
                "document {collection}/{id} already exists"
            )));
        }
        docs.insert(id, value);
        Ok(())
    }

    /// Write a document unconditionally (create or replace).
    pub async fn set<T: Serialize>(
        &self,
        collection: &'static str,
        id: Uuid,
        doc: &T,
    ) -> Result<()> {
        let value = serde_json::to_value(doc)?;
        self.collections
            .write()
            .entry(collection)
            .or_default()
            .insert(id, value);
        Ok(())
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        collection: &'static str,
        id: Uuid,
    ) -> Result<Option<T>> {
        let value = {
            let collections = self.collections.read();
            collections.get(collection).and_then(|docs| docs.get(&id).cloned())
        };
        match value {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// All documents in a collection, in unspecified order. Callers sort by
    /// their own fields.
    pub async fn list<T: DeserializeOwned>(&self, collection: &'static str) -> Result<Vec<T>> {
        let values: Vec<serde_json::Value> = {
            let collections = self.collections.read();
            collections
                .get(collection)
                .map(|docs| docs.values().cloned().collect())
                .unwrap_or_default()
        };
        values
            .into_iter()
            .map(|value| serde_json::from_value(value).map_err(StoreError::from))
            .collect()
    }

    /// Delete a document. Idempotent: deleting a missing document is not an
    /// error. Returns whether a document was actually removed.
    pub async fn delete(&self, collection: &'static str, id: Uuid) -> Result<bool> {
        let mut collections = self.collections.write();
        Ok(collections
            .get_mut(collection)
            .map(|docs| docs.remove(&id).is_some())
            .unwrap_or(false))
    }

    /// Drop every document in a collection, returning how many were removed.
    pub async fn clear(&self, collection: &'static str) -> Result<u64> {
        let mut collections = self.collections.write();
        let removed = collections
            .get_mut(collection)
            .map(|docs| {
                let count = docs.len() as u64;
                docs.clear();
                count
            })
            .unwrap_or(0);
        Ok(removed)
    }
}
