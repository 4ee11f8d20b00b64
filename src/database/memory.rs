// In-memory document store for handler tests.

use super::{Collection, DocumentStore};
use crate::models::{DeleteAck, InsertAck, UpdateAck};
use crate::utils::AppError;
use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<Collection, Vec<Document>>>,
    calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a document directly, bypassing the call counter.
    pub fn seed(&self, collection: Collection, mut document: Document) -> ObjectId {
        let id = ensure_id(&mut document);
        self.collections
            .lock()
            .unwrap()
            .entry(collection)
            .or_default()
            .push(document);
        id
    }

    pub fn all(&self, collection: Collection) -> Vec<Document> {
        self.collections
            .lock()
            .unwrap()
            .get(&collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of store operations the handlers issued.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

fn ensure_id(document: &mut Document) -> ObjectId {
    match document.get("_id") {
        Some(Bson::ObjectId(id)) => *id,
        _ => {
            let id = ObjectId::new();
            document.insert("_id", id);
            id
        }
    }
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, expected)| document.get(key) == Some(expected))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(
        &self,
        collection: Collection,
        filter: Document,
        limit: Option<i64>,
    ) -> Result<Vec<Document>, AppError> {
        self.record_call();
        let cap = limit.map(|n| n as usize).unwrap_or(usize::MAX);
        Ok(self
            .all(collection)
            .into_iter()
            .filter(|doc| matches(doc, &filter))
            .take(cap)
            .collect())
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<Option<Document>, AppError> {
        self.record_call();
        Ok(self
            .all(collection)
            .into_iter()
            .find(|doc| matches(doc, &filter)))
    }

    async fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<InsertAck, AppError> {
        self.record_call();
        let id = self.seed(collection, document);
        Ok(InsertAck::new(Bson::ObjectId(id)))
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: Document,
        set: Document,
    ) -> Result<UpdateAck, AppError> {
        self.record_call();
        let mut collections = self.collections.lock().unwrap();
        let target = collections
            .entry(collection)
            .or_default()
            .iter_mut()
            .find(|doc| matches(doc, &filter));

        match target {
            Some(doc) => {
                let mut modified = false;
                for (key, value) in set {
                    if doc.get(&key) != Some(&value) {
                        doc.insert(key, value);
                        modified = true;
                    }
                }
                Ok(UpdateAck::new(1, u64::from(modified)))
            }
            None => Ok(UpdateAck::new(0, 0)),
        }
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<DeleteAck, AppError> {
        self.record_call();
        let mut collections = self.collections.lock().unwrap();
        let documents = collections.entry(collection).or_default();

        match documents.iter().position(|doc| matches(doc, &filter)) {
            Some(index) => {
                documents.remove(index);
                Ok(DeleteAck::new(1))
            }
            None => Ok(DeleteAck::new(0)),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
