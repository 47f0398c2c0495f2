//! The embedded in-memory storage backend.
//!
//! Documents live in insertion-ordered `Vec`s, one per collection, behind
//! a single async read-write lock. Every operation takes the lock exactly
//! once and runs its read-then-write to completion under it, so each
//! operation is atomic relative to the others and readers never observe a
//! half-mutated document.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use bson::{Bson, Document};
use mea::rwlock::RwLock;

use rentdb_core::{
    backend::{BackendBuilder, DocumentBackend},
    database::{COLLECTION_NAMES, PLANS, PROPERTIES},
    error::{StoreError, StoreResult},
    filter::Expr,
    projection,
};

use crate::matcher::DocumentMatcher;

type StoreMap = HashMap<String, Vec<Document>>;

/// In-memory stand-in for a networked database client.
///
/// The backend is seeded at construction with the fixed collection schema:
/// `properties` and `plans` from caller-supplied documents, the remaining
/// collections empty. Cloning the backend shares the underlying data.
///
/// Queries scan the collection; with no indexing this is linear per
/// operation, which is fine at the dataset sizes the embedded store is
/// meant for.
#[derive(Clone, Debug)]
pub struct MemoryBackend {
    collections: Arc<RwLock<StoreMap>>,
}

impl MemoryBackend {
    /// Creates a backend seeded with property listings and plans.
    pub fn new(properties: Vec<Document>, plans: Vec<Document>) -> Self {
        let mut map = StoreMap::with_capacity(COLLECTION_NAMES.len());
        for name in COLLECTION_NAMES {
            map.insert(name.to_string(), Vec::new());
        }
        map.insert(PROPERTIES.to_string(), properties);
        map.insert(PLANS.to_string(), plans);

        Self {
            collections: Arc::new(RwLock::new(map)),
        }
    }

    /// Creates a builder for a seeded backend.
    pub fn builder() -> MemoryBackendBuilder {
        MemoryBackendBuilder::default()
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

fn collection<'a>(store: &'a StoreMap, name: &str) -> StoreResult<&'a Vec<Document>> {
    store
        .get(name)
        .ok_or_else(|| StoreError::CollectionNotFound(name.to_string()))
}

fn collection_mut<'a>(store: &'a mut StoreMap, name: &str) -> StoreResult<&'a mut Vec<Document>> {
    store
        .get_mut(name)
        .ok_or_else(|| StoreError::CollectionNotFound(name.to_string()))
}

/// Index of the first document matching `expr`, in insertion order.
fn position_of_match(docs: &[Document], expr: &Expr) -> StoreResult<Option<usize>> {
    for (idx, doc) in docs.iter().enumerate() {
        if DocumentMatcher::matches(doc, expr)? {
            return Ok(Some(idx));
        }
    }

    Ok(None)
}

#[async_trait]
impl DocumentBackend for MemoryBackend {
    async fn find_one(
        &self,
        collection_name: &str,
        filter: &Document,
        projection_spec: Option<&Document>,
    ) -> StoreResult<Option<Document>> {
        let expr = Expr::parse(filter)?;
        let store = self.collections.read().await;
        let docs = collection(&store, collection_name)?;

        for doc in docs {
            if DocumentMatcher::matches(doc, &expr)? {
                return Ok(Some(projection::apply(doc, projection_spec)));
            }
        }

        Ok(None)
    }

    async fn find_all(
        &self,
        collection_name: &str,
        filter: &Document,
        projection_spec: Option<&Document>,
    ) -> StoreResult<Vec<Document>> {
        let expr = Expr::parse(filter)?;
        let store = self.collections.read().await;
        let docs = collection(&store, collection_name)?;

        let mut results = Vec::new();
        for doc in docs {
            if DocumentMatcher::matches(doc, &expr)? {
                results.push(projection::apply(doc, projection_spec));
            }
        }

        Ok(results)
    }

    async fn insert_one(&self, collection_name: &str, document: Document) -> StoreResult<()> {
        let mut store = self.collections.write().await;
        let docs = collection_mut(&mut store, collection_name)?;

        docs.push(document);
        log::debug!("inserted document into {collection_name} ({} total)", docs.len());

        Ok(())
    }

    async fn update_one(
        &self,
        collection_name: &str,
        filter: &Document,
        update: &Document,
    ) -> StoreResult<()> {
        let expr = Expr::parse(filter)?;
        let mut store = self.collections.write().await;
        let docs = collection_mut(&mut store, collection_name)?;

        let Some(idx) = position_of_match(docs, &expr)? else {
            return Ok(());
        };

        // Without a $set there is nothing to apply, even on a match.
        let Some(Bson::Document(changes)) = update.get("$set") else {
            return Ok(());
        };

        // Build the replacement off to the side, then swap it in whole.
        let mut updated = docs[idx].clone();
        for (field, value) in changes {
            updated.insert(field.clone(), value.clone());
        }
        docs[idx] = updated;
        log::debug!("updated document in {collection_name}");

        Ok(())
    }

    async fn delete_one(&self, collection_name: &str, filter: &Document) -> StoreResult<()> {
        let expr = Expr::parse(filter)?;
        let mut store = self.collections.write().await;
        let docs = collection_mut(&mut store, collection_name)?;

        if let Some(idx) = position_of_match(docs, &expr)? {
            docs.remove(idx);
            log::debug!("deleted document from {collection_name}");
        }

        Ok(())
    }

    async fn delete_many(&self, collection_name: &str, filter: &Document) -> StoreResult<()> {
        let expr = Expr::parse(filter)?;
        let mut store = self.collections.write().await;
        let docs = collection_mut(&mut store, collection_name)?;

        // Evaluate before mutating so a matcher error leaves the
        // collection untouched.
        let mut kept = Vec::with_capacity(docs.len());
        for doc in docs.iter() {
            if !DocumentMatcher::matches(doc, &expr)? {
                kept.push(doc.clone());
            }
        }

        let removed = docs.len() - kept.len();
        *docs = kept;
        if removed > 0 {
            log::debug!("deleted {removed} documents from {collection_name}");
        }

        Ok(())
    }

    async fn count_documents(&self, collection_name: &str, filter: &Document) -> StoreResult<u64> {
        let expr = Expr::parse(filter)?;
        let store = self.collections.read().await;
        let docs = collection(&store, collection_name)?;

        let mut count = 0u64;
        for doc in docs {
            if DocumentMatcher::matches(doc, &expr)? {
                count += 1;
            }
        }

        Ok(count)
    }
}

/// Builder for a seeded [`MemoryBackend`].
///
/// ```ignore
/// let backend = MemoryBackend::builder()
///     .properties(seed_listings)
///     .plans(seed_plans)
///     .build()
///     .await?;
/// ```
#[derive(Default)]
pub struct MemoryBackendBuilder {
    properties: Vec<Document>,
    plans: Vec<Document>,
}

impl MemoryBackendBuilder {
    /// Seeds the `properties` collection.
    pub fn properties(mut self, documents: Vec<Document>) -> Self {
        self.properties = documents;
        self
    }

    /// Seeds the `plans` collection.
    pub fn plans(mut self, documents: Vec<Document>) -> Self {
        self.plans = documents;
        self
    }
}

#[async_trait]
impl BackendBuilder for MemoryBackendBuilder {
    type Backend = MemoryBackend;

    async fn build(self) -> StoreResult<Self::Backend> {
        Ok(MemoryBackend::new(self.properties, self.plans))
    }
}
