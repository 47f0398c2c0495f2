//! Named collection handles.
//!
//! A [`Collection`] borrows the backend from its
//! [`Database`](crate::database::Database) and exposes the operation set
//! the route handlers consume: `find_one`, `find`, `insert_one`,
//! `update_one`, `delete_one`, `delete_many`, `count_documents`. Reads
//! come back as deep copies (via [`Cursor`] for `find`), so callers can
//! never alias stored state.
//!
//! # Example
//!
//! ```ignore
//! use bson::doc;
//!
//! let active = db
//!     .properties()
//!     .find(doc! { "agent_info.id": agent_id, "status": "active" }, Some(doc! { "_id": 0 }))
//!     .await?
//!     .to_list(10_000)
//!     .await;
//! ```

use bson::Document;

use crate::{backend::DocumentBackend, cursor::Cursor, error::StoreResult};

/// A handle to one named collection of a database.
#[derive(Debug)]
pub struct Collection<'a, B: DocumentBackend> {
    name: &'static str,
    backend: &'a B,
}

impl<'a, B: DocumentBackend> Collection<'a, B> {
    pub(crate) fn new(name: &'static str, backend: &'a B) -> Self {
        Self { name, backend }
    }

    /// Returns the name of this collection.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the first document (insertion order) matching `filter`,
    /// projected, or `None` if nothing matches.
    pub async fn find_one(
        &self,
        filter: Document,
        projection: Option<Document>,
    ) -> StoreResult<Option<Document>> {
        self.backend
            .find_one(self.name, &filter, projection.as_ref())
            .await
    }

    /// Returns a [`Cursor`] over all matching documents, projected, in
    /// insertion order. The cursor wraps a snapshot taken now.
    pub async fn find(
        &self,
        filter: Document,
        projection: Option<Document>,
    ) -> StoreResult<Cursor> {
        let docs = self
            .backend
            .find_all(self.name, &filter, projection.as_ref())
            .await?;

        Ok(Cursor::new(docs))
    }

    /// Appends a document. Identifier uniqueness is the caller's concern.
    pub async fn insert_one(&self, document: Document) -> StoreResult<()> {
        self.backend.insert_one(self.name, document).await
    }

    /// Applies a `{"$set": {...}}` update to the first matching document;
    /// silent no-op when nothing matches or `$set` is absent.
    pub async fn update_one(&self, filter: Document, update: Document) -> StoreResult<()> {
        self.backend
            .update_one(self.name, &filter, &update)
            .await
    }

    /// Removes the first matching document; silent no-op if none match.
    pub async fn delete_one(&self, filter: Document) -> StoreResult<()> {
        self.backend.delete_one(self.name, &filter).await
    }

    /// Removes every matching document.
    pub async fn delete_many(&self, filter: Document) -> StoreResult<()> {
        self.backend.delete_many(self.name, &filter).await
    }

    /// Counts matching documents.
    pub async fn count_documents(&self, filter: Document) -> StoreResult<u64> {
        self.backend.count_documents(self.name, &filter).await
    }
}
