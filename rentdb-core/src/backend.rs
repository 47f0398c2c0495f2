//! Storage backend abstraction for the document store.
//!
//! [`DocumentBackend`] is the seam between the application and whatever
//! holds its data. The shipped implementation is the embedded in-memory
//! store (`rentdb-memory`); the trait is shaped so a networked client can
//! slot in behind the same [`Database`](crate::database::Database) handle
//! without the route handlers noticing which backend is active.
//!
//! All operations are async and addressed by collection name. Filters and
//! projections are plain [`bson::Document`]s in the grammar described in
//! [`filter`](crate::filter); there is no wire format.

use async_trait::async_trait;
use bson::Document;
use std::fmt::Debug;

use crate::error::StoreResult;

/// Abstract interface implemented by document storage backends.
///
/// # Atomicity
///
/// Each operation must be atomic relative to the others: a concurrent
/// reader observes either the fully-pre- or fully-post-mutation state of a
/// collection, never a torn document. Implementations also guarantee that
/// returned documents are deep copies: a caller can never mutate stored
/// state through a document it was handed, nor observe later mutations.
///
/// # Errors
///
/// "No match" is never an error. Operations fail only on malformed filters
/// ([`StoreError::InvalidFilter`](crate::error::StoreError::InvalidFilter),
/// [`StoreError::InvalidRegex`](crate::error::StoreError::InvalidRegex))
/// or an unknown collection name
/// ([`StoreError::CollectionNotFound`](crate::error::StoreError::CollectionNotFound)).
#[async_trait]
pub trait DocumentBackend: Send + Sync + Debug {
    /// Returns the first document (insertion order) matching `filter`,
    /// projected, or `None` if nothing matches.
    async fn find_one(
        &self,
        collection: &str,
        filter: &Document,
        projection: Option<&Document>,
    ) -> StoreResult<Option<Document>>;

    /// Returns all matching documents, projected, in insertion order.
    ///
    /// The result is a snapshot: it is not affected by mutations that
    /// happen after this call returns.
    async fn find_all(
        &self,
        collection: &str,
        filter: &Document,
        projection: Option<&Document>,
    ) -> StoreResult<Vec<Document>>;

    /// Appends a document to the collection.
    ///
    /// No uniqueness or identifier checks happen at this layer; callers
    /// generate their own unique `id` fields before inserting.
    async fn insert_one(&self, collection: &str, document: Document) -> StoreResult<()>;

    /// Applies a `{"$set": {...}}` update to the first matching document.
    ///
    /// Every key under `$set` is assigned as a top-level field on a fresh
    /// copy of the document, which then atomically replaces the stored
    /// entry; unmentioned fields are untouched. An update without a `$set`
    /// key is a no-op even when a document matches, and an unmatched
    /// filter is a silent no-op.
    async fn update_one(
        &self,
        collection: &str,
        filter: &Document,
        update: &Document,
    ) -> StoreResult<()>;

    /// Removes the first matching document; silent no-op if none match.
    async fn delete_one(&self, collection: &str, filter: &Document) -> StoreResult<()>;

    /// Removes every matching document; silent no-op if none match.
    async fn delete_many(&self, collection: &str, filter: &Document) -> StoreResult<()>;

    /// Counts matching documents.
    async fn count_documents(&self, collection: &str, filter: &Document) -> StoreResult<u64>;

    /// Releases backend resources.
    ///
    /// The embedded store holds nothing worth releasing; the method exists
    /// for interface parity with a networked client so calling code can
    /// treat both uniformly.
    async fn close(&self) -> StoreResult<()> {
        Ok(())
    }
}

/// Factory trait for constructing backend instances.
#[async_trait]
pub trait BackendBuilder {
    type Backend: DocumentBackend;

    /// Builds and returns a ready backend.
    async fn build(self) -> StoreResult<Self::Backend>;
}
