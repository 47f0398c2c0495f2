//! rentdb: the embedded document store behind the rental marketplace API.
//!
//! This crate is the entry point for consumers. It re-exports the core
//! interfaces and the in-memory backend so route handlers can open a
//! database, query it with Mongo-style filter documents, and stay unaware
//! of whether a networked client or the embedded store is active.
//!
//! # Quick Start
//!
//! ```ignore
//! use bson::doc;
//! use rentdb::{prelude::*, memory::MemoryBackend};
//!
//! #[tokio::main]
//! async fn main() -> StoreResult<()> {
//!     let backend = MemoryBackend::builder()
//!         .properties(seed_listings())
//!         .plans(seed_plans())
//!         .build()
//!         .await?;
//!     let db = Database::new(backend);
//!
//!     // The same filter grammar a networked client would accept.
//!     let listings = db
//!         .properties()
//!         .find(
//!             doc! {
//!                 "country": { "$in": ["GB", "FR", "DE"] },
//!                 "price": { "$gte": 1000, "$lte": 2000 },
//!             },
//!             Some(doc! { "_id": 0 }),
//!         )
//!         .await?
//!         .to_list(10_000)
//!         .await;
//!
//!     println!("{} listings", listings.len());
//!
//!     db.close().await
//! }
//! ```

pub mod prelude;

pub use rentdb_core::{backend, collection, cursor, database, error, filter, path, projection};

// Re-export BSON types for convenience
pub use bson;

/// The embedded in-memory backend.
pub mod memory {
    pub use rentdb_memory::{MemoryBackend, MemoryBackendBuilder};
}
