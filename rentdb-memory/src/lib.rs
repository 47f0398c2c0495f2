//! Embedded in-memory backend for rentdb.
//!
//! This crate implements `rentdb_core::backend::DocumentBackend` entirely
//! in memory: insertion-ordered document vectors behind an async
//! read-write lock, with copy-on-write semantics on every read and
//! mutation. It stands in for a networked database client when no
//! external database is configured, so the application above it stays
//! backend-unaware.
//!
//! # Quick Start
//!
//! ```ignore
//! use bson::doc;
//! use rentdb_core::database::Database;
//! use rentdb_memory::MemoryBackend;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = MemoryBackend::builder()
//!         .properties(seed_listings())
//!         .plans(seed_plans())
//!         .build()
//!         .await?;
//!     let db = Database::new(backend);
//!
//!     let plan = db.plans().find_one(doc! { "slug": "free" }, Some(doc! { "_id": 0 })).await?;
//!
//!     db.close().await?;
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as rentdb_memory;

pub mod matcher;
pub mod store;

pub use store::{MemoryBackend, MemoryBackendBuilder};
