//! Convenient re-exports of commonly used types from rentdb.
//!
//! Import this prelude module to quickly access the most frequently used types
//! and traits without needing to import from multiple sub-modules:
//!
//! ```ignore
//! use rentdb::prelude::*;
//! ```
//!
//! This provides access to:
//! - The database handle and collection interfaces
//! - Store backends and builders
//! - Filter parsing and the filter visitor trait
//! - Error types

pub use rentdb_core::{
    backend::{BackendBuilder, DocumentBackend},
    collection::Collection,
    cursor::Cursor,
    database::Database,
    error::{StoreError, StoreResult},
    filter::{Expr, FilterVisitor, Pred},
};
