//! Core interfaces of rentdb, the embedded document store behind the
//! rental marketplace backend.
//!
//! This crate defines everything a backend-agnostic consumer touches:
//!
//! - **Backend abstraction** ([`backend`]) - the async trait a storage
//!   backend implements
//! - **Database and collections** ([`database`], [`collection`]) - the
//!   fixed six-collection schema and the per-collection operation set
//! - **Filter grammar** ([`filter`]) - parsing of Mongo-style filter
//!   documents into an expression tree, plus the visitor evaluated over it
//! - **Path resolution** ([`path`]) - dotted field lookup in nested
//!   documents
//! - **Projection** ([`projection`]) - exclusion-style result shaping
//! - **Cursors** ([`cursor`]) - bounded, single-use result views
//! - **Error handling** ([`error`]) - error and result types
//!
//! Documents themselves are [`bson::Document`]s: ordered, string-keyed,
//! schemaless. The store never interprets application fields except
//! through filters and projections.

#[allow(unused_extern_crates)]
extern crate self as rentdb_core;

pub mod backend;
pub mod collection;
pub mod cursor;
pub mod database;
pub mod error;
pub mod filter;
pub mod path;
pub mod projection;
