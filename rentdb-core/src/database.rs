//! The database handle and its fixed collection schema.
//!
//! The application's data model is six collections, known at compile time.
//! [`Database`] owns a backend and hands out [`Collection`] handles for
//! them; it is constructed explicitly at startup and passed by reference
//! into whatever serves requests, rather than living as module-level
//! global state.

use crate::{backend::DocumentBackend, collection::Collection, error::StoreResult};

/// Property listings, seeded at startup.
pub const PROPERTIES: &str = "properties";
/// Per-user saved listings.
pub const FAVORITES: &str = "favorites";
/// Login sessions keyed by session token.
pub const SESSIONS: &str = "sessions";
/// Registered user accounts.
pub const USERS: &str = "users";
/// Viewing appointment requests against listings.
pub const VIEWING_REQUESTS: &str = "viewing_requests";
/// Subscription plans, seeded at startup.
pub const PLANS: &str = "plans";

/// Every collection the database exposes.
pub const COLLECTION_NAMES: [&str; 6] = [
    PROPERTIES,
    FAVORITES,
    SESSIONS,
    USERS,
    VIEWING_REQUESTS,
    PLANS,
];

/// A database handle over a [`DocumentBackend`].
///
/// Lives for the process lifetime: `new() -> ready -> close()`.
#[derive(Debug)]
pub struct Database<B: DocumentBackend> {
    backend: B,
}

impl<B: DocumentBackend> Database<B> {
    /// Wraps a ready backend in a database handle.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Property listings.
    pub fn properties(&self) -> Collection<'_, B> {
        Collection::new(PROPERTIES, &self.backend)
    }

    /// Per-user saved listings.
    pub fn favorites(&self) -> Collection<'_, B> {
        Collection::new(FAVORITES, &self.backend)
    }

    /// Login sessions.
    pub fn sessions(&self) -> Collection<'_, B> {
        Collection::new(SESSIONS, &self.backend)
    }

    /// Registered user accounts.
    pub fn users(&self) -> Collection<'_, B> {
        Collection::new(USERS, &self.backend)
    }

    /// Viewing appointment requests.
    pub fn viewing_requests(&self) -> Collection<'_, B> {
        Collection::new(VIEWING_REQUESTS, &self.backend)
    }

    /// Subscription plans.
    pub fn plans(&self) -> Collection<'_, B> {
        Collection::new(PLANS, &self.backend)
    }

    /// Returns a reference to the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Shuts the database down, consuming the handle.
    ///
    /// For the embedded backend this is a lifecycle no-op; it exists so
    /// calling code can treat the embedded store and a networked client
    /// uniformly.
    pub async fn close(self) -> StoreResult<()> {
        self.backend.close().await
    }
}
