//! Bounded, single-use view over a precomputed result set.

use bson::Document;

/// A cursor over the results of a `find`.
///
/// The cursor wraps a snapshot taken when the query ran: documents are
/// already filtered and projected, in insertion order, and later mutation
/// of the collection does not reach into it. `to_list` consumes the
/// cursor, making it single-use like its networked counterpart.
#[derive(Debug)]
pub struct Cursor {
    docs: Vec<Document>,
}

impl Cursor {
    pub(crate) fn new(docs: Vec<Document>) -> Self {
        Self { docs }
    }

    /// Materializes at most `limit` documents, preserving order.
    ///
    /// The returned list has `min(limit, result_count)` entries.
    pub async fn to_list(self, limit: usize) -> Vec<Document> {
        self.docs.into_iter().take(limit).collect()
    }
}
