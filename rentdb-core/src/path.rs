//! Dotted field path resolution against nested documents.

use bson::{Bson, Document};

/// Resolves a dotted path like `"agent_info.id"` against a document.
///
/// Descends one key per path segment while the current value is itself a
/// document. Returns `None` when any segment is missing or lands on a
/// non-document value, which keeps an absent field distinguishable from a
/// stored `Bson::Null`. Array indices are not traversed.
pub fn resolve<'a>(document: &'a Document, path: &str) -> Option<&'a Bson> {
    let mut segments = path.split('.');
    let mut current = document.get(segments.next()?)?;

    for segment in segments {
        match current {
            Bson::Document(inner) => current = inner.get(segment)?,
            _ => return None,
        }
    }

    Some(current)
}
