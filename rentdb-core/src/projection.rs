//! Exclusion-style projection of query results.

use bson::{Bson, Document};

/// Produces a field-filtered deep copy of a document.
///
/// A projection maps top-level field names to a numeric `0` exclusion
/// marker, mirroring `{"_id": 0}` style projections against a real client.
/// Fields not mentioned (or mapped to anything non-zero) are kept. With no
/// projection the result is a plain deep copy. Nested paths are not
/// supported; only top-level fields can be excluded.
pub fn apply(document: &Document, projection: Option<&Document>) -> Document {
    let mut copy = document.clone();

    let Some(projection) = projection else {
        return copy;
    };

    for (field, marker) in projection {
        if is_excluded(marker) {
            copy.remove(field);
        }
    }

    copy
}

fn is_excluded(marker: &Bson) -> bool {
    match marker {
        Bson::Int32(0) | Bson::Int64(0) => true,
        Bson::Double(n) => *n == 0.0,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn test_apply_removes_excluded_fields() {
        let document = doc! { "a": 1, "b": 2 };

        let projected = apply(&document, Some(&doc! { "b": 0 }));

        assert_eq!(projected, doc! { "a": 1 });
    }

    #[test]
    fn test_apply_without_projection_is_deep_copy() {
        let document = doc! { "id": "prop-1", "photos": ["a.jpg", "b.jpg"] };

        let mut projected = apply(&document, None);
        assert_eq!(projected, document);

        // Mutating the copy must not touch the original.
        projected.insert("id", "prop-2");
        assert_eq!(document.get_str("id").unwrap(), "prop-1");
    }

    #[test]
    fn test_apply_keeps_unmentioned_and_included_fields() {
        let document = doc! { "_id": "x", "city": "Paris", "price": 900 };

        let projected = apply(&document, Some(&doc! { "_id": 0, "city": 1 }));

        assert_eq!(projected, doc! { "city": "Paris", "price": 900 });
    }

    #[test]
    fn test_apply_missing_excluded_field_is_harmless() {
        let document = doc! { "a": 1 };

        let projected = apply(&document, Some(&doc! { "b": 0 }));

        assert_eq!(projected, doc! { "a": 1 });
    }

    #[test]
    fn test_apply_is_top_level_only() {
        let document = doc! { "agent_info": { "id": "agent-1", "email": "a@homzy.com" } };

        let projected = apply(&document, Some(&doc! { "agent_info.email": 0 }));

        // Dotted keys name no top-level field, so nothing is removed.
        assert_eq!(projected, document);
    }
}
