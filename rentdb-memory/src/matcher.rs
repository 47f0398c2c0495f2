//! Filter evaluation against in-memory documents.
//!
//! This module is the evaluation half of the filter grammar: a parsed
//! [`Expr`] is walked over one document at a time to decide membership in
//! a result set. Matching is deterministic and side-effect-free.

use std::{cmp::Ordering, collections::HashMap};

use bson::{Bson, DateTime, Document};

use rentdb_core::{
    error::{StoreError, StoreResult},
    filter::{Expr, FilterVisitor, Pred},
    path::resolve,
};

/// Type-erased, comparable view of BSON values.
///
/// Numeric widths are normalized to f64 so `Int32(5)`, `Int64(5)` and
/// `Double(5.0)` compare equal, while the categories themselves stay
/// distinct: a number never equals a boolean or a string.
#[derive(Debug)]
enum Comparable<'a> {
    Null,
    Bool(bool),
    Number(f64),
    DateTime(DateTime),
    String(&'a str),
    Array(Vec<Comparable<'a>>),
    Map(HashMap<&'a str, Comparable<'a>>),
}

impl<'a> From<&'a Bson> for Comparable<'a> {
    fn from(bson: &'a Bson) -> Self {
        match bson {
            Bson::Null => Comparable::Null,
            Bson::Boolean(value) => Comparable::Bool(*value),
            Bson::Int32(value) => Comparable::Number(*value as f64),
            Bson::Int64(value) => Comparable::Number(*value as f64),
            Bson::Double(value) => Comparable::Number(*value),
            Bson::DateTime(value) => Comparable::DateTime(*value),
            Bson::String(value) => Comparable::String(value),
            Bson::Array(arr) => Comparable::Array(arr.iter().map(Comparable::from).collect()),
            Bson::Document(doc) => Comparable::Map(
                doc.iter()
                    .map(|(k, v)| (k.as_str(), Comparable::from(v)))
                    .collect(),
            ),
            // Remaining BSON types never occur in this application's data.
            _ => Comparable::Null,
        }
    }
}

impl PartialEq for Comparable<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Comparable::Null, Comparable::Null) => true,
            (Comparable::Bool(a), Comparable::Bool(b)) => a == b,
            (Comparable::Number(a), Comparable::Number(b)) => a == b,
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a == b,
            (Comparable::String(a), Comparable::String(b)) => a == b,
            (Comparable::Array(a), Comparable::Array(b)) => a == b,
            (Comparable::Map(a), Comparable::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialOrd for Comparable<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Comparable::Bool(a), Comparable::Bool(b)) => a.partial_cmp(b),
            (Comparable::Number(a), Comparable::Number(b)) => a.partial_cmp(b),
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a.partial_cmp(b),
            (Comparable::String(a), Comparable::String(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

/// Evaluates a parsed filter expression against one document.
pub(crate) struct DocumentMatcher<'a> {
    document: &'a Document,
}

impl<'a> DocumentMatcher<'a> {
    /// Returns whether `document` satisfies `expr`.
    pub fn matches(document: &Document, expr: &Expr) -> StoreResult<bool> {
        DocumentMatcher { document }.visit_expr(expr)
    }
}

/// Equality with absence semantics: an absent field equals a literal
/// `null` (as it would against a real client) and nothing else.
fn eq_resolved(resolved: Option<&Bson>, literal: &Bson) -> bool {
    match resolved {
        None => matches!(literal, Bson::Null),
        Some(value) => Comparable::from(value) == Comparable::from(literal),
    }
}

impl FilterVisitor for DocumentMatcher<'_> {
    type Output = bool;
    type Error = StoreError;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        for expr in exprs {
            if !self.visit_expr(expr)? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn visit_or(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        for expr in exprs {
            if self.visit_expr(expr)? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    fn visit_field(&mut self, path: &str, pred: &Pred) -> Result<Self::Output, Self::Error> {
        let resolved = resolve(self.document, path);

        match pred {
            Pred::Eq(literal) => Ok(eq_resolved(resolved, literal)),
            // Comparisons on absent, null, or incomparable values always
            // fail. There is no null-as-zero coercion.
            Pred::Gte(bound) => Ok(resolved.is_some_and(|value| {
                matches!(
                    Comparable::from(value).partial_cmp(&Comparable::from(bound)),
                    Some(Ordering::Greater | Ordering::Equal)
                )
            })),
            Pred::Lte(bound) => Ok(resolved.is_some_and(|value| {
                matches!(
                    Comparable::from(value).partial_cmp(&Comparable::from(bound)),
                    Some(Ordering::Less | Ordering::Equal)
                )
            })),
            Pred::In(values) => Ok(values
                .iter()
                .any(|candidate| eq_resolved(resolved, candidate))),
            Pred::Regex(regex) => Ok(match resolved {
                Some(Bson::String(value)) => regex.is_match(value),
                _ => false,
            }),
        }
    }
}
