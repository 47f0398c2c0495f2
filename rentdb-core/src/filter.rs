//! Filter grammar for querying documents.
//!
//! Filters arrive at the store boundary as plain nested [`bson::Document`]s,
//! the same shape a networked MongoDB client would accept:
//!
//! ```ignore
//! use bson::doc;
//!
//! let filter = doc! {
//!     "country": { "$in": ["GB", "FR", "DE"] },
//!     "price": { "$gte": 1000, "$lte": 2000 },
//!     "$or": [
//!         { "city": { "$regex": "lon", "$options": "i" } },
//!         { "address": { "$regex": "lon", "$options": "i" } },
//!     ],
//! };
//! ```
//!
//! [`Expr::parse`] turns such a document into a small AST before any
//! evaluation happens. Only the operators the application actually uses are
//! supported: `$or`, `$regex` (with optional `$options: "i"`), `$gte`,
//! `$lte`, `$in`, and literal equality (including dotted field paths).
//! Anything else is rejected with [`StoreError::InvalidFilter`] up front,
//! so a typo in a route handler fails loudly instead of matching nothing.
//!
//! Evaluation is decoupled from the AST through [`FilterVisitor`], so an
//! in-memory matcher and a translator for a real wire protocol can share
//! the same parsed representation.

use bson::{Bson, Document};
use regex::{Regex, RegexBuilder};

use crate::error::{StoreError, StoreResult};

/// A parsed filter expression.
#[derive(Debug, Clone)]
pub enum Expr {
    /// All sub-expressions must match. The implicit combinator across the
    /// keys of a filter document.
    And(Vec<Expr>),
    /// Any sub-expression must match (`$or`).
    Or(Vec<Expr>),
    /// A predicate applied to one dotted field path.
    Field {
        /// Dotted path into the document, e.g. `"agent_info.id"`.
        path: String,
        /// The predicate the resolved value must satisfy.
        pred: Pred,
    },
}

/// A single-field predicate.
#[derive(Debug, Clone)]
pub enum Pred {
    /// Exact, type-sensitive equality (`{"city": "London"}`). A literal
    /// `null` also matches an absent field.
    Eq(Bson),
    /// Resolved value must be present and `>=` the bound.
    Gte(Bson),
    /// Resolved value must be present and `<=` the bound.
    Lte(Bson),
    /// Resolved value (absent counts as `null`) must equal one element.
    In(Vec<Bson>),
    /// Substring regex search over a string value. Compiled at parse time
    /// so an invalid pattern fails the whole operation, even against an
    /// empty collection.
    Regex(Regex),
}

impl Expr {
    /// Parses a filter document into an expression tree.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidFilter`] for unsupported operators or
    /// operands of the wrong shape, and [`StoreError::InvalidRegex`] when a
    /// `$regex` pattern does not compile.
    pub fn parse(filter: &Document) -> StoreResult<Expr> {
        let mut clauses = Vec::with_capacity(filter.len());

        for (key, value) in filter {
            if key == "$or" {
                clauses.push(Self::parse_or(value)?);
            } else if key.starts_with('$') {
                return Err(StoreError::InvalidFilter(format!(
                    "unsupported operator: {key}"
                )));
            } else {
                match value {
                    Bson::Document(ops) if ops.keys().all(|k| k.starts_with('$')) => {
                        Self::parse_field_operators(key, ops, &mut clauses)?;
                    }
                    literal => clauses.push(Expr::Field {
                        path: key.clone(),
                        pred: Pred::Eq(literal.clone()),
                    }),
                }
            }
        }

        Ok(Expr::And(clauses))
    }

    fn parse_or(value: &Bson) -> StoreResult<Expr> {
        let Bson::Array(items) = value else {
            return Err(StoreError::InvalidFilter(
                "$or requires an array of filter documents".to_string(),
            ));
        };

        let mut arms = Vec::with_capacity(items.len());
        for item in items {
            let Bson::Document(sub) = item else {
                return Err(StoreError::InvalidFilter(
                    "$or elements must be filter documents".to_string(),
                ));
            };
            arms.push(Self::parse(sub)?);
        }

        Ok(Expr::Or(arms))
    }

    /// Parses one field's operator document (`{"$gte": 1000, "$lte": 2000}`)
    /// into one clause per operator. Operators on the same field are AND-ed.
    fn parse_field_operators(
        path: &str,
        ops: &Document,
        clauses: &mut Vec<Expr>,
    ) -> StoreResult<()> {
        // "$options" modifies "$regex" rather than forming a clause itself.
        let case_insensitive = match ops.get("$options") {
            None => false,
            Some(Bson::String(flags)) if flags == "i" => true,
            Some(Bson::String(flags)) if flags.is_empty() => false,
            Some(_) => {
                return Err(StoreError::InvalidFilter(
                    "$options supports only the \"i\" flag".to_string(),
                ));
            }
        };

        for (op, operand) in ops {
            let pred = match op.as_str() {
                "$options" => continue,
                "$regex" => {
                    let Bson::String(pattern) = operand else {
                        return Err(StoreError::InvalidFilter(
                            "$regex requires a string pattern".to_string(),
                        ));
                    };
                    let regex = RegexBuilder::new(pattern)
                        .case_insensitive(case_insensitive)
                        .build()?;
                    Pred::Regex(regex)
                }
                "$gte" => Pred::Gte(operand.clone()),
                "$lte" => Pred::Lte(operand.clone()),
                "$in" => {
                    let Bson::Array(values) = operand else {
                        return Err(StoreError::InvalidFilter(
                            "$in requires an array".to_string(),
                        ));
                    };
                    Pred::In(values.clone())
                }
                other => {
                    return Err(StoreError::InvalidFilter(format!(
                        "unsupported operator: {other}"
                    )));
                }
            };

            clauses.push(Expr::Field {
                path: path.to_string(),
                pred,
            });
        }

        Ok(())
    }
}

/// Visitor over parsed filter expressions.
///
/// The in-memory matcher implements this to evaluate an expression against
/// a single document; a networked backend would implement it to translate
/// the expression into its wire query format.
pub trait FilterVisitor {
    type Output;
    type Error: Into<StoreError>;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error>;
    fn visit_or(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error>;
    fn visit_field(&mut self, path: &str, pred: &Pred) -> Result<Self::Output, Self::Error>;

    fn visit_expr(&mut self, expr: &Expr) -> Result<Self::Output, Self::Error> {
        match expr {
            Expr::And(exprs) => self.visit_and(exprs),
            Expr::Or(exprs) => self.visit_or(exprs),
            Expr::Field { path, pred } => self.visit_field(path, pred),
        }
    }
}
