//! Document list queries.
//!
//! Queries serialize to the store's JSON query syntax, e.g.
//! `{"method":"equal","attribute":"searchTerm","values":["batman"]}`.

use serde_json::{json, Value};

/// Attribute holding the search term.
pub const SEARCH_TERM: &str = "searchTerm";

/// Attribute holding the occurrence counter.
pub const COUNT: &str = "count";

/// One filter, ordering or limit clause of a list request.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Exact equality on an attribute.
    Equal { attribute: &'static str, value: Value },
    /// Sort descending by an attribute.
    OrderDesc(&'static str),
    /// Return at most this many documents.
    Limit(usize),
}

impl Query {
    /// Exact match on the search term attribute.
    pub fn search_term_equals(term: &str) -> Self {
        Self::Equal {
            attribute: SEARCH_TERM,
            value: Value::String(term.to_string()),
        }
    }

    /// Highest counters first, capped at `n`.
    pub fn top_by_count(n: usize) -> [Self; 2] {
        [Self::OrderDesc(COUNT), Self::Limit(n)]
    }

    /// Wire form sent as one `queries[]` parameter.
    pub fn to_wire(&self) -> String {
        let value = match self {
            Self::Equal { attribute, value } => json!({
                "method": "equal",
                "attribute": attribute,
                "values": [value],
            }),
            Self::OrderDesc(attribute) => json!({
                "method": "orderDesc",
                "attribute": attribute,
            }),
            Self::Limit(n) => json!({
                "method": "limit",
                "values": [n],
            }),
        };
        value.to_string()
    }
}
