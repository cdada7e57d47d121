//! Conjunctive term queries.

use serde_json::Value;

use crate::error::{Result, TermdexError};

/// A conjunctive (AND) query: documents must contain every term.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    terms: Vec<String>,
}

impl Query {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Query {
            terms: terms.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a line of whitespace-separated terms.
    pub fn parse(line: &str) -> Self {
        Self::new(line.split_whitespace())
    }

    /// Build a query from structured input, which must be an array of strings.
    pub fn from_json(value: &Value) -> Result<Self> {
        let items = value.as_array().ok_or_else(|| {
            TermdexError::invalid_query(format!("expected an array of terms, got {value}"))
        })?;

        let terms = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    TermdexError::invalid_query(format!(
                        "element {i} is not a term: {item}"
                    ))
                })
            })
            .collect::<Result<Vec<String>>>()?;

        Ok(Query { terms })
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.terms.join(" "))
    }
}
