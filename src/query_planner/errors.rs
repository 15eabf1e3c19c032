//! Translation errors.
//!
//! Every failure is fatal for the query being translated: no partial SQL is
//! ever produced. Each variant carries the table, column or node that
//! caused it.

use thiserror::Error;

use crate::schema_catalog::errors::LookupError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TranslationError {
    #[error("Schema lookup failed: {0}")]
    SchemaLookup(#[from] LookupError),

    #[error("Column `{column}` is ambiguous between tables [{}]", candidates.join(", "))]
    AmbiguousColumn {
        column: String,
        candidates: Vec<String>,
    },

    #[error("Malformed expression: {node}")]
    MalformedExpression { node: String },

    #[error("Unsupported query shape: expected 1 or 2 tables, found {} [{}]", tables.len(), tables.join(", "))]
    UnsupportedQueryShape { tables: Vec<String> },

    #[error("Unsupported join between `{left}` and `{right}`: {reason}")]
    UnsupportedJoin {
        left: String,
        right: String,
        reason: String,
    },
}

impl TranslationError {
    /// Stable name of the error kind, for API responses.
    pub fn kind(&self) -> &'static str {
        match self {
            TranslationError::SchemaLookup(_) => "SchemaLookupError",
            TranslationError::AmbiguousColumn { .. } => "AmbiguousColumn",
            TranslationError::MalformedExpression { .. } => "MalformedExpression",
            TranslationError::UnsupportedQueryShape { .. } => "UnsupportedQueryShape",
            TranslationError::UnsupportedJoin { .. } => "UnsupportedJoin",
        }
    }

    pub fn malformed(node: impl Into<String>) -> Self {
        TranslationError::MalformedExpression { node: node.into() }
    }
}
