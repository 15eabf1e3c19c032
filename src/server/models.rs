use serde::{Deserialize, Serialize};

use crate::query_planner::{QueryShape, TranslationError};
use crate::translator::TranslateError;

/// Request for POST /query/sql
#[derive(Debug, Deserialize)]
pub struct SqlTranslationRequest {
    /// Logical SQL to translate
    pub query: String,

    /// Overrides the server's passthrough setting for this request
    #[serde(default)]
    pub passthrough_unknown: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct SqlTranslationResponse {
    /// Original logical query
    pub query: String,

    /// Physical SQL
    pub sql: String,

    /// Logical tables referenced, in first-seen order
    pub tables: Vec<String>,

    pub shape: QueryShape,

    pub metadata: SqlTranslationMetadata,
}

#[derive(Debug, Serialize)]
pub struct SqlTranslationMetadata {
    /// Parse time in milliseconds
    pub parse_time_ms: f64,

    /// Planning and assembly time in milliseconds
    pub translation_time_ms: f64,

    /// Total time in milliseconds
    pub total_time_ms: f64,
}

/// Error response for POST /query/sql
#[derive(Debug, Serialize)]
pub struct SqlTranslationError {
    /// Original logical query
    pub query: String,

    /// Error message
    pub error: String,

    /// "ParseError", "SchemaLookupError", "AmbiguousColumn",
    /// "MalformedExpression", "UnsupportedQueryShape" or "UnsupportedJoin"
    pub error_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_details: Option<ErrorDetails>,
}

/// The table and column an error is about, when there is one
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
}

impl SqlTranslationError {
    pub fn new(query: &str, error: &TranslateError) -> Self {
        let error_details = match error {
            TranslateError::Translation(TranslationError::SchemaLookup(lookup)) => {
                Some(ErrorDetails {
                    table: Some(lookup.table().to_string()),
                    column: lookup.column().map(str::to_string),
                })
            }
            TranslateError::Translation(TranslationError::AmbiguousColumn { column, .. }) => {
                Some(ErrorDetails {
                    table: None,
                    column: Some(column.clone()),
                })
            }
            _ => None,
        };
        SqlTranslationError {
            query: query.to_string(),
            error: error.to_string(),
            error_type: error.kind().to_string(),
            error_details,
        }
    }
}

/// Response for GET /schema
#[derive(Debug, Serialize)]
pub struct SchemaResponse {
    pub tables: Vec<TableSummary>,
}

#[derive(Debug, Serialize)]
pub struct TableSummary {
    pub name: String,
    pub physical_name: String,
    pub is_public: bool,
    pub level: Option<u32>,
    pub identity: Option<String>,
}
