//! # Schema Catalog Error Types
//!
//! Two families of errors live here:
//!
//! - [`CatalogError`]: raised while loading and validating a schema
//!   configuration. These happen once, at startup.
//! - [`LookupError`]: raised while translating a query, when a logical
//!   table or column cannot be resolved against the loaded catalog.
//!
//! Lookup errors always carry the offending table (and column when there is
//! one) so callers can report them without re-reading the query text.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Failed to read schema file '{path}': {error}")]
    ConfigReadError { path: String, error: String },
    #[error("Failed to parse schema configuration: {error}")]
    ConfigParseError { error: String },
    #[error("Table '{table}' is declared more than once")]
    DuplicateTable { table: String },
    #[error("Table '{table}' has an empty physical name")]
    EmptyPhysicalName { table: String },
    #[error("Relation column '{table}.{column}' targets unknown table '{target}'")]
    UnknownRelationTarget {
        table: String,
        column: String,
        target: String,
    },
    #[error("Identity column '{column}' of table '{table}' is not a physical column")]
    InvalidIdentity { table: String, column: String },
    #[error("Hierarchy references unknown table '{table}'")]
    UnknownHierarchyTable { table: String },
    #[error("Hierarchy level for '{table}' must be at least 1, got {level}")]
    InvalidLevel { table: String, level: u32 },
    #[error("Hierarchy level {level} is shared by '{first}' and '{second}'")]
    SharedLevel {
        level: u32,
        first: String,
        second: String,
    },
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum LookupError {
    #[error("Unknown table `{table}`")]
    UnknownTable { table: String },
    #[error("Unknown column `{column}` in table `{table}`")]
    UnknownColumn { table: String, column: String },
    #[error("Column `{table}.{column}` is a relation and cannot be used as a value")]
    RelationColumn { table: String, column: String },
    #[error("Table `{table}` has no identity column configured")]
    MissingIdentity { table: String },
    #[error("Table `{table}` has no hierarchy level")]
    MissingLevel { table: String },
}

impl LookupError {
    /// The logical table the failed lookup was made against.
    pub fn table(&self) -> &str {
        match self {
            LookupError::UnknownTable { table }
            | LookupError::UnknownColumn { table, .. }
            | LookupError::RelationColumn { table, .. }
            | LookupError::MissingIdentity { table }
            | LookupError::MissingLevel { table } => table.as_str(),
        }
    }

    /// The logical column, for column-level failures.
    pub fn column(&self) -> Option<&str> {
        match self {
            LookupError::UnknownColumn { column, .. } | LookupError::RelationColumn { column, .. } => {
                Some(column.as_str())
            }
            _ => None,
        }
    }
}
