//! Text in, physical SQL out.
//!
//! Parses the query, plans it against the catalog and hierarchy, and
//! assembles the physical statement. Stateless: the catalog and hierarchy are
//! only read, so any number of callers can translate concurrently.

use log::{debug, info};
use serde::Serialize;
use thiserror::Error;

use crate::{
    query_planner::{self, QueryShape, TranslationError},
    schema_catalog::{HierarchyIndex, ResolveMode, SchemaCatalog},
    sql_generator::QueryAssembler,
    sql_parser::{self, ast::SelectStatement, errors::SqlParsingError},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Translation {
    pub sql: String,
    /// Logical tables the query touched, in first-seen order.
    pub tables: Vec<String>,
    pub shape: QueryShape,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TranslateError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Translation(#[from] TranslationError),
}

impl From<SqlParsingError<'_>> for TranslateError {
    fn from(err: SqlParsingError<'_>) -> Self {
        TranslateError::Parse(err.to_string().trim_end().to_string())
    }
}

impl TranslateError {
    pub fn kind(&self) -> &'static str {
        match self {
            TranslateError::Parse(_) => "ParseError",
            TranslateError::Translation(e) => e.kind(),
        }
    }
}

pub fn translate(
    query: &str,
    catalog: &SchemaCatalog,
    hierarchy: &HierarchyIndex,
    mode: ResolveMode,
) -> Result<Translation, TranslateError> {
    let stmt = sql_parser::parse_query(query)?;
    debug!("parsed statement: {:?}", stmt);
    Ok(translate_statement(&stmt, catalog, hierarchy, mode)?)
}

/// Translate an already-parsed statement.
pub fn translate_statement(
    stmt: &SelectStatement<'_>,
    catalog: &SchemaCatalog,
    hierarchy: &HierarchyIndex,
    mode: ResolveMode,
) -> Result<Translation, TranslationError> {
    let plan = query_planner::plan_statement(stmt, catalog, hierarchy, mode)?;
    let sql = QueryAssembler::new(catalog).assemble(
        &plan.select_list,
        &plan.shape,
        plan.predicate.as_deref(),
    )?;
    info!("translated query over {:?}", plan.tables);
    debug!("physical sql: {}", sql);
    Ok(Translation {
        sql,
        tables: plan.tables,
        shape: plan.shape,
    })
}
