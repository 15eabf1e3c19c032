//! Logical-to-physical planning.
//!
//! `analyzer` pulls tables, select list and predicate out of the parsed
//! statement, `join_planner` picks the query shape and `expression_rewriter`
//! renders columns and predicates against the physical schema. The result is
//! handed to [`crate::sql_generator`] for assembly.

use log::debug;
use serde::Serialize;

use crate::{
    schema_catalog::{HierarchyIndex, ResolveMode, SchemaCatalog},
    sql_parser::ast::SelectStatement,
};

pub mod analyzer;
mod ast_conversion;
pub mod errors;
pub mod expression_rewriter;
pub mod join_planner;
pub mod logical_expr;

pub use analyzer::{AnalyzedQuery, QueryAnalyzer};
pub use errors::TranslationError;
pub use expression_rewriter::RewriteContext;
pub use join_planner::{JoinPlanner, QueryShape};

/// A statement resolved against the physical schema, ready for assembly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhysicalPlan {
    /// Logical tables in first-seen order.
    pub tables: Vec<String>,
    pub shape: QueryShape,
    /// Physical `table.column` references, in select order.
    pub select_list: Vec<String>,
    pub predicate: Option<String>,
}

pub fn plan_statement(
    stmt: &SelectStatement<'_>,
    catalog: &SchemaCatalog,
    hierarchy: &HierarchyIndex,
    mode: ResolveMode,
) -> Result<PhysicalPlan, TranslationError> {
    let analyzed = QueryAnalyzer::with_mode(catalog, mode).analyze(stmt)?;
    let shape = JoinPlanner::new(catalog, hierarchy).plan(&analyzed.tables)?;

    // The outer query only selects from the root table.
    if let QueryShape::AdjacentJoin { parent, child, .. } = &shape {
        if let Some(col) = analyzed
            .select_list
            .iter()
            .find(|col| col.table.as_deref() == Some(child.as_str()))
        {
            return Err(TranslationError::UnsupportedJoin {
                left: parent.clone(),
                right: child.clone(),
                reason: format!("select column `{}` is outside root table `{}`", col, parent),
            });
        }
    }

    let ctx = RewriteContext::new(catalog, &analyzed.tables).with_mode(mode);
    let select_list = analyzed
        .select_list
        .iter()
        .map(|col| expression_rewriter::resolve_column_ref(col, &ctx))
        .collect::<Result<Vec<_>, _>>()?;
    let predicate = analyzed
        .where_root
        .as_ref()
        .map(|expr| expression_rewriter::rewrite_expression(expr, &ctx))
        .transpose()?;

    debug!("physical plan: shape={:?}, predicate={:?}", shape, predicate);

    Ok(PhysicalPlan {
        tables: analyzed.tables,
        shape,
        select_list,
        predicate,
    })
}
