//! Extracts what the rewriter and planner need from a parsed statement:
//! the referenced tables, the select list and the WHERE predicate tree.

use log::{debug, warn};

use crate::{
    schema_catalog::{LookupError, ResolveMode, SchemaCatalog},
    sql_parser::ast::{Expression, SelectStatement},
};

use super::{
    errors::TranslationError,
    logical_expr::{ColumnRef, Expr},
};

/// Everything the later stages read from one statement.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzedQuery {
    /// Distinct logical tables, in first-seen order.
    pub tables: Vec<String>,
    pub select_list: Vec<ColumnRef>,
    pub where_root: Option<Expr>,
}

pub struct QueryAnalyzer<'a> {
    catalog: &'a SchemaCatalog,
    mode: ResolveMode,
}

impl<'a> QueryAnalyzer<'a> {
    pub fn new(catalog: &'a SchemaCatalog) -> Self {
        Self::with_mode(catalog, ResolveMode::Strict)
    }

    pub fn with_mode(catalog: &'a SchemaCatalog, mode: ResolveMode) -> Self {
        QueryAnalyzer { catalog, mode }
    }

    pub fn analyze(&self, stmt: &SelectStatement<'_>) -> Result<AnalyzedQuery, TranslationError> {
        let select_list = self.select_list(stmt)?;
        let where_root = self.where_root(stmt)?;
        let tables = self.referenced_tables(stmt);
        if tables.is_empty() && self.mode.is_passthrough() {
            // Passthrough still needs one logical table to root the query on.
            if let Some(table) = stmt.from_tables.first() {
                return Err(LookupError::UnknownTable {
                    table: table.to_string(),
                }
                .into());
            }
        }
        debug!(
            "analyzed query: tables={:?}, {} select column(s), predicate={}",
            tables,
            select_list.len(),
            where_root.is_some()
        );
        Ok(AnalyzedQuery {
            tables,
            select_list,
            where_root,
        })
    }

    /// FROM tables, then select-list qualifiers, then WHERE qualifiers.
    ///
    /// Falls back to [`tables_from_query_text`] only when the statement names
    /// no table at all.
    pub fn referenced_tables(&self, stmt: &SelectStatement<'_>) -> Vec<String> {
        let mut names: Vec<&str> = stmt.from_tables.clone();
        for item in &stmt.select_items {
            collect_qualifiers(&item.expression, &mut names);
        }
        if let Some(where_clause) = &stmt.where_clause {
            collect_qualifiers(&where_clause.conditions, &mut names);
        }

        let mut tables: Vec<String> = Vec::new();
        for name in names {
            if self.mode.is_passthrough() && !self.catalog.contains_table(name) {
                debug!("passthrough: `{}` is not a catalog table, skipping", name);
                continue;
            }
            if !tables.iter().any(|t| t == name) {
                tables.push(name.to_string());
            }
        }

        if tables.is_empty() {
            tables = tables_from_query_text(self.catalog, stmt.raw);
            if !tables.is_empty() {
                warn!(
                    "no table named in query, guessed {:?} from query text: {}",
                    tables, stmt.raw
                );
            }
        }
        tables
    }

    /// Select items must be plain column references without aliases.
    pub fn select_list(
        &self,
        stmt: &SelectStatement<'_>,
    ) -> Result<Vec<ColumnRef>, TranslationError> {
        stmt.select_items
            .iter()
            .map(|item| {
                if let Some(alias) = item.alias {
                    return Err(TranslationError::malformed(format!(
                        "select alias `{}` is not supported",
                        alias
                    )));
                }
                match &item.expression {
                    Expression::Column(col) => Ok(ColumnRef::from(col)),
                    Expression::Star => Err(TranslationError::malformed(
                        "`*` in select list; name the columns",
                    )),
                    other => Err(TranslationError::malformed(format!(
                        "select item `{}` is not a column",
                        other
                    ))),
                }
            })
            .collect()
    }

    pub fn where_root(&self, stmt: &SelectStatement<'_>) -> Result<Option<Expr>, TranslationError> {
        stmt.where_clause
            .as_ref()
            .map(|where_clause| Expr::try_from(&where_clause.conditions))
            .transpose()
    }
}

fn collect_qualifiers<'a>(expr: &Expression<'a>, names: &mut Vec<&'a str>) {
    match expr {
        Expression::Column(col) => {
            if let Some(table) = col.table {
                names.push(table);
            }
        }
        Expression::FunctionCall(call) => {
            for arg in &call.args {
                collect_qualifiers(arg, names);
            }
        }
        Expression::OperatorApplication(app) => {
            for operand in &app.operands {
                collect_qualifiers(operand, names);
            }
        }
        Expression::Literal(_) | Expression::Star => {}
    }
}

/// Legacy table detection for statements that name no table.
///
/// A catalog table counts as referenced when any whitespace-separated token
/// of the query text contains its name. This is approximate: `users_flag`
/// matches `users`, and a name inside a quoted literal matches too.
pub fn tables_from_query_text(catalog: &SchemaCatalog, raw: &str) -> Vec<String> {
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    catalog
        .table_names()
        .filter(|slug| tokens.iter().any(|token| token.contains(slug)))
        .map(str::to_string)
        .collect()
}
