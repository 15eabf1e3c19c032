//! Renders a logical predicate tree against the physical schema.
//!
//! The input tree is only borrowed; each call builds a fresh string. AND/OR
//! structure comes from the tree shape, never from the text.

use std::sync::LazyLock;

use regex::Regex;

use crate::schema_catalog::{ResolveMode, SchemaCatalog};

use super::{
    errors::TranslationError,
    logical_expr::{ColumnRef, Expr, Operand},
};

/// Optional sign, then digits with an optional fraction, or a bare fraction.
static NUMERIC_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?(\d+(\.\d*)?|\.\d+)$").expect("Invalid regex"));

/// Tables in scope for column resolution.
#[derive(Debug, Clone, Copy)]
pub struct RewriteContext<'a> {
    catalog: &'a SchemaCatalog,
    scope: &'a [String],
    mode: ResolveMode,
}

impl<'a> RewriteContext<'a> {
    pub fn new(catalog: &'a SchemaCatalog, scope: &'a [String]) -> Self {
        RewriteContext {
            catalog,
            scope,
            mode: ResolveMode::Strict,
        }
    }

    pub fn with_mode(self, mode: ResolveMode) -> Self {
        RewriteContext { mode, ..self }
    }

    /// The table an unqualified column belongs to, when exactly one is in scope.
    pub fn default_table(&self) -> Option<&'a str> {
        match self.scope {
            [only] => Some(only.as_str()),
            _ => None,
        }
    }

    pub fn scope(&self) -> &'a [String] {
        self.scope
    }

    pub fn mode(&self) -> ResolveMode {
        self.mode
    }
}

pub fn rewrite_expression(expr: &Expr, ctx: &RewriteContext<'_>) -> Result<String, TranslationError> {
    match expr {
        Expr::Comparison(cmp) => {
            let left = resolve_operand(&cmp.left, ctx)?;
            let right = resolve_operand(&cmp.right, ctx)?;
            Ok(format!("{} {} {}", left, cmp.operator, right))
        }
        Expr::And { left, right } => Ok(format!(
            "{} AND {}",
            rewrite_child(left, Combinator::And, ctx)?,
            rewrite_child(right, Combinator::And, ctx)?
        )),
        Expr::Or { left, right } => Ok(format!(
            "{} OR {}",
            rewrite_child(left, Combinator::Or, ctx)?,
            rewrite_child(right, Combinator::Or, ctx)?
        )),
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Combinator {
    And,
    Or,
}

// Parenthesize only a compound child sitting under the other combinator.
fn rewrite_child(
    child: &Expr,
    parent: Combinator,
    ctx: &RewriteContext<'_>,
) -> Result<String, TranslationError> {
    let rendered = rewrite_expression(child, ctx)?;
    let needs_parens = match child {
        Expr::And { .. } => parent == Combinator::Or,
        Expr::Or { .. } => parent == Combinator::And,
        Expr::Comparison(_) => false,
    };
    if needs_parens {
        Ok(format!("({})", rendered))
    } else {
        Ok(rendered)
    }
}

pub fn resolve_operand(operand: &Operand, ctx: &RewriteContext<'_>) -> Result<String, TranslationError> {
    match operand {
        Operand::Column(col) => resolve_column_ref(col, ctx),
        Operand::Literal(text) => Ok(normalize_literal(text)),
    }
}

/// `table.column` to its physical reference; an unqualified column takes the
/// single table in scope.
pub fn resolve_column_ref(col: &ColumnRef, ctx: &RewriteContext<'_>) -> Result<String, TranslationError> {
    let table = match (&col.table, ctx.default_table()) {
        (Some(table), _) => table.as_str(),
        (None, Some(table)) => table,
        (None, None) if ctx.scope.is_empty() => {
            return Err(TranslationError::UnsupportedQueryShape { tables: Vec::new() })
        }
        (None, None) => {
            return Err(TranslationError::AmbiguousColumn {
                column: col.name.clone(),
                candidates: ambiguity_candidates(&col.name, ctx),
            })
        }
    };
    Ok(ctx.catalog.resolve_column(table, &col.name, ctx.mode)?)
}

// In-scope tables that define the column; all of scope when none does.
fn ambiguity_candidates(column: &str, ctx: &RewriteContext<'_>) -> Vec<String> {
    let defining: Vec<String> = ctx
        .scope
        .iter()
        .filter(|table| {
            ctx.catalog
                .lookup_table(table)
                .map(|descriptor| descriptor.column(column).is_some())
                .unwrap_or(false)
        })
        .cloned()
        .collect();
    if defining.is_empty() {
        ctx.scope.to_vec()
    } else {
        defining
    }
}

/// Numbers stay bare, single-quoted text stays as is, anything else is
/// wrapped in single quotes with embedded quotes doubled. A doubled `""`
/// inside a double-quoted string stands for one `"`.
pub fn normalize_literal(text: &str) -> String {
    if NUMERIC_LITERAL.is_match(text) {
        return text.to_string();
    }
    if text.len() >= 2 && text.starts_with('\'') && text.ends_with('\'') {
        return text.to_string();
    }
    let inner = if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        text[1..text.len() - 1].replace("\"\"", "\"")
    } else {
        text.to_string()
    };
    format!("'{}'", inner.replace('\'', "''"))
}
