//! Boolean predicate tree consumed by the rewriter.
//!
//! Only the shapes the translator supports exist here: comparisons between
//! column references and literals, combined with binary AND/OR. Anything
//! else the parser accepted is rejected while building this tree.

use serde::Serialize;
use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub enum ComparisonOperator {
    GreaterThan,
    LessThan,
    GreaterThanEqual,
    LessThanEqual,
    Equal,
    NotEqual,
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ComparisonOperator::GreaterThan => ">",
            ComparisonOperator::LessThan => "<",
            ComparisonOperator::GreaterThanEqual => ">=",
            ComparisonOperator::LessThanEqual => "<=",
            ComparisonOperator::Equal => "=",
            ComparisonOperator::NotEqual => "!=",
        })
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct ColumnRef {
    pub table: Option<String>,
    pub name: String,
}

impl ColumnRef {
    pub fn new(table: Option<&str>, name: &str) -> Self {
        ColumnRef {
            table: table.map(str::to_string),
            name: name.to_string(),
        }
    }

    pub fn qualified(table: &str, name: &str) -> Self {
        ColumnRef::new(Some(table), name)
    }

    pub fn unqualified(name: &str) -> Self {
        ColumnRef::new(None, name)
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.table {
            Some(table) => write!(f, "{}.{}", table, self.name),
            None => f.write_str(&self.name),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub enum Operand {
    Column(ColumnRef),
    /// Literal text as written in the query
    Literal(String),
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct Comparison {
    pub operator: ComparisonOperator,
    pub left: Operand,
    pub right: Operand,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub enum Expr {
    Comparison(Comparison),
    And { left: Box<Expr>, right: Box<Expr> },
    Or { left: Box<Expr>, right: Box<Expr> },
}

impl Expr {
    pub fn comparison(left: Operand, operator: ComparisonOperator, right: Operand) -> Self {
        Expr::Comparison(Comparison {
            operator,
            left,
            right,
        })
    }

    pub fn and(left: Expr, right: Expr) -> Self {
        Expr::And {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn or(left: Expr, right: Expr) -> Self {
        Expr::Or {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Every column reference in the tree, left to right.
    pub fn column_refs(&self) -> Vec<&ColumnRef> {
        let mut refs = Vec::new();
        self.collect_column_refs(&mut refs);
        refs
    }

    fn collect_column_refs<'a>(&'a self, refs: &mut Vec<&'a ColumnRef>) {
        match self {
            Expr::Comparison(cmp) => {
                for operand in [&cmp.left, &cmp.right] {
                    if let Operand::Column(col) = operand {
                        refs.push(col);
                    }
                }
            }
            Expr::And { left, right } | Expr::Or { left, right } => {
                left.collect_column_refs(refs);
                right.collect_column_refs(refs);
            }
        }
    }
}
