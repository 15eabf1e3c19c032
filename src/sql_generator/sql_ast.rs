//! Minimal physical `SELECT` tree and its rendering.
//!
//! Column and predicate text arrive already resolved; this layer only fixes
//! clause order and spacing.

/// Append a node's SQL text to a buffer.
pub trait ToSql {
    fn to_sql(&self, sql: &mut String);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub distinct: bool,
    pub columns: Vec<String>,
    pub from: String,
    pub joins: Vec<Join>,
    pub filter: Option<Filter>,
}

impl Select {
    pub fn new(columns: Vec<String>, from: impl Into<String>) -> Self {
        Select {
            distinct: false,
            columns,
            from: from.into(),
            joins: Vec::new(),
            filter: None,
        }
    }
}

/// `JOIN <table> ON <left> = <right>`
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub table: String,
    pub left: String,
    pub right: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Rendered predicate text.
    Predicate(String),
    /// `<column> IN (<subquery>)`
    InSubquery {
        column: String,
        subquery: Box<Select>,
    },
}

impl ToSql for Select {
    fn to_sql(&self, sql: &mut String) {
        sql.push_str("SELECT ");
        if self.distinct {
            sql.push_str("DISTINCT ");
        }
        sql.push_str(&self.columns.join(", "));
        sql.push_str(" FROM ");
        sql.push_str(&self.from);
        for join in &self.joins {
            sql.push(' ');
            join.to_sql(sql);
        }
        if let Some(filter) = &self.filter {
            sql.push_str(" WHERE ");
            filter.to_sql(sql);
        }
    }
}

impl ToSql for Join {
    fn to_sql(&self, sql: &mut String) {
        sql.push_str("JOIN ");
        sql.push_str(&self.table);
        sql.push_str(" ON ");
        sql.push_str(&self.left);
        sql.push_str(" = ");
        sql.push_str(&self.right);
    }
}

impl ToSql for Filter {
    fn to_sql(&self, sql: &mut String) {
        match self {
            Filter::Predicate(text) => sql.push_str(text),
            Filter::InSubquery { column, subquery } => {
                sql.push_str(column);
                sql.push_str(" IN (");
                subquery.to_sql(sql);
                sql.push(')');
            }
        }
    }
}

pub fn select_to_sql(select: &Select) -> String {
    let mut sql = String::new();
    select.to_sql(&mut sql);
    sql
}
