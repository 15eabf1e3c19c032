//! Chooses the physical query shape for the referenced tables.

use log::debug;
use serde::Serialize;

use crate::schema_catalog::{HierarchyIndex, LookupError, SchemaCatalog};

use super::errors::TranslationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryShape {
    SingleTable {
        table: String,
    },
    /// Parent is the lower hierarchy level. `join_column` is the logical
    /// name of the child's relation column pointing at the parent.
    AdjacentJoin {
        parent: String,
        child: String,
        join_column: String,
    },
}

impl QueryShape {
    /// The table the outer query selects from.
    pub fn root(&self) -> &str {
        match self {
            QueryShape::SingleTable { table } => table,
            QueryShape::AdjacentJoin { parent, .. } => parent,
        }
    }

    pub fn tables(&self) -> Vec<&str> {
        match self {
            QueryShape::SingleTable { table } => vec![table.as_str()],
            QueryShape::AdjacentJoin { parent, child, .. } => vec![parent.as_str(), child.as_str()],
        }
    }
}

pub struct JoinPlanner<'a> {
    catalog: &'a SchemaCatalog,
    hierarchy: &'a HierarchyIndex,
}

impl<'a> JoinPlanner<'a> {
    pub fn new(catalog: &'a SchemaCatalog, hierarchy: &'a HierarchyIndex) -> Self {
        JoinPlanner { catalog, hierarchy }
    }

    pub fn plan(&self, tables: &[String]) -> Result<QueryShape, TranslationError> {
        match tables {
            [table] => Ok(QueryShape::SingleTable {
                table: table.clone(),
            }),
            [a, b] => self.plan_join(a, b),
            _ => Err(TranslationError::UnsupportedQueryShape {
                tables: tables.to_vec(),
            }),
        }
    }

    fn plan_join(&self, a: &str, b: &str) -> Result<QueryShape, TranslationError> {
        let level_a = self.hierarchy.level(a)?;
        let level_b = self.hierarchy.level(b)?;

        if level_a.abs_diff(level_b) != 1 {
            return Err(TranslationError::UnsupportedJoin {
                left: a.to_string(),
                right: b.to_string(),
                reason: format!(
                    "hierarchy levels {} and {} are not adjacent",
                    level_a, level_b
                ),
            });
        }

        let (parent, child) = if level_a < level_b { (a, b) } else { (b, a) };

        let child_table = self.catalog.lookup_table(child)?;
        let Some((join_column, relation)) = child_table.owning_relation_to(parent) else {
            return Err(TranslationError::UnsupportedJoin {
                left: parent.to_string(),
                right: child.to_string(),
                reason: format!("`{}` has no relation column referencing `{}`", child, parent),
            });
        };

        // The join's parent side is always the parent's identity column.
        let parent_identity = self
            .catalog
            .lookup_table(parent)?
            .identity
            .as_deref()
            .ok_or_else(|| LookupError::MissingIdentity {
                table: parent.to_string(),
            })?;
        if relation.join_column != parent_identity {
            return Err(TranslationError::UnsupportedJoin {
                left: parent.to_string(),
                right: child.to_string(),
                reason: format!(
                    "`{}.{}` references `{}.{}`, not its identity `{}`",
                    child, join_column, parent, relation.join_column, parent_identity
                ),
            });
        }

        debug!(
            "planned join {} -> {} on {}.{}",
            parent, child, child, join_column
        );

        Ok(QueryShape::AdjacentJoin {
            parent: parent.to_string(),
            child: child.to_string(),
            join_column: join_column.to_string(),
        })
    }
}
