use crate::{
    query_planner::{QueryShape, TranslationError},
    schema_catalog::SchemaCatalog,
};

use super::sql_ast::{select_to_sql, Filter, Join, Select};

/// Composes the physical statement from resolved pieces.
///
/// With a predicate, or with a join, rows are filtered through a
/// `root.identity IN (SELECT DISTINCT root.identity ...)` subquery so the
/// outer select list never sees duplicated rows.
pub struct QueryAssembler<'a> {
    catalog: &'a SchemaCatalog,
}

impl<'a> QueryAssembler<'a> {
    pub fn new(catalog: &'a SchemaCatalog) -> Self {
        QueryAssembler { catalog }
    }

    pub fn assemble(
        &self,
        select_list: &[String],
        shape: &QueryShape,
        predicate: Option<&str>,
    ) -> Result<String, TranslationError> {
        Ok(select_to_sql(&self.build(select_list, shape, predicate)?))
    }

    pub fn build(
        &self,
        select_list: &[String],
        shape: &QueryShape,
        predicate: Option<&str>,
    ) -> Result<Select, TranslationError> {
        let root = self.catalog.lookup_table(shape.root())?;
        let mut outer = Select::new(select_list.to_vec(), root.physical_name.clone());

        let joins = match shape {
            QueryShape::SingleTable { .. } if predicate.is_none() => return Ok(outer),
            QueryShape::SingleTable { .. } => Vec::new(),
            QueryShape::AdjacentJoin {
                parent,
                child,
                join_column,
            } => {
                let child_table = self.catalog.lookup_table(child)?;
                vec![Join {
                    table: child_table.physical_name.clone(),
                    left: format!("{}.{}", child_table.physical_name, join_column),
                    right: self.catalog.resolve_identity(parent)?,
                }]
            }
        };

        let identity = self.catalog.resolve_identity(shape.root())?;
        let inner = Select {
            distinct: true,
            columns: vec![identity.clone()],
            from: root.physical_name.clone(),
            joins,
            filter: predicate.map(|p| Filter::Predicate(p.to_string())),
        };
        outer.filter = Some(Filter::InSubquery {
            column: identity,
            subquery: Box::new(inner),
        });
        Ok(outer)
    }
}
