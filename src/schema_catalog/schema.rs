use serde::Serialize;
use std::collections::HashMap;

use super::errors::LookupError;

/// How column resolution treats names the catalog does not know.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveMode {
    /// Unknown tables and columns are errors.
    #[default]
    Strict,
    /// Unknown tables and columns render as written (`table.column`).
    /// Used when a query mixes in identifiers that are already physical.
    PassthroughOnMiss,
}

impl ResolveMode {
    pub fn is_passthrough(self) -> bool {
        matches!(self, ResolveMode::PassthroughOnMiss)
    }
}

/// A foreign relationship between two logical tables.
///
/// Relation columns describe traversal, not stored values. When `is_virtual`
/// is set this is the inverse (non-owning) side and no physical column exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationColumn {
    pub target_table: String,
    pub join_column: String,
    pub is_virtual: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnEntry {
    Physical { physical_name: String },
    Relation(RelationColumn),
}

impl ColumnEntry {
    pub fn physical_name(&self) -> Option<&str> {
        match self {
            ColumnEntry::Physical { physical_name } => Some(physical_name),
            ColumnEntry::Relation(_) => None,
        }
    }

    pub fn as_relation(&self) -> Option<&RelationColumn> {
        match self {
            ColumnEntry::Relation(rel) => Some(rel),
            ColumnEntry::Physical { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableDescriptor {
    pub name: String,
    pub physical_name: String,
    pub is_public: bool,
    pub columns: HashMap<String, ColumnEntry>,
    /// Logical name of the primary-key column used by dedup subqueries.
    pub identity: Option<String>,
}

impl TableDescriptor {
    pub fn column(&self, name: &str) -> Option<&ColumnEntry> {
        self.columns.get(name)
    }

    /// The non-virtual relation column on this table that points at `target`.
    pub fn owning_relation_to(&self, target: &str) -> Option<(&str, &RelationColumn)> {
        let mut candidates: Vec<(&str, &RelationColumn)> = self
            .columns
            .iter()
            .filter_map(|(name, entry)| entry.as_relation().map(|rel| (name.as_str(), rel)))
            .filter(|(_, rel)| !rel.is_virtual && rel.target_table == target)
            .collect();
        // Several foreign keys to the same parent: pick by name so the choice is stable.
        candidates.sort_by(|a, b| a.0.cmp(b.0));
        candidates.into_iter().next()
    }
}

/// Immutable logical-to-physical table and column mapping.
///
/// Built once from configuration (see [`super::config::SchemaConfig::build`])
/// and shared by reference with every translation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchemaCatalog {
    tables: HashMap<String, TableDescriptor>,
    /// Logical table names in declaration order.
    table_order: Vec<String>,
}

impl SchemaCatalog {
    /// Tables are kept in the order given. Callers are expected to have
    /// validated the descriptors already; later duplicates replace earlier ones.
    pub fn new(tables: Vec<TableDescriptor>) -> Self {
        let mut catalog = SchemaCatalog::default();
        for table in tables {
            if !catalog.tables.contains_key(&table.name) {
                catalog.table_order.push(table.name.clone());
            }
            catalog.tables.insert(table.name.clone(), table);
        }
        catalog
    }

    pub fn lookup_table(&self, name: &str) -> Result<&TableDescriptor, LookupError> {
        self.tables.get(name).ok_or_else(|| LookupError::UnknownTable {
            table: name.to_string(),
        })
    }

    pub fn contains_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Known logical table names (slugs), in declaration order.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.table_order.iter().map(String::as_str)
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableDescriptor> {
        self.table_order.iter().filter_map(|name| self.tables.get(name))
    }

    /// Resolve a logical `table.column` to `physical_table.physical_column`.
    ///
    /// In [`ResolveMode::PassthroughOnMiss`] an unknown table or column comes
    /// back as `table.column`, unchanged. A relation column is an error in
    /// both modes: it names a traversal, not a value.
    pub fn resolve_column(
        &self,
        table: &str,
        column: &str,
        mode: ResolveMode,
    ) -> Result<String, LookupError> {
        let descriptor = match self.lookup_table(table) {
            Ok(descriptor) => descriptor,
            Err(_) if mode.is_passthrough() => return Ok(format!("{}.{}", table, column)),
            Err(e) => return Err(e),
        };

        match descriptor.column(column) {
            Some(ColumnEntry::Physical { physical_name }) => {
                Ok(format!("{}.{}", descriptor.physical_name, physical_name))
            }
            Some(ColumnEntry::Relation(_)) => Err(LookupError::RelationColumn {
                table: table.to_string(),
                column: column.to_string(),
            }),
            None if mode.is_passthrough() => Ok(format!("{}.{}", table, column)),
            None => Err(LookupError::UnknownColumn {
                table: table.to_string(),
                column: column.to_string(),
            }),
        }
    }

    /// The logical identity (primary key) column of `table`.
    pub fn identity_column(&self, table: &str) -> Result<&str, LookupError> {
        self.lookup_table(table)?
            .identity
            .as_deref()
            .ok_or_else(|| LookupError::MissingIdentity {
                table: table.to_string(),
            })
    }

    /// Physical `table.column` reference of the identity column.
    pub fn resolve_identity(&self, table: &str) -> Result<String, LookupError> {
        let identity = self.identity_column(table)?;
        self.resolve_column(table, identity, ResolveMode::Strict)
    }
}
