use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use super::errors::CatalogError;
use super::hierarchy::HierarchyIndex;
use super::schema::{ColumnEntry, RelationColumn, SchemaCatalog, TableDescriptor};

/// Schema catalog configuration.
///
/// The catalog and the table hierarchy are declared together in one YAML
/// document:
///
/// ```yaml
/// name: commerce                 # Optional configuration name
/// tables:                        # Logical tables, in declaration order
///   - name: users                # Logical table name (slug)
///     physical_name: user_master # Storage table
///     is_public: false
///     identity: id               # Primary key column (defaults to `id`)
///     columns:
///       id: user_id              # Physical column mapping
///       orders:                  # Relation (traversal only)
///         relation: { object: orders, column: user_id, virtual: true }
/// hierarchy:                     # Level per table, root = 1
///   users: 1
///   orders: 2
/// ```
///
/// # Usage
///
/// ```ignore
/// let config = SchemaConfig::from_yaml_file("schemas/commerce.yaml")?;
/// let (catalog, hierarchy) = config.build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaConfig {
    #[serde(default)]
    pub name: Option<String>,
    pub tables: Vec<TableDefinition>,
    #[serde(default)]
    pub hierarchy: HashMap<String, u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDefinition {
    /// Logical table name
    pub name: String,
    /// Storage table name
    pub physical_name: String,
    #[serde(default)]
    pub is_public: bool,
    /// Optional: logical name of the primary-key column.
    /// When omitted, a physical column named `id` is used if present.
    #[serde(default)]
    pub identity: Option<String>,
    #[serde(default)]
    pub columns: HashMap<String, ColumnDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ColumnDefinition {
    /// `logical: physical`
    Physical(String),
    /// `logical: { relation: { object, column, virtual } }`
    Relation { relation: RelationDefinition },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelationDefinition {
    /// Target logical table
    pub object: String,
    /// Column on the target table the relation joins through
    pub column: String,
    #[serde(default, rename = "virtual")]
    pub is_virtual: bool,
}

const DEFAULT_IDENTITY: &str = "id";

impl SchemaConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self, CatalogError> {
        serde_yaml::from_str(content).map_err(|e| CatalogError::ConfigParseError {
            error: e.to_string(),
        })
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| CatalogError::ConfigReadError {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::from_yaml_str(&content)
    }

    /// Validate the configuration and build the immutable catalog and
    /// hierarchy from it.
    pub fn build(&self) -> Result<(SchemaCatalog, HierarchyIndex), CatalogError> {
        let mut seen = HashSet::new();
        for table in &self.tables {
            if !seen.insert(table.name.as_str()) {
                return Err(CatalogError::DuplicateTable {
                    table: table.name.clone(),
                });
            }
        }

        let descriptors = self
            .tables
            .iter()
            .map(|table| table.to_descriptor(&seen))
            .collect::<Result<Vec<_>, _>>()?;

        let hierarchy = self.build_hierarchy(&seen)?;

        log::info!(
            "Loaded schema catalog '{}': {} tables, {} hierarchy levels",
            self.name.as_deref().unwrap_or("default"),
            descriptors.len(),
            hierarchy.len()
        );

        Ok((SchemaCatalog::new(descriptors), hierarchy))
    }

    fn build_hierarchy(&self, known: &HashSet<&str>) -> Result<HierarchyIndex, CatalogError> {
        let mut entries: Vec<(&String, &u32)> = self.hierarchy.iter().collect();
        entries.sort_by(|a, b| a.1.cmp(b.1).then_with(|| a.0.cmp(b.0)));

        let mut by_level: HashMap<u32, &str> = HashMap::new();
        for (table, &level) in entries {
            if !known.contains(table.as_str()) {
                return Err(CatalogError::UnknownHierarchyTable {
                    table: table.clone(),
                });
            }
            if level < 1 {
                return Err(CatalogError::InvalidLevel {
                    table: table.clone(),
                    level,
                });
            }
            if let Some(first) = by_level.insert(level, table.as_str()) {
                return Err(CatalogError::SharedLevel {
                    level,
                    first: first.to_string(),
                    second: table.clone(),
                });
            }
        }

        Ok(HierarchyIndex::new(self.hierarchy.clone()))
    }
}

impl TableDefinition {
    fn to_descriptor(&self, known: &HashSet<&str>) -> Result<TableDescriptor, CatalogError> {
        if self.physical_name.trim().is_empty() {
            return Err(CatalogError::EmptyPhysicalName {
                table: self.name.clone(),
            });
        }

        let mut columns = HashMap::with_capacity(self.columns.len());
        for (name, definition) in &self.columns {
            let entry = match definition {
                ColumnDefinition::Physical(physical_name) => ColumnEntry::Physical {
                    physical_name: physical_name.clone(),
                },
                ColumnDefinition::Relation { relation } => {
                    if !known.contains(relation.object.as_str()) {
                        return Err(CatalogError::UnknownRelationTarget {
                            table: self.name.clone(),
                            column: name.clone(),
                            target: relation.object.clone(),
                        });
                    }
                    ColumnEntry::Relation(RelationColumn {
                        target_table: relation.object.clone(),
                        join_column: relation.column.clone(),
                        is_virtual: relation.is_virtual,
                    })
                }
            };
            columns.insert(name.clone(), entry);
        }

        let identity = match &self.identity {
            Some(column) => {
                if !matches!(columns.get(column), Some(ColumnEntry::Physical { .. })) {
                    return Err(CatalogError::InvalidIdentity {
                        table: self.name.clone(),
                        column: column.clone(),
                    });
                }
                Some(column.clone())
            }
            None => match columns.get(DEFAULT_IDENTITY) {
                Some(ColumnEntry::Physical { .. }) => Some(DEFAULT_IDENTITY.to_string()),
                _ => {
                    log::warn!(
                        "Table '{}' has no identity column; filtered queries against it will fail",
                        self.name
                    );
                    None
                }
            },
        };

        Ok(TableDescriptor {
            name: self.name.clone(),
            physical_name: self.physical_name.clone(),
            is_public: self.is_public,
            columns,
            identity,
        })
    }
}
