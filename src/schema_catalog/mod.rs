pub mod config;
pub mod errors;
pub mod hierarchy;
pub mod schema;


pub use config::SchemaConfig;
pub use errors::{CatalogError, LookupError};
pub use hierarchy::HierarchyIndex;
pub use schema::{ColumnEntry, RelationColumn, ResolveMode, SchemaCatalog, TableDescriptor};
