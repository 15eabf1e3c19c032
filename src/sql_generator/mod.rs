//! Physical SQL assembly.

pub mod query_assembler;
pub mod sql_ast;

pub use query_assembler::QueryAssembler;
pub use sql_ast::{select_to_sql, ToSql};
