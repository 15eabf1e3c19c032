//! SchemaQL - logical to physical SQL translation
//!
//! This crate rewrites queries written against business-level table and
//! column names into queries against the physical storage schema:
//! - Declarative schema catalog and table hierarchy (YAML)
//! - SQL parsing into a typed expression tree
//! - Predicate rewriting and join planning
//! - Physical SQL assembly
//! - HTTP translation service

pub mod config;
pub mod query_planner;
pub mod schema_catalog;
pub mod server;
pub mod sql_generator;
pub mod sql_parser;
pub mod translator;
