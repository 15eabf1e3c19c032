//! Table hierarchy levels.
//!
//! Every table sits at an integer level counted from the root (level 1).
//! The only question asked of the hierarchy is whether two tables are
//! adjacent, i.e. their levels differ by exactly one.

use serde::Serialize;
use std::collections::HashMap;

use super::errors::LookupError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HierarchyIndex {
    levels: HashMap<String, u32>,
}

impl HierarchyIndex {
    pub fn new(levels: HashMap<String, u32>) -> Self {
        HierarchyIndex { levels }
    }

    pub fn level(&self, table: &str) -> Result<u32, LookupError> {
        self.levels
            .get(table)
            .copied()
            .ok_or_else(|| LookupError::MissingLevel {
                table: table.to_string(),
            })
    }

    pub fn get(&self, table: &str) -> Option<u32> {
        self.levels.get(table).copied()
    }

    pub fn are_adjacent(&self, a: &str, b: &str) -> Result<bool, LookupError> {
        Ok(self.level(a)?.abs_diff(self.level(b)?) == 1)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}
