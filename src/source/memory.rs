//! In-memory sheet source.
//!
//! The reference implementation of [`SheetSource`]: sheets are tables built
//! in code. Used by the tests and by callers that already hold their data.

use hashbrown::HashMap;

use super::SheetSource;
use crate::model::Table;
use crate::{Error, Result};

#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    sheets: HashMap<String, Table>,
    order: Vec<String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, name: impl Into<String>, table: Table) -> Self {
        self.insert(name, table);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, table: Table) {
        let name = name.into();
        if !self.sheets.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.sheets.insert(name, table);
    }
}

impl SheetSource for MemorySource {
    fn sheet_names(&self) -> Vec<String> {
        self.order.clone()
    }

    fn load_sheet(&self, name: &str) -> Result<Table> {
        self.sheets
            .get(name)
            .cloned()
            .ok_or_else(|| Error::SheetNotFound { sheet: name.to_string() })
    }
}
