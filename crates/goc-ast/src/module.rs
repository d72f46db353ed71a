//! `ModuleFile` (spec §6, "Inbound" contract).

use crate::node::{NodeArena, NodeId};
use crate::symbol::SymbolTable;

pub struct ModuleFile {
    pub name: String,
    pub symbol_table: SymbolTable,
    pub definitions: Vec<NodeId>,
    pub arena: NodeArena,
}

impl ModuleFile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol_table: SymbolTable::default(),
            definitions: Vec::new(),
            arena: NodeArena::new(),
        }
    }
}
