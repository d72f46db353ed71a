//! Symbol table nodes (spec §6, "Inbound" contract).

use std::cell::RefCell;
use std::rc::Rc;

use goc_types::{ClassInfo, Type};
use rustc_hash::FxHashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SymbolId(pub u32);

/// Where a symbol was bound, used to decide whether an unannotated
/// variable without an initializer is an error (spec §4.2: "top level or
/// dynamic context" are exempt).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolKind {
    /// Local definition (inside a function body).
    Ldef,
    /// Global/module-level definition.
    Gdef,
}

/// A variable binding. The annotation starts `None` for an unannotated
/// declaration and is filled in by inference or by parameter binding.
#[derive(Debug, Default)]
pub struct VarSymbol {
    pub name: String,
    pub annotation: Option<Type>,
}

#[derive(Clone, Debug)]
pub enum Symbol {
    Var(Rc<RefCell<VarSymbol>>),
    Class(Rc<ClassInfo>),
    /// A reference to a sub-module, keyed by its fully-qualified name in
    /// the checker's `modules` registry (spec §4.7, qualified lookup).
    Module(String),
}

#[derive(Clone, Debug)]
pub struct SymbolTableNode {
    pub kind: SymbolKind,
    pub symbol: Symbol,
}

pub type SymbolTable = FxHashMap<String, SymbolTableNode>;

pub fn var_symbol(name: impl Into<String>, annotation: Option<Type>) -> Symbol {
    Symbol::Var(Rc::new(RefCell::new(VarSymbol {
        name: name.into(),
        annotation,
    })))
}
