//! Symbol lookup (spec §4.7).
//!
//! Lookup order is `locals` → `class_tvars` → the current module's
//! `globals` → built-ins. Qualified lookup (`a.b.c`) descends through
//! module references before resolving the final segment.

use std::rc::Rc;

use goc_ast::{Symbol, SymbolKind};
use goc_common::CheckerBug;
use goc_types::{ClassInfo, Type};

use crate::context::CheckerState;

impl CheckerState {
    /// `lookup(name, kind)` (spec §4.7). `kind` records whether the caller
    /// is resolving a local or global binding occurrence; it does not
    /// change the search order, only which table a *new* binding would be
    /// recorded into (binding itself is the semantic analyzer's job, so
    /// here it only participates in diagnostics).
    pub fn lookup(&self, name: &str, _kind: SymbolKind) -> Option<&Symbol> {
        if let Some(locals) = &self.locals {
            if let Some(node) = locals.get(name) {
                return Some(&node.symbol);
            }
        }
        if let Some(tvars) = &self.class_tvars {
            if let Some(node) = tvars.get(name) {
                return Some(&node.symbol);
            }
        }
        if let Some(node) = self.current_symtable().get(name) {
            return Some(&node.symbol);
        }
        self.builtins_table.get(name).map(|node| &node.symbol)
    }

    /// `lookup_qualified(dotted)` (spec §4.7). Unqualified names delegate
    /// to `lookup`; `a.b.c` descends through `Symbol::Module` references.
    /// The first segment may genuinely be absent (a user typo at top
    /// level is not a bug), but once a hop has committed to a specific
    /// module, the semantic analyzer already guarantees the next segment
    /// resolves there — a miss at that point is an internal invariant
    /// violation, reported via `lookup_must_exist` rather than silently
    /// falling through to `None`.
    pub fn lookup_qualified(&self, dotted: &str) -> Option<Symbol> {
        let mut parts = dotted.split('.');
        let first = parts.next()?;
        let mut current = self.lookup(first, SymbolKind::Gdef)?.clone();

        for segment in parts {
            let module_name = match &current {
                Symbol::Module(name) => name.clone(),
                _ => return None,
            };
            match self.lookup_must_exist(&module_name, segment) {
                Ok(symbol) => current = symbol,
                Err(bug) => {
                    debug_assert!(false, "{bug}");
                    return None;
                }
            }
        }
        Some(current)
    }

    /// As `lookup`, but fails loudly: resolving one hop of a dotted
    /// qualified name, where both the module and the name within it are
    /// guaranteed present by the semantic analyzer that produced this AST
    /// (spec §7: "the only non-local exit is a lookup failure in contexts
    /// that must not fail").
    fn lookup_must_exist(&self, module_name: &str, segment: &str) -> Result<Symbol, CheckerBug> {
        let bug = || CheckerBug::UnresolvedSymbol(format!("{module_name}.{segment}"));
        self.modules
            .get(module_name)
            .and_then(|module| module.symbol_table.get(segment))
            .map(|node| node.symbol.clone())
            .ok_or_else(bug)
    }

    /// `named_type(name)` — resolve a bare class name to an `Instance`
    /// with no type arguments, grounded in `check.py`'s `named_type`.
    /// Falls back to `UnboundType` rather than panicking; the type
    /// algebra treats `UnboundType` as compatible with everything so a
    /// single unresolved name does not cascade into further diagnostics
    /// (spec §7).
    pub fn named_type(&self, name: &str) -> Type {
        self.named_type_if_exists(name)
            .unwrap_or_else(|| Type::UnboundType(name.to_string()))
    }

    /// `named_type_if_exists(name)` — as `named_type`, but returns `None`
    /// instead of degrading, for callers that branch on resolvability.
    pub fn named_type_if_exists(&self, name: &str) -> Option<Type> {
        match self.lookup_qualified(name)? {
            Symbol::Class(class) => Some(Type::Instance(class, Vec::new())),
            _ => None,
        }
    }

    /// `named_generic_type(name, args)` — as `named_type`, with explicit
    /// type arguments.
    pub fn named_generic_type(&self, name: &str, args: Vec<Type>) -> Type {
        match self.lookup_qualified(name) {
            Some(Symbol::Class(class)) => Type::Instance(class, args),
            _ => Type::UnboundType(name.to_string()),
        }
    }

    pub fn object_type(&self) -> Type {
        Type::Instance(Rc::clone(&self.builtins.object), Vec::new())
    }

    pub fn bool_type(&self) -> Type {
        Type::Instance(Rc::clone(&self.builtins.bool_), Vec::new())
    }

    pub fn tuple_type(&self, items: Vec<Type>) -> Type {
        Type::TupleType(items)
    }

    /// The class referenced by a `raise`/`except` type name, as an
    /// `Instance` with no type arguments (spec §4.5, "Exception-type
    /// resolution"). Returns `None` if the name does not resolve to a
    /// class at all.
    pub fn class_instance_of(&self, name: &str) -> Option<(Type, Rc<ClassInfo>)> {
        match self.lookup_qualified(name)? {
            Symbol::Class(class) => Some((Type::Instance(Rc::clone(&class), Vec::new()), class)),
            _ => None,
        }
    }
}
