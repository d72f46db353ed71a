//! Local variable type inference (spec §4.4).

use goc_ast::{var_symbol, Node, NodeId, Symbol, SymbolKind, SymbolTableNode};
use goc_types::Type;

use crate::context::CheckerState;

impl CheckerState {
    /// `infer_variable_type(vars, init_type, context)` (spec §4.4). `vars`
    /// are the definition-occurrence name/member expression nodes being
    /// bound; `context` is the node whose span diagnostics should be
    /// attached to.
    pub fn infer_variable_type(&mut self, vars: &[NodeId], init_type: Type, context: NodeId) {
        if init_type.is_void() {
            let span = self.arena().span(context);
            self.does_not_return_value(span.start, span.len());
            return;
        }
        if !init_type.is_valid_for_inference() {
            let span = self.arena().span(context);
            self.need_type_annotation(span.start, span.len());
            return;
        }
        let stripped = init_type.strip();

        if vars.len() == 1 {
            self.bind_annotation(vars[0], stripped);
            return;
        }

        match &stripped {
            Type::TupleType(items) if items.len() == vars.len() => {
                for (var, item) in vars.iter().zip(items.iter()) {
                    self.bind_annotation(*var, item.clone());
                }
            }
            // Same shape (a tuple initializer), wrong arity: report the
            // real counts, mirroring `check_multi_assignment`'s own
            // `items.len() != lvalues.len()` handling.
            Type::TupleType(items) => {
                let span = self.arena().span(context);
                self.incompatible_value_count_in_assignment(span.start, span.len(), items.len(), vars.len());
            }
            Type::Any => {
                for &var in vars {
                    self.bind_annotation(var, Type::Any);
                }
            }
            _ => {
                if let Some(item) = stripped.list_item() {
                    let item = item.clone();
                    for &var in vars {
                        self.bind_annotation(var, item.clone());
                    }
                } else {
                    // Not a tuple, not `Any`, not a list: the rvalue's
                    // shape doesn't support multi-assignment at all.
                    let span = self.arena().span(context);
                    self.incompatible_types_in_assignment(span.start, span.len());
                }
            }
        }
    }

    /// Attach a resolved type to a definition-occurrence's backing
    /// `VarSymbol`. A name already bound to a `Var` (a parameter, or an
    /// earlier slot of the same multi-assignment) just gets its
    /// annotation updated in place. A first-seen local or module-level
    /// name has no backing symbol yet — our AST only pre-populates
    /// parameters, not arbitrary locals — so this is also where that
    /// binding comes into existence, recorded into `locals` (or the
    /// current module's globals, at top level).
    pub(crate) fn bind_annotation(&mut self, node: NodeId, ty: Type) {
        let name = match self.arena().get(node) {
            Some(Node::NameExpr { name, .. }) => name.clone(),
            Some(Node::MemberExpr { name, .. }) => name.clone(),
            _ => return,
        };
        match self.lookup(&name, SymbolKind::Ldef) {
            Some(Symbol::Var(var)) => {
                var.borrow_mut().annotation = Some(ty);
            }
            Some(_) => {
                debug_assert!(false, "definition occurrence `{name}` shadows a non-variable symbol");
            }
            None => self.bind_new_local(name, ty),
        }
    }

    fn bind_new_local(&mut self, name: String, ty: Type) {
        let node = SymbolTableNode { kind: SymbolKind::Ldef, symbol: var_symbol(name.clone(), Some(ty)) };
        if let Some(locals) = &mut self.locals {
            locals.insert(name, node);
        } else {
            let module = self.current_module.clone();
            self.modules.get_mut(&module).expect("current module must exist").symbol_table.insert(name, node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use goc_ast::ModuleFile;
    use goc_common::CheckerOptions;
    use rustc_hash::FxHashMap;

    fn state_with_module() -> CheckerState {
        let mut modules = FxHashMap::default();
        modules.insert("m".to_string(), ModuleFile::new("m"));
        let mut state = CheckerState::new(CheckerOptions::default(), modules);
        state.current_module = "m".to_string();
        state
    }

    /// A definition occurrence inside a function with no pre-existing
    /// symbol creates one in `locals`, not in the module's globals.
    #[test]
    fn bind_annotation_creates_a_fresh_local_inside_a_function() {
        let mut state = state_with_module();
        state.enter_function_scope();
        let def = state.modules.get_mut("m").unwrap().arena.push(
            Node::NameExpr { name: "x".to_string(), symbol: None, is_def: true },
            goc_common::Span::dummy(),
        );
        state.bind_annotation(def, Type::Any);

        let locals = state.locals.as_ref().unwrap();
        assert!(matches!(locals.get("x"), Some(node) if matches!(&node.symbol, Symbol::Var(v) if v.borrow().annotation == Some(Type::Any))));
        assert!(state.current_symtable().get("x").is_none());
    }

    /// The same, at module scope (no enclosing function), lands in the
    /// current module's `symbol_table`.
    #[test]
    fn bind_annotation_creates_a_fresh_global_at_top_level() {
        let mut state = state_with_module();
        let def = state.modules.get_mut("m").unwrap().arena.push(
            Node::NameExpr { name: "x".to_string(), symbol: None, is_def: true },
            goc_common::Span::dummy(),
        );
        state.bind_annotation(def, Type::Any);

        assert!(state.current_symtable().get("x").is_some());
    }

    #[test]
    fn infer_variable_type_rejects_void_initializer() {
        let mut state = state_with_module();
        let context = state.modules.get_mut("m").unwrap().arena.push(Node::Block(vec![]), goc_common::Span::dummy());
        let def = state.modules.get_mut("m").unwrap().arena.push(
            Node::NameExpr { name: "x".to_string(), symbol: None, is_def: true },
            goc_common::Span::dummy(),
        );

        state.infer_variable_type(&[def], Type::Void, context);

        assert_eq!(state.diagnostics.len(), 1);
        assert_eq!(state.diagnostics[0].message, "Function does not return a value");
    }
}
