//! Method override compatibility (spec §4.6).

use std::rc::Rc;

use goc_ast::NodeId;
use goc_types::{is_equivalent, is_subtype, map_type_from_supertype, ClassInfo, Type};

use crate::context::CheckerState;

impl CheckerState {
    /// For method `method_name` in `class` with signature `own_sig`,
    /// check compatibility against every ancestor class and every
    /// transitively implemented interface that directly declares a
    /// method of the same name (spec §4.6).
    pub fn check_method_override(
        &mut self,
        class: &Rc<ClassInfo>,
        method_name: &str,
        own_sig: &Type,
        definition: NodeId,
    ) {
        if method_name == "__init__" {
            return;
        }
        let mut candidates: Vec<Rc<ClassInfo>> = class.ancestor_chain().into_iter().skip(1).collect();
        candidates.extend(class.all_directly_implemented_interfaces());

        for base in candidates {
            if let Some(base_sig) = base.own_method(method_name) {
                let base_sig = base_sig.as_type();
                self.check_method_or_accessor_override_for_base(class, &base, own_sig, &base_sig, definition);
            }
        }
    }

    /// `check_method_or_accessor_override_for_base` (spec §4.6): maps the
    /// base's signature into `class`'s instantiation, then delegates to
    /// `check_override`.
    fn check_method_or_accessor_override_for_base(
        &mut self,
        class: &Rc<ClassInfo>,
        base: &Rc<ClassInfo>,
        own_sig: &Type,
        base_sig: &Type,
        definition: NodeId,
    ) {
        let mapped_base = map_type_from_supertype(base_sig, class, base);
        self.check_override(base, own_sig, &mapped_base, definition);
    }

    /// `check_override` (spec §4.6): whole-signature subtype check for
    /// overloads/arity mismatches, otherwise element-wise equivalence on
    /// parameters and a subtype check on the return type.
    fn check_override(&mut self, base: &Rc<ClassInfo>, own_sig: &Type, base_sig: &Type, definition: NodeId) {
        let (own_callable, base_callable) = match (own_sig, base_sig) {
            (Type::Callable(a), Type::Callable(b)) => (Some(a), Some(b)),
            _ => (None, None),
        };

        let arity_mismatch = match (own_callable, base_callable) {
            (Some(a), Some(b)) => a.arg_types.len() != b.arg_types.len() || a.min_args != b.min_args,
            _ => true,
        };

        if arity_mismatch {
            if !is_subtype(own_sig, base_sig) {
                let span = self.arena().span(definition);
                self.signature_incompatible_with_supertype(span.start, span.len(), &base.name);
            }
            return;
        }

        let (own, base_c) = (own_callable.unwrap(), base_callable.unwrap());
        for (i, (own_param, base_param)) in own.arg_types.iter().zip(base_c.arg_types.iter()).enumerate() {
            if !is_equivalent(own_param, base_param) {
                let span = self.arena().span(definition);
                self.argument_incompatible_with_supertype(
                    span.start,
                    span.len(),
                    &format!("{}", i + 1),
                    &base.name,
                );
            }
        }
        if !is_subtype(&own.ret_type, &base_c.ret_type) {
            let span = self.arena().span(definition);
            self.return_type_incompatible_with_supertype(span.start, span.len(), &base.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use goc_ast::{ModuleFile, Node};
    use goc_common::{CheckerOptions, Span};
    use goc_types::Callable;
    use rustc_hash::FxHashMap;

    fn state_with_empty_module() -> CheckerState {
        let mut modules = FxHashMap::default();
        modules.insert("m".to_string(), ModuleFile::new("m"));
        let mut state = CheckerState::new(CheckerOptions::default(), modules);
        state.current_module = "m".to_string();
        state
    }

    /// `class B extends A: object m()` overriding `A`'s `int m()` reports
    /// "Return type incompatible with supertype A" (spec §8, scenario 5).
    #[test]
    fn narrower_return_type_violates_override() {
        let mut state = state_with_empty_module();
        let int_ty = Type::Instance(Rc::clone(&state.builtins.int), Vec::new());
        let object_ty = Type::Instance(Rc::clone(&state.builtins.object), Vec::new());

        let mut a = ClassInfo::new("A", "m.A");
        a.methods.insert("m".to_string(), goc_types::MethodSig::Plain(Callable::simple(Vec::new(), int_ty)));
        let a = Rc::new(a);

        let mut b = ClassInfo::new("B", "m.B");
        b.base = Some(Rc::clone(&a));
        let b = Rc::new(b);

        let own_sig = Type::Callable(Callable::simple(Vec::new(), object_ty));
        let definition = state.modules.get_mut("m").unwrap().arena.push(Node::Block(vec![]), Span::dummy());

        state.check_method_override(&b, "m", &own_sig, definition);

        assert_eq!(state.diagnostics.len(), 1);
        assert_eq!(state.diagnostics[0].message, "Return type incompatible with supertype A");
    }

    /// A matching override — same parameters, the same return type —
    /// reports nothing.
    #[test]
    fn matching_override_is_silent() {
        let mut state = state_with_empty_module();
        let int_ty = Type::Instance(Rc::clone(&state.builtins.int), Vec::new());

        let mut a = ClassInfo::new("A", "m.A");
        a.methods.insert("m".to_string(), goc_types::MethodSig::Plain(Callable::simple(Vec::new(), int_ty.clone())));
        let a = Rc::new(a);

        let mut b = ClassInfo::new("B", "m.B");
        b.base = Some(Rc::clone(&a));
        let b = Rc::new(b);

        let own_sig = Type::Callable(Callable::simple(Vec::new(), int_ty));
        let definition = state.modules.get_mut("m").unwrap().arena.push(Node::Block(vec![]), Span::dummy());

        state.check_method_override(&b, "m", &own_sig, definition);

        assert!(state.diagnostics.is_empty());
    }

    #[test]
    fn init_is_exempt_from_override_checks() {
        let mut state = state_with_empty_module();
        let a = Rc::new(ClassInfo::new("A", "m.A"));
        let mut b = ClassInfo::new("B", "m.B");
        b.base = Some(a);
        let b = Rc::new(b);
        let definition = state.modules.get_mut("m").unwrap().arena.push(Node::Block(vec![]), Span::dummy());

        state.check_method_override(&b, "__init__", &Type::Any, definition);

        assert!(state.diagnostics.is_empty());
    }
}
