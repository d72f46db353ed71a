//! Interface implementation checks (spec §4.6).

use std::rc::Rc;

use goc_ast::NodeId;
use goc_types::ClassInfo;

use crate::context::CheckerState;

impl CheckerState {
    /// A class must implement every method named in every transitively
    /// implemented interface.
    pub fn check_interface_errors(&mut self, class: &Rc<ClassInfo>, definition: NodeId) {
        if class.is_interface {
            return;
        }
        for iface in class.all_directly_implemented_interfaces() {
            let missing: Vec<String> = iface
                .methods
                .keys()
                .filter(|member| !class.has_method(member))
                .cloned()
                .collect();
            for member in missing {
                let span = self.arena().span(definition);
                self.interface_member_not_implemented(span.start, span.len(), &class.name, &member, &iface.name);
            }
        }
    }

    /// Interfaces listed more than once along the base/interface graph
    /// are reported once (spec §9, REDESIGN FLAG resolution): the first
    /// duplicate found by a single walk of the ancestor set, suppressing
    /// further reports along the same chain.
    pub fn check_unique_interface_implementations(&mut self, class: &Rc<ClassInfo>, definition: NodeId) {
        if let Some(duplicate) = class.find_duplicate_interface() {
            let span = self.arena().span(definition);
            self.duplicate_interfaces(span.start, span.len(), &duplicate.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use goc_ast::{ModuleFile, Node};
    use goc_common::{CheckerOptions, Span};
    use rustc_hash::FxHashMap;

    fn state_with_empty_module() -> CheckerState {
        let mut modules = FxHashMap::default();
        modules.insert("m".to_string(), ModuleFile::new("m"));
        let mut state = CheckerState::new(CheckerOptions::default(), modules);
        state.current_module = "m".to_string();
        state
    }

    /// `class C implements I` where `I` declares `f()` and `C` never
    /// defines it reports "C does not implement member f of interface I"
    /// (spec §8, scenario 6).
    #[test]
    fn missing_interface_member_is_reported() {
        let mut state = state_with_empty_module();
        let mut iface = ClassInfo::new("I", "m.I");
        iface.is_interface = true;
        iface.methods.insert(
            "f".to_string(),
            goc_types::MethodSig::Plain(goc_types::Callable::simple(Vec::new(), Type::Void)),
        );
        let iface = Rc::new(iface);

        let mut c = ClassInfo::new("C", "m.C");
        c.interfaces.push(Rc::clone(&iface));
        c.interface_args.push(Vec::new());
        let c = Rc::new(c);

        let definition = state.modules.get_mut("m").unwrap().arena.push(Node::Block(vec![]), Span::dummy());
        state.check_interface_errors(&c, definition);

        assert_eq!(state.diagnostics.len(), 1);
        assert_eq!(state.diagnostics[0].message, "C does not implement member f of interface I");
    }

    #[test]
    fn implemented_interface_member_is_silent() {
        let mut state = state_with_empty_module();
        let mut iface = ClassInfo::new("I", "m.I");
        iface.is_interface = true;
        iface.methods.insert(
            "f".to_string(),
            goc_types::MethodSig::Plain(goc_types::Callable::simple(Vec::new(), Type::Void)),
        );
        let iface = Rc::new(iface);

        let mut c = ClassInfo::new("C", "m.C");
        c.interfaces.push(Rc::clone(&iface));
        c.methods.insert(
            "f".to_string(),
            goc_types::MethodSig::Plain(goc_types::Callable::simple(Vec::new(), Type::Void)),
        );
        let c = Rc::new(c);

        let definition = state.modules.get_mut("m").unwrap().arena.push(Node::Block(vec![]), Span::dummy());
        state.check_interface_errors(&c, definition);

        assert!(state.diagnostics.is_empty());
    }

    /// The same interface named twice in the ancestor chain's `implements`
    /// lists is reported once as a duplicate.
    #[test]
    fn duplicate_interface_implementation_is_reported() {
        let mut state = state_with_empty_module();
        let iface = Rc::new(ClassInfo::new("I", "m.I"));

        let mut base = ClassInfo::new("Base", "m.Base");
        base.interfaces.push(Rc::clone(&iface));
        let base = Rc::new(base);

        let mut c = ClassInfo::new("C", "m.C");
        c.base = Some(base);
        c.interfaces.push(Rc::clone(&iface));
        let c = Rc::new(c);

        let definition = state.modules.get_mut("m").unwrap().arena.push(Node::Block(vec![]), Span::dummy());
        state.check_unique_interface_implementations(&c, definition);

        assert_eq!(state.diagnostics.len(), 1);
        assert_eq!(state.diagnostics[0].message, "Interface I implemented more than once");
    }
}
