//! Reference expression checker (spec §6, "Expression-checker contract").
//!
//! spec.md treats the expression checker's body as an external
//! collaborator and specifies only its interface. This module supplies a
//! concrete implementation so the workspace is self-contained and its
//! tests exercise real type flow; it is held to a lower engineering bar
//! than the statement checker proper (SPEC_FULL §1).

use std::rc::Rc;

use goc_ast::{Node, NodeId, SymbolKind};
use goc_types::{is_subtype, Type};

use crate::context::CheckerState;

impl CheckerState {
    /// Strip enclosing `ParenExpr` wrappers (spec §6, `unwrap`).
    pub fn unwrap(&self, node: NodeId) -> NodeId {
        let mut current = node;
        while let Some(Node::ParenExpr(inner)) = self.arena().get(current) {
            current = *inner;
        }
        current
    }

    /// `unwrap_list` (spec §6): strip parens from every element.
    pub fn unwrap_list(&self, nodes: &[NodeId]) -> Vec<NodeId> {
        nodes.iter().map(|&n| self.unwrap(n)).collect()
    }

    pub(crate) fn visit_name_expr(&mut self, name: &str, is_def: bool) -> Type {
        if is_def {
            // A binding occurrence; its type is whatever the enclosing
            // assignment/declaration infers, not yet resolvable here.
            return self.current_type_context().cloned().unwrap_or(Type::Any);
        }
        match self.lookup(name, SymbolKind::Ldef) {
            Some(goc_ast::Symbol::Var(var)) => var.borrow().annotation.clone().unwrap_or(Type::Any),
            Some(goc_ast::Symbol::Class(class)) => self.class_as_callable(&class),
            Some(goc_ast::Symbol::Module(_)) => Type::Any,
            None => Type::UnboundType(name.to_string()),
        }
    }

    /// A bare class name used as a value resolves to its constructor
    /// signature, or a degenerate no-arg constructor if the class has no
    /// `__init__`.
    fn class_as_callable(&self, class: &Rc<goc_types::ClassInfo>) -> Type {
        match class.get_method("__init__") {
            Some(sig) => sig.as_type(),
            None => Type::Callable(goc_types::Callable {
                arg_types: Vec::new(),
                min_args: 0,
                is_var_arg: false,
                ret_type: Box::new(Type::Instance(Rc::clone(class), Vec::new())),
                is_type_obj: true,
                name: Some(class.name.clone()),
                variables: Vec::new(),
            }),
        }
    }

    pub(crate) fn visit_member_expr(&mut self, base: NodeId, name: &str) -> Type {
        let base_type = self.accept(base, None);
        let context = self.current_type_context().cloned();
        self.analyse_external_member_access(name, base_type, context)
    }

    /// `analyse_external_member_access` (spec §6).
    pub fn analyse_external_member_access(
        &mut self,
        name: &str,
        base_type: Type,
        _context: Option<Type>,
    ) -> Type {
        if base_type.is_any() || base_type.is_unbound() {
            return Type::Any;
        }
        match &base_type {
            Type::Instance(class, _args) => match class.get_method(name) {
                Some(sig) => sig.as_type(),
                None => Type::UnboundType(format!("{}.{}", class.full_name, name)),
            },
            _ => Type::Any,
        }
    }

    pub(crate) fn visit_index_expr(&mut self, base: NodeId, index: NodeId) -> Type {
        let base_type = self.accept(base, None);
        if base_type.is_any() {
            self.accept(index, None);
            return Type::Any;
        }
        if let Some(item) = base_type.list_item() {
            let item = item.clone();
            self.accept(index, None);
            return item;
        }
        let context = self.current_type_context().cloned();
        let method = self.analyse_external_member_access("__getitem__", base_type, None);
        self.check_call(method, &[index], context)
    }

    pub(crate) fn visit_call_expr(&mut self, callee: NodeId, args: &[NodeId]) -> Type {
        let callee_type = self.accept(callee, None);
        let context = self.current_type_context().cloned();
        self.check_call(callee_type, args, context)
    }

    /// `check_call(callee_type, arg_nodes, context)` (spec §6).
    pub fn check_call(&mut self, callee_type: Type, arg_nodes: &[NodeId], context: Option<Type>) -> Type {
        match callee_type {
            Type::Any | Type::UnboundType(_) => {
                for &arg in arg_nodes {
                    self.accept(arg, None);
                }
                Type::Any
            }
            Type::Callable(c) => self.check_call_against_signature(&c, arg_nodes),
            Type::Overloaded(items) => {
                let chosen = items
                    .iter()
                    .find(|c| arg_nodes.len() >= c.min_args && (arg_nodes.len() <= c.arg_types.len() || c.is_var_arg))
                    .or_else(|| items.first())
                    .cloned();
                match chosen {
                    Some(c) => self.check_call_against_signature(&c, arg_nodes),
                    None => Type::Any,
                }
            }
            other => {
                for &arg in arg_nodes {
                    self.accept(arg, None);
                }
                let span = self.arena().span(arg_nodes.first().copied().unwrap_or(NodeId::NONE));
                self.fail(span.start, span.len(), format!("{other:?} is not callable"));
                Type::Any
            }
        }
    }

    fn check_call_against_signature(
        &mut self,
        c: &goc_types::Callable,
        arg_nodes: &[NodeId],
    ) -> Type {
        if arg_nodes.len() < c.min_args || (arg_nodes.len() > c.arg_types.len() && !c.is_var_arg) {
            let span = self.arena().span(arg_nodes.first().copied().unwrap_or(NodeId::NONE));
            self.fail(span.start, span.len(), "Too few or too many arguments for call");
        }
        for (i, &arg) in arg_nodes.iter().enumerate() {
            let expected = if i < c.arg_types.len() {
                c.arg_types.get(i).cloned()
            } else if c.is_var_arg {
                c.arg_types.last().cloned()
            } else {
                None
            };
            let arg_type = self.accept(arg, expected.clone());
            if let Some(exp) = &expected {
                if !is_subtype(&arg_type, exp) {
                    let span = self.arena().span(arg);
                    self.fail(span.start, span.len(), "Argument has incompatible type");
                }
            }
        }
        (*c.ret_type).clone()
    }

    /// `check_op(method_name, left_type, right_node, context)` (spec §6).
    pub fn check_op(
        &mut self,
        method_name: &str,
        left_type: Type,
        right_node: NodeId,
        context: Option<Type>,
    ) -> Type {
        if left_type.is_any() || left_type.is_unbound() {
            self.accept(right_node, None);
            return Type::Any;
        }
        let method_type = self.analyse_external_member_access(method_name, left_type.clone(), None);
        if method_type.is_unbound() {
            self.accept(right_node, None);
            let span = self.arena().span(right_node);
            self.fail(span.start, span.len(), format!("Unsupported operand type for {method_name}"));
            return Type::Any;
        }
        self.check_call(method_type, std::slice::from_ref(&right_node), context)
    }

    pub(crate) fn visit_tuple_expr(&mut self, items: &[NodeId]) -> Type {
        let expected_items = match self.current_type_context() {
            Some(Type::TupleType(items)) => Some(items.clone()),
            _ => None,
        };
        let mut types = Vec::with_capacity(items.len());
        for (i, &item) in items.iter().enumerate() {
            let expected = expected_items.as_ref().and_then(|items| items.get(i).cloned());
            types.push(self.accept(item, expected));
        }
        Type::TupleType(types)
    }

    pub(crate) fn visit_list_expr(&mut self, items: &[NodeId]) -> Type {
        let expected_item = match self.current_type_context() {
            Some(t) => t.list_item().cloned(),
            None => None,
        };
        if items.is_empty() {
            // Source of "None-contaminated" empty-list inference (spec §9,
            // open question): an empty list literal has no element to
            // infer from, so its item type degrades to `NoneType`, which
            // later fails `is_valid_for_inference`.
            return self.builtins.list_of(expected_item.unwrap_or(Type::NoneType));
        }
        let mut item_type = None;
        for &item in items {
            let t = self.accept(item, expected_item.clone());
            item_type.get_or_insert(t);
        }
        self.builtins.list_of(item_type.unwrap_or(Type::NoneType))
    }

    pub(crate) fn visit_op_expr(&mut self, op: goc_ast::BinOp, left: NodeId, right: NodeId) -> Type {
        let left_type = self.accept(left, None);
        let context = self.current_type_context().cloned();
        self.check_op(op.method_name(), left_type, right, context)
    }

    pub(crate) fn visit_literal_type(&self, name: &str) -> Type {
        self.named_type(name)
    }
}
