//! Statement checking (spec §4.5).
//!
//! Each `check_*` function assumes it is called from `dispatch` with the
//! type-context stack already carrying whatever expected type applies,
//! and returns the node's "computed type" for `accept` to record — `Void`
//! for statements that do not produce a value.

use goc_ast::{BinOp, CatchClause, Node, NodeId};
use goc_types::{is_subtype, Type};

use crate::context::CheckerState;

impl CheckerState {
    pub(crate) fn check_block(&mut self, stmts: &[NodeId]) -> Type {
        for &stmt in stmts {
            self.accept(stmt, None);
        }
        Type::Void
    }

    pub(crate) fn check_expression_stmt(&mut self, expr: NodeId) -> Type {
        self.accept(expr, None);
        Type::Void
    }

    pub(crate) fn check_if(&mut self, condition: NodeId, then_branch: NodeId, else_branch: NodeId) -> Type {
        self.check_not_void(condition);
        self.accept(then_branch, None);
        if !else_branch.is_none() {
            self.accept(else_branch, None);
        }
        Type::Void
    }

    pub(crate) fn check_while(&mut self, condition: NodeId, body: NodeId) -> Type {
        self.check_not_void(condition);
        self.accept(body, None);
        Type::Void
    }

    fn check_not_void(&mut self, condition: NodeId) {
        let ty = self.accept(condition, None);
        if ty.is_void() {
            let span = self.arena().span(condition);
            self.fail(span.start, span.len(), "Void value is not valid as a condition");
        }
    }

    /// **Return** (spec §4.5). Outside any function this is unreachable —
    /// the semantic layer rejects a top-level `return` before the checker
    /// ever sees it — so there is nothing to do here but be defensive.
    pub(crate) fn check_return(&mut self, value: NodeId) -> Type {
        if !self.is_within_function() {
            return Type::Void;
        }
        let return_type = self.current_return_type().cloned().unwrap_or(Type::Any);
        let dynamic = self.is_dynamic_function();

        if value.is_none() {
            let exempt = dynamic && !self.options.strict_return_in_dynamic_functions;
            if !return_type.is_void() && !exempt {
                let span = self.arena().span(value);
                self.return_value_expected(span.start, span.len());
            }
            return Type::Void;
        }

        let value_type = self.accept(value, Some(return_type.clone()));
        if value_type.is_any() {
            return Type::Void;
        }
        if return_type.is_void() {
            let span = self.arena().span(value);
            self.no_return_value_expected(span.start, span.len());
        } else if !is_subtype(&value_type, &return_type) {
            let span = self.arena().span(value);
            self.incompatible_types_in_assignment(span.start, span.len());
        }
        Type::Void
    }

    pub(crate) fn check_operator_assignment(&mut self, op: BinOp, lvalue: NodeId, rvalue: NodeId) -> Type {
        let lvalue = self.unwrap(lvalue);
        if let Some(Node::IndexExpr { base, index }) = self.arena().get(lvalue).cloned() {
            let lvalue_type = self.accept(lvalue, None);
            self.check_indexed_operator_assignment(lvalue_type, base, index, rvalue, op)
        } else {
            let lvalue_type = self.accept(lvalue, None);
            if lvalue_type.is_any() {
                self.accept(rvalue, None);
                return Type::Void;
            }
            let result_type = self.check_op(op.method_name(), lvalue_type.clone(), rvalue, None);
            if !result_type.is_any() && !is_subtype(&result_type, &lvalue_type) {
                let span = self.arena().span(lvalue);
                self.incompatible_operator_assignment(span.start, span.len(), op.method_name());
            }
            Type::Void
        }
    }

    /// `x[i] op= e`: the operator's own result type against the current
    /// element type is computed but discarded — the real assignment
    /// re-dispatches through `check_indexed_assignment`'s `__setitem__`
    /// path with the original rvalue, the same way a plain `x[i] = e`
    /// does, matching `check.py`'s `visit_operator_assignment_stmt`.
    fn check_indexed_operator_assignment(
        &mut self,
        lvalue_type: Type,
        base: NodeId,
        index: NodeId,
        rvalue: NodeId,
        op: BinOp,
    ) -> Type {
        if !lvalue_type.is_any() {
            self.check_op(op.method_name(), lvalue_type, rvalue, None);
        }
        let base_type = self.accept(base, None);
        self.check_indexed_assignment(base_type, index, rvalue);
        Type::Void
    }

    pub(crate) fn check_assert(&mut self, expr: NodeId) -> Type {
        self.accept(expr, None);
        Type::Void
    }

    pub(crate) fn check_raise(&mut self, expr: NodeId) -> Type {
        let ty = self.accept(expr, None);
        let base_exception = Type::Instance(self.builtins.base_exception.clone(), Vec::new());
        if !ty.is_any() && !is_subtype(&ty, &base_exception) {
            let span = self.arena().span(expr);
            self.raise_requires_base_exception(span.start, span.len());
        }
        Type::Void
    }

    pub(crate) fn check_try(
        &mut self,
        body: NodeId,
        handlers: &[CatchClause],
        else_branch: NodeId,
        finally_branch: NodeId,
    ) -> Type {
        self.accept(body, None);
        for handler in handlers {
            if !handler.exception_type.is_none() {
                let exc_type = self.resolve_exception_type(handler.exception_type);
                if let (Some(var), Some(ty)) = (&handler.var, exc_type) {
                    var.borrow_mut().annotation = Some(ty);
                }
            }
            self.accept(handler.body, None);
        }
        if !else_branch.is_none() {
            self.accept(else_branch, None);
        }
        if !finally_branch.is_none() {
            self.accept(finally_branch, None);
        }
        Type::Void
    }

    /// Exception-type resolution (spec §4.5): a name referring to a class
    /// becomes an `Instance` with empty type args; a tuple is rejected as
    /// unsupported; anything else is "unsupported exception type".
    fn resolve_exception_type(&mut self, node: NodeId) -> Option<Type> {
        let span = self.arena().span(node);
        match self.arena().get(node).cloned() {
            Some(Node::NameExpr { name, .. }) => match self.class_instance_of(&name) {
                Some((ty, _)) => Some(ty),
                None => {
                    self.unsupported_exception_type(span.start, span.len());
                    None
                }
            },
            Some(Node::TupleExpr(_)) => {
                self.multiple_exception_types_unsupported(span.start, span.len());
                None
            }
            _ => {
                self.unsupported_exception_type(span.start, span.len());
                None
            }
        }
    }

    pub(crate) fn check_for(&mut self, targets: &[NodeId], iterable: NodeId, body: NodeId) -> Type {
        let iter_type = self.accept(iterable, None);
        if iter_type.is_void() {
            let span = self.arena().span(iterable);
            self.fail(span.start, span.len(), "Void value is not iterable");
            self.accept(body, None);
            return Type::Void;
        }
        let element_type = self.iterate_element_type(&iter_type, iterable);
        let temp = self.temp_node(element_type);
        if targets.len() == 1 {
            self.assign_single_target(targets[0], temp);
        } else {
            let lvalue_types = vec![None; targets.len()];
            let index_lvalues = vec![None; targets.len()];
            self.check_multi_assignment(&lvalue_types, &index_lvalues, targets, temp);
        }
        self.accept(body, None);
        Type::Void
    }

    fn iterate_element_type(&mut self, iter_type: &Type, iterable_node: NodeId) -> Type {
        if iter_type.is_any() {
            return Type::Any;
        }
        let iterable_of_any = self.builtins.iterable_of(Type::Any);
        if !is_subtype(iter_type, &iterable_of_any) {
            let span = self.arena().span(iterable_node);
            self.invalid_loop_iterable(span.start, span.len());
            return Type::Any;
        }
        let iter_method = self.analyse_external_member_access("__iter__", iter_type.clone(), None);
        let iterator_type = self.check_call(iter_method, &[], None);
        let next_method = self.analyse_external_member_access("__next__", iterator_type, None);
        self.check_call(next_method, &[], None)
    }

    pub(crate) fn check_del(&mut self, expr: NodeId) -> Type {
        if let Some(Node::IndexExpr { base, index }) = self.arena().get(expr).cloned() {
            let base_type = self.accept(base, None);
            if !base_type.is_any() {
                let method = self.analyse_external_member_access("__delitem__", base_type, None);
                self.check_call(method, &[index], None);
            } else {
                self.accept(index, None);
            }
        } else {
            self.accept(expr, None);
        }
        Type::Void
    }

    pub(crate) fn check_yield(&mut self, expr: NodeId) -> Type {
        if !expr.is_none() {
            self.accept(expr, None);
        }
        let span = self.arena().span(expr);
        self.not_implemented(span.start, span.len(), "yield");
        Type::Any
    }

    pub(crate) fn check_with(&mut self, items: &[NodeId], body: NodeId) -> Type {
        for &item in items {
            self.accept(item, None);
        }
        let span = self.arena().span(body);
        self.not_implemented(span.start, span.len(), "with");
        self.accept(body, None);
        Type::Void
    }
}
