//! Assignment checking, single and multi-target (spec §4.3).

use goc_ast::{Node, NodeId};
use goc_types::{is_subtype, Type};

use crate::context::CheckerState;

/// How an expanded lvalue was classified (spec §4.3).
pub(crate) enum LvalueClass {
    /// A first binding occurrence; type collection is deferred to
    /// `infer_variable_type`.
    Definition(NodeId),
    /// `base[index]`; `base`'s type has already been checked.
    Indexed(Type, NodeId),
    /// A name/member that already has a resolved type.
    Existing(Type),
}

impl CheckerState {
    /// `expand_lvalues(n)` (spec §4.3): flattens parens and unpacks a
    /// top-level tuple/list pattern into its component lvalues.
    pub fn expand_lvalues(&self, n: NodeId) -> Vec<NodeId> {
        let n = self.unwrap(n);
        match self.arena().get(n) {
            Some(Node::TupleExpr(items)) | Some(Node::ListExpr(items)) => {
                items.iter().map(|&i| self.unwrap(i)).collect()
            }
            _ => vec![n],
        }
    }

    pub(crate) fn classify_lvalue(&mut self, lvalue: NodeId) -> LvalueClass {
        let lvalue = self.unwrap(lvalue);
        match self.arena().get(lvalue).cloned() {
            Some(Node::NameExpr { is_def: true, .. }) => LvalueClass::Definition(lvalue),
            Some(Node::MemberExpr { is_def: true, .. }) => LvalueClass::Definition(lvalue),
            Some(Node::IndexExpr { base, index }) => {
                let base_type = self.accept(base, None);
                LvalueClass::Indexed(base_type, index)
            }
            _ => {
                let ty = self.accept(lvalue, None);
                LvalueClass::Existing(ty)
            }
        }
    }

    /// `visit_assignment_stmt` (spec §4.3): the dispatch-level entry
    /// point for a plain assignment statement. Chained assignment (more
    /// than one lvalue sharing a single rvalue, `a = b = c`) is rejected
    /// outright rather than type-checked, matching `check.py`'s
    /// `visit_assignment_stmt` ("Chained assignment not supported yet").
    /// Otherwise `lvalues[0]` is expanded (tuple/list-pattern unpacking)
    /// and driven through the same single/multi classification as
    /// `check_for`'s loop targets, with deferred inference run once at
    /// the end over every definition occurrence collected along the way.
    pub(crate) fn check_assignment_stmt(&mut self, lvalues: &[NodeId], rvalue: NodeId) -> Type {
        if lvalues.len() > 1 {
            let span = self.arena().span(lvalues[0]);
            self.chained_assignment_unsupported(span.start, span.len());
        }

        let expanded = self.expand_lvalues(lvalues[0]);
        let mut lvalue_types = Vec::with_capacity(expanded.len());
        let mut index_lvalues = Vec::with_capacity(expanded.len());
        let mut inferred = Vec::new();

        for &lv in &expanded {
            match self.classify_lvalue(lv) {
                LvalueClass::Definition(node) => {
                    inferred.push(node);
                    lvalue_types.push(None);
                    index_lvalues.push(None);
                }
                LvalueClass::Indexed(base_type, index) => {
                    lvalue_types.push(None);
                    index_lvalues.push(Some((base_type, index)));
                }
                LvalueClass::Existing(ty) => {
                    lvalue_types.push(Some(ty));
                    index_lvalues.push(None);
                }
            }
        }

        if expanded.len() == 1 {
            self.check_assignment(lvalue_types[0].clone(), index_lvalues[0].clone(), rvalue);
        } else {
            self.check_multi_assignment(&lvalue_types, &index_lvalues, &expanded, rvalue);
        }

        if !inferred.is_empty() {
            let rt = self.accept(rvalue, None);
            self.infer_variable_type(&inferred, rt, rvalue);
        }
        Type::Void
    }

    /// Drive a single expanded target through classification, assignment
    /// checking, and deferred inference, in one call — shared by plain
    /// assignment statements, `for`-loop single targets, and each element
    /// of a definition/multi-assignment once its rvalue type is known.
    pub(crate) fn assign_single_target(&mut self, lvalue: NodeId, rvalue: NodeId) {
        match self.classify_lvalue(lvalue) {
            LvalueClass::Definition(node) => {
                let rt = self.accept(rvalue, None);
                self.infer_variable_type(&[node], rt, rvalue);
            }
            LvalueClass::Indexed(base_type, index) => {
                self.check_assignment(None, Some((base_type, index)), rvalue);
            }
            LvalueClass::Existing(ty) => {
                self.check_assignment(Some(ty), None, rvalue);
            }
        }
    }

    /// `check_assignment(lvalue_type?, index_lvalue?, rvalue)` (spec
    /// §4.3).
    pub fn check_assignment(
        &mut self,
        lvalue_type: Option<Type>,
        index_lvalue: Option<(Type, NodeId)>,
        rvalue: NodeId,
    ) {
        if let Some(lt) = lvalue_type {
            let rt = self.accept(rvalue, Some(lt.clone()));
            if !rt.is_any() && !is_subtype(&rt, &lt) {
                let span = self.arena().span(rvalue);
                self.incompatible_types_in_assignment(span.start, span.len());
            }
        } else if let Some((base_type, index)) = index_lvalue {
            self.check_indexed_assignment(base_type, index, rvalue);
        } else {
            self.accept(rvalue, None);
        }
    }

    /// `check_indexed_assignment` (spec §4.3): dispatches to
    /// `__setitem__` via the expression checker's call-check pathway.
    pub fn check_indexed_assignment(&mut self, base_type: Type, index: NodeId, rvalue: NodeId) {
        if base_type.is_any() {
            self.accept(rvalue, None);
            return;
        }
        let method = self.analyse_external_member_access("__setitem__", base_type, None);
        self.check_call(method, &[index, rvalue], None);
    }

    /// `check_multi_assignment(lvalue_types, index_lvalues, lvalues,
    /// rvalue)` (spec §4.3). `lvalue_types`/`index_lvalues` carry
    /// whatever classification already ran for each slot (`None` for a
    /// fresh definition); `rvalue` is evaluated once, with no context,
    /// and its shape determines the element-wise strategy.
    pub fn check_multi_assignment(
        &mut self,
        lvalue_types: &[Option<Type>],
        index_lvalues: &[Option<(Type, NodeId)>],
        lvalues: &[NodeId],
        rvalue: NodeId,
    ) {
        let rvalue_type = self.accept(rvalue, None);
        if rvalue_type.is_any() {
            return;
        }

        match &rvalue_type {
            Type::TupleType(items) => {
                let composed: Vec<Type> = lvalue_types
                    .iter()
                    .enumerate()
                    .map(|(i, known)| known.clone().or_else(|| items.get(i).cloned()).unwrap_or(Type::Any))
                    .collect();
                if items.len() != lvalues.len() {
                    let span = self.arena().span(rvalue);
                    self.incompatible_value_count_in_assignment(span.start, span.len(), items.len(), lvalues.len());
                    return;
                }
                // Re-evaluate under the composed expected tuple type so
                // literal/overload resolution sees the declared slots.
                let expected = Type::TupleType(composed.clone());
                self.accept(rvalue, Some(expected));
                for (i, &lvalue) in lvalues.iter().enumerate() {
                    let slot_type = items[i].clone();
                    let temp = self.temp_node(slot_type);
                    self.assign_slot(lvalue, lvalue_types[i].clone(), index_lvalues[i].clone(), temp);
                }
            }
            _ => {
                if let Some(item) = rvalue_type.list_item() {
                    let item = item.clone();
                    for (i, &lvalue) in lvalues.iter().enumerate() {
                        let temp = self.temp_node(item.clone());
                        self.assign_slot(lvalue, lvalue_types[i].clone(), index_lvalues[i].clone(), temp);
                    }
                } else {
                    let span = self.arena().span(rvalue);
                    self.incompatible_types_in_assignment(span.start, span.len());
                }
            }
        }
    }

    fn assign_slot(
        &mut self,
        lvalue: NodeId,
        known_type: Option<Type>,
        index_lvalue: Option<(Type, NodeId)>,
        rvalue: NodeId,
    ) {
        if known_type.is_some() || index_lvalue.is_some() {
            self.check_assignment(known_type, index_lvalue, rvalue);
        } else {
            self.assign_single_target(lvalue, rvalue);
        }
    }
}
