//! Driver and visit dispatch (spec §4.1).

use goc_ast::{Node, NodeId};
use goc_types::Type;
use tracing::debug;

use crate::context::CheckerState;

impl CheckerState {
    /// `accept(node, expected?) -> Type` (spec §4.1): the universal entry
    /// point. Pushes the expected type, dispatches on node kind, pops the
    /// context, records the result in `type_map`, and masks the return
    /// value to `Any` while inside a dynamic function — the recorded
    /// `type_map` entry keeps the real computed type regardless.
    pub fn accept(&mut self, node: NodeId, expected: Option<Type>) -> Type {
        if node.is_none() {
            return Type::Any;
        }
        self.type_context.push(expected);
        let computed = self.dispatch(node);
        self.type_context.pop();
        self.store_type(node, computed.clone());

        if self.is_dynamic_function() {
            Type::Any
        } else {
            computed
        }
    }

    fn dispatch(&mut self, node: NodeId) -> Type {
        let Some(n) = self.arena().get(node).cloned() else {
            return Type::Any;
        };
        match n {
            Node::Block(stmts) => self.check_block(&stmts),
            Node::ExpressionStmt(expr) => self.check_expression_stmt(expr),
            Node::If { condition, then_branch, else_branch } => {
                self.check_if(condition, then_branch, else_branch)
            }
            Node::While { condition, body } => self.check_while(condition, body),
            Node::Return { value } => self.check_return(value),
            Node::OperatorAssignment { op, lvalue, rvalue } => {
                self.check_operator_assignment(op, lvalue, rvalue)
            }
            Node::Assignment { lvalues, rvalue } => self.check_assignment_stmt(&lvalues, rvalue),
            Node::Assert(expr) => self.check_assert(expr),
            Node::Raise(expr) => self.check_raise(expr),
            Node::Try { body, handlers, else_branch, finally_branch } => {
                self.check_try(body, &handlers, else_branch, finally_branch)
            }
            Node::For { targets, iterable, body } => self.check_for(&targets, iterable, body),
            Node::Del(expr) => self.check_del(expr),
            Node::Yield(expr) => self.check_yield(expr),
            Node::With { items, body } => self.check_with(&items, body),

            Node::VariableDef { lvalues, annotations, init, is_top_level } => {
                self.check_variable_def(&lvalues, &annotations, init, is_top_level)
            }
            Node::FuncDef(data) => self.check_func_def(&data),
            Node::OverloadedFuncDef { items, owner_class } => {
                self.check_overloaded_func_def(&items, owner_class)
            }
            Node::ClassDef(data) => self.check_class_def(&data),

            Node::NameExpr { name, is_def, .. } => self.visit_name_expr(&name, is_def),
            Node::MemberExpr { base, name, .. } => self.visit_member_expr(base, &name),
            Node::IndexExpr { base, index } => self.visit_index_expr(base, index),
            Node::TupleExpr(items) => self.visit_tuple_expr(&items),
            Node::ListExpr(items) => self.visit_list_expr(&items),
            Node::ParenExpr(inner) => {
                let context = self.current_type_context().cloned();
                self.accept(inner, context)
            }
            Node::CallExpr { callee, args } => self.visit_call_expr(callee, &args),
            Node::IntLiteral(_) => self.visit_literal_type("int"),
            Node::StrLiteral(_) => self.visit_literal_type("str"),
            Node::FloatLiteral(_) => self.visit_literal_type("float"),
            Node::OpExpr { op, left, right } => self.visit_op_expr(op, left, right),
            Node::UnaryExpr { operand } => {
                let context = self.current_type_context().cloned();
                self.accept(operand, context)
            }
            Node::TempNode(ty) => ty,
        }
    }

    /// `check_file(file, path)` (spec §4.1): sets the file context, binds
    /// `globals` to the module's symbol table, clears `locals` and
    /// `class_tvars`, and visits each top-level definition.
    pub fn check_file(&mut self, module_name: &str) {
        debug!(module = module_name, "check_file: start");
        self.current_module = module_name.to_string();
        self.set_file(module_name);
        self.locals = None;
        self.class_tvars = None;

        let definitions = self.modules[module_name].definitions.clone();
        for def in definitions {
            self.accept(def, None);
        }

        #[cfg(debug_assertions)]
        self.assert_stacks_empty();
        debug!(module = module_name, diagnostics = self.diagnostics.len(), "check_file: done");
    }
}
