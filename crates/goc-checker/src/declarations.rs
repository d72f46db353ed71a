//! Declaration checking (spec §4.2): variable, function, overloaded
//! function, and class definitions.

use std::rc::Rc;

use goc_ast::{var_symbol, ClassData, FuncData, Node, NodeId, Param, SymbolKind, SymbolTable, SymbolTableNode};
use goc_types::{ClassInfo, Type};

use crate::context::CheckerState;

impl CheckerState {
    pub(crate) fn check_variable_def(
        &mut self,
        lvalues: &[NodeId],
        annotations: &[Option<Type>],
        init: NodeId,
        is_top_level: bool,
    ) -> Type {
        if lvalues.len() == 1 {
            self.check_single_variable_def(
                lvalues[0],
                annotations.first().cloned().flatten(),
                init,
                is_top_level,
            );
        } else {
            self.check_multi_variable_def(lvalues, annotations, init);
        }
        Type::Void
    }

    fn check_single_variable_def(
        &mut self,
        lvalue: NodeId,
        annotation: Option<Type>,
        init: NodeId,
        is_top_level: bool,
    ) {
        match annotation {
            Some(ann) => {
                if !init.is_none() {
                    self.check_assignment(Some(ann.clone()), None, init);
                }
                self.bind_annotation(lvalue, ann);
            }
            None if !init.is_none() => {
                let init_type = self.accept(init, None);
                self.infer_variable_type(&[lvalue], init_type, init);
            }
            None => {
                let dynamic = self.is_dynamic_function();
                let must_annotate =
                    !is_top_level && (!dynamic || self.options.require_annotation_in_dynamic_functions);
                if must_annotate {
                    let span = self.arena().span(lvalue);
                    self.need_type_annotation(span.start, span.len());
                }
            }
        }
    }

    /// Multiple lvalues at the same definition (e.g. `int a, str b = (1,
    /// "x")`). If every slot carries an explicit annotation, check as a
    /// fully-annotated multi-assignment (spec §4.2); otherwise fall
    /// through to ordinary multi-assignment inference.
    fn check_multi_variable_def(&mut self, lvalues: &[NodeId], annotations: &[Option<Type>], init: NodeId) {
        let lvalue_types: Vec<Option<Type>> = annotations.to_vec();
        let index_lvalues = vec![None; lvalues.len()];
        self.check_multi_assignment(&lvalue_types, &index_lvalues, lvalues, init);
        for (&lvalue, annotation) in lvalues.iter().zip(annotations.iter()) {
            if let Some(ann) = annotation {
                self.bind_annotation(lvalue, ann.clone());
            }
        }
    }

    pub(crate) fn check_func_def(&mut self, data: &FuncData) -> Type {
        let is_dynamic = data.declared_sig.is_none();
        self.dynamic_funcs.push(is_dynamic);

        if data.name == "__init__" && data.owner_class.is_some() {
            if let Some(ret) = &data.declared_ret {
                if !ret.is_void() && !is_dynamic {
                    let span = self.arena().span(data.body);
                    self.constructor_return_type(span.start, span.len());
                }
            }
        }

        let return_type = data.declared_ret.clone().unwrap_or(Type::Any);
        self.return_types.push(return_type);
        self.set_function(Some(data.name.clone()));

        self.enter_function_scope();
        self.bind_params(&data.params, &data.var_arg);
        self.check_param_defaults(&data.params, &data.var_arg);
        self.accept(data.body, None);
        self.leave_function_scope();

        self.set_function(None);
        self.return_types.pop();
        self.dynamic_funcs.pop();

        if let (Some(owner), Some(sig)) = (&data.owner_class, &data.declared_sig) {
            let owner = Rc::clone(owner);
            let sig = sig.clone();
            self.check_method_override(&owner, &data.name, &sig, data.body);
        }
        Type::Void
    }

    fn bind_params(&mut self, params: &[Param], var_arg: &Option<Param>) {
        for param in params {
            let symbol = var_symbol(param.name.clone(), param.declared_type.clone());
            self.locals.get_or_insert_with(SymbolTable::default).insert(
                param.name.clone(),
                SymbolTableNode {
                    kind: SymbolKind::Ldef,
                    symbol,
                },
            );
        }
        if let Some(va) = var_arg {
            // Rewrite the trailing var-arg parameter's declared type to
            // `list<T>` (spec §4.2, function-definition step 4).
            let wrapped = va.declared_type.clone().map(|t| self.builtins.list_of(t));
            let symbol = var_symbol(va.name.clone(), wrapped);
            self.locals.get_or_insert_with(SymbolTable::default).insert(
                va.name.clone(),
                SymbolTableNode {
                    kind: SymbolKind::Ldef,
                    symbol,
                },
            );
        }
    }

    fn check_param_defaults(&mut self, params: &[Param], var_arg: &Option<Param>) {
        for param in params.iter().chain(var_arg.iter()) {
            if let Some(default) = param.default {
                self.accept(default, param.declared_type.clone());
            }
        }
    }

    pub(crate) fn check_overloaded_func_def(
        &mut self,
        items: &[NodeId],
        owner_class: Option<Rc<ClassInfo>>,
    ) -> Type {
        for &item in items {
            self.accept(item, None);
        }
        if let Some(owner) = &owner_class {
            if let (Some(combined), Some(name)) =
                (self.combined_overload_signature(items), self.first_item_name(items))
            {
                let definition = items.first().copied().unwrap_or(NodeId::NONE);
                self.check_method_override(owner, &name, &combined, definition);
            }
        }
        Type::Void
    }

    fn combined_overload_signature(&self, items: &[NodeId]) -> Option<Type> {
        let mut callables = Vec::new();
        for &item in items {
            if let Some(Node::FuncDef(data)) = self.arena().get(item) {
                match &data.declared_sig {
                    Some(Type::Callable(c)) => callables.push(c.clone()),
                    Some(Type::Overloaded(cs)) => callables.extend(cs.clone()),
                    _ => {}
                }
            }
        }
        if callables.is_empty() {
            None
        } else {
            Some(Type::Overloaded(callables))
        }
    }

    fn first_item_name(&self, items: &[NodeId]) -> Option<String> {
        items.first().and_then(|&item| match self.arena().get(item) {
            Some(Node::FuncDef(data)) => Some(data.name.clone()),
            _ => None,
        })
    }

    pub(crate) fn check_class_def(&mut self, data: &ClassData) -> Type {
        let class = Rc::clone(&data.class_info);
        self.set_type(Some(class.name.clone()));

        self.check_unique_interface_implementations(&class, data.body);
        self.check_interface_errors(&class, data.body);

        self.enter_class_scope(SymbolTable::default());
        self.accept(data.body, None);
        self.leave_class_scope();

        self.set_type(None);
        Type::Void
    }
}
