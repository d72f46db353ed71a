//! `CheckerState` — holds the shared state used throughout type checking.
//!
//! Mirrors `tsz-checker::context::CheckerContext`: separates state from
//! logic so the statement/declaration/override checkers can all operate
//! on the same stacks. Unlike the teacher, `CheckerState` owns its module
//! set outright instead of borrowing it from a longer-lived parser arena —
//! the AST this crate consumes is self-contained, and variable annotations
//! are written through `RefCell` interior mutability (spec §3: "the
//! checker consumes... but does not mutate these except to attach type
//! annotations"), so no split-borrow lifetime gymnastics are needed.

use goc_ast::{ModuleFile, NodeArena, Symbol, SymbolKind, SymbolTable, SymbolTableNode};
use goc_common::{CheckerOptions, Diagnostic, DiagnosticCategory};
use goc_types::{ClassInfo, Type};
use rustc_hash::FxHashMap;
use std::rc::Rc;

/// Well-known built-in classes the checker references directly (return
/// statements, `for`-loop iterability, `raise` exception-type checks,
/// list/tuple inference). Populated once before checking begins.
#[derive(Debug)]
pub struct Builtins {
    pub object: Rc<ClassInfo>,
    pub bool_: Rc<ClassInfo>,
    pub int: Rc<ClassInfo>,
    pub float: Rc<ClassInfo>,
    pub str_: Rc<ClassInfo>,
    pub list: Rc<ClassInfo>,
    pub tuple: Rc<ClassInfo>,
    pub base_exception: Rc<ClassInfo>,
    pub iterable: Rc<ClassInfo>,
}

impl Builtins {
    pub fn standard() -> Self {
        let object = Rc::new(ClassInfo::new("object", "builtins.object"));
        let mut base_exception = ClassInfo::new("BaseException", "builtins.BaseException");
        base_exception.base = Some(Rc::clone(&object));
        let mut list = ClassInfo::new("list", "builtins.list");
        list.type_parameters = vec!["T".into()];
        let mut iterable = ClassInfo::new("iterable", "builtins.iterable");
        iterable.type_parameters = vec!["T".into()];
        let mut tuple = ClassInfo::new("tuple", "builtins.tuple");
        tuple.base = Some(Rc::clone(&object));
        Self {
            bool_: Rc::new(ClassInfo::new("bool", "builtins.bool")),
            int: Rc::new(ClassInfo::new("int", "builtins.int")),
            float: Rc::new(ClassInfo::new("float", "builtins.float")),
            str_: Rc::new(ClassInfo::new("str", "builtins.str")),
            list: Rc::new(list),
            tuple: Rc::new(tuple),
            iterable: Rc::new(iterable),
            base_exception: Rc::new(base_exception),
            object,
        }
    }

    pub fn list_of(&self, item: Type) -> Type {
        Type::Instance(Rc::clone(&self.list), vec![item])
    }

    pub fn iterable_of(&self, item: Type) -> Type {
        Type::Instance(Rc::clone(&self.iterable), vec![item])
    }

    /// The conventional `__builtins__` symbol table (spec §4.7, "lookup
    /// falls through to built-ins").
    fn symbol_table(&self) -> SymbolTable {
        let mut table = SymbolTable::default();
        let classes: [(&str, &Rc<ClassInfo>); 8] = [
            ("object", &self.object),
            ("bool", &self.bool_),
            ("int", &self.int),
            ("float", &self.float),
            ("str", &self.str_),
            ("list", &self.list),
            ("tuple", &self.tuple),
            ("BaseException", &self.base_exception),
        ];
        for (name, class) in classes {
            table.insert(
                name.to_string(),
                SymbolTableNode {
                    kind: SymbolKind::Gdef,
                    symbol: Symbol::Class(Rc::clone(class)),
                },
            );
        }
        table
    }
}

/// Diagnostic-context breadcrumbs (spec §6: `set_file`, `set_function`,
/// `set_type`).
#[derive(Default, Debug, Clone)]
pub struct DiagnosticContext {
    pub file: String,
    pub function: Option<String>,
    pub class: Option<String>,
}

pub struct CheckerState {
    pub options: CheckerOptions,
    pub builtins: Builtins,

    pub modules: FxHashMap<String, ModuleFile>,
    pub current_module: String,

    /// `locals` and `class_tvars` may be absent at module top level
    /// (spec §3: "Checker state").
    pub locals: Option<SymbolTable>,
    pub class_tvars: Option<SymbolTable>,

    pub return_types: Vec<Type>,
    pub type_context: Vec<Option<Type>>,
    pub dynamic_funcs: Vec<bool>,

    pub type_map: FxHashMap<(String, goc_ast::NodeId), Type>,
    pub diagnostics: Vec<Diagnostic>,
    pub diag_ctx: DiagnosticContext,

    /// The `__builtins__` table `lookup` falls through to (spec §4.7).
    pub builtins_table: SymbolTable,
}

impl CheckerState {
    pub fn new(options: CheckerOptions, modules: FxHashMap<String, ModuleFile>) -> Self {
        let builtins = Builtins::standard();
        let builtins_table = builtins.symbol_table();
        Self {
            options,
            builtins,
            modules,
            current_module: String::new(),
            locals: None,
            class_tvars: None,
            return_types: Vec::new(),
            type_context: Vec::new(),
            dynamic_funcs: Vec::new(),
            type_map: FxHashMap::default(),
            diagnostics: Vec::new(),
            diag_ctx: DiagnosticContext::default(),
            builtins_table,
        }
    }

    pub fn arena(&self) -> &NodeArena {
        &self.modules[&self.current_module].arena
    }

    /// Create a synthetic node carrying a fixed type (spec glossary,
    /// "Temporary node") in the current module's arena, for routines that
    /// expect a node but only have a computed `Type` in hand (e.g. the
    /// per-slot rvalues of multi-assignment, or a `for`-loop's element
    /// type, which has no syntactic rvalue of its own).
    pub fn temp_node(&mut self, ty: Type) -> goc_ast::NodeId {
        let module = self.current_module.clone();
        self.modules.get_mut(&module).expect("current module must exist").arena.temp_node(ty)
    }

    pub fn current_symtable(&self) -> &SymbolTable {
        &self.modules[&self.current_module].symbol_table
    }

    // --- Scope lifecycle (spec §5: "Scope discipline") ---

    pub fn enter_function_scope(&mut self) {
        self.locals = Some(SymbolTable::default());
    }

    pub fn leave_function_scope(&mut self) {
        self.locals = None;
    }

    pub fn enter_class_scope(&mut self, tvars: SymbolTable) {
        self.class_tvars = Some(tvars);
    }

    pub fn leave_class_scope(&mut self) {
        self.class_tvars = None;
    }

    // --- Stacks ---

    pub fn is_dynamic_function(&self) -> bool {
        matches!(self.dynamic_funcs.last(), Some(true))
    }

    pub fn is_within_function(&self) -> bool {
        !self.return_types.is_empty()
    }

    pub fn current_return_type(&self) -> Option<&Type> {
        self.return_types.last()
    }

    pub fn current_type_context(&self) -> Option<&Type> {
        self.type_context.last().and_then(|t| t.as_ref())
    }

    /// Record a node's computed type in the final `type_map` artifact
    /// (spec §4.1: "for every node visited, `type_map` contains a
    /// non-null entry after `accept` returns").
    pub fn store_type(&mut self, node: goc_ast::NodeId, ty: Type) {
        self.type_map.insert((self.current_module.clone(), node), ty);
    }

    pub fn record_diagnostic(&mut self, start: u32, length: u32, message: impl Into<String>) {
        let diag = Diagnostic {
            category: DiagnosticCategory::Error,
            file: self.diag_ctx.file.clone(),
            function: self.diag_ctx.function.clone(),
            class: self.diag_ctx.class.clone(),
            start,
            length,
            message: message.into(),
        };
        self.diagnostics.push(diag);
    }

    /// Asserts the four stacks a complete `check_file` run must leave
    /// empty (spec §8, invariant 3: "Stack symmetry").
    #[cfg(debug_assertions)]
    pub fn assert_stacks_empty(&self) {
        debug_assert!(self.return_types.is_empty(), "return_types leaked");
        debug_assert!(self.type_context.is_empty(), "type_context leaked");
        debug_assert!(self.dynamic_funcs.is_empty(), "dynamic_funcs leaked");
        debug_assert!(self.locals.is_none(), "locals leaked");
        debug_assert!(self.class_tvars.is_none(), "class_tvars leaked");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use goc_ast::Node;

    fn state_with_module() -> CheckerState {
        let mut modules = FxHashMap::default();
        modules.insert("m".to_string(), ModuleFile::new("m"));
        let mut state = CheckerState::new(CheckerOptions::default(), modules);
        state.current_module = "m".to_string();
        state
    }

    #[test]
    fn builtins_table_resolves_well_known_classes() {
        let state = state_with_module();
        assert!(matches!(state.builtins_table.get("int"), Some(node) if matches!(node.symbol, Symbol::Class(_))));
        assert!(state.builtins_table.get("DoesNotExist").is_none());
    }

    #[test]
    fn temp_node_round_trips_its_type() {
        let mut state = state_with_module();
        let ty = Type::Instance(Rc::clone(&state.builtins.int), Vec::new());
        let node = state.temp_node(ty.clone());
        assert!(matches!(state.arena().get(node), Some(Node::TempNode(t)) if *t == ty));
    }

    #[test]
    fn scope_lifecycle_enters_and_leaves_cleanly() {
        let mut state = state_with_module();
        assert!(state.locals.is_none());
        state.enter_function_scope();
        assert!(state.locals.is_some());
        state.leave_function_scope();
        assert!(state.locals.is_none());
    }
}
