//! End-to-end scenarios driven through `check_file`, built from hand-assembled
//! AST fragments rather than a parser (this crate's scope starts *after*
//! parsing and semantic analysis, per the checker's own module doc).

use std::rc::Rc;

use goc_ast::{FuncData, ModuleFile, Node, NodeId, Param, Symbol, SymbolId, SymbolKind, SymbolTableNode};
use goc_checker::CheckerState;
use goc_common::{CheckerOptions, Span};
use goc_types::{Callable, Type};
use rustc_hash::FxHashMap;

fn new_state() -> CheckerState {
    CheckerState::new(CheckerOptions::default(), FxHashMap::default())
}

fn name_def(module: &mut ModuleFile, name: &str) -> NodeId {
    module.arena.push(Node::NameExpr { name: name.to_string(), symbol: None, is_def: true }, Span::dummy())
}

fn name_ref(module: &mut ModuleFile, name: &str) -> NodeId {
    module.arena.push(Node::NameExpr { name: name.to_string(), symbol: None, is_def: false }, Span::dummy())
}

/// Scenario 1: an annotated declaration whose initializer doesn't match —
/// `int x = "s"` — reports "Incompatible types in assignment".
#[test]
fn annotated_mismatch_reports_incompatible_assignment() {
    let mut state = new_state();
    let int_ty = Type::Instance(Rc::clone(&state.builtins.int), Vec::new());

    let mut module = ModuleFile::new("annotated_mismatch");
    let lit = module.arena.push(Node::StrLiteral("s".to_string()), Span::from_len(10, 3));
    let x = name_def(&mut module, "x");
    let var_def = module.arena.push(
        Node::VariableDef { lvalues: vec![x], annotations: vec![Some(int_ty)], init: lit, is_top_level: true },
        Span::dummy(),
    );
    module.definitions.push(var_def);
    state.modules.insert(module.name.clone(), module);

    state.check_file("annotated_mismatch");

    assert_eq!(state.diagnostics.len(), 1);
    assert_eq!(state.diagnostics[0].message, "Incompatible types in assignment");
}

/// Scenario 2: `def f() -> int: x = 3; return x` infers `x: int` from its
/// initializer and passes with no diagnostics.
#[test]
fn inferred_local_matches_declared_return_type() {
    let mut state = new_state();
    let int_ty = Type::Instance(Rc::clone(&state.builtins.int), Vec::new());

    let mut module = ModuleFile::new("inferred_local");
    let lit3 = module.arena.push(Node::IntLiteral(3), Span::dummy());
    let x_def = name_def(&mut module, "x");
    let var_def = module.arena.push(
        Node::VariableDef { lvalues: vec![x_def], annotations: vec![None], init: lit3, is_top_level: false },
        Span::dummy(),
    );
    let x_ref = name_ref(&mut module, "x");
    let ret = module.arena.push(Node::Return { value: x_ref }, Span::dummy());
    let body = module.arena.push(Node::Block(vec![var_def, ret]), Span::dummy());

    let sig = Type::Callable(Callable::simple(Vec::new(), int_ty.clone()));
    let func = FuncData {
        name: "f".to_string(),
        params: Vec::new(),
        var_arg: None,
        declared_ret: Some(int_ty.clone()),
        declared_sig: Some(sig),
        body,
        owner_class: None,
    };
    let func_def = module.arena.push(Node::FuncDef(func), Span::dummy());
    module.definitions.push(func_def);
    let module_name = module.name.clone();
    state.modules.insert(module_name.clone(), module);

    state.check_file(&module_name);

    assert!(state.diagnostics.is_empty(), "unexpected diagnostics: {:?}", state.diagnostics);
    assert_eq!(state.type_map.get(&(module_name, x_ref)), Some(&int_ty));
}

/// Scenario 3: inside an unannotated (dynamic) function, `x`'s *returned*
/// type is masked to `Any`, but `type_map` still records the real computed
/// type of the literal that initialized it (spec's dynamic-contamination
/// invariant).
#[test]
fn dynamic_function_masks_return_value_but_not_type_map() {
    let mut state = new_state();

    let mut module = ModuleFile::new("dynamic_contamination");
    let lit3 = module.arena.push(Node::IntLiteral(3), Span::dummy());
    let x_def = name_def(&mut module, "x");
    let var_def = module.arena.push(
        Node::VariableDef { lvalues: vec![x_def], annotations: vec![None], init: lit3, is_top_level: false },
        Span::dummy(),
    );
    let x_ref = name_ref(&mut module, "x");
    let ret = module.arena.push(Node::Return { value: x_ref }, Span::dummy());
    let body = module.arena.push(Node::Block(vec![var_def, ret]), Span::dummy());

    let func = FuncData {
        name: "g".to_string(),
        params: Vec::new(),
        var_arg: None,
        declared_ret: None,
        declared_sig: None,
        body,
        owner_class: None,
    };
    let func_def = module.arena.push(Node::FuncDef(func), Span::dummy());
    module.definitions.push(func_def);
    let module_name = module.name.clone();
    state.modules.insert(module_name.clone(), module);

    state.check_file(&module_name);

    assert!(state.diagnostics.is_empty(), "unexpected diagnostics: {:?}", state.diagnostics);
    let int_ty = Type::Instance(Rc::clone(&state.builtins.int), Vec::new());
    assert_eq!(state.type_map.get(&(module_name.clone(), lit3)), Some(&int_ty));
    assert_eq!(state.type_map.get(&(module_name, x_ref)), Some(&Type::Any));
}

/// Scenario 4: `int a, str b = (1, "x", 2)` — the tuple has three elements
/// against two targets, reported with the exact counts.
#[test]
fn tuple_multi_assignment_arity_mismatch() {
    let mut state = new_state();
    let int_ty = Type::Instance(Rc::clone(&state.builtins.int), Vec::new());
    let str_ty = Type::Instance(Rc::clone(&state.builtins.str_), Vec::new());

    let mut module = ModuleFile::new("tuple_arity");
    let lit1 = module.arena.push(Node::IntLiteral(1), Span::dummy());
    let litx = module.arena.push(Node::StrLiteral("x".to_string()), Span::dummy());
    let lit2 = module.arena.push(Node::IntLiteral(2), Span::dummy());
    let tuple = module.arena.push(Node::TupleExpr(vec![lit1, litx, lit2]), Span::from_len(0, 12));
    let a = name_def(&mut module, "a");
    let b = name_def(&mut module, "b");
    let var_def = module.arena.push(
        Node::VariableDef {
            lvalues: vec![a, b],
            annotations: vec![Some(int_ty), Some(str_ty)],
            init: tuple,
            is_top_level: true,
        },
        Span::dummy(),
    );
    module.definitions.push(var_def);
    let module_name = module.name.clone();
    state.modules.insert(module_name.clone(), module);

    state.check_file(&module_name);

    assert_eq!(state.diagnostics.len(), 1);
    assert_eq!(
        state.diagnostics[0].message,
        "Incompatible number of values in assignment (got 3, expected 2)"
    );
}

/// A bare reassignment statement `x = "s"` to a name already typed `int`
/// (not a `VariableDef`) is checked for assignment-compatibility, the
/// same as an annotated declaration would be.
#[test]
fn reassignment_statement_reports_incompatible_assignment() {
    let mut state = new_state();
    let int_ty = Type::Instance(Rc::clone(&state.builtins.int), Vec::new());

    let mut module = ModuleFile::new("reassignment");
    let lit1 = module.arena.push(Node::IntLiteral(1), Span::dummy());
    let x_def = name_def(&mut module, "x");
    let var_def = module.arena.push(
        Node::VariableDef { lvalues: vec![x_def], annotations: vec![Some(int_ty)], init: lit1, is_top_level: true },
        Span::dummy(),
    );

    let lit_s = module.arena.push(Node::StrLiteral("s".to_string()), Span::from_len(20, 3));
    let x_ref = name_ref(&mut module, "x");
    let reassign =
        module.arena.push(Node::Assignment { lvalues: vec![x_ref], rvalue: lit_s }, Span::dummy());

    let block = module.arena.push(Node::Block(vec![var_def, reassign]), Span::dummy());
    module.definitions.push(block);
    let module_name = module.name.clone();
    state.modules.insert(module_name.clone(), module);

    state.check_file(&module_name);

    assert_eq!(state.diagnostics.len(), 1);
    assert_eq!(state.diagnostics[0].message, "Incompatible types in assignment");
}

/// `a = b = 1` (two lvalues sharing one rvalue) is rejected outright as
/// chained assignment, without attempting to type-check either target.
#[test]
fn chained_assignment_is_rejected() {
    let mut state = new_state();

    let mut module = ModuleFile::new("chained");
    let lit1 = module.arena.push(Node::IntLiteral(1), Span::dummy());
    let a_def = name_def(&mut module, "a");
    let b_def = name_def(&mut module, "b");
    let chained = module.arena.push(
        Node::Assignment { lvalues: vec![a_def, b_def], rvalue: lit1 },
        Span::from_len(0, 9),
    );
    module.definitions.push(chained);
    let module_name = module.name.clone();
    state.modules.insert(module_name.clone(), module);

    state.check_file(&module_name);

    assert_eq!(state.diagnostics.len(), 1);
    assert_eq!(state.diagnostics[0].message, "Chained assignment is not supported");
}

/// Parameters pre-populate `locals` directly (spec §4.2); a reference to
/// one resolves to its declared type without going through inference.
#[test]
fn parameter_reference_resolves_to_declared_type() {
    let mut state = new_state();
    let int_ty = Type::Instance(Rc::clone(&state.builtins.int), Vec::new());

    let mut module = ModuleFile::new("param_ref");
    let n_ref = name_ref(&mut module, "n");
    let ret = module.arena.push(Node::Return { value: n_ref }, Span::dummy());
    let body = module.arena.push(Node::Block(vec![ret]), Span::dummy());

    let param = Param { name: "n".to_string(), declared_type: Some(int_ty.clone()), default: None, symbol: SymbolId(0) };
    let sig = Type::Callable(Callable::simple(vec![int_ty.clone()], int_ty.clone()));
    let func = FuncData {
        name: "identity".to_string(),
        params: vec![param],
        var_arg: None,
        declared_ret: Some(int_ty.clone()),
        declared_sig: Some(sig),
        body,
        owner_class: None,
    };
    let func_def = module.arena.push(Node::FuncDef(func), Span::dummy());
    module.definitions.push(func_def);
    let module_name = module.name.clone();
    state.modules.insert(module_name.clone(), module);

    state.check_file(&module_name);

    assert!(state.diagnostics.is_empty(), "unexpected diagnostics: {:?}", state.diagnostics);
    assert_eq!(state.type_map.get(&(module_name, n_ref)), Some(&int_ty));
}

/// A qualified lookup spanning two dot segments (`pkg.Widget`) descends
/// through one `Symbol::Module` hop before resolving the class.
#[test]
fn qualified_lookup_crosses_one_module_hop() {
    let mut state = new_state();

    let mut sub_module = ModuleFile::new("pkg");
    let widget = Rc::new(goc_types::ClassInfo::new("Widget", "pkg.Widget"));
    sub_module
        .symbol_table
        .insert("Widget".to_string(), SymbolTableNode { kind: SymbolKind::Gdef, symbol: Symbol::Class(widget) });
    state.modules.insert("pkg".to_string(), sub_module);

    let mut root = ModuleFile::new("root");
    root.symbol_table
        .insert("pkg".to_string(), SymbolTableNode { kind: SymbolKind::Gdef, symbol: Symbol::Module("pkg".to_string()) });
    state.modules.insert("root".to_string(), root);
    state.current_module = "root".to_string();

    let resolved = state.named_type_if_exists("pkg.Widget");
    assert!(matches!(resolved, Some(Type::Instance(ref c, _)) if c.full_name == "pkg.Widget"));
}
