//! The statement-level type-checking core (spec §2, "Driver").
//!
//! Consumes an already-parsed, already-semantically-analyzed program
//! ([`goc_ast`]) and a type algebra ([`goc_types`]), and decides, for
//! every declaration, statement, and expression, whether it is well-typed
//! under a structural/nominal hybrid discipline with a distinguished
//! dynamic type (`Any`). See [`CheckerState::check_file`] for the entry
//! point.

mod assignment_checker;
mod context;
mod declarations;
mod dispatch;
mod error_reporter;
mod expr;
mod inference;
mod interface_checker;
mod override_checker;
mod statements;
mod symbol_resolver;

pub use context::{Builtins, CheckerState, DiagnosticContext};

use goc_ast::ModuleFile;
use goc_common::{CheckerOptions, Diagnostic};
use rustc_hash::FxHashMap;

/// Run the checker over a single module and return its diagnostics.
///
/// A thin convenience wrapper around [`CheckerState`] for callers that
/// only need to check one file; multi-module programs should build a
/// `CheckerState` directly so `lookup_qualified` can see sibling modules.
pub fn check_module(options: CheckerOptions, module: ModuleFile) -> Vec<Diagnostic> {
    let name = module.name.clone();
    let mut modules = FxHashMap::default();
    modules.insert(name.clone(), module);
    let mut state = CheckerState::new(options, modules);
    state.check_file(&name);
    state.diagnostics
}
