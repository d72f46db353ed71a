//! Minimal AST and symbol-table representation consumed by the checker.
//!
//! This stands in for the parser/semantic-analyzer output spec.md treats
//! as an external collaborator (spec §1: "Out of scope"). It mirrors the
//! shape of `tsz-parser::node`'s arena/index split closely enough that the
//! checker's dispatch logic reads the same way.

pub mod module;
pub mod node;
pub mod symbol;

pub use module::ModuleFile;
pub use node::{BinOp, CatchClause, ClassData, FuncData, Node, NodeArena, NodeId, Param};
pub use symbol::{Symbol, SymbolId, SymbolKind, SymbolTable, SymbolTableNode, VarSymbol, var_symbol};
