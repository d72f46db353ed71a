//! Type algebra for the gradual-OOP checker.
//!
//! Mirrors the role `tsz-solver` plays for `tsz-checker`: a self-contained
//! representation of type terms plus the subtype/equivalence judgments and
//! the substitution used when mapping an overridden method's signature
//! from a base class into a subclass's instantiation.
//!
//! The class graph (`ClassInfo`) is built once by the semantic analyzer and
//! never mutated by the checker, so shared ownership (`Rc`) is simpler than
//! an arena of indices here (spec §9, "Back-pointers in the class graph").

mod class_info;
mod subtype;
mod substitution;
mod type_def;

pub use class_info::ClassInfo;
pub use subtype::{is_equivalent, is_same_type, is_subtype};
pub use substitution::map_type_from_supertype;
pub use type_def::{Callable, Type};
