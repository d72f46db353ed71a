//! `TypeInfo` — the class descriptor (spec §3, "Class descriptor").

use std::rc::Rc;

use rustc_hash::FxHashSet;

use crate::type_def::{Callable, Type};

/// A function or overloaded-function member of a class's method table.
#[derive(Clone, Debug, PartialEq)]
pub enum MethodSig {
    Plain(Callable),
    Overloaded(Vec<Callable>),
}

impl MethodSig {
    pub fn as_type(&self) -> Type {
        match self {
            MethodSig::Plain(c) => Type::Callable(c.clone()),
            MethodSig::Overloaded(items) => Type::Overloaded(items.clone()),
        }
    }
}

/// A class or interface descriptor.
///
/// Built once by the semantic analyzer and never mutated by the checker;
/// `base`/`interfaces` are shared ownership (`Rc`) rather than an arena of
/// indices, per spec §9 ("Back-pointers in the class graph").
#[derive(Debug)]
pub struct ClassInfo {
    pub name: String,
    pub full_name: String,
    pub base: Option<Rc<ClassInfo>>,
    /// Type arguments this class supplies to `base` in its heritage
    /// clause, expressed in terms of this class's own `type_parameters`
    /// (as `Type::TypeParam`). Parallel to `base.type_parameters`.
    pub base_args: Vec<Type>,
    /// Directly implemented interfaces, in declaration order. May contain
    /// duplicates if the source lists the same interface twice.
    pub interfaces: Vec<Rc<ClassInfo>>,
    /// Type arguments supplied to each entry of `interfaces`, parallel to
    /// `interfaces`.
    pub interface_args: Vec<Vec<Type>>,
    pub methods: rustc_hash::FxHashMap<String, MethodSig>,
    pub is_interface: bool,
    pub type_parameters: Vec<String>,
}

impl ClassInfo {
    pub fn new(name: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            full_name: full_name.into(),
            base: None,
            base_args: Vec::new(),
            interfaces: Vec::new(),
            interface_args: Vec::new(),
            methods: rustc_hash::FxHashMap::default(),
            is_interface: false,
            type_parameters: Vec::new(),
        }
    }

    /// Look up a method defined directly on this class (not inherited).
    pub fn own_method(&self, name: &str) -> Option<&MethodSig> {
        self.methods.get(name)
    }

    /// Look up a method, walking the base chain if not found directly.
    pub fn get_method(&self, name: &str) -> Option<&MethodSig> {
        if let Some(m) = self.methods.get(name) {
            return Some(m);
        }
        self.base.as_ref().and_then(|b| b.get_method(name))
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.get_method(name).is_some()
    }

    /// The transitive closure of interfaces implemented by this class and
    /// all of its ancestors, deduplicated.
    ///
    /// Spec §9's open question on recursive interface traversal resolves
    /// this to a single walk of the ancestor set, deduplicating by class
    /// identity rather than re-entering `base.interfaces`/`base.base` and
    /// relying on duplicate-detection to suppress the resulting noise.
    pub fn all_directly_implemented_interfaces(self: &Rc<Self>) -> Vec<Rc<ClassInfo>> {
        let mut seen = FxHashSet::default();
        let mut out = Vec::new();
        let mut cur = Some(Rc::clone(self));
        while let Some(class) = cur {
            for iface in &class.interfaces {
                if seen.insert(Rc::as_ptr(iface)) {
                    out.push(Rc::clone(iface));
                }
            }
            cur = class.base.clone();
        }
        out
    }

    /// Ancestor classes starting with `self`, then `base`, then
    /// `base.base`, ... (spec §4.6: "for each ancestor `B` in the
    /// transitive base chain").
    pub fn ancestor_chain(self: &Rc<Self>) -> Vec<Rc<ClassInfo>> {
        let mut out = Vec::new();
        let mut cur = Some(Rc::clone(self));
        while let Some(class) = cur {
            cur = class.base.clone();
            out.push(class);
        }
        out
    }

    /// Find the first interface that appears at two distinct positions in
    /// the user-written `implements` lists of this class's ancestor
    /// closure (spec §4.6, "Interface implementation checks").
    pub fn find_duplicate_interface(self: &Rc<Self>) -> Option<Rc<ClassInfo>> {
        let mut seen = FxHashSet::default();
        let mut cur = Some(Rc::clone(self));
        while let Some(class) = cur {
            for iface in &class.interfaces {
                if !seen.insert(Rc::as_ptr(iface)) {
                    return Some(Rc::clone(iface));
                }
            }
            cur = class.base.clone();
        }
        None
    }
}

impl PartialEq for ClassInfo {
    fn eq(&self, other: &Self) -> bool {
        self.full_name == other.full_name
    }
}
impl Eq for ClassInfo {}
