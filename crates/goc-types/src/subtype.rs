//! Subtype/equivalence judgments (spec §6, "Type-algebra contract").
//!
//! `Any` is both subtype and supertype of every type; `UnboundType` is
//! treated the same way so unresolved names don't cascade into further
//! diagnostics (spec §7).

use crate::class_info::{ClassInfo, MethodSig};
use crate::type_def::{Callable, Type};
use std::rc::Rc;

pub fn is_subtype(sub: &Type, sup: &Type) -> bool {
    if sub.is_any() || sup.is_any() || sub.is_unbound() || sup.is_unbound() {
        return true;
    }
    match (sub, sup) {
        (Type::Void, Type::Void) => true,
        (Type::Void, _) | (_, Type::Void) => false,
        (Type::NoneType, Type::NoneType) => true,
        (Type::NoneType, Type::Instance(..)) => true,
        (Type::NoneType, _) => false,
        (Type::Instance(c1, a1), Type::Instance(c2, a2)) => {
            instance_is_subtype(c1, a1, c2, a2)
        }
        (Type::TupleType(items1), Type::TupleType(items2)) => {
            items1.len() == items2.len()
                && items1
                    .iter()
                    .zip(items2.iter())
                    .all(|(a, b)| is_subtype(a, b))
        }
        (Type::Callable(c1), Type::Callable(c2)) => callable_is_subtype(c1, c2),
        (Type::TypeParam(n1), Type::TypeParam(n2)) => n1 == n2,
        (Type::Overloaded(items), other_sup) => {
            // An overloaded type is a subtype of X if every alternative is.
            items
                .iter()
                .all(|item| is_subtype(&Type::Callable(item.clone()), other_sup))
        }
        (other_sub, Type::Overloaded(items)) => {
            // X is a subtype of an overloaded type if it is a subtype of at
            // least one alternative (callers may pick the matching overload).
            items
                .iter()
                .any(|item| is_subtype(other_sub, &Type::Callable(item.clone())))
        }
        _ => false,
    }
}

fn instance_is_subtype(c1: &Rc<ClassInfo>, a1: &[Type], c2: &Rc<ClassInfo>, a2: &[Type]) -> bool {
    if Rc::ptr_eq(c1, c2) || c1.full_name == c2.full_name {
        return a1.len() == a2.len() && a1.iter().zip(a2).all(|(x, y)| is_equivalent(x, y));
    }
    // Nominal: c1 <: c2 if c2 is a (possibly transitive) base of c1, or one
    // of c1's transitively implemented interfaces.
    if let Some(base) = &c1.base {
        if instance_is_subtype(base, a1, c2, a2) {
            return true;
        }
    }
    c1.all_directly_implemented_interfaces()
        .iter()
        .any(|iface| iface.full_name == c2.full_name)
}

fn callable_is_subtype(sub: &Callable, sup: &Callable) -> bool {
    // (S1 -> T1) <: (S2 -> T2) iff params are contravariant and the
    // return type is covariant. Arity must allow the supertype's call
    // shape: the subtype must accept at least as many arguments and
    // require no more than the supertype guarantees to supply.
    if sub.min_args > sup.min_args {
        return false;
    }
    if sub.arg_types.len() < sup.arg_types.len() && !sub.is_var_arg {
        return false;
    }
    for (sup_param, sub_param) in sup.arg_types.iter().zip(sub.arg_types.iter()) {
        if !is_subtype(sup_param, sub_param) {
            return false;
        }
    }
    is_subtype(&sub.ret_type, &sup.ret_type)
}

/// True if either type is `Any`, or both are subtypes of each other
/// (spec §6, "Type-algebra contract").
pub fn is_equivalent(a: &Type, b: &Type) -> bool {
    if a.is_any() || b.is_any() {
        return true;
    }
    is_subtype(a, b) && is_subtype(b, a)
}

/// Structural identity: same shape, recursively, with no `Any`-absorption.
pub fn is_same_type(a: &Type, b: &Type) -> bool {
    match (a, b) {
        (Type::Any, Type::Any) | (Type::Void, Type::Void) | (Type::NoneType, Type::NoneType) => {
            true
        }
        (Type::UnboundType(n1), Type::UnboundType(n2)) => n1 == n2,
        (Type::TypeParam(n1), Type::TypeParam(n2)) => n1 == n2,
        (Type::Instance(c1, a1), Type::Instance(c2, a2)) => {
            c1.full_name == c2.full_name
                && a1.len() == a2.len()
                && a1.iter().zip(a2).all(|(x, y)| is_same_type(x, y))
        }
        (Type::TupleType(i1), Type::TupleType(i2)) => {
            i1.len() == i2.len() && i1.iter().zip(i2).all(|(x, y)| is_same_type(x, y))
        }
        (Type::Callable(c1), Type::Callable(c2)) => {
            c1.arg_types.len() == c2.arg_types.len()
                && c1
                    .arg_types
                    .iter()
                    .zip(&c2.arg_types)
                    .all(|(x, y)| is_same_type(x, y))
                && is_same_type(&c1.ret_type, &c2.ret_type)
                && c1.min_args == c2.min_args
                && c1.is_var_arg == c2.is_var_arg
        }
        (Type::Overloaded(i1), Type::Overloaded(i2)) => {
            i1.len() == i2.len()
                && i1
                    .iter()
                    .zip(i2)
                    .all(|(x, y)| is_same_type(&Type::Callable(x.clone()), &Type::Callable(y.clone())))
        }
        _ => false,
    }
}

/// Exposed for `MethodSig` equivalence checks used by override compatibility.
pub fn method_sig_as_callable_list(sig: &MethodSig) -> Vec<Callable> {
    match sig {
        MethodSig::Plain(c) => vec![c.clone()],
        MethodSig::Overloaded(items) => items.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class_info::ClassInfo;

    fn object_class() -> Rc<ClassInfo> {
        Rc::new(ClassInfo::new("object", "builtins.object"))
    }

    #[test]
    fn any_is_subtype_of_everything() {
        assert!(is_subtype(&Type::Any, &Type::Void));
        assert!(is_subtype(&Type::Void, &Type::Any));
    }

    #[test]
    fn void_is_only_subtype_of_itself() {
        assert!(is_subtype(&Type::Void, &Type::Void));
        assert!(!is_subtype(&Type::Void, &Type::NoneType));
    }

    #[test]
    fn instance_subtyping_follows_base_chain() {
        let object = object_class();
        let mut derived = ClassInfo::new("Derived", "m.Derived");
        derived.base = Some(Rc::clone(&object));
        let derived = Rc::new(derived);

        let sub = Type::Instance(derived, vec![]);
        let sup = Type::Instance(object, vec![]);
        assert!(is_subtype(&sub, &sup));
        assert!(!is_subtype(&sup, &sub));
    }

    #[test]
    fn tuple_subtyping_is_elementwise() {
        let a = Type::TupleType(vec![Type::Any, Type::Void]);
        let b = Type::TupleType(vec![Type::Void, Type::Void]);
        assert!(is_subtype(&a, &b));
    }

    #[test]
    fn is_equivalent_treats_any_as_universal() {
        assert!(is_equivalent(&Type::Any, &Type::NoneType));
        assert!(!is_equivalent(&Type::Void, &Type::NoneType));
    }
}
