//! `map_type_from_supertype` (spec §6, "Type-algebra contract").
//!
//! Maps a type expressed in terms of a supertype's type parameters into
//! the subtype's instantiation context, by composing the heritage-clause
//! type arguments along the ancestor chain from `sub_info` to `super_info`.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::class_info::ClassInfo;
use crate::type_def::Type;

/// Express `super_info`'s type parameters in terms of `sub_info`'s own
/// type parameters (as `Type::TypeParam`), by walking the base chain.
/// Returns `None` if `super_info` is not an ancestor of `sub_info`.
fn substitution_from(
    sub_info: &Rc<ClassInfo>,
    super_info: &Rc<ClassInfo>,
) -> Option<FxHashMap<String, Type>> {
    if Rc::ptr_eq(sub_info, super_info) || sub_info.full_name == super_info.full_name {
        return Some(
            sub_info
                .type_parameters
                .iter()
                .map(|p| (p.clone(), Type::TypeParam(p.clone())))
                .collect(),
        );
    }

    // Try the direct base first, then any implemented interface: the
    // override walk in spec §4.6 checks both base-class and
    // interface-implemented methods against the same subclass.
    if let Some(base) = &sub_info.base {
        if let Some(base_to_super) = substitution_from(base, super_info) {
            let base_param_to_sub_expr: FxHashMap<String, Type> = base
                .type_parameters
                .iter()
                .cloned()
                .zip(sub_info.base_args.iter().cloned())
                .collect();
            return Some(
                base_to_super
                    .into_iter()
                    .map(|(param, ty)| (param, substitute(&ty, &base_param_to_sub_expr)))
                    .collect(),
            );
        }
    }

    for (iface, iface_args) in sub_info.interfaces.iter().zip(&sub_info.interface_args) {
        if let Some(iface_to_super) = substitution_from(iface, super_info) {
            let iface_param_to_sub_expr: FxHashMap<String, Type> = iface
                .type_parameters
                .iter()
                .cloned()
                .zip(iface_args.iter().cloned())
                .collect();
            return Some(
                iface_to_super
                    .into_iter()
                    .map(|(param, ty)| (param, substitute(&ty, &iface_param_to_sub_expr)))
                    .collect(),
            );
        }
    }

    None
}

fn substitute(t: &Type, map: &FxHashMap<String, Type>) -> Type {
    match t {
        Type::TypeParam(name) => map.get(name).cloned().unwrap_or_else(|| t.clone()),
        Type::Instance(class, args) => {
            Type::Instance(Rc::clone(class), args.iter().map(|a| substitute(a, map)).collect())
        }
        Type::TupleType(items) => {
            Type::TupleType(items.iter().map(|i| substitute(i, map)).collect())
        }
        Type::Callable(c) => {
            let mut c2 = c.clone();
            c2.arg_types = c.arg_types.iter().map(|a| substitute(a, map)).collect();
            c2.ret_type = Box::new(substitute(&c.ret_type, map));
            Type::Callable(c2)
        }
        Type::Overloaded(items) => Type::Overloaded(
            items
                .iter()
                .map(|c| match substitute(&Type::Callable(c.clone()), map) {
                    Type::Callable(c) => c,
                    _ => unreachable!(),
                })
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Substitute `super_info`'s type parameters with `sub_info`'s
/// corresponding type arguments in `t`.
pub fn map_type_from_supertype(
    t: &Type,
    sub_info: &Rc<ClassInfo>,
    super_info: &Rc<ClassInfo>,
) -> Type {
    match substitution_from(sub_info, super_info) {
        Some(map) => substitute(t, &map),
        None => t.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::type_def::Callable;

    #[test]
    fn maps_direct_base_type_parameter() {
        let mut base = ClassInfo::new("Box", "m.Box");
        base.type_parameters = vec!["T".into()];
        let base = Rc::new(base);

        let mut sub = ClassInfo::new("IntBox", "m.IntBox");
        sub.base = Some(Rc::clone(&base));
        sub.base_args = vec![Type::Instance(
            Rc::new(ClassInfo::new("int", "builtins.int")),
            vec![],
        )];
        let sub = Rc::new(sub);

        let t = Type::TypeParam("T".into());
        let mapped = map_type_from_supertype(&t, &sub, &base);
        assert_eq!(
            mapped,
            Type::Instance(Rc::new(ClassInfo::new("int", "builtins.int")), vec![])
        );
    }

    #[test]
    fn maps_type_parameter_inside_callable() {
        let mut base = ClassInfo::new("Container", "m.Container");
        base.type_parameters = vec!["T".into()];
        let base = Rc::new(base);

        let mut sub = ClassInfo::new("StrContainer", "m.StrContainer");
        sub.base = Some(Rc::clone(&base));
        let str_ty = Type::Instance(Rc::new(ClassInfo::new("str", "builtins.str")), vec![]);
        sub.base_args = vec![str_ty.clone()];
        let sub = Rc::new(sub);

        let sig = Callable::simple(vec![Type::TypeParam("T".into())], Type::TypeParam("T".into()));
        let mapped = map_type_from_supertype(&Type::Callable(sig), &sub, &base);
        match mapped {
            Type::Callable(c) => {
                assert_eq!(c.arg_types[0], str_ty);
                assert_eq!(*c.ret_type, str_ty);
            }
            _ => panic!("expected Callable"),
        }
    }
}
