//! Type terms (spec §3, "Type terms").

use std::rc::Rc;

use crate::class_info::ClassInfo;

/// A function signature: an ordered parameter list plus a return type.
///
/// `min_args` is the count of non-defaulted leading parameters; a
/// var-arg signature treats its trailing parameter as `list<T>` already
/// (the wrapping happens when the signature is built, not here).
#[derive(Clone, Debug, PartialEq)]
pub struct Callable {
    pub arg_types: Vec<Type>,
    pub min_args: usize,
    pub is_var_arg: bool,
    pub ret_type: Box<Type>,
    pub is_type_obj: bool,
    /// Cosmetic metadata stripped by `strip_type` before a `Callable` is
    /// recorded as an inferred variable type (spec §4.4, "Strip type").
    pub name: Option<String>,
    /// Names of the type variables this signature is generic over.
    pub variables: Vec<String>,
}

impl Callable {
    pub fn simple(arg_types: Vec<Type>, ret_type: Type) -> Self {
        let min_args = arg_types.len();
        Self {
            arg_types,
            min_args,
            is_var_arg: false,
            ret_type: Box::new(ret_type),
            is_type_obj: false,
            name: None,
            variables: Vec::new(),
        }
    }

    /// Drop the cosmetic name, producing the canonical form used for
    /// inference storage (spec glossary: "Strip type").
    pub fn stripped(&self) -> Self {
        Self {
            name: None,
            ..self.clone()
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Type {
    /// The dynamic type: subtype of and supertype of every type.
    Any,
    /// The no-value type; a function returning `Void` cannot have its
    /// result used as a value.
    Void,
    /// The type of the null literal.
    NoneType,
    /// A nominal instantiation. `type_args.len()` equals
    /// `class.type_parameters.len()`.
    Instance(Rc<ClassInfo>, Vec<Type>),
    Callable(Callable),
    /// An ordered set of alternative signatures.
    Overloaded(Vec<Callable>),
    /// A fixed-arity heterogeneous product.
    TupleType(Vec<Type>),
    /// A named type that could not be resolved; propagated to avoid
    /// cascading errors (spec §7).
    UnboundType(String),
    /// A reference to one of the enclosing class's own type parameters.
    ///
    /// Not part of spec §3's term list verbatim: the spec treats
    /// substitution (`map_type_from_supertype`) as an assumed primitive
    /// without specifying how generic signatures reference a class's type
    /// parameters. This variant is the minimal addition needed to make
    /// that substitution concrete (see DESIGN.md).
    TypeParam(String),
}

impl Type {
    pub fn instance(class: Rc<ClassInfo>, args: Vec<Type>) -> Self {
        Type::Instance(class, args)
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Type::Any)
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }

    pub fn is_none_type(&self) -> bool {
        matches!(self, Type::NoneType)
    }

    pub fn is_unbound(&self) -> bool {
        matches!(self, Type::UnboundType(_))
    }

    /// `Instance(builtins.list, [T])`'s `T`, if this is a list instance.
    pub fn list_item(&self) -> Option<&Type> {
        match self {
            Type::Instance(class, args) if class.full_name == "builtins.list" => args.first(),
            _ => None,
        }
    }

    /// Strip cosmetic metadata so the type is suitable for inference
    /// storage (spec §4.4, "Strip type").
    pub fn strip(&self) -> Type {
        match self {
            Type::Callable(c) => Type::Callable(c.stripped()),
            other => other.clone(),
        }
    }

    /// The *invalid-for-inference* predicate (spec §4.4): a type is
    /// invalid if it *is* `NoneType`, or if it is an `Instance`/`TupleType`
    /// and any of its type arguments/items is invalid.
    pub fn is_valid_for_inference(&self) -> bool {
        match self {
            Type::NoneType => false,
            Type::Instance(_, args) => args.iter().all(Type::is_valid_for_inference),
            Type::TupleType(items) => items.iter().all(Type::is_valid_for_inference),
            _ => true,
        }
    }
}
