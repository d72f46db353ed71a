//! AST node arena.
//!
//! Mirrors `tsz-parser`'s `NodeArena`/`NodeIndex` split: nodes are a sealed
//! tag enum stored in a flat arena and referenced by index, rather than
//! boxed trait objects reached through downcasts (spec §9, "Casts encoded
//! as type tests").

use goc_common::Span;
use goc_types::Type;
use std::cell::RefCell;
use std::rc::Rc;

use crate::symbol::SymbolId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(&self) -> bool {
        *self == NodeId::NONE
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    FloorDiv,
    Pow,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    In,
}

impl BinOp {
    /// The op→magic-method table (spec §4.5, "Binary-operator table").
    pub fn method_name(self) -> &'static str {
        match self {
            BinOp::Add => "__add__",
            BinOp::Sub => "__sub__",
            BinOp::Mul => "__mul__",
            BinOp::Div => "__truediv__",
            BinOp::Mod => "__mod__",
            BinOp::FloorDiv => "__floordiv__",
            BinOp::Pow => "__pow__",
            BinOp::BitAnd => "__and__",
            BinOp::BitOr => "__or__",
            BinOp::BitXor => "__xor__",
            BinOp::Shl => "__lshift__",
            BinOp::Shr => "__rshift__",
            BinOp::Eq => "__eq__",
            BinOp::Ne => "__ne__",
            BinOp::Lt => "__lt__",
            BinOp::Le => "__le__",
            BinOp::Gt => "__gt__",
            BinOp::Ge => "__ge__",
            BinOp::In => "__contains__",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Param {
    pub name: String,
    pub declared_type: Option<Type>,
    pub default: Option<NodeId>,
    pub symbol: SymbolId,
}

#[derive(Clone, Debug)]
pub struct FuncData {
    pub name: String,
    pub params: Vec<Param>,
    pub var_arg: Option<Param>,
    /// `None` means the function is dynamic (no annotation at all).
    pub declared_ret: Option<Type>,
    /// Full declared signature, when annotated. `Void` return with no
    /// params still carries `Some(Callable)`.
    pub declared_sig: Option<Type>,
    pub body: NodeId,
    /// Non-null iff this function is a method (spec §3, AST invariants).
    pub owner_class: Option<Rc<goc_types::ClassInfo>>,
}

#[derive(Clone, Debug)]
pub struct ClassData {
    pub class_info: Rc<goc_types::ClassInfo>,
    pub body: NodeId,
}

#[derive(Clone, Debug)]
pub struct CatchClause {
    pub exception_type: NodeId,
    /// The bound exception variable, if the clause names one (`except E
    /// as var`). Held directly rather than through a `SymbolId` lookup
    /// since the checker needs to attach the resolved exception type to
    /// it in place (spec §4.5, "assign it to the handler's bound
    /// variable").
    pub var: Option<Rc<RefCell<crate::symbol::VarSymbol>>>,
    pub body: NodeId,
}

#[derive(Clone, Debug)]
pub enum Node {
    // --- Statements ---
    Block(Vec<NodeId>),
    ExpressionStmt(NodeId),
    If {
        condition: NodeId,
        then_branch: NodeId,
        else_branch: NodeId,
    },
    While {
        condition: NodeId,
        body: NodeId,
    },
    Return {
        value: NodeId,
    },
    OperatorAssignment {
        op: BinOp,
        lvalue: NodeId,
        rvalue: NodeId,
    },
    /// `lvalues[0] = lvalues[1] = ... = rvalue`. A single plain
    /// assignment has exactly one entry in `lvalues`; more than one
    /// means chained assignment (spec §4.3), which is rejected rather
    /// than type-checked.
    Assignment {
        lvalues: Vec<NodeId>,
        rvalue: NodeId,
    },
    Assert(NodeId),
    Raise(NodeId),
    Try {
        body: NodeId,
        handlers: Vec<CatchClause>,
        else_branch: NodeId,
        finally_branch: NodeId,
    },
    For {
        targets: Vec<NodeId>,
        iterable: NodeId,
        body: NodeId,
    },
    Del(NodeId),
    Yield(NodeId),
    With {
        items: Vec<NodeId>,
        body: NodeId,
    },

    // --- Declarations ---
    VariableDef {
        lvalues: Vec<NodeId>,
        annotations: Vec<Option<Type>>,
        init: NodeId,
        is_top_level: bool,
    },
    FuncDef(FuncData),
    OverloadedFuncDef {
        items: Vec<NodeId>,
        owner_class: Option<Rc<goc_types::ClassInfo>>,
    },
    ClassDef(ClassData),

    // --- Expressions ---
    NameExpr {
        name: String,
        symbol: Option<SymbolId>,
        is_def: bool,
    },
    MemberExpr {
        base: NodeId,
        name: String,
        is_def: bool,
    },
    IndexExpr {
        base: NodeId,
        index: NodeId,
    },
    TupleExpr(Vec<NodeId>),
    ListExpr(Vec<NodeId>),
    ParenExpr(NodeId),
    CallExpr {
        callee: NodeId,
        args: Vec<NodeId>,
    },
    IntLiteral(i64),
    StrLiteral(String),
    FloatLiteral(f64),
    OpExpr {
        op: BinOp,
        left: NodeId,
        right: NodeId,
    },
    UnaryExpr {
        operand: NodeId,
    },
    /// A synthetic node carrying a fixed type, used to thread a value
    /// through routines that expect a node (spec glossary: "Temporary node").
    TempNode(Type),
}

pub struct NodeArena {
    nodes: Vec<Node>,
    spans: Vec<Span>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            spans: Vec::new(),
        }
    }

    pub fn push(&mut self, node: Node, span: Span) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        self.spans.push(span);
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if id.is_none() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }

    pub fn span(&self, id: NodeId) -> Span {
        if id.is_none() {
            return Span::dummy();
        }
        self.spans.get(id.0 as usize).copied().unwrap_or_default()
    }

    /// Create a `TempNode` on the fly and return its id (spec's
    /// "Temporary node" helper, `temp_node` in the original source).
    pub fn temp_node(&mut self, ty: Type) -> NodeId {
        self.push(Node::TempNode(ty), Span::dummy())
    }
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}
