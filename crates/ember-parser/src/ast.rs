//! The Ember abstract syntax tree.
//!
//! Every statement and expression collapses into one tagged-variant `Node`.
//! There is no separate lossless concrete syntax tree and no per-node-kind
//! struct hierarchy: a single enum keeps traversal a plain `match` instead of
//! virtual dispatch, at the cost of the token-level fidelity a CST would
//! keep. Diagnostics and tooling that need exact source text use the node's
//! `span` to slice back into the original source.

use ember_common::span::Span;
use ember_common::value::Value;
use ember_common::Symbol;

/// One formal parameter of a function, method, or lambda.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Symbol,
    pub default: Option<Box<Node>>,
    pub variadic: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
    NullCoalesce,
    BAnd,
    BOr,
    BXor,
    Shl,
    Shr,
    Is,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
    BNot,
    /// `#value`: length of a string, array, or object.
    Len,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub span: Span,
    pub kind: NodeKind,
}

impl Node {
    pub fn new(span: Span, kind: NodeKind) -> Self {
        Self { span, kind }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    // ── Expressions ──────────────────────────────────────────────────────
    Literal(Value),
    Binary {
        left: Box<Node>,
        right: Box<Node>,
        op: BinaryOp,
        /// Set when this node was desugared from a compound assignment
        /// (`x op= y`): the binary's `left` re-evaluation should not emit a
        /// side effect of its own since the surrounding `Assign` already
        /// evaluated the target once.
        ignore_left: bool,
    },
    Unary {
        right: Box<Node>,
        op: UnaryOp,
    },
    Variable(Symbol),
    Assign {
        target: Box<Node>,
        value: Box<Node>,
    },
    Call {
        callee: Box<Node>,
        args: Vec<Node>,
        /// The trailing `{ ... }` of `new Foo(a) { key = 1 }`, attached to
        /// the constructor call it decorates.
        objexpr: Option<Box<Node>>,
    },
    Get {
        receiver: Box<Node>,
        name: Symbol,
        /// `0` for a null-safe access (`?.`/`?->`) whose receiver should
        /// short-circuit the whole chain when null; `-1` otherwise.
        jump: i32,
        /// Emission-only scratch flag, always `false` out of the parser.
        ignore_emit: bool,
        /// Set when reached through `->` rather than `.`: the access itself
        /// (not just assignment through it) is not a valid expression value.
        ignore_result: bool,
    },
    Set {
        receiver: Box<Node>,
        name: Symbol,
        value: Box<Node>,
    },
    Subscript {
        array: Box<Node>,
        index: Box<Node>,
    },
    Lambda {
        params: Vec<Param>,
        body: Box<Node>,
    },
    Array(Vec<Node>),
    Object {
        keys: Vec<Symbol>,
        values: Vec<Node>,
    },
    This,
    Super {
        method: Symbol,
        ignore_result: bool,
    },
    Range {
        from: Box<Node>,
        to: Box<Node>,
    },
    Interpolation(Vec<Node>),
    Reference(Box<Node>),
    Ternary {
        cond: Box<Node>,
        then_branch: Box<Node>,
        else_branch: Box<Node>,
    },

    // ── Statements ───────────────────────────────────────────────────────
    ExprStmt {
        expr: Box<Node>,
        /// Whether the statement's value should be discarded (true for a
        /// plain expression statement) or left in place (false inside a
        /// function body used as an implicit-return expression position).
        pop: bool,
    },
    Block(Vec<Node>),
    VarDecl {
        name: Symbol,
        init: Option<Box<Node>>,
        constant: bool,
    },
    If {
        cond: Box<Node>,
        then_branch: Box<Node>,
        elseif_conds: Vec<Node>,
        elseif_branches: Vec<Node>,
        else_branch: Option<Box<Node>>,
    },
    While {
        cond: Box<Node>,
        body: Box<Node>,
    },
    For {
        init: Option<Box<Node>>,
        cond: Option<Box<Node>>,
        increment: Option<Box<Node>>,
        body: Box<Node>,
        /// Set for `for x in iterable { ... }`; `init`/`cond`/`increment`
        /// are unused in that form.
        loop_var: Option<Symbol>,
        iterable: Option<Box<Node>>,
    },
    Continue,
    Break,
    FunctionDecl {
        name: Symbol,
        params: Vec<Param>,
        body: Box<Node>,
        exported: bool,
    },
    Return(Option<Box<Node>>),
    MethodDecl {
        name: Symbol,
        params: Vec<Param>,
        body: Box<Node>,
        is_static: bool,
        is_operator: bool,
    },
    ClassDecl {
        name: Symbol,
        parent: Option<Symbol>,
        members: Vec<Node>,
    },
    FieldDecl {
        name: Symbol,
        getter: Option<Box<Node>>,
        setter: Option<Box<Node>>,
        /// Name bound to the assigned value inside `setter`'s body.
        setter_param: Option<Symbol>,
        is_static: bool,
    },
}
