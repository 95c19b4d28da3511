//! Command nodes: control combinators, string commands, and integer
//! commands.

use crate::expr::Expr;

/// Assignment operators over a declared integer. Every variant sets
/// `r = true` after executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerAssignOp {
    Set,
    Add,
    Sub,
    Mul,
    Div,
}

/// Comparison operators over two integer expressions. These
/// set `r` to the comparison's boolean result and nothing more.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerCompareOp {
    Eq,
    NotEq,
    Gt,
    Lt,
    GtEq,
    LtEq,
}

/// The operand of `insert`/`attach`/`<-` (replace slice): either a literal
/// string or a reference to a declared string/chars variable.
#[derive(Debug, Clone, PartialEq)]
pub enum StringExpr {
    Literal(String),
    StringRef(String),
    CharsRef(String),
}

/// One `among(...)` arm: a non-empty list of (pattern, optional guard
/// routine) pairs sharing one dispatch branch, and an optional command run
/// when the branch fires (absent means the arm merely succeeds). The guard
/// is per-pattern, not per-arm.
#[derive(Debug, Clone)]
pub struct AmongArm {
    pub patterns: Vec<(String, Option<String>)>,
    pub command: Option<Box<Command>>,
}

/// A compiled `among`. `table_index` is assigned during the
/// parser's substring/among pre-lowering pass; `owns_walk` is false when a preceding
/// `Command::Substring` with the same index already emits the pattern-table
/// walk, true when this node must emit both the walk and the dispatch.
#[derive(Debug, Clone)]
pub struct AmongNode {
    pub table_index: u32,
    pub arms: Vec<AmongArm>,
    pub owns_walk: bool,
}

/// Every Snowball command: control combinators, string commands, and
/// integer commands share one tree since they compose freely under
/// concatenation/`and`/`or`.
#[derive(Debug, Clone)]
pub enum Command {
    // --- control combinators ---
    Not(Box<Command>),
    Test(Box<Command>),
    Try(Box<Command>),
    Do(Box<Command>),
    Fail(Box<Command>),
    GoTo(Box<Command>),
    GoPast(Box<Command>),
    Repeat(Box<Command>),
    Loop(Expr, Box<Command>),
    AtLeast(Expr, Box<Command>),
    Backwards(Box<Command>),
    /// `reverse`: recognized by the grammar as an extension point but never
    /// lowerable — `snowc-gen` rejects any program that reaches one (see
    /// `DESIGN.md`).
    Reverse(Box<Command>),
    /// Concatenation: execute in order, short-circuiting on failure.
    Concat(Vec<Command>),
    And(Vec<Command>),
    Or(Vec<Command>),

    // --- string commands ---
    StartsWith(StringExpr),
    Insert(StringExpr),
    Attach(StringExpr),
    ReplaceSlice(StringExpr),
    /// `->`: export the `[left,right]` slice into the named string.
    ExportSlice(String),
    Delete,
    Hop(Expr),
    Next,
    /// `[`
    SetLeft,
    /// `]`
    SetRight,
    SetMark(String),
    ToMark(Expr),
    AtMark(Expr),
    ToLimit,
    AtLimit,
    Set(String),
    Unset(String),
    True,
    False,
    BooleanRef(String),
    Grouping(String),
    NonGrouping(String),
    RoutineCall(String),
    Substring {
        table_index: u32,
    },
    Among(AmongNode),
    SetLimit {
        limiting: Box<Command>,
        body: Box<Command>,
    },

    // --- integer commands ---
    IntegerAssign {
        name: String,
        op: IntegerAssignOp,
        value: Expr,
    },
    IntegerCompare {
        lhs: Expr,
        op: IntegerCompareOp,
        rhs: Expr,
    },

    /// No-op placeholder for an absent `among` arm command.
    Empty,
}
