//! Integer-valued expression nodes.

/// An arithmetic expression over integers. Evaluates to `i64` in the
/// generated host code (the runtime's `maxint`/`minint` constants are
/// `i64::MAX`/`i64::MIN`).
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    IntegerLiteral(i64),
    MaxInt,
    MinInt,
    /// Current cursor position.
    Cursor,
    /// Current limit.
    Limit,
    /// Length of the whole buffer.
    Size,
    /// Length of a named string's current contents.
    SizeOf(String),
    /// A reference to a declared integer variable.
    IntegerRef(String),
    Neg(Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
}
