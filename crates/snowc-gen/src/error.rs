//! Error types for Rust code generation.

use thiserror::Error;

/// Errors raised while lowering a [`snowc_ast::Program`] into Rust source.
#[derive(Debug, Error, PartialEq)]
pub enum CodeGenError {
    /// Snowball reserves `reverse` but never assigns it working semantics.
    /// The parser accepts it; generation refuses rather than inventing a
    /// meaning.
    #[error("'reverse' is parsed but has no defined semantics; it cannot be compiled")]
    UnsupportedReverse,

    /// `setlimit A for (B)` requires both operands syntactically, so this
    /// should be unreachable past a correct parse — kept as a defensive
    /// variant for the case anyway.
    #[error("'setlimit' requires both a limiting command and a body")]
    MalformedSetLimit,

    #[error("'among' with no arms cannot be compiled")]
    EmptyAmong,
}

pub type Result<T> = std::result::Result<T, CodeGenError>;
