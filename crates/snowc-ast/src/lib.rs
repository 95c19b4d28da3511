//! snowc-ast — the Snowball abstract syntax tree.
//!
//! Every type here is plain data: no `generate` methods live on these nodes
//! (`snowc-gen` is the only crate that knows how to turn a node into Rust
//! source). Declarations
//! that never produce code at all — bare `routines (...)` / `groupings
//! (...)` lists, and the `stringescapes`/`stringdef` directives — have no
//! representation here either, since they only ever mutate a
//! `snowc_sess::Session` while parsing and leave no trace in the tree.

mod command;
mod expr;
mod program;

pub use command::{AmongArm, AmongNode, Command, IntegerAssignOp, IntegerCompareOp, StringExpr};
pub use expr::Expr;
pub use program::{CharSetExpr, GroupingDef, Program, ProgramItem, RoutineDef};
