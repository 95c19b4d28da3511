//! Program-level nodes: routine/grouping definitions and the program root
//!.

use crate::command::Command;

/// A character-set expression built from string literals and other
/// grouping names with left-associative `+`/`-`.
#[derive(Debug, Clone)]
pub enum CharSetExpr {
    Literal(String),
    GroupingRef(String),
    Union(Box<CharSetExpr>, Box<CharSetExpr>),
    Difference(Box<CharSetExpr>, Box<CharSetExpr>),
}

/// `define name as (...)`: compiles to a method on the program
/// object.
#[derive(Debug, Clone)]
pub struct RoutineDef {
    pub name: String,
    pub body: Command,
}

/// `define name <charset-expr>`: compiles to a module-level
/// constant.
#[derive(Debug, Clone)]
pub struct GroupingDef {
    pub name: String,
    pub expr: CharSetExpr,
}

/// One program-level atom that produces output. Bare `strings (...)`,
/// `integers (...)`, `booleans (...)`, `routines (...)`, `externals (...)`,
/// and `groupings (...)` declarations populate a `Session`'s tables at parse
/// time; only the four variants below that declare a *field* (string,
/// integer, boolean) or an entry point (external) actually emit code — a
/// bare `routines`/`groupings` name list generates nothing.
#[derive(Debug, Clone)]
pub enum ProgramItem {
    StringField(String),
    IntegerField(String),
    BooleanField(String),
    External(String),
    RoutineDef(RoutineDef),
    GroupingDef(GroupingDef),
    /// `backwardmode (...)`: the contained definitions compile in backward
    /// mode.
    BackwardModeSection(Vec<ProgramItem>),
}

/// The root of a parsed Snowball program.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub items: Vec<ProgramItem>,
}
