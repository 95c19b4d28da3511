//! snowc-parse — turns Snowball source into a [`snowc_ast::Program`] plus
//! the [`Session`] built up while parsing.
//!
//! The grammar is session-aware: `strings`/`integers`/`booleans`/
//! `routines`/`externals`/`groupings` declarations grow the symbol tables as
//! parsing proceeds, and later references (a routine call, a grouping check,
//! `define NAME as ...` vs. `define NAME <charset>`) are resolved against
//! whatever has been declared so far — there is no separate name-resolution
//! pass. `stringescapes`/`stringdef` directives are ordinary program atoms
//! that mutate the same session mid-stream, which is why the lexer takes a
//! `&Session` on every token rather than running to completion upfront.
//!
//! [`parse`] additionally runs the substring/among pre-lowering pass before
//! returning, so callers always get a [`snowc_ast::Program`] whose
//! `Among`/`Substring` table indices are already assigned.

pub mod command;
pub mod error;
pub mod expr;
pub mod items;
pub mod parser;
pub mod prelower;

use snowc_ast::Program;
use snowc_sess::Session;

pub use error::{ParseError, ParseResult};
pub use parser::Parser;

/// Parse a full Snowball source file, returning the program and the session
/// accumulated while parsing it (declarations, string-escape state, and the
/// fresh-var/among-index counters `snowc-gen` continues from).
pub fn parse(source: &str) -> ParseResult<(Program, Session)> {
    let mut parser = Parser::new(source)?;
    let mut program = items::parse_program(&mut parser)?;
    let mut session = parser.into_session();
    prelower::prelower_program(&mut program, &mut session);
    Ok((program, session))
}
