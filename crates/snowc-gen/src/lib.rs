//! snowc-gen — lowers a parsed [`snowc_ast::Program`] into Rust source text.
//! Every [`snowc_ast::Command`]/[`snowc_ast::Expr`] variant lowers through
//! one fixed pseudo-code template, filled in by [`template::render`].
//!
//! The emitted source assumes a `snowc_runtime::SnowString` import and
//! defines one `Program` struct (the declared string/integer/boolean fields
//! plus the `[`/`]` slice anchors) with one method per `define NAME as (...)`
//! routine and one public function per `externals (...)` entry point.

pub mod among;
pub mod command;
pub mod env;
pub mod error;
pub mod expr;
pub mod program;
pub mod template;

pub use env::Env;
pub use error::{CodeGenError, Result};

use snowc_ast::Program;
use snowc_sess::Session;

/// Lowers `program` (with the [`Session`] accumulated while parsing it) into
/// a complete Rust source string. `debug` selects whether `externals (...)`
/// entry points return just the transformed string, or the string paired
/// with the underlying `Program` instance for inspection.
pub fn generate(program: &Program, session: Session, debug: bool) -> Result<(String, Session)> {
    let mut env = Env::new(session, debug);
    let code = program::generate_program(program, &mut env)?;
    Ok((code, env.into_session()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use snowc_ast::{Command, ProgramItem, RoutineDef};

    #[test]
    fn generates_a_program_struct_and_one_routine_method() {
        let program = Program {
            items: vec![
                ProgramItem::BooleanField("done".to_string()),
                ProgramItem::RoutineDef(RoutineDef { name: "check".to_string(), body: Command::True }),
                ProgramItem::External("stem".to_string()),
            ],
        };
        let (code, _session) = generate(&program, Session::new(), false).unwrap();
        assert!(code.contains("pub struct Program"));
        assert!(code.contains("b_done: bool"));
        assert!(code.contains("fn r_check(&mut self, s: &mut SnowString) -> bool"));
        assert!(code.contains("pub fn stem(input: &str) -> String"));
    }

    #[test]
    fn debug_mode_returns_the_program_alongside_the_string() {
        let program = Program {
            items: vec![
                ProgramItem::RoutineDef(RoutineDef { name: "stem".to_string(), body: Command::True }),
                ProgramItem::External("stem".to_string()),
            ],
        };
        let (code, _session) = generate(&program, Session::new(), true).unwrap();
        assert!(code.contains("pub fn stem(input: &str) -> (String, Program)"));
    }
}
