//! Lexical error taxonomy.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("{line}:{column}: unterminated string literal")]
    UnterminatedString { line: u32, column: u32 },

    #[error("{line}:{column}: unterminated block comment")]
    UnterminatedComment { line: u32, column: u32 },

    #[error("{line}:{column}: integer literal out of range: {text}")]
    IntegerOverflow {
        line: u32,
        column: u32,
        text: String,
    },

    #[error("{line}:{column}: unexpected character {ch:?}")]
    UnexpectedChar { line: u32, column: u32, ch: char },
}

pub type LexResult<T> = std::result::Result<T, LexError>;
