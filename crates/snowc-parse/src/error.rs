use snowc_lex::LexError;
use thiserror::Error;

/// Errors raised while turning a token stream into a [`snowc_ast::Program`]
///.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },

    #[error("'{name}' is not declared as a string, integer, boolean, routine, external, or grouping")]
    UnresolvedReference { name: String },

    #[error("'{name}' is not declared as a boolean, grouping, or routine")]
    UnresolvedCommandReference { name: String },

    #[error("'{name}' is not declared as a grouping")]
    UnresolvedGrouping { name: String },

    #[error("'{name}' is not declared as a string")]
    UnresolvedString { name: String },

    #[error("'{name}' is not declared as an integer")]
    UnresolvedInteger { name: String },

    #[error("'{name}' is not declared as a boolean")]
    UnresolvedBoolean { name: String },

    #[error("can only assign to a bare integer variable, not to an expression")]
    InvalidAssignmentTarget,

    #[error("'among' with no arms")]
    EmptyAmong,

    #[error("'stringescapes' takes exactly two characters, found {found} in {text:?}")]
    InvalidStringEscapesArgument { text: String, found: usize },

    #[error("'stringdef' {kind} literal {text:?} is not a valid {kind} codepoint")]
    InvalidStringDefCodepoint { kind: &'static str, text: String },

    #[error("unexpected end of input while looking for {expected}")]
    UnexpectedEof { expected: String },
}

pub type ParseResult<T> = Result<T, ParseError>;
