//! snowc-lex — tokenizes Snowball source.
//!
//! Whitespace-insensitive, two comment styles (`/* ... */`, `// ...`), and a
//! string-literal scanner whose escape behavior is controlled by directives
//! elsewhere in the same source file. The lexer is deliberately re-entrant
//! with the parser: see [`Lexer::next_token`].

pub mod cursor;
pub mod error;
pub mod lexer;
pub mod token;
pub mod unicode;

pub use cursor::{Cursor, CursorSnapshot};
pub use error::{LexError, LexResult};
pub use lexer::Lexer;
pub use token::{Keyword, Token};
