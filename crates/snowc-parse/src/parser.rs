//! Token-stream plumbing shared by every grammar rule.
//!
//! `snowc-parse` is re-entrant with `snowc-lex`: the lexer is re-tokenized on
//! every [`Parser::bump`] call against the *live* [`Session`], because a
//! `stringescapes`/`stringdef` directive seen mid-program changes how later
//! string literals are scanned. There is no upfront token vector.
//!
//! Every choice point in the grammar is resolved by a single token of
//! lookahead plus, for identifiers, a symbol-table membership check against
//! `Session` — the lexer already tokenizes identifiers by maximal munch, so
//! an identifier token's text is a whole declared name or it is nothing
//! (never a prefix of one). No backtracking is needed anywhere in this
//! parser.

use snowc_lex::{Keyword, Lexer, Token};
use snowc_sess::Session;
use snowc_util::Symbol;

use crate::error::{ParseError, ParseResult};

pub struct Parser<'src> {
    lexer: Lexer<'src>,
    session: Session,
    current: Token,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> ParseResult<Self> {
        let mut lexer = Lexer::new(source);
        let session = Session::new();
        let current = lexer.next_token(&session)?;
        Ok(Self {
            lexer,
            session,
            current,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Hand back ownership of the session, consuming the parser. Called once
    /// parsing finishes; the driver threads the same session into
    /// pre-lowering and code generation.
    pub fn into_session(self) -> Session {
        self.session
    }

    pub fn peek(&self) -> &Token {
        &self.current
    }

    pub fn at_eof(&self) -> bool {
        matches!(self.current, Token::Eof)
    }

    /// Advance to the next token, returning the one just consumed.
    pub fn bump(&mut self) -> ParseResult<Token> {
        let next = self.lexer.next_token(&self.session)?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    pub fn at_keyword(&self, kw: Keyword) -> bool {
        matches!(self.current, Token::Keyword(k) if k == kw)
    }

    pub fn eat_keyword(&mut self, kw: Keyword) -> bool {
        if self.at_keyword(kw) {
            self.bump().ok();
            true
        } else {
            false
        }
    }

    pub fn expect_keyword(&mut self, kw: Keyword) -> ParseResult<()> {
        if self.eat_keyword(kw) {
            Ok(())
        } else {
            Err(self.unexpected(format!("keyword {kw:?}")))
        }
    }

    pub fn at(&self, tok: &Token) -> bool {
        &self.current == tok
    }

    pub fn eat(&mut self, tok: &Token) -> bool {
        if self.at(tok) {
            self.bump().ok();
            true
        } else {
            false
        }
    }

    pub fn expect(&mut self, tok: Token) -> ParseResult<()> {
        if self.eat(&tok) {
            Ok(())
        } else {
            Err(self.unexpected(format!("{tok:?}")))
        }
    }

    /// Consume an identifier token, returning its interned text.
    pub fn expect_ident(&mut self) -> ParseResult<Symbol> {
        match self.bump()? {
            Token::Ident(sym) => Ok(sym),
            other => Err(ParseError::UnexpectedToken {
                expected: "identifier".to_string(),
                found: describe(&other),
            }),
        }
    }

    pub fn expect_string_literal(&mut self) -> ParseResult<String> {
        match self.bump()? {
            Token::StringLiteral(text) => Ok(text),
            other => Err(ParseError::UnexpectedToken {
                expected: "string literal".to_string(),
                found: describe(&other),
            }),
        }
    }

    pub fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        if self.at_eof() {
            ParseError::UnexpectedEof {
                expected: expected.into(),
            }
        } else {
            ParseError::UnexpectedToken {
                expected: expected.into(),
                found: describe(&self.current),
            }
        }
    }
}

pub fn describe(tok: &Token) -> String {
    match tok {
        Token::Keyword(kw) => format!("keyword {kw:?}"),
        Token::Ident(sym) => format!("identifier '{}'", sym.as_str()),
        Token::Integer(n) => format!("integer {n}"),
        Token::StringLiteral(s) => format!("string literal {s:?}"),
        Token::Eof => "end of input".to_string(),
        other => format!("{other:?}"),
    }
}
