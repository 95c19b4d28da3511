//! The Snowball lexer.
//!
//! The lexer is re-entrant with the parser: `next_token` takes a `&Session`
//! on every call rather than owning one, because `stringescapes`/`stringdef`
//! directives are recognized by the *parser* (they are ordinary program
//! atoms) and mutate `Session::string_escapes` between token requests. The
//! lexer only ever reads that state, never writes it.

use crate::cursor::Cursor;
use crate::error::{LexError, LexResult};
use crate::token::{keyword_from_ident, Token};
use crate::unicode::{is_ascii_ident_continue, is_ascii_ident_start};
use snowc_sess::Session;
use snowc_util::Symbol;

pub struct Lexer<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    pub fn line(&self) -> u32 {
        self.cursor.line()
    }

    pub fn column(&self) -> u32 {
        self.cursor.column()
    }

    /// Produce the next token, consulting `session` for live string-escape
    /// state. Returns `Token::Eof` once, then keeps returning it.
    pub fn next_token(&mut self, session: &Session) -> LexResult<Token> {
        self.skip_trivia()?;

        let (line, column) = (self.cursor.line(), self.cursor.column());

        let Some(ch) = self.cursor.current_char() else {
            return Ok(Token::Eof);
        };

        if ch == '\'' {
            return self.lex_string(session);
        }
        if ch.is_ascii_digit() {
            return self.lex_integer(line, column);
        }
        if is_ascii_ident_start(ch) {
            return Ok(self.lex_identifier());
        }

        self.lex_punctuation(line, column)
    }

    /// Skip whitespace and comments (`/* ... */`, `// ...`) until the next
    /// token or end of input.
    fn skip_trivia(&mut self) -> LexResult<()> {
        loop {
            self.cursor.skip_whitespace();
            match (self.cursor.current_char(), self.cursor.peek_char()) {
                (Some('/'), Some('*')) => {
                    let (line, column) = (self.cursor.line(), self.cursor.column());
                    self.cursor.advance_n(2);
                    let mut closed = false;
                    while let Some(c) = self.cursor.current_char() {
                        if c == '*' && self.cursor.peek_char() == Some('/') {
                            self.cursor.advance_n(2);
                            closed = true;
                            break;
                        }
                        self.cursor.advance();
                    }
                    if !closed {
                        return Err(LexError::UnterminatedComment { line, column });
                    }
                }
                (Some('/'), Some('/')) => {
                    while let Some(c) = self.cursor.current_char() {
                        if c == '\n' {
                            break;
                        }
                        self.cursor.advance();
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn lex_identifier(&mut self) -> Token {
        let start = self.cursor.position();
        while let Some(c) = self.cursor.current_char() {
            if is_ascii_ident_continue(c) {
                self.cursor.advance();
            } else {
                break;
            }
        }
        let text = self.cursor.slice_from(start);
        match keyword_from_ident(text) {
            Some(kw) => Token::Keyword(kw),
            None => Token::Ident(Symbol::intern(text)),
        }
    }

    fn lex_integer(&mut self, line: u32, column: u32) -> LexResult<Token> {
        let start = self.cursor.position();
        while let Some(c) = self.cursor.current_char() {
            if c.is_ascii_digit() {
                self.cursor.advance();
            } else {
                break;
            }
        }
        let text = self.cursor.slice_from(start);
        text.parse::<u64>()
            .map(Token::Integer)
            .map_err(|_| LexError::IntegerOverflow {
                line,
                column,
                text: text.to_string(),
            })
    }

    /// Scan a `'...'` string literal, honoring the live escape-marker state
    /// in `session`. The closing quote is the first `'`
    /// whose preceding text (from the opening quote) contains no more
    /// unmatched escape-left markers than escape-right markers.
    fn lex_string(&mut self, session: &Session) -> LexResult<Token> {
        let (line, column) = (self.cursor.line(), self.cursor.column());
        self.cursor.advance(); // opening quote
        let content_start = self.cursor.position();
        let source = self.cursor.source();

        let (left, right) = (session.string_escapes.left, session.string_escapes.right);

        let mut search_from = content_start;
        let end = loop {
            let Some(rel) = source[search_from..].find('\'') else {
                return Err(LexError::UnterminatedString { line, column });
            };
            let candidate = search_from + rel;
            if let (Some(l), Some(r)) = (left, right) {
                let segment = &source[content_start..candidate];
                if segment.matches(l).count() > segment.matches(r).count() {
                    search_from = candidate + 1;
                    continue;
                }
            }
            break candidate;
        };

        let raw = &source[content_start..end];
        while self.cursor.position() < end {
            self.cursor.advance();
        }
        self.cursor.advance(); // closing quote

        Ok(Token::StringLiteral(resolve_escapes(raw, left, right, session)))
    }

    fn lex_punctuation(&mut self, line: u32, column: u32) -> LexResult<Token> {
        let ch = self.cursor.current_char().unwrap();
        let peek = self.cursor.peek_char();

        macro_rules! two {
            ($tok:expr) => {{
                self.cursor.advance_n(2);
                return Ok($tok);
            }};
        }
        macro_rules! one {
            ($tok:expr) => {{
                self.cursor.advance();
                return Ok($tok);
            }};
        }

        match (ch, peek) {
            ('<', Some('-')) => two!(Token::ReplaceSlice),
            ('<', Some('+')) => two!(Token::InsertOp),
            ('-', Some('>')) => two!(Token::ExportSlice),
            ('=', Some('>')) => two!(Token::FatArrow),
            ('=', Some('=')) => two!(Token::EqEq),
            ('!', Some('=')) => two!(Token::NotEq),
            ('>', Some('=')) => two!(Token::GtEq),
            ('<', Some('=')) => two!(Token::LtEq),
            ('+', Some('=')) => two!(Token::PlusEq),
            ('-', Some('=')) => two!(Token::MinusEq),
            ('*', Some('=')) => two!(Token::StarEq),
            ('/', Some('=')) => two!(Token::SlashEq),

            ('(', _) => one!(Token::LParen),
            (')', _) => one!(Token::RParen),
            ('[', _) => one!(Token::LBracket),
            (']', _) => one!(Token::RBracket),
            ('$', _) => one!(Token::Dollar),
            ('+', _) => one!(Token::Plus),
            ('-', _) => one!(Token::Minus),
            ('*', _) => one!(Token::Star),
            ('/', _) => one!(Token::Slash),
            ('=', _) => one!(Token::Eq),
            ('>', _) => one!(Token::Gt),
            ('<', _) => one!(Token::Lt),

            _ => Err(LexError::UnexpectedChar { line, column, ch }),
        }
    }
}

/// Substitute every `L key R` escape occurrence in `raw` with its mapped
/// replacement. If no escape markers are active, `raw` passes through
/// verbatim. An escape sequence whose key has no `stringdef` entry is left
/// in the output literally (markers included) rather than treated as an
/// error rather than a distinct lexer error kind.
fn resolve_escapes(raw: &str, left: Option<char>, right: Option<char>, session: &Session) -> String {
    let (l, r) = match (left, right) {
        (Some(l), Some(r)) => (l, r),
        _ => return raw.to_string(),
    };

    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == l {
            if let Some(rel) = chars[i + 1..].iter().position(|&c| c == r) {
                let key: String = chars[i + 1..i + 1 + rel].iter().collect();
                match session.string_escapes.resolve(&key) {
                    Some(repl) => out.push_str(repl),
                    None => {
                        out.push(l);
                        out.push_str(&key);
                        out.push(r);
                    }
                }
                i += rel + 2;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}
