//! Program-level grammar: declarations, directives, routine/grouping
//! definitions, and `backwardmode` sections.

use snowc_ast::{CharSetExpr, GroupingDef, Program, ProgramItem, RoutineDef};
use snowc_lex::unicode::{codepoint_to_char, parse_hex_codepoint};
use snowc_lex::{Keyword, Token};
use snowc_sess::TableKind;

use crate::command::parse_str_cmd;
use crate::error::{ParseError, ParseResult};
use crate::parser::Parser;

pub fn parse_program(p: &mut Parser) -> ParseResult<Program> {
    let mut items = Vec::new();
    while !p.at_eof() {
        items.extend(parse_program_atom(p)?);
    }
    Ok(Program { items })
}

/// One `PROGRAM_ATOM`, as the (possibly empty, possibly multi-item) list of
/// top-level items it contributes. A bare `routines (...)`/`groupings (...)`
/// list contributes nothing; `strings`/`integers`/`booleans`/`externals`
/// contribute one item per declared name.
fn parse_program_atom(p: &mut Parser) -> ParseResult<Vec<ProgramItem>> {
    match p.peek().clone() {
        Token::Keyword(Keyword::Strings) => {
            parse_declaration(p, Keyword::Strings, TableKind::Strings, Some(ProgramItem::StringField))
        }
        Token::Keyword(Keyword::Integers) => {
            parse_declaration(p, Keyword::Integers, TableKind::Integers, Some(ProgramItem::IntegerField))
        }
        Token::Keyword(Keyword::Booleans) => {
            parse_declaration(p, Keyword::Booleans, TableKind::Booleans, Some(ProgramItem::BooleanField))
        }
        Token::Keyword(Keyword::Routines) => {
            parse_declaration(p, Keyword::Routines, TableKind::Routines, None)
        }
        Token::Keyword(Keyword::Groupings) => {
            parse_declaration(p, Keyword::Groupings, TableKind::Groupings, None)
        }
        Token::Keyword(Keyword::Externals) => parse_externals(p),
        Token::Keyword(Keyword::Define) => parse_define(p).map(|item| vec![item]),
        Token::Keyword(Keyword::StringEscapes) => {
            parse_stringescapes(p)?;
            Ok(Vec::new())
        }
        Token::Keyword(Keyword::StringDef) => {
            parse_stringdef(p)?;
            Ok(Vec::new())
        }
        Token::Keyword(Keyword::BackwardMode) => parse_backward_mode(p).map(|item| vec![item]),
        _ => Err(p.unexpected("a declaration, 'define', a directive, or 'backwardmode'")),
    }
}

/// `strings (...)`/`integers (...)`/`booleans (...)`/`routines (...)`/
/// `groupings (...)`: declare every name into `kind`'s table, and — when
/// `wrap` is given — build one `ProgramItem` per name.
fn parse_declaration(
    p: &mut Parser,
    kw: Keyword,
    kind: TableKind,
    wrap: Option<fn(String) -> ProgramItem>,
) -> ParseResult<Vec<ProgramItem>> {
    p.expect_keyword(kw)?;
    p.expect(Token::LParen)?;
    let mut items = Vec::new();
    while !p.at(&Token::RParen) {
        let name = p.expect_ident()?;
        let text = name.as_str().to_string();
        p.session_mut().declare(kind, text.clone());
        if let Some(wrap) = wrap {
            items.push(wrap(text));
        }
    }
    p.expect(Token::RParen)?;
    Ok(items)
}

fn parse_externals(p: &mut Parser) -> ParseResult<Vec<ProgramItem>> {
    p.expect_keyword(Keyword::Externals)?;
    p.expect(Token::LParen)?;
    let mut items = Vec::new();
    while !p.at(&Token::RParen) {
        let name = p.expect_ident()?;
        let text = name.as_str().to_string();
        p.session_mut().declare(TableKind::Externals, text.clone());
        items.push(ProgramItem::External(text));
    }
    p.expect(Token::RParen)?;
    Ok(items)
}

/// `define NAME as (...)` or `define NAME <charset-expr>`, disambiguated by
/// which table `NAME` was already declared into.
fn parse_define(p: &mut Parser) -> ParseResult<ProgramItem> {
    p.expect_keyword(Keyword::Define)?;
    let name = p.expect_ident()?;
    let text = name.as_str().to_string();

    if p.session().table(TableKind::Routines).contains(&text) {
        p.expect_keyword(Keyword::As)?;
        let body = parse_str_cmd(p)?;
        Ok(ProgramItem::RoutineDef(RoutineDef { name: text, body }))
    } else if p.session().table(TableKind::Groupings).contains(&text) {
        let expr = parse_grouping_expr(p)?;
        Ok(ProgramItem::GroupingDef(GroupingDef { name: text, expr }))
    } else {
        Err(ParseError::UnresolvedReference { name: text })
    }
}

/// `<charset-atom> (('+' | '-') <charset-atom>)*`, left-associative.
fn parse_grouping_expr(p: &mut Parser) -> ParseResult<CharSetExpr> {
    let mut lhs = parse_grouping_atom(p)?;
    loop {
        if p.eat(&Token::Plus) {
            let rhs = parse_grouping_atom(p)?;
            lhs = CharSetExpr::Union(Box::new(lhs), Box::new(rhs));
        } else if p.eat(&Token::Minus) {
            let rhs = parse_grouping_atom(p)?;
            lhs = CharSetExpr::Difference(Box::new(lhs), Box::new(rhs));
        } else {
            return Ok(lhs);
        }
    }
}

fn parse_grouping_atom(p: &mut Parser) -> ParseResult<CharSetExpr> {
    match p.peek().clone() {
        Token::StringLiteral(text) => {
            p.bump()?;
            Ok(CharSetExpr::Literal(text))
        }
        Token::Ident(sym) => {
            let text = sym.as_str();
            if p.session().table(TableKind::Groupings).contains(text) {
                p.bump()?;
                Ok(CharSetExpr::GroupingRef(text.to_string()))
            } else {
                Err(ParseError::UnresolvedGrouping {
                    name: text.to_string(),
                })
            }
        }
        _ => Err(p.unexpected("a string literal or declared grouping name")),
    }
}

fn parse_backward_mode(p: &mut Parser) -> ParseResult<ProgramItem> {
    p.expect_keyword(Keyword::BackwardMode)?;
    p.expect(Token::LParen)?;
    let mut items = Vec::new();
    while !p.at(&Token::RParen) {
        items.extend(parse_program_atom(p)?);
    }
    p.expect(Token::RParen)?;
    Ok(ProgramItem::BackwardModeSection(items))
}

/// `stringescapes '<chars>'`: one two-character string literal supplying the
/// left/right escape markers.
fn parse_stringescapes(p: &mut Parser) -> ParseResult<()> {
    p.expect_keyword(Keyword::StringEscapes)?;
    let text = p.expect_string_literal()?;
    let chars: Vec<char> = text.chars().collect();
    if chars.len() != 2 {
        return Err(ParseError::InvalidStringEscapesArgument {
            text,
            found: chars.len(),
        });
    }
    p.session_mut().string_escapes.set_markers(chars[0], chars[1]);
    Ok(())
}

/// `stringdef KEY [hex|decimal] 'literal'`. `KEY` is an identifier token
/// (letters/digits/underscore) rather than the reference grammar's
/// arbitrary printable-character run — a hyphenated key like `a-ring` would
/// otherwise collide with the `-` operator token in this token-stream
/// design; see `DESIGN.md`.
fn parse_stringdef(p: &mut Parser) -> ParseResult<()> {
    p.expect_keyword(Keyword::StringDef)?;
    let key = p.expect_ident()?.as_str().to_string();

    let mode = if p.eat_keyword(Keyword::Hex) {
        Some("hex")
    } else if p.eat_keyword(Keyword::Decimal) {
        Some("decimal")
    } else {
        None
    };

    let text = p.expect_string_literal()?;
    let value = match mode {
        None => text,
        Some(kind) => {
            let base = if kind == "hex" { 16 } else { 10 };
            let mut out = String::new();
            for token in text.split_whitespace() {
                let codepoint = if base == 16 {
                    parse_hex_codepoint(token)
                } else {
                    token.parse::<u32>().ok()
                };
                let ch = codepoint.and_then(codepoint_to_char).ok_or_else(|| {
                    ParseError::InvalidStringDefCodepoint {
                        kind,
                        text: token.to_string(),
                    }
                })?;
                out.push(ch);
            }
            out
        }
    };

    p.session_mut().string_escapes.define(key, value);
    Ok(())
}
