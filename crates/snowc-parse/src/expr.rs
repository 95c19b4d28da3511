//! Integer expressions: unary
//! minus binds tightest, then `*`/`/`, then `+`/`-`, all left-associative
//! except the unary level.

use snowc_ast::Expr;
use snowc_lex::{Keyword, Token};
use snowc_sess::TableKind;

use crate::parser::Parser;
use crate::error::ParseResult;

pub fn parse_expr(p: &mut Parser) -> ParseResult<Expr> {
    parse_additive(p)
}

fn parse_additive(p: &mut Parser) -> ParseResult<Expr> {
    let mut lhs = parse_multiplicative(p)?;
    loop {
        if p.eat(&Token::Plus) {
            let rhs = parse_multiplicative(p)?;
            lhs = Expr::Add(Box::new(lhs), Box::new(rhs));
        } else if p.eat(&Token::Minus) {
            let rhs = parse_multiplicative(p)?;
            lhs = Expr::Sub(Box::new(lhs), Box::new(rhs));
        } else {
            return Ok(lhs);
        }
    }
}

fn parse_multiplicative(p: &mut Parser) -> ParseResult<Expr> {
    let mut lhs = parse_unary(p)?;
    loop {
        if p.eat(&Token::Star) {
            let rhs = parse_unary(p)?;
            lhs = Expr::Mul(Box::new(lhs), Box::new(rhs));
        } else if p.eat(&Token::Slash) {
            let rhs = parse_unary(p)?;
            lhs = Expr::Div(Box::new(lhs), Box::new(rhs));
        } else {
            return Ok(lhs);
        }
    }
}

fn parse_unary(p: &mut Parser) -> ParseResult<Expr> {
    if p.eat(&Token::Minus) {
        let inner = parse_unary(p)?;
        return Ok(Expr::Neg(Box::new(inner)));
    }
    parse_atom(p)
}

fn parse_atom(p: &mut Parser) -> ParseResult<Expr> {
    match p.peek().clone() {
        Token::Keyword(Keyword::MaxInt) => {
            p.bump()?;
            Ok(Expr::MaxInt)
        }
        Token::Keyword(Keyword::MinInt) => {
            p.bump()?;
            Ok(Expr::MinInt)
        }
        Token::Keyword(Keyword::Cursor) => {
            p.bump()?;
            Ok(Expr::Cursor)
        }
        Token::Keyword(Keyword::Limit) => {
            p.bump()?;
            Ok(Expr::Limit)
        }
        Token::Keyword(Keyword::Size) => {
            p.bump()?;
            Ok(Expr::Size)
        }
        Token::Keyword(Keyword::SizeOf) => {
            p.bump()?;
            let name = p.expect_ident()?;
            let text = name.as_str();
            if !p.session().table(TableKind::Strings).contains(text) {
                return Err(crate::error::ParseError::UnresolvedString {
                    name: text.to_string(),
                });
            }
            Ok(Expr::SizeOf(text.to_string()))
        }
        Token::Integer(n) => {
            p.bump()?;
            Ok(Expr::IntegerLiteral(n as i64))
        }
        Token::Ident(sym) => {
            let text = sym.as_str();
            if p.session().table(TableKind::Integers).contains(text) {
                p.bump()?;
                Ok(Expr::IntegerRef(text.to_string()))
            } else {
                Err(crate::error::ParseError::UnresolvedInteger {
                    name: text.to_string(),
                })
            }
        }
        Token::LParen => {
            p.bump()?;
            let inner = parse_expr(p)?;
            p.expect(Token::RParen)?;
            Ok(inner)
        }
        _ => Err(p.unexpected("an integer expression")),
    }
}
