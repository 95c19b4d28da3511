//! String commands and control combinators: unary prefix combinators bind tightest
//! (right-associative), then `and`/`or` (left-associative), then bare
//! juxtaposition — concatenation with no operator — which is the weakest
//! binding of all.
//!
//! A sequence that turns out to hold exactly one element is returned bare,
//! never wrapped in a one-element `Concat`/`And`/`Or`: that mirrors what the
//! reference grammar's binary-operator combinators do (no tokens matched, no
//! node built) and matters downstream, since pre-lowering's substring/among
//! pairing pattern-matches directly on `Command::Substring`/`Command::Among`
//! siblings in a sequence.

use snowc_ast::{AmongArm, AmongNode, Command, IntegerAssignOp, IntegerCompareOp, StringExpr};
use snowc_lex::{Keyword, Token};
use snowc_sess::TableKind;

use crate::error::ParseError;
use crate::error::ParseResult;
use crate::expr::parse_expr;
use crate::parser::Parser;

pub fn parse_str_cmd(p: &mut Parser) -> ParseResult<Command> {
    parse_concat(p)
}

/// A token that cannot possibly start a `STR_CMD_OPERAND` — used to decide
/// where an implicit concatenation sequence ends.
fn starts_command(tok: &Token) -> bool {
    match tok {
        Token::Eof | Token::RParen => false,
        Token::Keyword(kw) => !matches!(kw, Keyword::For | Keyword::As),
        _ => true,
    }
}

fn parse_concat(p: &mut Parser) -> ParseResult<Command> {
    let mut items = vec![parse_and_or(p)?];
    while starts_command(p.peek()) {
        items.push(parse_and_or(p)?);
    }
    Ok(unwrap_singleton(items, Command::Concat))
}

fn parse_and_or(p: &mut Parser) -> ParseResult<Command> {
    let mut lhs = parse_unary(p)?;
    loop {
        if p.eat_keyword(Keyword::And) {
            let rhs = parse_unary(p)?;
            lhs = Command::And(vec![lhs, rhs]);
        } else if p.eat_keyword(Keyword::Or) {
            let rhs = parse_unary(p)?;
            lhs = Command::Or(vec![lhs, rhs]);
        } else {
            return Ok(lhs);
        }
    }
}

fn unwrap_singleton(mut items: Vec<Command>, wrap: fn(Vec<Command>) -> Command) -> Command {
    if items.len() == 1 {
        items.pop().unwrap()
    } else {
        wrap(items)
    }
}

fn parse_unary(p: &mut Parser) -> ParseResult<Command> {
    macro_rules! prefix {
        ($variant:ident) => {{
            p.bump()?;
            let inner = parse_unary(p)?;
            return Ok(Command::$variant(Box::new(inner)));
        }};
    }

    match p.peek() {
        Token::Keyword(Keyword::Not) => prefix!(Not),
        Token::Keyword(Keyword::Test) => prefix!(Test),
        Token::Keyword(Keyword::Try) => prefix!(Try),
        Token::Keyword(Keyword::Do) => prefix!(Do),
        Token::Keyword(Keyword::Fail) => prefix!(Fail),
        Token::Keyword(Keyword::Goto) => prefix!(GoTo),
        Token::Keyword(Keyword::GoPast) => prefix!(GoPast),
        Token::Keyword(Keyword::Repeat) => prefix!(Repeat),
        Token::Keyword(Keyword::Backwards) => prefix!(Backwards),
        Token::Keyword(Keyword::Reverse) => prefix!(Reverse),
        Token::Keyword(Keyword::Loop) => {
            p.bump()?;
            let count = parse_expr(p)?;
            let inner = parse_unary(p)?;
            Ok(Command::Loop(count, Box::new(inner)))
        }
        Token::Keyword(Keyword::AtLeast) => {
            p.bump()?;
            let count = parse_expr(p)?;
            let inner = parse_unary(p)?;
            Ok(Command::AtLeast(count, Box::new(inner)))
        }
        _ => parse_operand(p),
    }
}

fn parse_chars(p: &mut Parser) -> ParseResult<StringExpr> {
    match p.peek().clone() {
        Token::StringLiteral(text) => {
            p.bump()?;
            Ok(StringExpr::Literal(text))
        }
        Token::Ident(sym) => {
            let text = sym.as_str();
            if p.session().table(TableKind::Strings).contains(text) {
                p.bump()?;
                Ok(StringExpr::CharsRef(text.to_string()))
            } else {
                Err(ParseError::UnresolvedString {
                    name: text.to_string(),
                })
            }
        }
        _ => Err(p.unexpected("a string literal or declared string name")),
    }
}

fn parse_operand(p: &mut Parser) -> ParseResult<Command> {
    match p.peek().clone() {
        Token::Dollar => parse_integer_command(p),

        Token::StringLiteral(_) => Ok(Command::StartsWith(parse_chars(p)?)),

        Token::Keyword(Keyword::SetLimit) => {
            p.bump()?;
            let limiting = parse_str_cmd(p)?;
            p.expect_keyword(Keyword::For)?;
            p.expect(Token::LParen)?;
            let body = parse_str_cmd(p)?;
            p.expect(Token::RParen)?;
            Ok(Command::SetLimit {
                limiting: Box::new(limiting),
                body: Box::new(body),
            })
        }

        Token::Keyword(Keyword::Insert) => {
            p.bump()?;
            Ok(Command::Insert(parse_chars(p)?))
        }
        Token::InsertOp => {
            p.bump()?;
            Ok(Command::Insert(parse_chars(p)?))
        }
        Token::Keyword(Keyword::Attach) => {
            p.bump()?;
            Ok(Command::Attach(parse_chars(p)?))
        }
        Token::ReplaceSlice => {
            p.bump()?;
            Ok(Command::ReplaceSlice(parse_chars(p)?))
        }
        Token::Keyword(Keyword::Delete) => {
            p.bump()?;
            Ok(Command::Delete)
        }
        Token::Keyword(Keyword::Hop) => {
            p.bump()?;
            Ok(Command::Hop(parse_expr(p)?))
        }
        Token::Keyword(Keyword::Next) => {
            p.bump()?;
            Ok(Command::Next)
        }
        Token::LBracket => {
            p.bump()?;
            Ok(Command::SetLeft)
        }
        Token::RBracket => {
            p.bump()?;
            Ok(Command::SetRight)
        }
        Token::ExportSlice => {
            p.bump()?;
            let name = p.expect_ident()?;
            let text = name.as_str();
            if !p.session().table(TableKind::Strings).contains(text) {
                return Err(ParseError::UnresolvedString {
                    name: text.to_string(),
                });
            }
            Ok(Command::ExportSlice(text.to_string()))
        }
        Token::Keyword(Keyword::SetMark) => {
            p.bump()?;
            let name = p.expect_ident()?;
            let text = name.as_str();
            if !p.session().table(TableKind::Integers).contains(text) {
                return Err(ParseError::UnresolvedInteger {
                    name: text.to_string(),
                });
            }
            Ok(Command::SetMark(text.to_string()))
        }
        Token::Keyword(Keyword::ToMark) => {
            p.bump()?;
            Ok(Command::ToMark(parse_expr(p)?))
        }
        Token::Keyword(Keyword::AtMark) => {
            p.bump()?;
            Ok(Command::AtMark(parse_expr(p)?))
        }
        Token::Keyword(Keyword::ToLimit) => {
            p.bump()?;
            Ok(Command::ToLimit)
        }
        Token::Keyword(Keyword::AtLimit) => {
            p.bump()?;
            Ok(Command::AtLimit)
        }
        Token::Keyword(Keyword::Set) => {
            p.bump()?;
            let name = p.expect_ident()?;
            let text = name.as_str();
            if !p.session().table(TableKind::Booleans).contains(text) {
                return Err(ParseError::UnresolvedBoolean {
                    name: text.to_string(),
                });
            }
            Ok(Command::Set(text.to_string()))
        }
        Token::Keyword(Keyword::Unset) => {
            p.bump()?;
            let name = p.expect_ident()?;
            let text = name.as_str();
            if !p.session().table(TableKind::Booleans).contains(text) {
                return Err(ParseError::UnresolvedBoolean {
                    name: text.to_string(),
                });
            }
            Ok(Command::Unset(text.to_string()))
        }
        Token::Keyword(Keyword::True) => {
            p.bump()?;
            Ok(Command::True)
        }
        Token::Keyword(Keyword::False) => {
            p.bump()?;
            Ok(Command::False)
        }
        Token::Keyword(Keyword::Non) => {
            p.bump()?;
            p.eat(&Token::Minus);
            let name = p.expect_ident()?;
            let text = name.as_str();
            if !p.session().table(TableKind::Groupings).contains(text) {
                return Err(ParseError::UnresolvedGrouping {
                    name: text.to_string(),
                });
            }
            Ok(Command::NonGrouping(text.to_string()))
        }
        Token::Keyword(Keyword::Substring) => {
            p.bump()?;
            Ok(Command::Substring {
                table_index: u32::MAX,
            })
        }
        Token::Keyword(Keyword::Among) => parse_among(p),

        Token::LParen => {
            p.bump()?;
            if p.eat(&Token::RParen) {
                return Ok(Command::Empty);
            }
            let inner = parse_str_cmd(p)?;
            p.expect(Token::RParen)?;
            Ok(inner)
        }

        Token::Ident(sym) => {
            let text = sym.as_str();
            if p.session().table(TableKind::Strings).contains(text) {
                p.bump()?;
                Ok(Command::StartsWith(StringExpr::CharsRef(text.to_string())))
            } else if p.session().table(TableKind::Groupings).contains(text) {
                p.bump()?;
                Ok(Command::Grouping(text.to_string()))
            } else if p.session().table(TableKind::Booleans).contains(text) {
                p.bump()?;
                Ok(Command::BooleanRef(text.to_string()))
            } else if p.session().table(TableKind::Routines).contains(text) {
                p.bump()?;
                Ok(Command::RoutineCall(text.to_string()))
            } else {
                Err(ParseError::UnresolvedCommandReference {
                    name: text.to_string(),
                })
            }
        }

        _ => Err(p.unexpected("a string command")),
    }
}

fn parse_integer_command(p: &mut Parser) -> ParseResult<Command> {
    p.expect(Token::Dollar)?;
    let name = p.expect_ident()?;
    let text = name.as_str();
    if !p.session().table(TableKind::Integers).contains(text) {
        return Err(ParseError::UnresolvedInteger {
            name: text.to_string(),
        });
    }
    let name = text.to_string();

    let assign_op = match p.peek() {
        Token::Eq => Some(IntegerAssignOp::Set),
        Token::PlusEq => Some(IntegerAssignOp::Add),
        Token::MinusEq => Some(IntegerAssignOp::Sub),
        Token::StarEq => Some(IntegerAssignOp::Mul),
        Token::SlashEq => Some(IntegerAssignOp::Div),
        _ => None,
    };
    if let Some(op) = assign_op {
        p.bump()?;
        let value = parse_expr(p)?;
        return Ok(Command::IntegerAssign { name, op, value });
    }

    let compare_op = match p.peek() {
        Token::EqEq => IntegerCompareOp::Eq,
        Token::NotEq => IntegerCompareOp::NotEq,
        Token::GtEq => IntegerCompareOp::GtEq,
        Token::LtEq => IntegerCompareOp::LtEq,
        Token::Gt => IntegerCompareOp::Gt,
        Token::Lt => IntegerCompareOp::Lt,
        _ => return Err(p.unexpected("an integer command operator")),
    };
    p.bump()?;
    let rhs = parse_expr(p)?;
    Ok(Command::IntegerCompare {
        lhs: snowc_ast::Expr::IntegerRef(name),
        op: compare_op,
        rhs,
    })
}

/// `among ( [STR [ROUTINE_REF]]+ [(STR_CMD)] ... )`. Each arm is
/// a run of one or more patterns (each optionally guarded by a routine name
/// juxtaposed directly after the literal) followed by an optional
/// parenthesized command; the arm ends either at that command or at the next
/// pattern run.
fn parse_among(p: &mut Parser) -> ParseResult<Command> {
    p.bump()?; // `among`
    p.expect(Token::LParen)?;

    let mut arms = Vec::new();
    loop {
        if p.at(&Token::RParen) {
            break;
        }
        let mut patterns = Vec::new();
        loop {
            match p.peek().clone() {
                Token::StringLiteral(text) => {
                    p.bump()?;
                    let guard = match p.peek().clone() {
                        Token::Ident(sym) if p.session().table(TableKind::Routines).contains(sym.as_str()) => {
                            p.bump()?;
                            Some(sym.as_str().to_string())
                        }
                        _ => None,
                    };
                    patterns.push((text, guard));
                }
                _ => break,
            }
        }
        if patterns.is_empty() {
            return Err(p.unexpected("a string pattern inside 'among'"));
        }

        let command = if p.eat(&Token::LParen) {
            if p.eat(&Token::RParen) {
                None
            } else {
                let cmd = parse_str_cmd(p)?;
                p.expect(Token::RParen)?;
                Some(Box::new(cmd))
            }
        } else {
            None
        };

        arms.push(AmongArm { patterns, command });
    }
    p.expect(Token::RParen)?;

    if arms.is_empty() {
        return Err(ParseError::EmptyAmong);
    }

    Ok(Command::Among(AmongNode {
        table_index: u32::MAX,
        arms,
        owns_walk: true,
    }))
}
