//! Token vocabulary for Snowball source.

use snowc_util::Symbol;

/// The fixed reserved keyword set.
pub const KEYWORDS: &[(&str, Keyword)] = &[
    ("maxint", Keyword::MaxInt),
    ("minint", Keyword::MinInt),
    ("cursor", Keyword::Cursor),
    ("limit", Keyword::Limit),
    ("size", Keyword::Size),
    ("sizeof", Keyword::SizeOf),
    ("or", Keyword::Or),
    ("and", Keyword::And),
    ("strings", Keyword::Strings),
    ("integers", Keyword::Integers),
    ("booleans", Keyword::Booleans),
    ("routines", Keyword::Routines),
    ("externals", Keyword::Externals),
    ("groupings", Keyword::Groupings),
    ("define", Keyword::Define),
    ("as", Keyword::As),
    ("not", Keyword::Not),
    ("test", Keyword::Test),
    ("try", Keyword::Try),
    ("do", Keyword::Do),
    ("fail", Keyword::Fail),
    ("goto", Keyword::Goto),
    ("gopast", Keyword::GoPast),
    ("repeat", Keyword::Repeat),
    ("loop", Keyword::Loop),
    ("atleast", Keyword::AtLeast),
    ("insert", Keyword::Insert),
    ("attach", Keyword::Attach),
    ("delete", Keyword::Delete),
    ("hop", Keyword::Hop),
    ("next", Keyword::Next),
    ("setmark", Keyword::SetMark),
    ("tomark", Keyword::ToMark),
    ("atmark", Keyword::AtMark),
    ("tolimit", Keyword::ToLimit),
    ("atlimit", Keyword::AtLimit),
    ("setlimit", Keyword::SetLimit),
    ("for", Keyword::For),
    ("backwards", Keyword::Backwards),
    ("reverse", Keyword::Reverse),
    ("substring", Keyword::Substring),
    ("among", Keyword::Among),
    ("set", Keyword::Set),
    ("unset", Keyword::Unset),
    ("non", Keyword::Non),
    ("true", Keyword::True),
    ("false", Keyword::False),
    ("backwardmode", Keyword::BackwardMode),
    ("stringescapes", Keyword::StringEscapes),
    ("stringdef", Keyword::StringDef),
    ("hex", Keyword::Hex),
    ("decimal", Keyword::Decimal),
];

/// Reserved words of the Snowball language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    MaxInt,
    MinInt,
    Cursor,
    Limit,
    Size,
    SizeOf,
    Or,
    And,
    Strings,
    Integers,
    Booleans,
    Routines,
    Externals,
    Groupings,
    Define,
    As,
    Not,
    Test,
    Try,
    Do,
    Fail,
    Goto,
    GoPast,
    Repeat,
    Loop,
    AtLeast,
    Insert,
    Attach,
    Delete,
    Hop,
    Next,
    SetMark,
    ToMark,
    AtMark,
    ToLimit,
    AtLimit,
    SetLimit,
    For,
    Backwards,
    Reverse,
    Substring,
    Among,
    Set,
    Unset,
    Non,
    True,
    False,
    BackwardMode,
    StringEscapes,
    StringDef,
    Hex,
    Decimal,
}

/// Look up `text` in the keyword table.
pub fn keyword_from_ident(text: &str) -> Option<Keyword> {
    KEYWORDS
        .iter()
        .find(|(name, _)| *name == text)
        .map(|(_, kw)| *kw)
}

/// A lexical token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Keyword(Keyword),
    Ident(Symbol),
    Integer(u64),
    /// A string literal's fully-resolved text (escapes already substituted).
    StringLiteral(String),

    LParen,
    RParen,
    LBracket,
    RBracket,
    Dollar,
    ReplaceSlice, // <-
    ExportSlice,  // ->
    InsertOp,     // <+
    FatArrow,     // =>
    Plus,
    Minus,
    Star,
    Slash,
    Eq,
    EqEq,
    NotEq,
    Gt,
    Lt,
    GtEq,
    LtEq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,

    Eof,
}

impl Token {
    pub fn is_eof(&self) -> bool {
        matches!(self, Token::Eof)
    }
}
