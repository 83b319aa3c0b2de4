use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Location;

/// `(kind, dump name, canonical text, binding power)` for every token kind.
///
/// Two-character punctuators precede their one-character prefixes so that a
/// first-match scan over this table is a longest-match scan.
pub const TOKEN_TABLE: &[(TokenKind, &str, &str, u8)] = &[
    (TokenKind::Undef, "undef", "", 0),
    (TokenKind::Lor, "lor", "||", 4),
    (TokenKind::Land, "land", "&&", 5),
    (TokenKind::Eq, "eq", "==", 9),
    (TokenKind::Neq, "neq", "!=", 9),
    (TokenKind::Ge, "ge", ">=", 10),
    (TokenKind::Le, "le", "<=", 10),
    (TokenKind::Range, "range", "..", 9),
    (TokenKind::IncrSet, "incrset", "+=", 14),
    (TokenKind::DecrSet, "decrset", "-=", 14),
    (TokenKind::LParen, "lparen", "(", 0),
    (TokenKind::RParen, "rparen", ")", 0),
    (TokenKind::LBrace, "lbrace", "{", 0),
    (TokenKind::RBrace, "rbrace", "}", 0),
    (TokenKind::Assign, "assign", "=", 2),
    (TokenKind::Aor, "aor", "|", 4),
    (TokenKind::Aand, "aand", "&", 5),
    (TokenKind::Axor, "axor", "^", 5),
    (TokenKind::LNot, "lnot", "!", 0),
    (TokenKind::Gt, "gt", ">", 10),
    (TokenKind::Lt, "lt", "<", 10),
    (TokenKind::Add, "add", "+", 12),
    (TokenKind::Sub, "sub", "-", 12),
    (TokenKind::Mul, "mul", "*", 13),
    (TokenKind::Div, "div", "/", 13),
    (TokenKind::Mod, "mod", "%", 13),
    (TokenKind::Comma, "comma", ",", 0),
    (TokenKind::Semi, "semi", ";", 0),
    (TokenKind::Eof, "eof", "", 0),
    (TokenKind::Ident, "ident", "", 0),
    (TokenKind::DoubleL, "double_l", "", 0),
    (TokenKind::IntL, "int_l", "", 0),
    (TokenKind::StringL, "string_l", "", 0),
    (TokenKind::DoubleT, "double_t", "double", 0),
    (TokenKind::IntT, "int_t", "int", 0),
    (TokenKind::StringT, "string_t", "string", 0),
    (TokenKind::VoidT, "void_t", "void", 0),
    (TokenKind::For, "for_kw", "for", 0),
    (TokenKind::While, "while_kw", "while", 0),
    (TokenKind::If, "if_kw", "if", 0),
    (TokenKind::Else, "else_kw", "else", 0),
    (TokenKind::In, "in_kw", "in", 0),
    (TokenKind::Print, "print_kw", "print", 0),
    (TokenKind::Function, "function_kw", "function", 0),
    (TokenKind::Native, "native_kw", "native", 0),
    (TokenKind::Return, "return_kw", "return", 0),
];

lazy_static! {
    static ref KIND_LOOKUP: HashMap<TokenKind, (&'static str, &'static str, u8)> = {
        let mut map = HashMap::new();
        for (kind, name, text, power) in TOKEN_TABLE {
            map.insert(*kind, (*name, *text, *power));
        }
        map
    };

    static ref TEXT_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        for (kind, _, text, _) in TOKEN_TABLE {
            if !text.is_empty() {
                map.insert(*text, *kind);
            }
        }
        map
    };

    /// Keywords, looked up after an identifier-shaped run has been scanned.
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        for (kind, _, text, _) in TOKEN_TABLE {
            if kind.is_keyword() {
                map.insert(*text, *kind);
            }
        }
        map
    };

    /// Punctuators in longest-first order.
    pub static ref PUNCTUATORS: Vec<(&'static str, TokenKind)> = {
        let mut punctuators: Vec<(&'static str, TokenKind)> = TOKEN_TABLE
            .iter()
            .filter(|(kind, _, text, _)| !text.is_empty() && !kind.is_keyword())
            .map(|(kind, _, text, _)| (*text, *kind))
            .collect();
        punctuators.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        punctuators
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Undef,

    Lor,     // ||
    Land,    // &&
    Eq,      // ==
    Neq,     // !=
    Ge,      // >=
    Le,      // <=
    Range,   // ..
    IncrSet, // +=
    DecrSet, // -=

    LParen,
    RParen,
    LBrace,
    RBrace,

    Assign, // =
    Aor,    // |
    Aand,   // &
    Axor,   // ^
    LNot,   // !
    Gt,
    Lt,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Comma,
    Semi,

    // Utility kinds, their text lives on the token
    Eof,
    Ident,
    DoubleL,
    IntL,
    StringL,

    // Type names
    DoubleT,
    IntT,
    StringT,
    VoidT,

    // Reserved
    For,
    While,
    If,
    Else,
    In,
    Print,
    Function,
    Native,
    Return,
}

impl TokenKind {
    /// Canonical text, empty for literal and utility kinds.
    pub fn text(&self) -> &'static str {
        KIND_LOOKUP.get(self).map(|info| info.1).unwrap_or("")
    }

    /// Lower-case name used by the token dump (`ident`, `int_l`, `for_kw`, ...).
    pub fn name(&self) -> &'static str {
        KIND_LOOKUP.get(self).map(|info| info.0).unwrap_or("undef")
    }

    /// Binding power, 0 for anything that is not an operator.
    pub fn precedence(&self) -> u8 {
        KIND_LOOKUP.get(self).map(|info| info.2).unwrap_or(0)
    }

    pub fn is_keyword(&self) -> bool {
        self.is_typename()
            || matches!(
                self,
                TokenKind::For
                    | TokenKind::While
                    | TokenKind::If
                    | TokenKind::Else
                    | TokenKind::In
                    | TokenKind::Print
                    | TokenKind::Function
                    | TokenKind::Native
                    | TokenKind::Return
            )
    }

    pub fn is_typename(&self) -> bool {
        matches!(
            self,
            TokenKind::DoubleT | TokenKind::IntT | TokenKind::StringT | TokenKind::VoidT
        )
    }

    pub fn is_assignment(&self) -> bool {
        matches!(self, TokenKind::Assign | TokenKind::IncrSet | TokenKind::DecrSet)
    }

    /// Operators that the precedence climber may consume.
    pub fn is_binary(&self) -> bool {
        self.precedence() > 0 && !self.is_assignment()
    }

    pub fn is_unary(&self) -> bool {
        matches!(self, TokenKind::LNot | TokenKind::Sub)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Canonical text of `kind`; empty for literal and utility kinds.
pub fn text_of(kind: TokenKind) -> &'static str {
    kind.text()
}

/// Inverse of [`text_of`] over punctuators and keywords. Anything else maps
/// to `TokenKind::Undef`.
pub fn kind_of(text: &str) -> TokenKind {
    TEXT_LOOKUP.get(text).copied().unwrap_or(TokenKind::Undef)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub location: Location,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, location: Location) -> Self {
        Token {
            kind,
            value: value.into(),
            location,
        }
    }

    /// A token carrying the canonical text of its kind.
    pub fn of(kind: TokenKind, location: Location) -> Self {
        Token::new(kind, kind.text(), location)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.value.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}", self.value)
        }
    }
}
