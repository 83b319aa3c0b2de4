use std::{
    io::{self, Write},
    slice::Iter,
};

use lazy_static::lazy_static;

use crate::Location;

use super::tokens::{Token, TokenKind};

lazy_static! {
    static ref UNDEF_TOKEN: Token = Token::of(TokenKind::Undef, Location::unknown());
}

/// Append-only token sequence.
///
/// Indexing is total: the slot right after the last token holds an `eof`
/// token and every slot past that holds an `undef` token, so the parser can
/// peek ahead without bounds checks.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenList {
    tokens: Vec<Token>,
    eof: Token,
}

impl Default for TokenList {
    fn default() -> Self {
        TokenList {
            tokens: Vec::new(),
            eof: Token::of(TokenKind::Eof, Location::unknown()),
        }
    }
}

impl TokenList {
    pub fn new() -> Self {
        TokenList::default()
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// Records where the input ended; the synthetic `eof` token reports it.
    pub fn set_end(&mut self, location: Location) {
        self.eof.location = location;
    }

    pub fn at(&self, index: usize) -> &Token {
        match self.tokens.get(index) {
            Some(token) => token,
            None if index == self.tokens.len() => &self.eof,
            None => &UNDEF_TOKEN,
        }
    }

    pub fn kind_at(&self, index: usize) -> TokenKind {
        self.at(index).kind
    }

    pub fn location_at(&self, index: usize) -> Location {
        self.at(index).location
    }

    pub fn value_at(&self, index: usize) -> &str {
        &self.at(index).value
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
        self.eof.location = Location::unknown();
    }

    /// Writes one line per token with the kind's name.
    pub fn dump<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for token in &self.tokens {
            writeln!(out, "{}", token.kind.name())?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
