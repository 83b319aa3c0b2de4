use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Location, MK_ERROR, MK_TOKEN,
};

use super::{
    token_list::TokenList,
    tokens::{Token, TokenKind, PUNCTUATORS, RESERVED_LOOKUP},
};

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new("^[ \\t\\r\\n]+").unwrap();
    static ref COMMENT: Regex = Regex::new("^//[^\\n]*").unwrap();
    static ref IDENTIFIER: Regex = Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap();
    static ref NUMBER: Regex = Regex::new("^[0-9]+(\\.[0-9]*)?(e[+-]?[0-9]*)?").unwrap();
}

/// Character-at-a-time scanner. Positions are byte offsets; lines and
/// offsets are 0-based.
pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    line: usize,
    offset: usize,
    tokens: &'a mut TokenList,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, tokens: &'a mut TokenList) -> Lexer<'a> {
        Lexer {
            source,
            pos: 0,
            line: 0,
            offset: 0,
            tokens,
        }
    }

    pub fn peek_char(&self, off: usize) -> u8 {
        self.source
            .as_bytes()
            .get(self.pos + off)
            .copied()
            .unwrap_or(b'\0')
    }

    pub fn get_char(&mut self) -> u8 {
        let ch = self.peek_char(0);

        self.pos += 1;
        self.offset += 1;

        if ch == b'\n' {
            self.offset = 0;
            self.line += 1;
        }

        ch
    }

    pub fn skip_chars(&mut self, n: usize) {
        for _ in 0..n {
            self.get_char();
        }
    }

    pub fn current_location(&self) -> Location {
        Location::new(self.line, self.offset)
    }

    pub fn remainder(&self) -> &'a str {
        self.source.get(self.pos..).unwrap_or("")
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    fn skip_trivia(&mut self) {
        loop {
            let remaining = self.remainder();
            let matched = WHITESPACE
                .find(remaining)
                .or_else(|| COMMENT.find(remaining))
                .map(|m| m.end());

            match matched {
                Some(len) if len > 0 => self.skip_chars(len),
                _ => break,
            }
        }
    }

    fn scan_ident(&mut self) {
        let location = self.current_location();
        let value = match IDENTIFIER.find(self.remainder()) {
            Some(m) => m.as_str(),
            None => return,
        };

        let kind = RESERVED_LOOKUP
            .get(value)
            .copied()
            .unwrap_or(TokenKind::Ident);

        self.skip_chars(value.len());
        self.push(MK_TOKEN!(kind, String::from(value), location));
    }

    fn scan_number(&mut self) {
        let location = self.current_location();
        let Some(m) = NUMBER.find(self.remainder()) else {
            return;
        };

        let mut value = m.as_str();
        // `1..2` is an integer followed by a range, not `1.` followed by `.2`
        if value.ends_with('.') && self.remainder()[value.len()..].starts_with('.') {
            value = &value[..value.len() - 1];
        }

        let kind = if value.contains('.') || value.contains('e') {
            TokenKind::DoubleL
        } else {
            TokenKind::IntL
        };

        self.skip_chars(value.len());
        self.push(MK_TOKEN!(kind, String::from(value), location));
    }

    fn scan_string(&mut self) -> Result<(), Error> {
        let location = self.current_location();
        let mut value = Vec::new();

        self.get_char();
        while self.peek_char(0) != b'\0' && self.peek_char(0) != b'\'' {
            if self.peek_char(0) == b'\\' && self.peek_char(1) != b'\0' {
                self.get_char();
                value.push(unescape(self.get_char()));
            } else {
                value.push(self.get_char());
            }
        }

        if self.peek_char(0) != b'\'' {
            return MK_ERROR!(ErrorImpl::UnexpectedEndOfFile, self.current_location());
        }

        self.get_char();
        let value = String::from_utf8_lossy(&value).into_owned();
        self.push(MK_TOKEN!(TokenKind::StringL, value, location));
        Ok(())
    }

    fn scan_punctuator(&mut self) -> Result<(), Error> {
        let location = self.current_location();
        let remaining = self.remainder();

        let matched = PUNCTUATORS
            .iter()
            .find(|(text, _)| remaining.starts_with(text));

        match matched {
            Some((text, kind)) => {
                self.skip_chars(text.len());
                self.push(MK_TOKEN!(*kind, String::from(*text), location));
                Ok(())
            }
            None => {
                let token = remaining.chars().next().map(String::from).unwrap_or_default();
                MK_ERROR!(ErrorImpl::UndefinedToken { token }, location)
            }
        }
    }

    fn scan_impl(&mut self) -> Result<(), Error> {
        loop {
            self.skip_trivia();
            if self.at_eof() {
                break;
            }

            let ch = self.peek_char(0);
            if ch.is_ascii_alphabetic() || ch == b'_' {
                self.scan_ident();
            } else if ch.is_ascii_digit() {
                self.scan_number();
            } else if ch == b'\'' {
                self.scan_string()?;
            } else {
                self.scan_punctuator()?;
            }
        }

        self.tokens.set_end(self.current_location());
        Ok(())
    }
}

fn unescape(ch: u8) -> u8 {
    match ch {
        b'n' => b'\n',
        b't' => b'\t',
        b'r' => b'\r',
        b'\\' => b'\\',
        b'\'' => b'\'',
        other => other,
    }
}

/// Scans `source` into `tokens`, which is cleared first. On error the tokens
/// scanned before the failure are left in place for diagnostics dumps.
pub fn scan_into(source: &str, tokens: &mut TokenList) -> Result<(), Error> {
    tokens.clear();
    let result = Lexer::new(source, tokens).scan_impl();

    match &result {
        Ok(()) => debug!(tokens = tokens.len(), "scanned source"),
        Err(error) => debug!(%error, "scan failed"),
    }

    result
}

/// Converts source text into a token sequence or the first scan error.
pub fn tokenize(source: &str) -> Result<TokenList, Error> {
    let mut tokens = TokenList::new();
    scan_into(source, &mut tokens)?;
    Ok(tokens)
}
