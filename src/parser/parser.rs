//! Parser state and entry points.
//!
//! The [`Parser`] owns the token sequence of the current parse, a cursor into
//! it, the scope arena being filled and a cursor into the scope chain. The
//! `parse_*` functions in the sibling modules drive it through the small
//! lookahead/consume API below.

use tracing::{debug, trace};

use crate::{
    ast::{
        program::Program,
        scope::{ScopeId, Scopes},
    },
    errors::errors::{Error, ErrorImpl, Status},
    lexer::{
        lexer::scan_into,
        token_list::TokenList,
        tokens::{Token, TokenKind},
    },
    Location, MK_ERROR,
};

use super::{config::ParserConfig, stmt::parse_toplevel};

/// The main parser structure that maintains parsing state.
///
/// A parser can be reused for any number of sequential parses; each call to
/// [`Parser::parse`] starts from a clean state.
pub struct Parser {
    /// Tokens of the current source
    tokens: TokenList,
    /// Index of the next unconsumed token
    pos: usize,
    /// Declarations of the current parse
    scopes: Scopes,
    /// Innermost open scope
    scope: ScopeId,
    /// Open blocks and sub-expressions
    depth: usize,
    config: ParserConfig,
}

impl Default for Parser {
    fn default() -> Self {
        Parser::with_config(ParserConfig::default())
    }
}

impl Parser {
    pub fn new() -> Self {
        Parser::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        let mut scopes = Scopes::new();
        let scope = scopes.push_scope(None);

        Parser {
            tokens: TokenList::new(),
            pos: 0,
            scopes,
            scope,
            depth: 0,
            config,
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Tokens of the last source handed to [`Parser::parse`].
    pub fn tokens(&self) -> &TokenList {
        &self.tokens
    }

    /// Resets the token buffer, the token cursor and the scope cursor.
    pub fn clear(&mut self) {
        self.tokens.clear();
        self.pos = 0;
        self.depth = 0;
        self.reset_scopes();
    }

    fn reset_scopes(&mut self) -> Scopes {
        let mut fresh = Scopes::new();
        self.scope = fresh.push_scope(None);
        std::mem::replace(&mut self.scopes, fresh)
    }

    /// Kind of the token `offset` places past the cursor. Past the end this
    /// is `eof` and then `undef`; it never fails.
    pub fn peek(&self, offset: usize) -> TokenKind {
        self.tokens.kind_at(self.pos + offset)
    }

    pub fn current_token(&self) -> &Token {
        self.tokens.at(self.pos)
    }

    /// Location of the token under the cursor.
    pub fn location(&self) -> Location {
        self.tokens.location_at(self.pos)
    }

    /// Consumes the token under the cursor and returns it.
    pub fn advance(&mut self) -> &Token {
        self.pos += 1;
        self.tokens.at(self.pos - 1)
    }

    /// Consumes the current token if it is of `kind`.
    pub fn ensure(&mut self, kind: TokenKind) -> bool {
        if self.peek(0) == kind {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consumes a token of `kind`, failing with "`what` expected" at the
    /// current location otherwise.
    pub fn expect(&mut self, kind: TokenKind, what: &str) -> Result<Token, Error> {
        if self.peek(0) != kind {
            return MK_ERROR!(ErrorImpl::expected(what), self.location());
        }

        Ok(self.advance().clone())
    }

    pub fn current_scope(&self) -> ScopeId {
        self.scope
    }

    pub fn scopes(&self) -> &Scopes {
        &self.scopes
    }

    pub(super) fn scopes_mut(&mut self) -> &mut Scopes {
        &mut self.scopes
    }

    pub(super) fn push_scope(&mut self) -> ScopeId {
        self.scope = self.scopes.push_scope(Some(self.scope));
        self.scope
    }

    pub(super) fn pop_scope(&mut self) {
        if let Some(owner) = self.scopes.scope(self.scope).owner() {
            trace!(scope = ?self.scope, "scope closed");
            self.scope = owner;
        }
    }

    /// Runs `f` inside a new child scope. The scope is closed again whether
    /// or not `f` succeeds.
    pub(super) fn scoped<T>(
        &mut self,
        f: impl FnOnce(&mut Parser) -> Result<T, Error>,
    ) -> Result<T, Error> {
        self.push_scope();
        let result = f(self);
        self.pop_scope();
        result
    }

    /// Runs `f` one nesting level deeper, failing instead once the configured
    /// limit is reached.
    pub(super) fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Parser) -> Result<T, Error>,
    ) -> Result<T, Error> {
        if self.depth >= self.config.max_nesting_depth {
            return MK_ERROR!(
                ErrorImpl::NestingTooDeep {
                    limit: self.config.max_nesting_depth,
                },
                self.location()
            );
        }

        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Scans and parses `source` into a [`Program`].
    ///
    /// Returns the first scan or parse error. Nothing from a failed parse is
    /// kept apart from the tokens, which stay available through
    /// [`Parser::tokens`].
    pub fn parse(&mut self, source: &str) -> Result<Program, Error> {
        self.clear();
        scan_into(source, &mut self.tokens)?;

        let root = self.scope;
        match parse_toplevel(self) {
            Ok(top) => {
                let scopes = self.reset_scopes();
                debug!(
                    statements = scopes.function(top).body().len(),
                    scopes = scopes.scope_count(),
                    "parsed program"
                );
                Ok(Program::new(scopes, top, root))
            }
            Err(error) => {
                debug!(%error, "parse failed");
                self.reset_scopes();
                Err(error)
            }
        }
    }

    /// Like [`Parser::parse`], reporting the outcome through `status`
    /// instead. `status` is overwritten either way.
    pub fn parse_with_status(&mut self, source: &str, status: &mut Status) -> Option<Program> {
        match self.parse(source) {
            Ok(program) => {
                *status = Status::default();
                Some(program)
            }
            Err(error) => {
                *status = Status::from(error);
                None
            }
        }
    }
}

/// Parses `source` with a fresh default-configured parser.
pub fn parse(source: &str) -> Result<Program, Error> {
    Parser::new().parse(source)
}
