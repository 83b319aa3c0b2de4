//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a token sequence into a
//! scope-resolved tree. It uses precedence climbing for expressions and
//! handles:
//!
//! - Statement parsing (declarations, functions, control flow)
//! - Expression parsing (binary and unary operators, calls, literals)
//! - Name resolution against the enclosing scope chain
//! - A nesting-depth guard for deeply nested input
//!
//! Parsing stops at the first error; no recovery is attempted.

pub mod config;
pub mod expr;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
