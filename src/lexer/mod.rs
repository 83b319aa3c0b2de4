//! Lexical analysis module.
//!
//! This module contains the scanner that converts source text into a
//! sequence of tokens for parsing. It handles:
//!
//! - Keywords, identifiers, numeric and string literals
//! - Longest-match recognition of punctuators
//! - Line/offset tracking for error reporting
//! - Comments and whitespace

pub mod lexer;
pub mod token_list;
pub mod tokens;
