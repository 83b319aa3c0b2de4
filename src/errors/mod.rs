//! Error types and diagnostics for the front end.
//!
//! This module defines:
//!
//! - `Error`, a structured failure (`ErrorImpl`) paired with its source location
//! - `Status`, the single-slot diagnostic handed to callers that want a
//!   code/message/location triple instead of a `Result`

pub mod errors;
