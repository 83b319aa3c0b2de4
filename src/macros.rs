//! Utility macros for the front end.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_ERROR!` - Creates an `Err(Error)` from an `ErrorImpl` variant and a location

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's text
/// * `$location` - Where the token starts
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::IntL, "42".to_string(), location);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $location:expr) => {
        Token {
            kind: $kind,
            value: $value,
            location: $location,
        }
    };
}

/// Creates an `Err` carrying a located `Error`.
///
/// ```ignore
/// return MK_ERROR!(ErrorImpl::UnexpectedEndOfFile, location);
/// ```
#[macro_export]
macro_rules! MK_ERROR {
    ($error:expr, $location:expr) => {
        Err($crate::errors::errors::Error::new($error, $location))
    };
}
