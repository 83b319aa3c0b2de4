use std::fmt::Display;

use thiserror::Error;

use crate::Location;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    location: Location,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, location: Location) -> Self {
        Error {
            internal_error: error_impl,
            location,
        }
    }

    pub fn get_location(&self) -> Location {
        self.location
    }

    pub fn get_error_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UndefinedToken { .. } => "UndefinedToken",
            ErrorImpl::UnexpectedEndOfFile => "UnexpectedEndOfFile",
            ErrorImpl::Expected { .. } => "Expected",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::IntegerLiteral { .. } => "IntegerLiteral",
            ErrorImpl::DoubleLiteral { .. } => "DoubleLiteral",
            ErrorImpl::UnknownVariable { .. } => "UnknownVariable",
            ErrorImpl::VariableAlreadyDefined { .. } => "VariableAlreadyDefined",
            ErrorImpl::FunctionAlreadyDefined { .. } => "FunctionAlreadyDefined",
            ErrorImpl::TypeExpected { .. } => "TypeExpected",
            ErrorImpl::IllegalOperator { .. } => "IllegalOperator",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
        }
    }

    /// The human readable message, without the location.
    pub fn message(&self) -> String {
        self.internal_error.to_string()
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.internal_error, self.location)
    }
}

impl std::error::Error for Error {}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("undefined token `{token}`")]
    UndefinedToken { token: String },
    #[error("unexpected end of file")]
    UnexpectedEndOfFile,
    #[error("{expected} expected")]
    Expected { expected: String },
    #[error("unexpected token `{token}`")]
    UnexpectedToken { token: String },
    #[error("integer literal expected, found `{literal}`")]
    IntegerLiteral { literal: String },
    #[error("double literal expected, found `{literal}`")]
    DoubleLiteral { literal: String },
    #[error("unknown variable {variable}")]
    UnknownVariable { variable: String },
    #[error("variable {variable} already defined")]
    VariableAlreadyDefined { variable: String },
    #[error("function {function} already defined")]
    FunctionAlreadyDefined { function: String },
    #[error("type expected, found `{token}`")]
    TypeExpected { token: String },
    #[error("illegal {arity} operator `{operator}`")]
    IllegalOperator {
        operator: String,
        arity: &'static str,
    },
    #[error("nesting deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}

impl ErrorImpl {
    pub fn expected(what: impl Into<String>) -> Self {
        ErrorImpl::Expected {
            expected: what.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusCode {
    Error,
    #[default]
    Success,
    Note,
    Warning,
}

/// Single-slot diagnostic. Setting a new diagnostic replaces the previous
/// one; there is no list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Status {
    code: StatusCode,
    message: String,
    location: Location,
}

impl Status {
    pub fn new(code: StatusCode, message: impl Into<String>, location: Location) -> Self {
        Status {
            code,
            message: message.into(),
            location,
        }
    }

    pub fn code(&self) -> StatusCode {
        self.code
    }

    pub fn set_code(&mut self, code: StatusCode) {
        self.code = code;
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn set_location(&mut self, location: Location) {
        self.location = location;
    }

    pub fn is_ok(&self) -> bool {
        self.code != StatusCode::Error
    }

    pub fn swap(&mut self, other: &mut Status) {
        std::mem::swap(self, other);
    }
}

impl From<Error> for Status {
    fn from(error: Error) -> Self {
        Status::new(StatusCode::Error, error.message(), error.get_location())
    }
}

impl From<&Error> for Status {
    fn from(error: &Error) -> Self {
        Status::new(StatusCode::Error, error.message(), error.get_location())
    }
}
