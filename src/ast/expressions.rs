use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{
    ast::Node,
    scope::{FunctionId, VariableId},
};

pub const BINARY_OPERATORS: &[TokenKind] = &[
    TokenKind::Lor,
    TokenKind::Land,
    TokenKind::Eq,
    TokenKind::Neq,
    TokenKind::Ge,
    TokenKind::Le,
    TokenKind::Aor,
    TokenKind::Aand,
    TokenKind::Axor,
    TokenKind::Gt,
    TokenKind::Lt,
    TokenKind::Add,
    TokenKind::Sub,
    TokenKind::Mul,
    TokenKind::Div,
    TokenKind::Mod,
];

pub const UNARY_OPERATORS: &[TokenKind] = &[TokenKind::LNot, TokenKind::Sub];

#[derive(Debug, Clone, PartialEq)]
pub struct IntLitExpr {
    pub value: i64,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoubleLitExpr {
    pub value: f64,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringLitExpr {
    pub value: String,
    pub span: Span,
}

/// Read of a variable.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadExpr {
    pub variable: VariableId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    operator: TokenKind,
    operand: Box<Node>,
    pub span: Span,
}

impl UnaryExpr {
    /// Fails unless `operator` is `!` or `-`.
    pub fn new(operator: TokenKind, operand: Node, span: Span) -> Result<Self, Error> {
        if !UNARY_OPERATORS.contains(&operator) {
            return Err(Error::new(
                ErrorImpl::IllegalOperator {
                    operator: operator.text().to_string(),
                    arity: "unary",
                },
                span.start,
            ));
        }

        Ok(UnaryExpr {
            operator,
            operand: Box::new(operand),
            span,
        })
    }

    pub fn operator(&self) -> TokenKind {
        self.operator
    }

    pub fn operand(&self) -> &Node {
        &self.operand
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    operator: TokenKind,
    left: Box<Node>,
    right: Box<Node>,
    pub span: Span,
}

impl BinaryExpr {
    /// Fails unless `operator` is one of [`BINARY_OPERATORS`].
    pub fn new(operator: TokenKind, left: Node, right: Node, span: Span) -> Result<Self, Error> {
        if !BINARY_OPERATORS.contains(&operator) {
            return Err(Error::new(
                ErrorImpl::IllegalOperator {
                    operator: operator.text().to_string(),
                    arity: "binary",
                },
                span.start,
            ));
        }

        Ok(BinaryExpr {
            operator,
            left: Box::new(left),
            right: Box::new(right),
            span,
        })
    }

    pub fn operator(&self) -> TokenKind {
        self.operator
    }

    pub fn left(&self) -> &Node {
        &self.left
    }

    pub fn right(&self) -> &Node {
        &self.right
    }
}

/// Call by name. `function` is the declaration visible at the call site, if
/// any was in scope when the call was parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub name: String,
    pub function: Option<FunctionId>,
    pub arguments: Vec<Node>,
    pub span: Span,
}
