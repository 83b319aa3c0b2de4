use std::slice::Iter;

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{
    ast::{Node, Signature},
    scope::{ScopeId, VariableId},
};

/// Statement list together with the scope it introduced.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub scope: ScopeId,
    pub body: Vec<Node>,
    pub span: Span,
}

impl Block {
    pub fn new(scope: ScopeId, span: Span) -> Self {
        Block {
            scope,
            body: Vec::new(),
            span,
        }
    }

    pub fn push(&mut self, node: Node) {
        self.body.push(node);
    }

    pub fn iter(&self) -> Iter<'_, Node> {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Write of a variable, either a declaration's initializer or an assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreStmt {
    variable: VariableId,
    operator: TokenKind,
    value: Box<Node>,
    declares: bool,
    pub span: Span,
}

impl StoreStmt {
    /// Fails unless `operator` is `=`, `+=` or `-=`.
    pub fn new(
        variable: VariableId,
        operator: TokenKind,
        value: Node,
        span: Span,
    ) -> Result<Self, Error> {
        if !operator.is_assignment() {
            return Err(Error::new(
                ErrorImpl::IllegalOperator {
                    operator: operator.text().to_string(),
                    arity: "assignment",
                },
                span.start,
            ));
        }

        Ok(StoreStmt {
            variable,
            operator,
            value: Box::new(value),
            declares: false,
            span,
        })
    }

    /// Initializer of `type name = value`, which also introduces `variable`.
    pub fn declaration(variable: VariableId, value: Node, span: Span) -> Self {
        StoreStmt {
            variable,
            operator: TokenKind::Assign,
            value: Box::new(value),
            declares: true,
            span,
        }
    }

    pub fn variable(&self) -> VariableId {
        self.variable
    }

    pub fn operator(&self) -> TokenKind {
        self.operator
    }

    pub fn value(&self) -> &Node {
        &self.value
    }

    /// Whether this store is the declaration of its variable.
    pub fn declares(&self) -> bool {
        self.declares
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrintStmt {
    pub arguments: Vec<Node>,
    pub span: Span,
}

/// Body of a `native` function: a call into the host symbol `symbol`.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeCallStmt {
    pub signature: Signature,
    pub symbol: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Box<Node>,
    pub then_body: Block,
    pub else_body: Option<Block>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Box<Node>,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub variable: VariableId,
    pub range: Box<Node>,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Option<Box<Node>>,
    pub span: Span,
}
