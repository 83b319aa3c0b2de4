use std::{fmt::Display, slice::Iter};

use crate::{lexer::tokens::TokenKind, Span};

use super::{
    expressions::{
        BinaryExpr, CallExpr, DoubleLitExpr, IntLitExpr, LoadExpr, StringLitExpr, UnaryExpr,
    },
    statements::{
        Block, ForStmt, IfStmt, NativeCallStmt, PrintStmt, ReturnStmt, StoreStmt, WhileStmt,
    },
};

/// Value types of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Invalid,
    Double,
    Int,
    String,
    Void,
}

impl Type {
    /// Maps a type keyword to its type, `None` for anything else.
    pub fn from_token(kind: TokenKind) -> Option<Type> {
        match kind {
            TokenKind::DoubleT => Some(Type::Double),
            TokenKind::IntT => Some(Type::Int),
            TokenKind::StringT => Some(Type::String),
            TokenKind::VoidT => Some(Type::Void),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Type::Invalid => "<invalid>",
            Type::Double => "double",
            Type::Int => "int",
            Type::String => "string",
            Type::Void => "void",
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

pub type Parameter = (Type, String);

/// Return type, name and parameter list of a function.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    return_type: Type,
    name: String,
    params: Vec<Parameter>,
}

impl Signature {
    pub fn new(return_type: Type, name: impl Into<String>) -> Self {
        Signature {
            return_type,
            name: name.into(),
            params: Vec::new(),
        }
    }

    pub fn push(&mut self, param: Parameter) {
        self.params.push(param);
    }

    pub fn return_type(&self) -> Type {
        self.return_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters_number(&self) -> usize {
        self.params.len()
    }

    pub fn at(&self, index: usize) -> Option<&Parameter> {
        self.params.get(index)
    }

    pub fn iter(&self) -> Iter<'_, Parameter> {
        self.params.iter()
    }
}

/// Node kinds, one per variant of [`Node`].
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum NodeType {
    IntLit,
    DoubleLit,
    StringLit,
    Load,
    Store,
    Unary,
    Binary,
    Call,
    Print,
    NativeCall,
    Block,
    If,
    While,
    For,
    Return,
}

/// Every node of the tree. Each variant owns its children; declarations are
/// referred to by handle into the program's [`Scopes`](super::scope::Scopes).
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    IntLit(IntLitExpr),
    DoubleLit(DoubleLitExpr),
    StringLit(StringLitExpr),
    Load(LoadExpr),
    Store(StoreStmt),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Call(CallExpr),
    Print(PrintStmt),
    NativeCall(NativeCallStmt),
    Block(Block),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Return(ReturnStmt),
}

impl Node {
    pub fn get_node_type(&self) -> NodeType {
        match self {
            Node::IntLit(_) => NodeType::IntLit,
            Node::DoubleLit(_) => NodeType::DoubleLit,
            Node::StringLit(_) => NodeType::StringLit,
            Node::Load(_) => NodeType::Load,
            Node::Store(_) => NodeType::Store,
            Node::Unary(_) => NodeType::Unary,
            Node::Binary(_) => NodeType::Binary,
            Node::Call(_) => NodeType::Call,
            Node::Print(_) => NodeType::Print,
            Node::NativeCall(_) => NodeType::NativeCall,
            Node::Block(_) => NodeType::Block,
            Node::If(_) => NodeType::If,
            Node::While(_) => NodeType::While,
            Node::For(_) => NodeType::For,
            Node::Return(_) => NodeType::Return,
        }
    }

    pub fn get_span(&self) -> Span {
        match self {
            Node::IntLit(node) => node.span,
            Node::DoubleLit(node) => node.span,
            Node::StringLit(node) => node.span,
            Node::Load(node) => node.span,
            Node::Store(node) => node.span,
            Node::Unary(node) => node.span,
            Node::Binary(node) => node.span,
            Node::Call(node) => node.span,
            Node::Print(node) => node.span,
            Node::NativeCall(node) => node.span,
            Node::Block(node) => node.span,
            Node::If(node) => node.span,
            Node::While(node) => node.span,
            Node::For(node) => node.span,
            Node::Return(node) => node.span,
        }
    }
}
