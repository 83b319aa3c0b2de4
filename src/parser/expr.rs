use crate::{
    ast::{
        ast::Node,
        expressions::{
            BinaryExpr, CallExpr, DoubleLitExpr, IntLitExpr, LoadExpr, StringLitExpr, UnaryExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span, MK_ERROR,
};

use super::{parser::Parser, stmt::parse_arguments};

/// Lowest binding power of any binary operator.
const MIN_PRECEDENCE: u8 = 1;

pub fn parse_expr(parser: &mut Parser) -> Result<Node, Error> {
    parse_binary_expr(parser, MIN_PRECEDENCE)
}

/// Precedence climbing. Operators binding at least as tightly as `min` are
/// folded into the left operand; the right operand is parsed one level
/// tighter, which keeps equal-precedence chains left-associative.
pub fn parse_binary_expr(parser: &mut Parser, min: u8) -> Result<Node, Error> {
    parser.nested(|parser| {
        let mut left = parse_unary_expr(parser)?;

        loop {
            let kind = parser.peek(0);
            let power = kind.precedence();
            if !kind.is_binary() || power < min {
                return Ok(left);
            }

            let operator = parser.advance().clone();
            let right = parse_binary_expr(parser, power + 1)?;
            let span = Span::new(left.get_span().start, right.get_span().finish);

            let binary = BinaryExpr::new(operator.kind, left, right, span)
                .map_err(|error| Error::new(error.get_error_impl().clone(), operator.location))?;
            left = Node::Binary(binary);
        }
    })
}

pub fn parse_unary_expr(parser: &mut Parser) -> Result<Node, Error> {
    match parser.peek(0) {
        kind if kind.is_unary() => parser.nested(|parser| {
            let operator = parser.advance().clone();
            let operand = parse_unary_expr(parser)?;
            let span = Span::new(operator.location, operand.get_span().finish);
            Ok(Node::Unary(UnaryExpr::new(operator.kind, operand, span)?))
        }),
        TokenKind::Ident if parser.peek(1) == TokenKind::LParen => parse_call_expr(parser),
        TokenKind::Ident => parse_load_expr(parser),
        TokenKind::IntL => parse_int_expr(parser),
        TokenKind::DoubleL => parse_double_expr(parser),
        TokenKind::StringL => {
            let token = parser.advance().clone();
            Ok(Node::StringLit(StringLitExpr {
                value: token.value,
                span: Span::at(token.location),
            }))
        }
        TokenKind::LParen => {
            parser.advance();
            let expr = parse_expr(parser)?;
            parser.expect(TokenKind::RParen, ")")?;
            Ok(expr)
        }
        TokenKind::Eof => MK_ERROR!(ErrorImpl::UnexpectedEndOfFile, parser.location()),
        _ => MK_ERROR!(
            ErrorImpl::UnexpectedToken {
                token: parser.current_token().to_string(),
            },
            parser.location()
        ),
    }
}

/// `name(args)`. The callee is resolved through the scope chain when a
/// declaration is visible; otherwise the call is left unresolved.
pub fn parse_call_expr(parser: &mut Parser) -> Result<Node, Error> {
    let name = parser.expect(TokenKind::Ident, "identifier")?;
    parser.expect(TokenKind::LParen, "(")?;

    let function = parser
        .scopes()
        .lookup_function(parser.current_scope(), &name.value);
    let (arguments, finish) = parse_arguments(parser)?;

    Ok(Node::Call(CallExpr {
        name: name.value,
        function,
        arguments,
        span: Span::new(name.location, finish),
    }))
}

pub fn parse_load_expr(parser: &mut Parser) -> Result<Node, Error> {
    let name = parser.expect(TokenKind::Ident, "identifier")?;

    match parser.scopes().lookup_variable(parser.current_scope(), &name.value) {
        Some(variable) => Ok(Node::Load(LoadExpr {
            variable,
            span: Span::at(name.location),
        })),
        None => MK_ERROR!(
            ErrorImpl::UnknownVariable {
                variable: name.value,
            },
            name.location
        ),
    }
}

/// Integer literals are 64-bit signed; text that does not convert whole,
/// overflow included, is an error at the literal.
pub fn parse_int_expr(parser: &mut Parser) -> Result<Node, Error> {
    let token = parser.expect(TokenKind::IntL, "integer literal")?;

    match token.value.parse::<i64>() {
        Ok(value) => Ok(Node::IntLit(IntLitExpr {
            value,
            span: Span::at(token.location),
        })),
        Err(_) => MK_ERROR!(
            ErrorImpl::IntegerLiteral {
                literal: token.value,
            },
            token.location
        ),
    }
}

pub fn parse_double_expr(parser: &mut Parser) -> Result<Node, Error> {
    let token = parser.expect(TokenKind::DoubleL, "double literal")?;

    match token.value.parse::<f64>() {
        Ok(value) => Ok(Node::DoubleLit(DoubleLitExpr {
            value,
            span: Span::at(token.location),
        })),
        Err(_) => MK_ERROR!(
            ErrorImpl::DoubleLiteral {
                literal: token.value,
            },
            token.location
        ),
    }
}
