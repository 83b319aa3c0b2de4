use crate::{
    ast::{
        ast::{Node, Signature, Type},
        program::TOP_LEVEL_NAME,
        scope::{Function, FunctionId, Variable, VariableId},
        statements::{
            Block, ForStmt, IfStmt, NativeCallStmt, PrintStmt, ReturnStmt, StoreStmt, WhileStmt,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Location, Span, MK_ERROR,
};

use super::{expr::parse_expr, parser::Parser};

/// Parses the whole token sequence as the body of the synthetic `_start`
/// function, whose block uses the root scope.
pub fn parse_toplevel(parser: &mut Parser) -> Result<FunctionId, Error> {
    let root = parser.current_scope();
    let start = parser.location();
    let mut body = Block::new(root, Span::at(start));

    while parser.peek(0) != TokenKind::Eof {
        if parser.ensure(TokenKind::Semi) {
            continue;
        }

        if let Some(node) = parse_stmt(parser)? {
            body.push(node);
        }
    }
    body.span.finish = parser.location();

    let span = body.span;
    let signature = Signature::new(Type::Void, TOP_LEVEL_NAME);
    Ok(parser
        .scopes_mut()
        .add_function(Function::new(signature, root, root, body, span)))
}

/// Parses one statement. Function declarations are recorded in the current
/// scope and produce no node.
pub fn parse_stmt(parser: &mut Parser) -> Result<Option<Node>, Error> {
    let node = match parser.peek(0) {
        TokenKind::Function => {
            parse_function_decl(parser)?;
            return Ok(None);
        }
        TokenKind::LBrace => Node::Block(parse_block(parser)?),
        TokenKind::If => parse_if_stmt(parser)?,
        TokenKind::While => parse_while_stmt(parser)?,
        TokenKind::For => parse_for_stmt(parser)?,
        TokenKind::IntT | TokenKind::DoubleT | TokenKind::StringT | TokenKind::VoidT => {
            terminated(parser, parse_var_decl_stmt)?
        }
        TokenKind::Print => terminated(parser, parse_print_stmt)?,
        TokenKind::Return => terminated(parser, parse_return_stmt)?,
        TokenKind::Ident if parser.peek(1).is_assignment() => {
            terminated(parser, parse_assignment_stmt)?
        }
        kind if kind.is_keyword() => {
            return MK_ERROR!(
                ErrorImpl::UnexpectedToken {
                    token: parser.current_token().to_string(),
                },
                parser.location()
            );
        }
        _ => terminated(parser, parse_expr)?,
    };

    Ok(Some(node))
}

fn terminated(
    parser: &mut Parser,
    parse: fn(&mut Parser) -> Result<Node, Error>,
) -> Result<Node, Error> {
    let node = parse(parser)?;
    parser.expect(TokenKind::Semi, ";")?;
    Ok(node)
}

/// `{ statement* }` in a new child scope.
pub fn parse_block(parser: &mut Parser) -> Result<Block, Error> {
    parser.nested(|parser| {
        let start = parser.expect(TokenKind::LBrace, "{")?.location;

        parser.scoped(|parser| {
            let mut block = Block::new(parser.current_scope(), Span::at(start));

            loop {
                match parser.peek(0) {
                    TokenKind::RBrace => {
                        block.span.finish = parser.advance().location;
                        return Ok(block);
                    }
                    TokenKind::Eof => return MK_ERROR!(ErrorImpl::expected("}"), parser.location()),
                    TokenKind::Semi => {
                        parser.advance();
                    }
                    _ => {
                        if let Some(node) = parse_stmt(parser)? {
                            block.push(node);
                        }
                    }
                }
            }
        })
    })
}

fn parse_type(token: &Token, allow_void: bool) -> Result<Type, Error> {
    match Type::from_token(token.kind) {
        Some(Type::Void) if !allow_void => {}
        Some(ty) => return Ok(ty),
        None => {}
    }

    MK_ERROR!(
        ErrorImpl::TypeExpected {
            token: token.to_string(),
        },
        token.location
    )
}

fn define_variable(parser: &mut Parser, ty: Type, name: &Token) -> Result<VariableId, Error> {
    let scope = parser.current_scope();
    let variable = Variable::new(ty, name.value.clone(), scope, name.location);

    match parser.scopes_mut().define_variable(scope, variable, false) {
        Ok(id) => Ok(id),
        Err(_) => MK_ERROR!(
            ErrorImpl::VariableAlreadyDefined {
                variable: name.value.clone(),
            },
            name.location
        ),
    }
}

/// `function type name(params) { ... }` or
/// `function type name(params) native 'symbol';`.
///
/// Parameters are declared in their own scope; the body's scope is a child of
/// it. The function is visible by name before its body is parsed.
pub fn parse_function_decl(parser: &mut Parser) -> Result<FunctionId, Error> {
    let start = parser.expect(TokenKind::Function, "function")?.location;

    let return_token = parser.advance().clone();
    let return_type = parse_type(&return_token, true)?;
    let name = parser.expect(TokenKind::Ident, "identifier")?;
    parser.expect(TokenKind::LParen, "(")?;

    let mut signature = Signature::new(return_type, name.value.clone());
    let mut params = Vec::new();
    while !parser.ensure(TokenKind::RParen) {
        let param_type = parse_type(&parser.advance().clone(), false)?;
        let param_name = parser.expect(TokenKind::Ident, "identifier")?;
        signature.push((param_type, param_name.value.clone()));
        params.push((param_type, param_name));

        if !parser.ensure(TokenKind::Comma) && parser.peek(0) != TokenKind::RParen {
            return MK_ERROR!(ErrorImpl::expected(", or )"), parser.location());
        }
    }

    let owner = parser.current_scope();
    parser.scoped(|parser| {
        let params_scope = parser.current_scope();
        for (ty, name) in &params {
            define_variable(parser, *ty, name)?;
        }

        let placeholder = Block::new(params_scope, Span::at(start));
        let function = Function::new(
            signature.clone(),
            owner,
            params_scope,
            placeholder,
            Span::at(start),
        );
        let id = match parser.scopes_mut().define_function(owner, function, false) {
            Ok(id) => id,
            Err(_) => {
                return MK_ERROR!(
                    ErrorImpl::FunctionAlreadyDefined {
                        function: name.value.clone(),
                    },
                    name.location
                )
            }
        };

        let body = if parser.peek(0) == TokenKind::Native {
            parse_native_body(parser, signature)?
        } else {
            parse_block(parser)?
        };

        let span = Span::new(start, body.span.finish);
        parser.scopes_mut().function_mut(id).set_body(body, span);
        Ok(id)
    })
}

fn parse_native_body(parser: &mut Parser, signature: Signature) -> Result<Block, Error> {
    let start = parser.expect(TokenKind::Native, "native")?.location;
    let symbol = parser.expect(TokenKind::StringL, "native symbol")?;
    let finish = parser.expect(TokenKind::Semi, ";")?.location;

    parser.scoped(|parser| {
        let span = Span::new(start, finish);
        let mut block = Block::new(parser.current_scope(), span);
        block.push(Node::NativeCall(NativeCallStmt {
            signature,
            symbol: symbol.value,
            span,
        }));
        Ok(block)
    })
}

/// `type name = expr`. The name is declared once the initializer is parsed,
/// so the initializer cannot refer to it.
pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let type_token = parser.advance().clone();
    let ty = parse_type(&type_token, false)?;
    let name = parser.expect(TokenKind::Ident, "identifier")?;
    parser.expect(TokenKind::Assign, "=")?;

    let value = parse_expr(parser)?;
    let span = Span::new(type_token.location, value.get_span().finish);
    let variable = define_variable(parser, ty, &name)?;

    Ok(Node::Store(StoreStmt::declaration(variable, value, span)))
}

/// `name (= | += | -=) expr` on a variable visible from the current scope.
pub fn parse_assignment_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let name = parser.expect(TokenKind::Ident, "identifier")?;
    let variable = match parser.scopes().lookup_variable(parser.current_scope(), &name.value) {
        Some(variable) => variable,
        None => {
            return MK_ERROR!(
                ErrorImpl::UnknownVariable {
                    variable: name.value,
                },
                name.location
            )
        }
    };

    let operator = parser.advance().kind;
    let value = parse_expr(parser)?;
    let span = Span::new(name.location, value.get_span().finish);

    Ok(Node::Store(StoreStmt::new(variable, operator, value, span)?))
}

fn parse_condition(parser: &mut Parser) -> Result<Node, Error> {
    parser.expect(TokenKind::LParen, "(")?;
    let condition = parse_expr(parser)?;
    parser.expect(TokenKind::RParen, ")")?;
    Ok(condition)
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.expect(TokenKind::If, "if")?.location;
    let condition = parse_condition(parser)?;
    let then_body = parse_block(parser)?;

    let else_body = if parser.ensure(TokenKind::Else) {
        Some(parse_block(parser)?)
    } else {
        None
    };

    let finish = else_body
        .as_ref()
        .map_or(then_body.span.finish, |body| body.span.finish);

    Ok(Node::If(IfStmt {
        condition: Box::new(condition),
        then_body,
        else_body,
        span: Span::new(start, finish),
    }))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.expect(TokenKind::While, "while")?.location;
    let condition = parse_condition(parser)?;
    let body = parse_block(parser)?;

    Ok(Node::While(WhileStmt {
        condition: Box::new(condition),
        span: Span::new(start, body.span.finish),
        body,
    }))
}

/// `for (name in expr) { ... }`. The loop variable is not declared here; it
/// must already be visible from the enclosing scope.
pub fn parse_for_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.expect(TokenKind::For, "for")?.location;
    parser.expect(TokenKind::LParen, "(")?;

    let name = parser.expect(TokenKind::Ident, "identifier")?;
    let variable = match parser.scopes().lookup_variable(parser.current_scope(), &name.value) {
        Some(variable) => variable,
        None => {
            return MK_ERROR!(
                ErrorImpl::UnknownVariable {
                    variable: name.value,
                },
                name.location
            )
        }
    };

    parser.expect(TokenKind::In, "in")?;
    let range = parse_expr(parser)?;
    parser.expect(TokenKind::RParen, ")")?;
    let body = parse_block(parser)?;

    Ok(Node::For(ForStmt {
        variable,
        range: Box::new(range),
        span: Span::new(start, body.span.finish),
        body,
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.expect(TokenKind::Return, "return")?.location;

    if parser.peek(0) == TokenKind::Semi {
        return Ok(Node::Return(ReturnStmt {
            value: None,
            span: Span::at(start),
        }));
    }

    let value = parse_expr(parser)?;
    Ok(Node::Return(ReturnStmt {
        span: Span::new(start, value.get_span().finish),
        value: Some(Box::new(value)),
    }))
}

pub fn parse_print_stmt(parser: &mut Parser) -> Result<Node, Error> {
    let start = parser.expect(TokenKind::Print, "print")?.location;
    parser.expect(TokenKind::LParen, "(")?;

    let (arguments, finish) = parse_arguments(parser)?;
    Ok(Node::Print(PrintStmt {
        arguments,
        span: Span::new(start, finish),
    }))
}

/// Comma separated expressions up to and including the closing `)`. Returns
/// them with the location of the `)`.
pub fn parse_arguments(parser: &mut Parser) -> Result<(Vec<Node>, Location), Error> {
    let mut arguments = Vec::new();

    loop {
        let location = parser.location();
        if parser.ensure(TokenKind::RParen) {
            return Ok((arguments, location));
        }

        arguments.push(parse_expr(parser)?);

        if !parser.ensure(TokenKind::Comma) && parser.peek(0) != TokenKind::RParen {
            return MK_ERROR!(ErrorImpl::expected(", or )"), parser.location());
        }
    }
}
