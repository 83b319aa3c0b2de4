//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the language constructs including:
//! - Variable declarations and assignments
//! - Function declarations, native functions and calls
//! - Operator precedence and associativity
//! - Control flow statements
//! - Scoping and name resolution
//! - Error reporting and parser reuse

use crate::{
    ast::{
        ast::{Node, NodeType, Type},
        printer::{print_node, print_program},
        program::{Program, TOP_LEVEL_NAME},
    },
    errors::errors::{Error, ErrorImpl, Status, StatusCode},
    Location,
};

use super::{
    config::ParserConfig,
    parser::{parse, Parser},
};

fn parse_ok(source: &str) -> Program {
    match parse(source) {
        Ok(program) => program,
        Err(error) => panic!("failed to parse {:?}: {}", source, error),
    }
}

fn parse_err(source: &str) -> Error {
    match parse(source) {
        Ok(_) => panic!("expected {:?} to fail", source),
        Err(error) => error,
    }
}

fn statements(program: &Program) -> &[Node] {
    &program.top_level().body().body
}

/// Renders the initializer of the single top-level declaration.
fn initializer(source: &str) -> String {
    let program = parse_ok(source);
    match statements(&program) {
        [Node::Store(store)] => print_node(&program, store.value()),
        other => panic!("expected one store, got {:?}", other),
    }
}

#[test]
fn test_parse_variable_declaration() {
    let program = parse_ok("int x = 5;");
    let body = statements(&program);
    assert_eq!(body.len(), 1);

    match &body[0] {
        Node::Store(store) => {
            assert!(matches!(store.value(), Node::IntLit(lit) if lit.value == 5));
            let variable = program.variable(store.variable());
            assert_eq!(variable.name(), "x");
            assert_eq!(variable.get_type(), Type::Int);
            assert_eq!(variable.owner(), program.root_scope());
            assert!(store.declares());
        }
        other => panic!("expected store, got {:?}", other),
    }
}

#[test]
fn test_parse_assignment_is_not_a_declaration() {
    let program = parse_ok("int x = 5; x += 1;");

    match &statements(&program)[1] {
        Node::Store(store) => assert!(!store.declares()),
        other => panic!("expected store, got {:?}", other),
    }
}

#[test]
fn test_parse_top_level_function() {
    let program = parse_ok("");
    let top = program.top_level();

    assert_eq!(top.name(), TOP_LEVEL_NAME);
    assert_eq!(top.signature().return_type(), Type::Void);
    assert_eq!(top.signature().parameters_number(), 0);
    assert_eq!(top.body().scope, program.root_scope());
    assert!(top.body().is_empty());
}

#[test]
fn test_parse_precedence() {
    assert_eq!(initializer("int r = 2 + 3 * 4;"), "(2 + (3 * 4))");
    assert_eq!(initializer("int r = 2 * 3 + 4;"), "((2 * 3) + 4)");
}

#[test]
fn test_parse_left_associativity() {
    assert_eq!(initializer("int r = 1 - 2 - 3;"), "((1 - 2) - 3)");
    assert_eq!(initializer("int r = 8 / 4 / 2;"), "((8 / 4) / 2)");
}

#[test]
fn test_parse_logical_and_comparison_levels() {
    assert_eq!(
        initializer("int r = 1 < 2 && 3 > 2 || 0;"),
        "(((1 < 2) && (3 > 2)) || 0)"
    );
    assert_eq!(initializer("int r = 1 + 1 == 2;"), "((1 + 1) == 2)");
}

#[test]
fn test_parse_bitwise_operators() {
    assert_eq!(initializer("int r = 1 | 2 & 3;"), "(1 | (2 & 3))");
}

#[test]
fn test_parse_unary_and_grouping() {
    assert_eq!(initializer("int r = -1 + !0;"), "(-1 + !0)");
    assert_eq!(initializer("int r = (2 + 3) * 4;"), "((2 + 3) * 4)");
    assert_eq!(initializer("int r = --1;"), "--1");
}

#[test]
fn test_parse_literals() {
    let program = parse_ok("double d = 1.5e-3; string s = 'hi\\n';");
    let body = statements(&program);

    match &body[0] {
        Node::Store(store) => {
            assert!(matches!(store.value(), Node::DoubleLit(lit) if lit.value == 1.5e-3))
        }
        other => panic!("expected store, got {:?}", other),
    }
    match &body[1] {
        Node::Store(store) => {
            assert!(matches!(store.value(), Node::StringLit(lit) if lit.value == "hi\n"))
        }
        other => panic!("expected store, got {:?}", other),
    }
}

#[test]
fn test_parse_while_loop() {
    let program = parse_ok("while (1) { print(1); }");
    let body = statements(&program);
    assert_eq!(body.len(), 1);

    match &body[0] {
        Node::While(stmt) => {
            assert!(matches!(*stmt.condition, Node::IntLit(ref lit) if lit.value == 1));
            assert_eq!(stmt.body.len(), 1);
            match &stmt.body.body[0] {
                Node::Print(print) => assert_eq!(print.arguments.len(), 1),
                other => panic!("expected print, got {:?}", other),
            }
        }
        other => panic!("expected while, got {:?}", other),
    }
}

#[test]
fn test_parse_if_else_statement() {
    let program = parse_ok("int x = 1; if (x > 0) { x = 2; } else { x -= 1; }");
    let body = statements(&program);

    match &body[1] {
        Node::If(stmt) => {
            assert_eq!(stmt.then_body.len(), 1);
            let else_body = stmt.else_body.as_ref().expect("else branch");
            match &else_body.body[0] {
                Node::Store(store) => assert_eq!(store.operator().text(), "-="),
                other => panic!("expected store, got {:?}", other),
            }
        }
        other => panic!("expected if, got {:?}", other),
    }
}

#[test]
fn test_parse_if_without_else() {
    let program = parse_ok("if (1) { print('yes'); }");
    assert!(matches!(&statements(&program)[0], Node::If(stmt) if stmt.else_body.is_none()));
}

#[test]
fn test_parse_for_loop_uses_declared_variable() {
    let program = parse_ok("int i = 0; int n = 10; for (i in n) { print(i); }");

    match &statements(&program)[2] {
        Node::For(stmt) => {
            assert_eq!(program.variable(stmt.variable).name(), "i");
            assert!(matches!(*stmt.range, Node::Load(_)));
            assert_eq!(stmt.body.len(), 1);
        }
        other => panic!("expected for, got {:?}", other),
    }
}

#[test]
fn test_parse_for_loop_unknown_variable() {
    let error = parse_err("for (j in 3) { }");
    assert_eq!(error.get_error_name(), "UnknownVariable");
    assert_eq!(error.get_location(), Location::new(0, 5));
}

#[test]
fn test_parse_assignment_to_unknown_variable() {
    let error = parse_err("x = 5;");
    assert_eq!(
        error.get_error_impl(),
        &ErrorImpl::UnknownVariable {
            variable: "x".to_string()
        }
    );
    assert!(error.message().contains('x'));
    assert_eq!(error.get_location(), Location::new(0, 0));
}

#[test]
fn test_parse_load_of_unknown_variable() {
    let error = parse_err("int y = 1;\n  y = z;");
    assert_eq!(error.message(), "unknown variable z");
    assert_eq!(error.get_location(), Location::new(1, 6));
}

#[test]
fn test_parse_initializer_cannot_see_its_variable() {
    let error = parse_err("int x = x;");
    assert_eq!(error.get_error_name(), "UnknownVariable");
    assert_eq!(error.get_location(), Location::new(0, 8));
}

#[test]
fn test_parse_truncated_expression() {
    let error = parse_err("1 + ");
    assert_eq!(error.get_error_impl(), &ErrorImpl::UnexpectedEndOfFile);
    assert_eq!(error.get_location(), Location::new(0, 4));
}

#[test]
fn test_parse_truncated_block() {
    let error = parse_err("while (1) { print(1);");
    assert_eq!(error.message(), "} expected");
}

#[test]
fn test_parse_missing_paren() {
    let error = parse_err("int x = (1 + 2;");
    assert_eq!(error.message(), ") expected");
    assert_eq!(error.get_location(), Location::new(0, 14));

    let error = parse_err("if 1 { }");
    assert_eq!(error.message(), "( expected");
}

#[test]
fn test_parse_missing_semicolon() {
    let error = parse_err("int x = 1 int y = 2;");
    assert_eq!(error.message(), "; expected");
    assert_eq!(error.get_location(), Location::new(0, 10));
}

#[test]
fn test_parse_skips_empty_statements() {
    let program = parse_ok(";; int x = 1;; { ; }");
    assert_eq!(statements(&program).len(), 2);
}

#[test]
fn test_parse_unexpected_keyword() {
    let error = parse_err("else { }");
    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(error.get_location(), Location::new(0, 0));
}

#[test]
fn test_parse_range_is_not_a_binary_operator() {
    let error = parse_err("int r = 1..5;");
    assert_eq!(error.message(), "illegal binary operator `..`");
    assert_eq!(error.get_location(), Location::new(0, 9));
}

#[test]
fn test_parse_integer_overflow() {
    let error = parse_err("int x = 99999999999999999999;");
    assert_eq!(error.get_error_name(), "IntegerLiteral");
    assert_eq!(error.get_location(), Location::new(0, 8));
}

#[test]
fn test_parse_malformed_double() {
    let error = parse_err("double d = 1e;");
    assert_eq!(error.get_error_name(), "DoubleLiteral");
}

#[test]
fn test_parse_scan_error_is_reported() {
    let error = parse_err("int x = #;");
    assert_eq!(error.get_error_name(), "UndefinedToken");
    assert_eq!(error.get_location(), Location::new(0, 8));
}

#[test]
fn test_parse_redefinition_in_same_scope() {
    let error = parse_err("int x = 1; int x = 2;");
    assert_eq!(error.get_error_name(), "VariableAlreadyDefined");
    assert_eq!(error.get_location(), Location::new(0, 15));

    let error = parse_err("function void f() { } function void f() { }");
    assert_eq!(error.get_error_name(), "FunctionAlreadyDefined");
}

#[test]
fn test_parse_block_shadowing() {
    let program = parse_ok("int x = 1; { string x = 'a'; print(x); } print(x);");
    let body = statements(&program);

    let loaded_type = |node: &Node| match node {
        Node::Print(print) => match &print.arguments[0] {
            Node::Load(load) => program.variable(load.variable).get_type(),
            other => panic!("expected load, got {:?}", other),
        },
        other => panic!("expected print, got {:?}", other),
    };

    match &body[1] {
        Node::Block(block) => {
            assert_eq!(loaded_type(&block.body[1]), Type::String);
            let scope = program.scopes().scope(block.scope);
            assert_eq!(scope.owner(), Some(program.root_scope()));
        }
        other => panic!("expected block, got {:?}", other),
    }
    assert_eq!(loaded_type(&body[2]), Type::Int);
}

#[test]
fn test_parse_block_variable_not_visible_after_close() {
    let error = parse_err("{ int inner = 1; } print(inner);");
    assert_eq!(error.message(), "unknown variable inner");
}

#[test]
fn test_parse_function_declaration() {
    let program = parse_ok("function int add(int a, int b) { return a + b; } print(add(1, 2));");
    let root = program.scopes().scope(program.root_scope());

    let id = root.get_function("add").expect("add is declared");
    let function = program.function(id);
    assert_eq!(function.signature().return_type(), Type::Int);
    assert_eq!(function.signature().parameters_number(), 2);
    assert_eq!(function.owner(), program.root_scope());

    let params = program.scopes().scope(function.params_scope());
    assert_eq!(params.owner(), Some(program.root_scope()));
    assert!(params.get_variable("a").is_some());
    assert!(params.get_variable("b").is_some());

    let body_scope = program.scopes().scope(function.body().scope);
    assert_eq!(body_scope.owner(), Some(function.params_scope()));

    match &statements(&program)[0] {
        Node::Print(print) => match &print.arguments[0] {
            Node::Call(call) => {
                assert_eq!(call.name, "add");
                assert_eq!(call.function, Some(id));
                assert_eq!(call.arguments.len(), 2);
            }
            other => panic!("expected call, got {:?}", other),
        },
        other => panic!("expected print, got {:?}", other),
    }
}

#[test]
fn test_parse_recursive_function() {
    let program = parse_ok(
        "function int fact(int n) { if (n < 2) { return 1; } return n * fact(n - 1); }",
    );
    let root = program.scopes().scope(program.root_scope());
    let id = root.get_function("fact").expect("fact is declared");

    let body = program.function(id).body();
    assert_eq!(body.len(), 2);
    match &body.body[1] {
        Node::Return(ret) => match ret.value.as_deref() {
            Some(Node::Binary(binary)) => {
                assert!(matches!(binary.right(), Node::Call(call) if call.function == Some(id)))
            }
            other => panic!("expected binary, got {:?}", other),
        },
        other => panic!("expected return, got {:?}", other),
    }
}

#[test]
fn test_parse_native_function() {
    let program = parse_ok("function double sqrt(double x) native 'sqrt';");
    let root = program.scopes().scope(program.root_scope());
    let function = program.function(root.get_function("sqrt").expect("sqrt is declared"));

    match function.body().body.as_slice() {
        [Node::NativeCall(native)] => {
            assert_eq!(native.symbol, "sqrt");
            assert_eq!(native.signature.name(), "sqrt");
        }
        other => panic!("expected native call, got {:?}", other),
    }
    assert_eq!(
        print_program(&program),
        "function double sqrt(double x) native 'sqrt';\n"
    );
}

#[test]
fn test_parse_unresolved_call() {
    let program = parse_ok("foo(1);");
    match &statements(&program)[0] {
        Node::Call(call) => assert_eq!(call.function, None),
        other => panic!("expected call, got {:?}", other),
    }
}

#[test]
fn test_parse_void_parameter_rejected() {
    let error = parse_err("function int f(void x) { }");
    assert_eq!(error.get_error_name(), "TypeExpected");
    assert_eq!(error.get_location(), Location::new(0, 15));
}

#[test]
fn test_parse_void_variable_rejected() {
    let error = parse_err("void x = 1;");
    assert_eq!(error.get_error_name(), "TypeExpected");
    assert_eq!(error.message(), "type expected, found `void`");
    assert_eq!(error.get_location(), Location::new(0, 0));

    let nested = parse_err("{ int y = 2;\n  void x = y; }");
    assert_eq!(nested.get_error_name(), "TypeExpected");
    assert_eq!(nested.get_location(), Location::new(1, 2));
}

#[test]
fn test_parse_return_without_value() {
    let program = parse_ok("function void f() { return; }");
    let root = program.scopes().scope(program.root_scope());
    let function = program.function(root.get_function("f").expect("f is declared"));
    assert!(matches!(&function.body().body[0], Node::Return(ret) if ret.value.is_none()));
}

#[test]
fn test_parse_node_types() {
    let program = parse_ok("int x = 0; while (x < 3) { x += 1; } if (x == 3) { print(x); }");
    let kinds: Vec<NodeType> = statements(&program)
        .iter()
        .map(|node| node.get_node_type())
        .collect();
    assert_eq!(kinds, vec![NodeType::Store, NodeType::While, NodeType::If]);
}

#[test]
fn test_print_program() {
    let source = "int n = 3;\n\
                  function int sq(int x) { return x * x; }\n\
                  while (n > 0) { print(sq(n), '\\n'); n -= 1; }";
    let program = parse_ok(source);

    assert_eq!(
        print_program(&program),
        "int n = 3;\n\
         function int sq(int x) {\n    return (x * x);\n}\n\
         while ((n > 0)) {\n    print(sq(n), '\\n');\n    n -= 1;\n}\n"
    );
}

#[test]
fn test_parser_reuse_after_failure() {
    let mut parser = Parser::new();

    let first = parser.parse("int x = ;").unwrap_err();
    let again = parser.parse("int x = ;").unwrap_err();
    assert_eq!(first, again);

    let reused = parser.parse("int x = 5; print(x);").unwrap();
    let fresh = parse_ok("int x = 5; print(x);");
    assert_eq!(reused, fresh);
}

#[test]
fn test_parser_clear() {
    let mut parser = Parser::new();
    parser.parse("int x = 1;").unwrap();
    assert_eq!(parser.tokens().len(), 5);

    parser.clear();
    assert!(parser.tokens().is_empty());
    assert_eq!(parser.scopes().scope_count(), 1);
}

#[test]
fn test_parse_with_status() {
    let mut parser = Parser::new();
    let mut status = Status::new(StatusCode::Error, "stale", Location::new(9, 9));

    assert!(parser.parse_with_status("int x = 1;", &mut status).is_some());
    assert!(status.is_ok());
    assert_eq!(status.code(), StatusCode::Success);

    assert!(parser.parse_with_status("print(y);", &mut status).is_none());
    assert_eq!(status.code(), StatusCode::Error);
    assert_eq!(status.message(), "unknown variable y");
    assert_eq!(status.location(), Location::new(0, 6));
}

#[test]
fn test_nesting_limit_on_expressions() {
    let config = ParserConfig::default().with_max_nesting_depth(8);
    let mut parser = Parser::with_config(config);

    let source = format!("int x = {}1{};", "(".repeat(20), ")".repeat(20));
    let error = parser.parse(&source).unwrap_err();
    assert_eq!(error.get_error_impl(), &ErrorImpl::NestingTooDeep { limit: 8 });

    assert!(parser.parse("int x = ((1));").is_ok());
}

#[test]
fn test_nesting_limit_on_blocks() {
    let config = ParserConfig::default().with_max_nesting_depth(4);
    let mut parser = Parser::with_config(config);

    let error = parser.parse("{{{{{{ }}}}}}").unwrap_err();
    assert_eq!(error.get_error_name(), "NestingTooDeep");
    assert_eq!(error.get_location(), Location::new(0, 4));
}

#[test]
fn test_hostile_nesting_is_an_error() {
    let source = format!("int x = {}1;", "(".repeat(10_000));
    let error = parse_err(&source);
    assert_eq!(error.get_error_name(), "NestingTooDeep");

    let unary = format!("int x = {}1;", "-".repeat(10_000));
    assert_eq!(parse_err(&unary).get_error_name(), "NestingTooDeep");
}

#[test]
fn test_default_nesting_allows_reasonable_depth() {
    let source = format!("int x = {}1{};", "(".repeat(60), ")".repeat(60));
    assert!(parse(&source).is_ok());
}
