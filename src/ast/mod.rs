/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Types, signatures and the `Node` sum type
/// - expressions: Definitions for the expression nodes
/// - statements: Definitions for the statement nodes and blocks
/// - scope: The scope arena with variable and function declarations
/// - program: The parse result wrapping the top-level function
/// - printer: Source-like rendering of a program
pub mod ast;
pub mod expressions;
pub mod printer;
pub mod program;
pub mod scope;
pub mod statements;
