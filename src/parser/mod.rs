//! minic source code parser
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`preprocess`]: Comment stripping (whole-source text transform)
//! - [`lexer`]: Tokenization with one token of lookahead
//! - [`parse`]: Parser struct, helpers, functions and parameters
//! - `statements` / `expressions`: the rest of the grammar
//! - [`ast`]: AST node definitions
//! - [`constants`]: parser limits
//!
//! # Supported Language
//!
//! - Types: `int`, `str` (and `void` as a return type); booleans only arise
//!   from comparisons and logical operators
//! - Statements: declarations, assignments, `printf`, `if`/`else`, `while`,
//!   `return`, blocks, empty statements, call statements
//! - Expressions: `+ - * /`, `&& ||`, `== != < >`, unary `+ - !`,
//!   function calls, `scanf()`
//! - No arrays, structs, pointers or floating point
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser, one function per precedence level.
//! No external parser generator dependencies.

pub mod ast;
pub mod constants;
mod expressions;
pub mod lexer;
pub mod parse;
pub mod preprocess;
mod statements;
