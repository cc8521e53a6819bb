//! # Introduction
//!
//! minic runs programs written in a small C-like language, or lowers them to
//! 32-bit x86 assembly. Both back-ends share one front-end.
//!
//! ## Pipeline
//!
//! ```text
//! Source → strip comments → Tokenizer → Parser → AST ─┬→ Interpreter → stdout
//!                                                     └→ CodeGenerator → .asm
//! ```
//!
//! 1. [`parser`]: comment stripping, tokenising and recursive-descent parsing.
//! 2. [`interpreter`]: walks the AST against a fresh symbol table per call.
//! 3. [`memory`]: tagged [`memory::value::Value`]s plus the symbol and
//!    function tables.
//! 4. [`codegen`]: two-register, stack-frame assembly emission.
//! 5. [`console`]: the `printf` / `scanf` seam, with a mock for tests.
//!
//! ## Language
//!
//! Types: `int`, `str`, and `void` for function results. Comparisons and the
//! logical operators produce `bool`, which widens to `int` only when stored.
//! Statements: declarations, assignment, `printf`, blocks, `if/else`,
//! `while`, `return` and calls. `scanf()` reads one integer per call.

pub mod codegen;
pub mod console;
pub mod interpreter;
pub mod memory;
pub mod parser;

use codegen::{CodeGenerator, CodegenError};
use console::Console;
use interpreter::engine::Interpreter;
use interpreter::errors::RuntimeError;
use parser::ast::SourceLocation;
use parser::parse::{parse, ParseError};
use thiserror::Error;

/// Any failure of the pipeline
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error(transparent)]
    Codegen(#[from] CodegenError),
}

impl Error {
    pub fn location(&self) -> SourceLocation {
        match self {
            Error::Parse(e) => e.location(),
            Error::Runtime(e) => e.location(),
            Error::Codegen(e) => e.location(),
        }
    }
}

/// Parse and run `source`, doing all I/O through `console`
pub fn interpret<C: Console>(source: &str, console: C) -> Result<(), Error> {
    let program = parse(source)?;
    Interpreter::new(program, console).run()?;
    Ok(())
}

/// Parse `source` and return the complete assembly text
pub fn compile(source: &str) -> Result<String, Error> {
    let program = parse(source)?;
    let body = CodeGenerator::generate(&program)?;
    Ok(codegen::assemble(&body))
}
