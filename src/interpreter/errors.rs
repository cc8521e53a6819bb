//! Runtime error types for the interpreter
//!
//! This module defines [`RuntimeError`], which represents all errors that can occur
//! during program execution (as opposed to parse errors or code generation errors).
//!
//! All runtime errors are fatal: they propagate to [`Interpreter::run`] and halt
//! execution. A `return` is not an error and never travels through this type.
//!
//! [`Interpreter::run`]: super::engine::Interpreter::run

use crate::parser::ast::SourceLocation;
use thiserror::Error;

/// Runtime errors that can occur during execution
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    /// Read of a variable that does not exist in the current scope
    #[error("Undefined variable '{name}' at {location}")]
    UndefinedVariable {
        name: String,
        location: SourceLocation,
    },

    /// Assignment to a variable that was never declared
    #[error("Variable '{name}' assigned before declaration at {location}")]
    UndeclaredVariable {
        name: String,
        location: SourceLocation,
    },

    /// Second declaration of a name in the same scope
    #[error("Variable '{name}' already declared at {location}")]
    AlreadyDeclared {
        name: String,
        location: SourceLocation,
    },

    /// Undefined function call
    #[error("Undefined function '{name}' at {location}")]
    UndefinedFunction {
        name: String,
        location: SourceLocation,
    },

    /// Second declaration of a function name
    #[error("Function '{name}' already declared at {location}")]
    AlreadyDeclaredFunction {
        name: String,
        location: SourceLocation,
    },

    /// Function argument count mismatch
    #[error("Function '{function}' expects {expected} argument(s), got {got} at {location}")]
    ArityMismatch {
        function: String,
        expected: usize,
        got: usize,
        location: SourceLocation,
    },

    /// Operand, assignment, argument or condition of the wrong type
    #[error("Type mismatch at {location}: {message}")]
    TypeMismatch {
        message: String,
        location: SourceLocation,
    },

    #[error("Division by zero at {location}")]
    DivisionByZero { location: SourceLocation },

    /// Integer overflow in arithmetic operation
    #[error("Integer overflow in {operation} at {location}")]
    IntegerOverflow {
        operation: String,
        location: SourceLocation,
    },

    /// A non-void function finished without executing `return`
    #[error("Function '{function}' must return a value (called at {location})")]
    MissingReturnValue {
        function: String,
        location: SourceLocation,
    },

    /// A void function executed `return`
    #[error("Function '{function}' is void but returned a value at {location}")]
    UnexpectedReturnValue {
        function: String,
        location: SourceLocation,
    },

    /// `scanf()` read something that is not a base-10 integer
    #[error("scanf expected an integer, got {input:?} at {location}")]
    InvalidInput {
        input: String,
        location: SourceLocation,
    },

    /// Recursion deeper than the configured limit
    #[error("Call depth limit of {limit} exceeded calling '{function}' at {location}")]
    CallDepthExceeded {
        function: String,
        limit: usize,
        location: SourceLocation,
    },

    /// Reading from or writing to the console failed
    #[error("I/O error at {location}: {message}")]
    Io {
        message: String,
        location: SourceLocation,
    },
}

impl RuntimeError {
    pub fn location(&self) -> SourceLocation {
        match self {
            RuntimeError::UndefinedVariable { location, .. }
            | RuntimeError::UndeclaredVariable { location, .. }
            | RuntimeError::AlreadyDeclared { location, .. }
            | RuntimeError::UndefinedFunction { location, .. }
            | RuntimeError::AlreadyDeclaredFunction { location, .. }
            | RuntimeError::ArityMismatch { location, .. }
            | RuntimeError::TypeMismatch { location, .. }
            | RuntimeError::DivisionByZero { location }
            | RuntimeError::IntegerOverflow { location, .. }
            | RuntimeError::MissingReturnValue { location, .. }
            | RuntimeError::UnexpectedReturnValue { location, .. }
            | RuntimeError::InvalidInput { location, .. }
            | RuntimeError::CallDepthExceeded { location, .. }
            | RuntimeError::Io { location, .. } => *location,
        }
    }

    pub(crate) fn type_mismatch(message: impl Into<String>, location: SourceLocation) -> Self {
        RuntimeError::TypeMismatch {
            message: message.into(),
            location,
        }
    }
}
