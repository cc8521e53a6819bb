//! Code generation errors
//!
//! The generator repeats the interpreter's declaration and type checks
//! statically. Any error aborts generation; partial output is discarded.

use crate::parser::ast::SourceLocation;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodegenError {
    #[error("Undefined variable '{name}' at {location}")]
    UndefinedVariable {
        name: String,
        location: SourceLocation,
    },

    #[error("Variable '{name}' assigned before declaration at {location}")]
    UndeclaredVariable {
        name: String,
        location: SourceLocation,
    },

    #[error("Variable '{name}' already declared at {location}")]
    AlreadyDeclared {
        name: String,
        location: SourceLocation,
    },

    #[error("Undefined function '{name}' at {location}")]
    UndefinedFunction {
        name: String,
        location: SourceLocation,
    },

    #[error("Function '{name}' already declared at {location}")]
    AlreadyDeclaredFunction {
        name: String,
        location: SourceLocation,
    },

    #[error("Function '{function}' expects {expected} argument(s), got {got} at {location}")]
    ArityMismatch {
        function: String,
        expected: usize,
        got: usize,
        location: SourceLocation,
    },

    #[error("Type mismatch at {location}: {message}")]
    TypeMismatch {
        message: String,
        location: SourceLocation,
    },

    #[error("Function '{function}' is void but returned a value at {location}")]
    UnexpectedReturnValue {
        function: String,
        location: SourceLocation,
    },

    /// Construct with no representation in the two-register model (strings)
    #[error("{construct} is not supported by the code generator at {location}")]
    Unsupported {
        construct: String,
        location: SourceLocation,
    },
}

impl CodegenError {
    pub fn location(&self) -> SourceLocation {
        match self {
            CodegenError::UndefinedVariable { location, .. }
            | CodegenError::UndeclaredVariable { location, .. }
            | CodegenError::AlreadyDeclared { location, .. }
            | CodegenError::UndefinedFunction { location, .. }
            | CodegenError::AlreadyDeclaredFunction { location, .. }
            | CodegenError::ArityMismatch { location, .. }
            | CodegenError::TypeMismatch { location, .. }
            | CodegenError::UnexpectedReturnValue { location, .. }
            | CodegenError::Unsupported { location, .. } => *location,
        }
    }

    pub(crate) fn type_mismatch(message: impl Into<String>, location: SourceLocation) -> Self {
        CodegenError::TypeMismatch {
            message: message.into(),
            location,
        }
    }

    pub(crate) fn unsupported(construct: impl Into<String>, location: SourceLocation) -> Self {
        CodegenError::Unsupported {
            construct: construct.into(),
            location,
        }
    }
}
