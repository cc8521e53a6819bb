//! Tree-walking interpreter
//!
//! - [`engine`]: the [`engine::Interpreter`] itself, function calls and return checks
//! - [`errors`]: runtime error types
//! - [`constants`]: limits used by the engine
//!
//! # Execution Model
//!
//! Every function call runs in a fresh [`crate::memory::symbols::SymbolTable`]
//! holding its parameters; there are no globals and no nested scopes. A
//! `return` unwinds as [`engine::Flow::Return`] until the call boundary.

pub mod constants;
pub mod engine;
pub mod errors;
mod expressions;
mod ops;
mod statements;
