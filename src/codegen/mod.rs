//! x86 assembly generation
//!
//! Lowers the same AST the interpreter runs into 32-bit NASM text:
//! - [`labels`]: unique control-flow labels and per-frame stack slots
//! - [`emitter`]: the instruction buffer plus the fixed runtime header/footer
//! - [`generator`]: the tree walk, with the static checks it can perform
//! - [`errors`]: [`CodegenError`]
//!
//! Expression results travel in `EAX`; `EBX` holds the left operand of a
//! binary operator after it is popped back off the stack.

pub mod emitter;
pub mod errors;
pub mod generator;
pub mod labels;

pub use emitter::assemble;
pub use errors::CodegenError;
pub use generator::CodeGenerator;
