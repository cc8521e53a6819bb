//! Execution environments
//!
//! - [`value`]: Runtime value representation (`int`, `bool`, `str`, `void`)
//! - [`symbols`]: Per-activation variable tables
//! - [`functions`]: The function table shared by one run
//!
//! Tables are owned by a single run of the pipeline and threaded through
//! evaluation explicitly; there is no process-wide state.

pub mod functions;
pub mod symbols;
pub mod value;
