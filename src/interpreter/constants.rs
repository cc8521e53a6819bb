// Constants for the interpreter

/// Deepest chain of nested user function calls before execution is aborted.
/// Each interpreted call costs several native stack frames, so this stays well
/// below what an 8 MB main-thread stack can hold.
pub const MAX_CALL_DEPTH: usize = 512;
