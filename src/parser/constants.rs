// Constants for the parser

/// Deepest nesting of statements, parenthesised or unary operands and binary
/// operator chains the parser accepts. The parser and every pass over the
/// tree recurse once per level, so this bounds their native stack use.
pub const MAX_NESTING_DEPTH: usize = 256;
