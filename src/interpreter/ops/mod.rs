// Operator semantics shared by expression evaluation

pub(crate) mod binary;
pub(crate) mod unary;
