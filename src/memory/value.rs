//! Runtime value representation
//!
//! This module defines the [`Value`] enum, which represents all possible runtime
//! values in the interpreter, and [`ValueType`], the type tag evaluation pairs
//! with every value.
//!
//! # Value Types
//!
//! - [`Value::Int`]: 64-bit signed integer
//! - [`Value::Bool`]: result of comparisons and logical operators, printed as `0`/`1`
//! - [`Value::Str`]: immutable string
//! - [`Value::Void`]: the result of calling a `void` function
//!
//! # Widening
//!
//! The only implicit conversion is `bool` → `int`, applied when a value is
//! stored into an `int` variable or parameter ([`Value::coerce_to`]) and when
//! booleans meet integers in arithmetic or comparison ([`Value::as_int`]).
//! Strings never convert to or from anything else.

use crate::parser::ast::VarType;
use std::fmt;

/// Runtime values in the interpreter
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Str(String),
    Void,
}

/// Type tag of a [`Value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Int,
    Bool,
    Str,
    Void,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Int => write!(f, "int"),
            ValueType::Bool => write!(f, "bool"),
            ValueType::Str => write!(f, "str"),
            ValueType::Void => write!(f, "void"),
        }
    }
}

impl From<VarType> for ValueType {
    fn from(ty: VarType) -> Self {
        match ty {
            VarType::Int => ValueType::Int,
            VarType::Str => ValueType::Str,
        }
    }
}

impl ValueType {
    /// Whether a value of this type may be stored as `target`
    pub fn assignable_to(self, target: VarType) -> bool {
        matches!(
            (self, target),
            (ValueType::Int | ValueType::Bool, VarType::Int) | (ValueType::Str, VarType::Str)
        )
    }
}

impl Value {
    /// Get the type tag of this value
    pub fn ty(&self) -> ValueType {
        match self {
            Value::Int(_) => ValueType::Int,
            Value::Bool(_) => ValueType::Bool,
            Value::Str(_) => ValueType::Str,
            Value::Void => ValueType::Void,
        }
    }

    /// Value a declaration without an initializer starts with
    pub fn default_for(ty: VarType) -> Self {
        match ty {
            VarType::Int => Value::Int(0),
            VarType::Str => Value::Str(String::new()),
        }
    }

    /// Integer view of an `int` or `bool` (booleans widen to 0/1)
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    /// Truthiness of an `int` or `bool`; strings and void have none
    pub fn is_truthy(&self) -> Option<bool> {
        self.as_int().map(|n| n != 0)
    }

    /// Convert to a declared type, widening `bool` to `int`.
    ///
    /// Returns the value's own type on mismatch.
    pub fn coerce_to(self, target: VarType) -> Result<Value, ValueType> {
        match (self, target) {
            (Value::Int(n), VarType::Int) => Ok(Value::Int(n)),
            (Value::Bool(b), VarType::Int) => Ok(Value::Int(i64::from(b))),
            (Value::Str(s), VarType::Str) => Ok(Value::Str(s)),
            (other, _) => Err(other.ty()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", i64::from(*b)),
            Value::Str(s) => write!(f, "{}", s),
            Value::Void => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Value::Int(-12).to_string(), "-12");
        assert_eq!(Value::Bool(true).to_string(), "1");
        assert_eq!(Value::Bool(false).to_string(), "0");
        assert_eq!(Value::Str("hi".to_string()).to_string(), "hi");
    }

    #[test]
    fn test_bool_widens_to_int_only() {
        assert_eq!(Value::Bool(true).coerce_to(VarType::Int), Ok(Value::Int(1)));
        assert_eq!(Value::Bool(true).coerce_to(VarType::Str), Err(ValueType::Bool));
        assert_eq!(
            Value::Int(1).coerce_to(VarType::Str),
            Err(ValueType::Int)
        );
        assert_eq!(
            Value::Str("1".to_string()).coerce_to(VarType::Int),
            Err(ValueType::Str)
        );
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Value::default_for(VarType::Int), Value::Int(0));
        assert_eq!(Value::default_for(VarType::Str), Value::Str(String::new()));
    }

    #[test]
    fn test_truthiness() {
        assert_eq!(Value::Int(5).is_truthy(), Some(true));
        assert_eq!(Value::Int(0).is_truthy(), Some(false));
        assert_eq!(Value::Bool(true).is_truthy(), Some(true));
        assert_eq!(Value::Str("x".to_string()).is_truthy(), None);
    }

    #[test]
    fn test_assignable_to() {
        assert!(ValueType::Bool.assignable_to(VarType::Int));
        assert!(!ValueType::Int.assignable_to(VarType::Str));
        assert!(!ValueType::Void.assignable_to(VarType::Int));
    }
}
