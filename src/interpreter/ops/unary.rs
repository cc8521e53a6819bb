//! Unary operator evaluation

use crate::interpreter::errors::RuntimeError;
use crate::memory::value::Value;
use crate::parser::ast::{SourceLocation, UnOp};

pub(crate) fn evaluate(op: UnOp, operand: Value, location: SourceLocation) -> Result<Value, RuntimeError> {
    match (op, operand) {
        (UnOp::Plus, Value::Int(n)) => Ok(Value::Int(n)),
        (UnOp::Neg, Value::Int(n)) => n.checked_neg().map(Value::Int).ok_or_else(|| {
            RuntimeError::IntegerOverflow {
                operation: format!("-({})", n),
                location,
            }
        }),
        (UnOp::Not, Value::Int(n)) => Ok(Value::Bool(n == 0)),
        (UnOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (op, other) => Err(RuntimeError::type_mismatch(
            format!("bad operand type for unary '{}': {}", op, other.ty()),
            location,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(op: UnOp, operand: Value) -> Result<Value, RuntimeError> {
        evaluate(op, operand, SourceLocation::new(1, 1))
    }

    #[test]
    fn test_sign_operators_take_ints() {
        assert_eq!(eval(UnOp::Neg, Value::Int(5)), Ok(Value::Int(-5)));
        assert_eq!(eval(UnOp::Plus, Value::Int(-3)), Ok(Value::Int(-3)));
        assert!(eval(UnOp::Neg, Value::Bool(true)).is_err());
        assert!(eval(UnOp::Plus, Value::Str("a".into())).is_err());
    }

    #[test]
    fn test_negating_min_overflows() {
        assert!(matches!(
            eval(UnOp::Neg, Value::Int(i64::MIN)),
            Err(RuntimeError::IntegerOverflow { .. })
        ));
    }

    #[test]
    fn test_not() {
        assert_eq!(eval(UnOp::Not, Value::Int(0)), Ok(Value::Bool(true)));
        assert_eq!(eval(UnOp::Not, Value::Int(7)), Ok(Value::Bool(false)));
        assert_eq!(eval(UnOp::Not, Value::Bool(false)), Ok(Value::Bool(true)));
        assert!(eval(UnOp::Not, Value::Str(String::new())).is_err());
    }
}
