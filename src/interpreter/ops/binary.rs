use crate::interpreter::errors::RuntimeError;
use crate::memory::value::Value;
use crate::parser::ast::{BinOp, SourceLocation};
use std::cmp::Ordering;

/// Apply a binary operator to two already-evaluated operands
pub(crate) fn evaluate(
    op: BinOp,
    left: Value,
    right: Value,
    location: SourceLocation,
) -> Result<Value, RuntimeError> {
    if matches!(left, Value::Void) || matches!(right, Value::Void) {
        return Err(operand_error(op, &left, &right, location));
    }

    match op {
        BinOp::Add => checked_add_values(left, right, location),
        BinOp::Sub => {
            let (a, b) = expect_ints(op, &left, &right, location)?;
            a.checked_sub(b).map(Value::Int).ok_or_else(|| overflow(op, a, b, location))
        }
        BinOp::Mul => {
            let (a, b) = expect_ints(op, &left, &right, location)?;
            a.checked_mul(b).map(Value::Int).ok_or_else(|| overflow(op, a, b, location))
        }
        BinOp::Div => {
            let (a, b) = expect_ints(op, &left, &right, location)?;
            if b == 0 {
                return Err(RuntimeError::DivisionByZero { location });
            }
            floor_div(a, b).map(Value::Int).ok_or_else(|| overflow(op, a, b, location))
        }
        BinOp::And | BinOp::Or => {
            let (Some(a), Some(b)) = (left.is_truthy(), right.is_truthy()) else {
                return Err(operand_error(op, &left, &right, location));
            };
            Ok(Value::Bool(if op == BinOp::And { a && b } else { a || b }))
        }
        BinOp::Eq | BinOp::Ne => {
            let equal = values_equal(op, &left, &right, location)?;
            Ok(Value::Bool(if op == BinOp::Eq { equal } else { !equal }))
        }
        BinOp::Lt | BinOp::Gt => {
            let ordering = compare_values(op, &left, &right, location)?;
            let expected = if op == BinOp::Lt { Ordering::Less } else { Ordering::Greater };
            Ok(Value::Bool(ordering == expected))
        }
    }
}

/// `+` concatenates when either side is a string, otherwise adds integers
fn checked_add_values(left: Value, right: Value, location: SourceLocation) -> Result<Value, RuntimeError> {
    if matches!(left, Value::Str(_)) || matches!(right, Value::Str(_)) {
        return Ok(Value::Str(format!("{}{}", left, right)));
    }

    match (left.as_int(), right.as_int()) {
        (Some(a), Some(b)) => a
            .checked_add(b)
            .map(Value::Int)
            .ok_or_else(|| overflow(BinOp::Add, a, b, location)),
        _ => Err(operand_error(BinOp::Add, &left, &right, location)),
    }
}

/// Division rounding toward negative infinity
fn floor_div(a: i64, b: i64) -> Option<i64> {
    let quotient = a.checked_div(b)?;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        Some(quotient - 1)
    } else {
        Some(quotient)
    }
}

/// `==` and `!=`: strings only compare with strings; bool and int compare numerically
fn values_equal(op: BinOp, left: &Value, right: &Value, location: SourceLocation) -> Result<bool, RuntimeError> {
    match (left, right) {
        (Value::Str(a), Value::Str(b)) => Ok(a == b),
        (Value::Str(_), _) | (_, Value::Str(_)) => Err(operand_error(op, left, right, location)),
        _ => Ok(left.as_int() == right.as_int()),
    }
}

/// `<` and `>`: same types, or a bool against an int
fn compare_values(
    op: BinOp,
    left: &Value,
    right: &Value,
    location: SourceLocation,
) -> Result<Ordering, RuntimeError> {
    match (left, right) {
        (Value::Str(a), Value::Str(b)) => Ok(a.cmp(b)),
        _ => match (left.as_int(), right.as_int()) {
            (Some(a), Some(b)) => Ok(a.cmp(&b)),
            _ => Err(operand_error(op, left, right, location)),
        },
    }
}

/// `-`, `*` and `/` take plain integers only
fn expect_ints(op: BinOp, left: &Value, right: &Value, location: SourceLocation) -> Result<(i64, i64), RuntimeError> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Ok((*a, *b)),
        _ => Err(operand_error(op, left, right, location)),
    }
}

fn operand_error(op: BinOp, left: &Value, right: &Value, location: SourceLocation) -> RuntimeError {
    RuntimeError::type_mismatch(
        format!(
            "unsupported operand types for '{}': {} and {}",
            op,
            left.ty(),
            right.ty()
        ),
        location,
    )
}

fn overflow(op: BinOp, a: i64, b: i64, location: SourceLocation) -> RuntimeError {
    RuntimeError::IntegerOverflow {
        operation: format!("{} {} {}", a, op, b),
        location,
    }
}
