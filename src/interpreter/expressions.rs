//! Expression evaluation implementation
//!
//! Expressions read the current scope but never modify it. Both operands of
//! a binary operator are evaluated, left first, before the operator is
//! applied; `&&` and `||` do not short-circuit.

use crate::console::Console;
use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::interpreter::ops::{binary, unary};
use crate::memory::symbols::SymbolTable;
use crate::memory::value::Value;
use crate::parser::ast::*;

impl<C: Console> Interpreter<C> {
    /// Evaluate an expression and return its value
    pub(crate) fn evaluate_expr(&mut self, expr: &Expr, scope: &SymbolTable) -> Result<Value, RuntimeError> {
        match expr {
            Expr::IntLiteral(n, _) => Ok(Value::Int(*n)),

            Expr::StringLiteral(s, _) => Ok(Value::Str(s.clone())),

            Expr::Variable(name, location) => scope
                .get(name)
                .map(|binding| binding.value.clone())
                .ok_or_else(|| RuntimeError::UndefinedVariable {
                    name: name.clone(),
                    location: *location,
                }),

            Expr::BinaryOp {
                op,
                left,
                right,
                location,
            } => {
                let left_val = self.evaluate_expr(left, scope)?;
                let right_val = self.evaluate_expr(right, scope)?;
                binary::evaluate(*op, left_val, right_val, *location)
            }

            Expr::UnaryOp {
                op,
                operand,
                location,
            } => {
                let value = self.evaluate_expr(operand, scope)?;
                unary::evaluate(*op, value, *location)
            }

            Expr::FunctionCall {
                name,
                args,
                location,
            } => self.call_function(name, args, scope, *location),

            Expr::ScanInput(location) => self.scan_int(*location),
        }
    }

    /// `scanf()`: one line from the console, parsed as a base-10 integer
    fn scan_int(&mut self, location: SourceLocation) -> Result<Value, RuntimeError> {
        let line = self.console.read_line().map_err(|e| RuntimeError::Io {
            message: e.to_string(),
            location,
        })?;

        let Some(line) = line else {
            return Err(RuntimeError::InvalidInput {
                input: "<end of input>".to_string(),
                location,
            });
        };

        line.trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| RuntimeError::InvalidInput {
                input: line.clone(),
                location,
            })
    }
}
