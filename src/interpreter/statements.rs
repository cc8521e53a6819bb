//! Statement execution implementation
//!
//! Every statement returns a [`Flow`]. `Flow::Return` short-circuits the
//! enclosing blocks, loops and conditionals until [`Interpreter::call_function`]
//! consumes it at the call boundary.
//!
//! Conditions of `if` and `while` must be `bool`; integers are not accepted
//! there even though they have a truthiness.

use crate::console::Console;
use crate::interpreter::engine::{Flow, Interpreter};
use crate::interpreter::errors::RuntimeError;
use crate::memory::symbols::{Binding, SymbolTable};
use crate::memory::value::Value;
use crate::parser::ast::*;

impl<C: Console> Interpreter<C> {
    pub(crate) fn execute_block(
        &mut self,
        statements: &[Stmt],
        scope: &mut SymbolTable,
    ) -> Result<Flow, RuntimeError> {
        for stmt in statements {
            let flow = self.execute_statement(stmt, scope)?;
            if !matches!(flow, Flow::Normal) {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    pub(crate) fn execute_statement(
        &mut self,
        stmt: &Stmt,
        scope: &mut SymbolTable,
    ) -> Result<Flow, RuntimeError> {
        match stmt {
            Stmt::Declaration {
                var_type,
                declarators,
                ..
            } => {
                for declarator in declarators {
                    self.execute_declarator(*var_type, declarator, scope)?;
                }
                Ok(Flow::Normal)
            }

            Stmt::Assignment {
                name,
                value,
                location,
            } => {
                self.execute_assignment(name, value, scope, *location)?;
                Ok(Flow::Normal)
            }

            Stmt::Call(call) => {
                self.evaluate_expr(call, scope)?;
                Ok(Flow::Normal)
            }

            Stmt::Print { expr, location } => {
                let value = self.evaluate_expr(expr, scope)?;
                if matches!(value, Value::Void) {
                    return Err(RuntimeError::type_mismatch(
                        "cannot print the result of a void function",
                        *location,
                    ));
                }
                self.console
                    .print_line(&value.to_string())
                    .map_err(|e| RuntimeError::Io {
                        message: e.to_string(),
                        location: *location,
                    })?;
                Ok(Flow::Normal)
            }

            Stmt::Block { statements, .. } => self.execute_block(statements, scope),

            Stmt::If {
                condition,
                then_branch,
                else_branch,
                location,
            } => {
                if self.evaluate_condition(condition, scope, "if", *location)? {
                    self.execute_statement(then_branch, scope)
                } else if let Some(else_stmt) = else_branch {
                    self.execute_statement(else_stmt, scope)
                } else {
                    Ok(Flow::Normal)
                }
            }

            Stmt::While {
                condition,
                body,
                location,
            } => {
                while self.evaluate_condition(condition, scope, "while", *location)? {
                    let flow = self.execute_statement(body, scope)?;
                    if !matches!(flow, Flow::Normal) {
                        return Ok(flow);
                    }
                }
                Ok(Flow::Normal)
            }

            Stmt::Return { expr, location } => {
                let value = self.evaluate_expr(expr, scope)?;
                Ok(Flow::Return(value, *location))
            }

            Stmt::NoOp(_) => Ok(Flow::Normal),
        }
    }

    /// Declare one name, initialised from its expression or the type's default
    fn execute_declarator(
        &mut self,
        var_type: VarType,
        declarator: &Declarator,
        scope: &mut SymbolTable,
    ) -> Result<(), RuntimeError> {
        let Declarator {
            name,
            init,
            location,
        } = declarator;

        if scope.contains(name) {
            return Err(RuntimeError::AlreadyDeclared {
                name: name.clone(),
                location: *location,
            });
        }

        let value = match init {
            Some(expr) => {
                let value = self.evaluate_expr(expr, scope)?;
                value.coerce_to(var_type).map_err(|got| {
                    RuntimeError::type_mismatch(
                        format!("cannot initialise {} variable '{}' with {}", var_type, name, got),
                        *location,
                    )
                })?
            }
            None => Value::default_for(var_type),
        };

        // the initialiser cannot declare names, so the check above still holds
        let declared = scope.declare(name, Binding::new(value, var_type));
        debug_assert!(declared);
        Ok(())
    }

    fn execute_assignment(
        &mut self,
        name: &str,
        expr: &Expr,
        scope: &mut SymbolTable,
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        let declared_type = scope
            .get(name)
            .map(|binding| binding.declared_type)
            .ok_or_else(|| RuntimeError::UndeclaredVariable {
                name: name.to_string(),
                location,
            })?;

        let value = self.evaluate_expr(expr, scope)?;
        let value = value.coerce_to(declared_type).map_err(|got| {
            RuntimeError::type_mismatch(
                format!("cannot assign {} to {} variable '{}'", got, declared_type, name),
                location,
            )
        })?;

        if !scope.assign(name, Binding::new(value, declared_type)) {
            return Err(RuntimeError::UndeclaredVariable {
                name: name.to_string(),
                location,
            });
        }
        Ok(())
    }

    fn evaluate_condition(
        &mut self,
        condition: &Expr,
        scope: &SymbolTable,
        construct: &str,
        location: SourceLocation,
    ) -> Result<bool, RuntimeError> {
        match self.evaluate_expr(condition, scope)? {
            Value::Bool(b) => Ok(b),
            other => Err(RuntimeError::type_mismatch(
                format!("condition in '{}' must be bool, got {}", construct, other.ty()),
                location,
            )),
        }
    }
}
