// Execution engine for the minic interpreter

use crate::console::Console;
use crate::interpreter::constants::MAX_CALL_DEPTH;
use crate::interpreter::errors::RuntimeError;
use crate::memory::functions::FunctionTable;
use crate::memory::symbols::{Binding, SymbolTable};
use crate::memory::value::Value;
use crate::parser::ast::*;
use std::rc::Rc;
use tracing::{debug, trace};

/// How a statement finished
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Flow {
    /// Fall through to the next statement
    Normal,
    /// A `return` is unwinding to the nearest call boundary
    Return(Value, SourceLocation),
}

/// Interpreter tunables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpreterConfig {
    pub max_call_depth: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        InterpreterConfig {
            max_call_depth: MAX_CALL_DEPTH,
        }
    }
}

/// The main interpreter that executes a parsed program
pub struct Interpreter<C: Console> {
    /// Declarations in source order; registered into `functions` by `run`
    declarations: Vec<Rc<FunctionDecl>>,

    /// The synthesized `main()` call
    entry: Expr,

    /// Function table for the current run
    pub(crate) functions: FunctionTable,

    /// Where `printf` writes and `scanf` reads
    pub(crate) console: C,

    config: InterpreterConfig,

    /// Number of user function calls currently active
    pub(crate) call_depth: usize,
}

impl<C: Console> Interpreter<C> {
    /// Create a new interpreter with the parsed program
    pub fn new(program: Program, console: C) -> Self {
        Interpreter {
            declarations: program.functions.into_iter().map(Rc::new).collect(),
            entry: program.entry,
            functions: FunctionTable::new(),
            console,
            config: InterpreterConfig::default(),
            call_depth: 0,
        }
    }

    pub fn with_config(mut self, config: InterpreterConfig) -> Self {
        self.config = config;
        self
    }

    /// Register every function, then call `main`
    pub fn run(&mut self) -> Result<(), RuntimeError> {
        debug!(functions = self.declarations.len(), "starting execution");
        self.functions = FunctionTable::new();
        self.call_depth = 0;

        for decl in self.declarations.clone() {
            self.declare_function(decl)?;
        }

        let entry = self.entry.clone();
        let globals = SymbolTable::new();
        self.evaluate_expr(&entry, &globals)?;

        debug!("execution finished");
        Ok(())
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    /// Add a function to the table; declaring does not run the body
    pub(crate) fn declare_function(&mut self, decl: Rc<FunctionDecl>) -> Result<(), RuntimeError> {
        let (name, location) = (decl.name.clone(), decl.location);
        if !self.functions.register(decl) {
            return Err(RuntimeError::AlreadyDeclaredFunction { name, location });
        }
        Ok(())
    }

    /// Call a user function.
    ///
    /// Arguments are evaluated in the caller's scope; the callee gets a fresh
    /// table holding only its parameters.
    pub(crate) fn call_function(
        &mut self,
        name: &str,
        args: &[Expr],
        caller_scope: &SymbolTable,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let decl = self
            .functions
            .get(name)
            .ok_or_else(|| RuntimeError::UndefinedFunction {
                name: name.to_string(),
                location,
            })?;

        if args.len() != decl.params.len() {
            return Err(RuntimeError::ArityMismatch {
                function: name.to_string(),
                expected: decl.params.len(),
                got: args.len(),
                location,
            });
        }

        let mut arg_values = Vec::with_capacity(args.len());
        for arg in args {
            arg_values.push(self.evaluate_expr(arg, caller_scope)?);
        }

        let mut scope = SymbolTable::new();
        for (param, value) in decl.params.iter().zip(arg_values) {
            let value = value.coerce_to(param.param_type).map_err(|got| {
                RuntimeError::type_mismatch(
                    format!(
                        "argument '{}' of '{}' expects {}, got {}",
                        param.name, name, param.param_type, got
                    ),
                    location,
                )
            })?;
            if !scope.declare(&param.name, Binding::new(value, param.param_type)) {
                return Err(RuntimeError::AlreadyDeclared {
                    name: param.name.clone(),
                    location: decl.location,
                });
            }
        }

        if self.call_depth >= self.config.max_call_depth {
            return Err(RuntimeError::CallDepthExceeded {
                function: name.to_string(),
                limit: self.config.max_call_depth,
                location,
            });
        }

        trace!(function = name, depth = self.call_depth, "call");
        self.call_depth += 1;
        let flow = self.execute_block(&decl.body, &mut scope);
        self.call_depth -= 1;

        self.finish_call(&decl, flow?, location)
    }

    /// Check the way a body finished against the declared return type.
    /// A returned value keeps its own type; only its presence is checked.
    /// `main` is exempt from both checks.
    fn finish_call(
        &self,
        decl: &FunctionDecl,
        flow: Flow,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let is_entry = decl.name == ENTRY_POINT;

        match (flow, decl.return_type) {
            (Flow::Return(value, _), _) if is_entry => Ok(value),
            (Flow::Normal, _) if is_entry => Ok(Value::Void),
            (Flow::Return(_, return_location), ReturnType::Void) => {
                Err(RuntimeError::UnexpectedReturnValue {
                    function: decl.name.clone(),
                    location: return_location,
                })
            }
            (Flow::Return(value, _), _) => Ok(value),
            (Flow::Normal, ReturnType::Void) => Ok(Value::Void),
            (Flow::Normal, _) => Err(RuntimeError::MissingReturnValue {
                function: decl.name.clone(),
                location,
            }),
        }
    }
}
