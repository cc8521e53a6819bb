//! AST to assembly lowering
//!
//! Every expression leaves its result in `EAX` and reports its static type.
//! A binary operator evaluates its left operand, pushes it, evaluates the
//! right operand and pops the left one into `EBX`, so the emitted code grows
//! linearly with the expression tree.
//!
//! Frames are addressed from `EBP`. Each declared name gets its own slot
//! below the frame base; parameters are copied out of the caller's pushes
//! into slots of their own on entry. The whole frame is reserved once in the
//! prologue, so a declaration in a branch that never runs cannot shift `ESP`
//! and the slots stay fixed for the life of the call.

use crate::codegen::emitter::{function_label, return_label, AsmBuffer};
use crate::codegen::errors::CodegenError;
use crate::codegen::labels::{LabelGenerator, OffsetAllocator, SLOT_SIZE};
use crate::memory::symbols::SymbolTable;
use crate::memory::value::ValueType;
use crate::parser::ast::*;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

/// A local variable's stack slot
#[derive(Debug, Clone, Copy)]
struct Slot {
    offset: u32,
    declared_type: VarType,
}

/// Per-function state
struct Frame<'a> {
    decl: &'a FunctionDecl,
    slots: SymbolTable<Slot>,
    offsets: OffsetAllocator,
}

pub struct CodeGenerator<'a> {
    functions: FxHashMap<&'a str, &'a FunctionDecl>,
    labels: LabelGenerator,
    asm: AsmBuffer,
}

impl<'a> CodeGenerator<'a> {
    /// Lower a whole program to body lines, ready for [`super::assemble`]
    pub fn generate(program: &'a Program) -> Result<Vec<String>, CodegenError> {
        let mut generator = CodeGenerator {
            functions: FxHashMap::default(),
            labels: LabelGenerator::new(),
            asm: AsmBuffer::new(),
        };

        for decl in &program.functions {
            if generator.functions.insert(&decl.name, decl).is_some() {
                return Err(CodegenError::AlreadyDeclaredFunction {
                    name: decl.name.clone(),
                    location: decl.location,
                });
            }
        }

        generator.check_entry(&program.entry)?;

        for decl in &program.functions {
            generator.gen_function(decl)?;
        }

        debug!(lines = generator.asm.len(), "code generation finished");
        Ok(generator.asm.into_lines())
    }

    /// `_start` calls `main` with no arguments
    fn check_entry(&self, entry: &Expr) -> Result<(), CodegenError> {
        let location = entry.location();
        let main = self.lookup_function(ENTRY_POINT, location)?;
        if !main.params.is_empty() {
            return Err(CodegenError::ArityMismatch {
                function: ENTRY_POINT.to_string(),
                expected: main.params.len(),
                got: 0,
                location,
            });
        }
        Ok(())
    }

    fn lookup_function(&self, name: &str, location: SourceLocation) -> Result<&'a FunctionDecl, CodegenError> {
        self.functions
            .get(name)
            .copied()
            .ok_or_else(|| CodegenError::UndefinedFunction {
                name: name.to_string(),
                location,
            })
    }

    fn gen_function(&mut self, decl: &'a FunctionDecl) -> Result<(), CodegenError> {
        debug!(function = %decl.name, params = decl.params.len(), "generating function");

        if decl.return_type == ReturnType::Str {
            return Err(CodegenError::unsupported(
                format!("str return type of '{}'", decl.name),
                decl.location,
            ));
        }

        let mut frame = Frame {
            decl,
            slots: SymbolTable::new(),
            offsets: OffsetAllocator::new(),
        };

        self.asm.label(&function_label(&decl.name));
        self.asm.emit("PUSH EBP");
        self.asm.emit("MOV EBP, ESP");
        let reserved = frame_slots(decl) * SLOT_SIZE;
        if reserved > 0 {
            self.asm.emit(format!("SUB ESP, {}", reserved));
        }

        for (k, param) in decl.params.iter().enumerate() {
            let offset = self.declare_slot(&mut frame, &param.name, param.param_type, decl.location)?;
            let incoming = 2 * SLOT_SIZE as usize + SLOT_SIZE as usize * k;
            self.asm.emit(format!("MOV EAX, [EBP+{}]", incoming));
            self.asm.emit(format!("MOV [EBP-{}], EAX", offset));
        }

        for stmt in &decl.body {
            self.gen_stmt(stmt, &mut frame)?;
        }

        // falling off the end returns 0
        self.asm.emit("MOV EAX, 0");
        self.asm.label(&return_label(&decl.name));
        self.asm.emit("MOV ESP, EBP");
        self.asm.emit("POP EBP");
        self.asm.emit("RET");

        debug_assert_eq!(frame.offsets.frame_size(), reserved);
        trace!(function = %decl.name, frame_size = reserved, "function done");
        Ok(())
    }

    /// Bind `name` to the next reserved slot and return its offset below `EBP`
    fn declare_slot(
        &mut self,
        frame: &mut Frame<'a>,
        name: &str,
        declared_type: VarType,
        location: SourceLocation,
    ) -> Result<u32, CodegenError> {
        if declared_type == VarType::Str {
            return Err(CodegenError::unsupported(format!("str variable '{}'", name), location));
        }
        let offset = frame.offsets.allocate();
        if !frame.slots.declare(name, Slot { offset, declared_type }) {
            return Err(CodegenError::AlreadyDeclared {
                name: name.to_string(),
                location,
            });
        }
        trace!(name, offset, "slot allocated");
        Ok(offset)
    }

    fn gen_stmt(&mut self, stmt: &Stmt, frame: &mut Frame<'a>) -> Result<(), CodegenError> {
        match stmt {
            Stmt::Declaration {
                var_type,
                declarators,
                ..
            } => {
                for Declarator { name, init, location } in declarators {
                    if *var_type == VarType::Str {
                        return Err(CodegenError::unsupported(
                            format!("str variable '{}'", name),
                            *location,
                        ));
                    }
                    match init {
                        Some(expr) => {
                            let ty = self.gen_expr(expr, frame)?;
                            Self::check_store(ty, *var_type, name, *location)?;
                        }
                        None => self.asm.emit("MOV EAX, 0"),
                    }
                    let offset = self.declare_slot(frame, name, *var_type, *location)?;
                    self.asm.emit(format!("MOV [EBP-{}], EAX", offset));
                }
            }

            Stmt::Assignment {
                name,
                value,
                location,
            } => {
                let slot = frame
                    .slots
                    .get(name)
                    .copied()
                    .ok_or_else(|| CodegenError::UndeclaredVariable {
                        name: name.clone(),
                        location: *location,
                    })?;
                let ty = self.gen_expr(value, frame)?;
                Self::check_store(ty, slot.declared_type, name, *location)?;
                self.asm.emit(format!("MOV [EBP-{}], EAX", slot.offset));
            }

            Stmt::Call(call) => {
                self.gen_expr(call, frame)?;
            }

            Stmt::Print { expr, location } => {
                if self.gen_expr(expr, frame)? == ValueType::Void {
                    return Err(CodegenError::type_mismatch(
                        "cannot print the result of a void function",
                        *location,
                    ));
                }
                self.asm.emit("PUSH EAX");
                self.asm.emit("CALL _print");
                self.asm.emit(format!("ADD ESP, {}", SLOT_SIZE));
            }

            Stmt::Block { statements, .. } => {
                for stmt in statements {
                    self.gen_stmt(stmt, frame)?;
                }
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
                location,
            } => {
                let (else_label, end_label) = self.labels.next_pair("if");
                trace!(%else_label, %end_label, "if labels");

                self.gen_condition(condition, frame, "if", *location)?;
                self.asm.emit(format!("JE {}", else_label));
                self.gen_stmt(then_branch, frame)?;
                self.asm.emit(format!("JMP {}", end_label));
                self.asm.label(&else_label);
                if let Some(else_stmt) = else_branch {
                    self.gen_stmt(else_stmt, frame)?;
                }
                self.asm.label(&end_label);
            }

            Stmt::While {
                condition,
                body,
                location,
            } => {
                let (loop_label, exit_label) = self.labels.next_pair("while");
                trace!(%loop_label, %exit_label, "while labels");

                self.asm.label(&loop_label);
                self.gen_condition(condition, frame, "while", *location)?;
                self.asm.emit(format!("JE {}", exit_label));
                self.gen_stmt(body, frame)?;
                self.asm.emit(format!("JMP {}", loop_label));
                self.asm.label(&exit_label);
            }

            Stmt::Return { expr, location } => {
                let decl = frame.decl;
                let ty = self.gen_expr(expr, frame)?;
                if decl.name != ENTRY_POINT {
                    match decl.return_type {
                        ReturnType::Void => {
                            return Err(CodegenError::UnexpectedReturnValue {
                                function: decl.name.clone(),
                                location: *location,
                            })
                        }
                        ReturnType::Int if !ty.assignable_to(VarType::Int) => {
                            return Err(CodegenError::type_mismatch(
                                format!("'{}' must return int, got {}", decl.name, ty),
                                *location,
                            ))
                        }
                        _ => {}
                    }
                }
                self.asm.emit(format!("JMP {}", return_label(&decl.name)));
            }

            Stmt::NoOp(_) => {}
        }
        Ok(())
    }

    /// Evaluate a condition and compare it against `False`, ready for `JE`
    fn gen_condition(
        &mut self,
        condition: &Expr,
        frame: &mut Frame<'a>,
        construct: &str,
        location: SourceLocation,
    ) -> Result<(), CodegenError> {
        let ty = self.gen_expr(condition, frame)?;
        if ty != ValueType::Bool {
            return Err(CodegenError::type_mismatch(
                format!("condition in '{}' must be bool, got {}", construct, ty),
                location,
            ));
        }
        self.asm.emit("CMP EAX, False");
        Ok(())
    }

    fn check_store(ty: ValueType, target: VarType, name: &str, location: SourceLocation) -> Result<(), CodegenError> {
        if ty.assignable_to(target) {
            Ok(())
        } else {
            Err(CodegenError::type_mismatch(
                format!("cannot store {} in {} variable '{}'", ty, target, name),
                location,
            ))
        }
    }

    /// Emit code leaving the value of `expr` in `EAX`
    fn gen_expr(&mut self, expr: &Expr, frame: &mut Frame<'a>) -> Result<ValueType, CodegenError> {
        match expr {
            Expr::IntLiteral(n, location) => {
                let imm = i32::try_from(*n).map_err(|_| {
                    CodegenError::unsupported(format!("integer literal {} wider than 32 bits", n), *location)
                })?;
                self.asm.emit(format!("MOV EAX, {}", imm));
                Ok(ValueType::Int)
            }

            Expr::StringLiteral(_, location) => Err(CodegenError::unsupported("string literal", *location)),

            Expr::Variable(name, location) => {
                let slot = frame.slots.get(name).ok_or_else(|| CodegenError::UndefinedVariable {
                    name: name.clone(),
                    location: *location,
                })?;
                self.asm.emit(format!("MOV EAX, [EBP-{}]", slot.offset));
                Ok(ValueType::from(slot.declared_type))
            }

            Expr::BinaryOp {
                op,
                left,
                right,
                location,
            } => {
                let left_ty = self.gen_expr(left, frame)?;
                self.asm.emit("PUSH EAX");
                let right_ty = self.gen_expr(right, frame)?;
                self.asm.emit("POP EBX");
                let result = binary_type(*op, left_ty, right_ty, *location)?;
                self.gen_binary(*op);
                Ok(result)
            }

            Expr::UnaryOp {
                op,
                operand,
                location,
            } => {
                let ty = self.gen_expr(operand, frame)?;
                match (op, ty) {
                    (UnOp::Plus, ValueType::Int) => Ok(ValueType::Int),
                    (UnOp::Neg, ValueType::Int) => {
                        self.asm.emit("NEG EAX");
                        Ok(ValueType::Int)
                    }
                    (UnOp::Not, ValueType::Int | ValueType::Bool) => {
                        self.asm.emit("CMP EAX, 0");
                        self.asm.emit("SETE AL");
                        self.asm.emit("MOVZX EAX, AL");
                        Ok(ValueType::Bool)
                    }
                    _ => Err(CodegenError::type_mismatch(
                        format!("bad operand type for unary '{}': {}", op, ty),
                        *location,
                    )),
                }
            }

            Expr::FunctionCall {
                name,
                args,
                location,
            } => self.gen_call(name, args, frame, *location),

            Expr::ScanInput(_) => {
                self.asm.emit("CALL _scan");
                Ok(ValueType::Int)
            }
        }
    }

    /// Arguments are pushed right to left so the first lands at `[EBP+8]`
    fn gen_call(
        &mut self,
        name: &str,
        args: &[Expr],
        frame: &mut Frame<'a>,
        location: SourceLocation,
    ) -> Result<ValueType, CodegenError> {
        let callee = self.lookup_function(name, location)?;
        if args.len() != callee.params.len() {
            return Err(CodegenError::ArityMismatch {
                function: name.to_string(),
                expected: callee.params.len(),
                got: args.len(),
                location,
            });
        }

        for (arg, param) in args.iter().zip(&callee.params).rev() {
            let ty = self.gen_expr(arg, frame)?;
            if !ty.assignable_to(param.param_type) {
                return Err(CodegenError::type_mismatch(
                    format!(
                        "argument '{}' of '{}' expects {}, got {}",
                        param.name, name, param.param_type, ty
                    ),
                    location,
                ));
            }
            self.asm.emit("PUSH EAX");
        }

        self.asm.emit(format!("CALL {}", function_label(name)));
        if !args.is_empty() {
            self.asm.emit(format!("ADD ESP, {}", SLOT_SIZE as usize * args.len()));
        }

        Ok(match callee.return_type {
            ReturnType::Int => ValueType::Int,
            ReturnType::Str => ValueType::Str,
            ReturnType::Void => ValueType::Void,
        })
    }

    /// Combine `EBX` (left) and `EAX` (right) into `EAX`
    fn gen_binary(&mut self, op: BinOp) {
        match op {
            BinOp::Add => self.asm.emit("ADD EAX, EBX"),
            BinOp::Sub => {
                self.asm.emit("SUB EBX, EAX");
                self.asm.emit("MOV EAX, EBX");
            }
            BinOp::Mul => self.asm.emit("IMUL EAX, EBX"),
            BinOp::Div => {
                self.asm.emit("XCHG EAX, EBX");
                self.asm.emit("CDQ");
                self.asm.emit("IDIV EBX");
            }
            BinOp::And | BinOp::Or => {
                self.asm.emit("CMP EAX, 0");
                self.asm.emit("SETNE AL");
                self.asm.emit("CMP EBX, 0");
                self.asm.emit("SETNE BL");
                self.asm.emit(if op == BinOp::And { "AND AL, BL" } else { "OR AL, BL" });
                self.asm.emit("MOVZX EAX, AL");
            }
            BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Gt => {
                let set = match op {
                    BinOp::Eq => "SETE",
                    BinOp::Ne => "SETNE",
                    BinOp::Lt => "SETL",
                    _ => "SETG",
                };
                self.asm.emit("CMP EBX, EAX");
                self.asm.emit(format!("{} AL", set));
                self.asm.emit("MOVZX EAX, AL");
            }
        }
    }
}

/// Slots a function needs: its parameters plus every declarator in its
/// body, including those nested in blocks and branches
fn frame_slots(decl: &FunctionDecl) -> u32 {
    fn count(stmt: &Stmt) -> u32 {
        match stmt {
            Stmt::Declaration { declarators, .. } => declarators.len() as u32,
            Stmt::Block { statements, .. } => statements.iter().map(count).sum(),
            Stmt::If {
                then_branch,
                else_branch,
                ..
            } => count(then_branch) + else_branch.as_deref().map_or(0, count),
            Stmt::While { body, .. } => count(body),
            _ => 0,
        }
    }

    decl.params.len() as u32 + decl.body.iter().map(count).sum::<u32>()
}

/// Static result type of a binary operator, with the interpreter's operand rules
fn binary_type(op: BinOp, left: ValueType, right: ValueType, location: SourceLocation) -> Result<ValueType, CodegenError> {
    let numeric = |ty: ValueType| matches!(ty, ValueType::Int | ValueType::Bool);

    let result = match op {
        BinOp::Add if numeric(left) && numeric(right) => Some(ValueType::Int),
        BinOp::Sub | BinOp::Mul | BinOp::Div if left == ValueType::Int && right == ValueType::Int => {
            Some(ValueType::Int)
        }
        BinOp::And | BinOp::Or | BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Gt
            if numeric(left) && numeric(right) =>
        {
            Some(ValueType::Bool)
        }
        _ => None,
    };

    result.ok_or_else(|| {
        CodegenError::type_mismatch(
            format!("unsupported operand types for '{}': {} and {}", op, left, right),
            location,
        )
    })
}
