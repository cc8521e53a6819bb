//! Instruction buffer and program assembly
//!
//! The generated body is wrapped in a fixed NASM prologue and epilogue for
//! 32-bit Linux. Runtime routines and the entry stub use labels that begin
//! with `_`, and user functions are emitted as `fn_<name>`. Identifiers
//! always start with a letter, so neither can collide with the other or
//! with the `if_<n>` / `while_<n>` / `exit_...` / `ret_<name>` labels the
//! generator allocates.

/// Label for a user function
pub fn function_label(name: &str) -> String {
    format!("fn_{}", name)
}

/// Label of the shared epilogue of a user function
pub fn return_label(name: &str) -> String {
    format!("ret_{}", name)
}

/// Emitted code, one instruction or label per line
#[derive(Debug, Default, Clone)]
pub struct AsmBuffer {
    lines: Vec<String>,
}

impl AsmBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an indented instruction
    pub fn emit(&mut self, instruction: impl AsRef<str>) {
        self.lines.push(format!("  {}", instruction.as_ref()));
    }

    /// Append an unindented label definition
    pub fn label(&mut self, name: &str) {
        self.lines.push(format!("{}:", name));
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

/// Constants, sections, the `_print` / `_scan` runtime and the entry stub.
///
/// `_print` writes its stack argument as a signed decimal line. `_scan`
/// reads one line and returns its leading signed decimal integer in `EAX`.
/// Both clobber `EAX`, `EBX`, `ECX`, `EDX` and `ESI`/`EDI`; generated code
/// keeps nothing live in those registers across a call.
pub const HEADER: &str = "\
; constants
SYS_EXIT equ 1
SYS_READ equ 3
SYS_WRITE equ 4
STDIN equ 0
STDOUT equ 1
True equ 1
False equ 0

segment .data

segment .bss
  outbuf RESB 12
  inbuf RESB 32

section .text
  global _start

_print:
  PUSH EBP
  MOV EBP, ESP
  MOV EAX, [EBP+8]
  MOV ECX, outbuf + 11
  MOV BYTE [ECX], 10
  MOV EBX, 10
  XOR ESI, ESI
  CMP EAX, 0
  JGE _print_digits
  NEG EAX
  MOV ESI, 1
_print_digits:
  XOR EDX, EDX
  DIV EBX
  ADD DL, '0'
  DEC ECX
  MOV [ECX], DL
  CMP EAX, 0
  JNE _print_digits
  CMP ESI, 0
  JE _print_write
  DEC ECX
  MOV BYTE [ECX], '-'
_print_write:
  MOV EDX, outbuf + 12
  SUB EDX, ECX
  MOV EAX, SYS_WRITE
  MOV EBX, STDOUT
  INT 0x80
  POP EBP
  RET

_scan:
  PUSH EBP
  MOV EBP, ESP
  MOV EAX, SYS_READ
  MOV EBX, STDIN
  MOV ECX, inbuf
  MOV EDX, 32
  INT 0x80
  MOV ECX, inbuf
  LEA EDI, [EAX + inbuf]
  XOR EAX, EAX
  XOR ESI, ESI
  CMP ECX, EDI
  JAE _scan_done
  CMP BYTE [ECX], '-'
  JNE _scan_digits
  MOV ESI, 1
  INC ECX
_scan_digits:
  CMP ECX, EDI
  JAE _scan_sign
  MOVZX EDX, BYTE [ECX]
  SUB EDX, '0'
  CMP EDX, 9
  JA _scan_sign
  IMUL EAX, EAX, 10
  ADD EAX, EDX
  INC ECX
  JMP _scan_digits
_scan_sign:
  CMP ESI, 0
  JE _scan_done
  NEG EAX
_scan_done:
  POP EBP
  RET

_start:
  CALL fn_main
  JMP _exit

; program
";

/// Exit syscall; `_start` jumps here once `main` returns
pub const FOOTER: &str = "\
; exit
_exit:
  MOV EAX, SYS_EXIT
  MOV EBX, 0
  INT 0x80
";

/// Header, then `body` one line each, then footer
pub fn assemble(body: &[String]) -> String {
    let mut out = String::with_capacity(HEADER.len() + FOOTER.len() + body.len() * 16);
    out.push_str(HEADER);
    for line in body {
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(FOOTER);
    out
}
