// Integration tests for the interpreter

use minic::console::MockConsole;
use minic::interpreter::engine::{Interpreter, InterpreterConfig};
use minic::interpreter::errors::RuntimeError;
use minic::parser::parse::{parse, ParseError};
use minic::Error;
use std::fs;
use std::path::Path;

fn run_with_input(source: &str, input: &[&str]) -> (Result<(), Error>, Vec<String>) {
    let mut console = MockConsole::with_input(input.iter().copied());
    let result = minic::interpret(source, &mut console);
    (result, console.get_output().to_vec())
}

fn run(source: &str) -> (Result<(), Error>, Vec<String>) {
    run_with_input(source, &[])
}

fn output_of(source: &str) -> Vec<String> {
    let (result, output) = run(source);
    assert!(result.is_ok(), "Execution failed: {:?}", result);
    output
}

fn runtime_error(source: &str) -> RuntimeError {
    match run(source).0 {
        Err(Error::Runtime(e)) => e,
        other => panic!("expected a runtime error, got {:?}", other),
    }
}

#[test]
fn test_declare_assign_print() {
    let output = output_of("int main() { int x = 5; x = x + 1; printf(x); }");
    assert_eq!(output, ["6"]);
}

#[test]
fn test_string_concatenation() {
    let output = output_of(
        r#"
        int main() {
            str s = "a" + "b";
            printf(s);
            printf(1 + "x");
        }
    "#,
    );
    assert_eq!(output, ["ab", "1x"]);
}

#[test]
fn test_comment_markers_inside_string_literals() {
    let output = output_of(
        r#"
        int main() {
            printf("http://x"); // trailing comment
            str s = "/* kept */";
            /* "not a string" */
            printf(s + "//");
        }
    "#,
    );
    assert_eq!(output, ["http://x", "/* kept *///"]);
}

#[test]
fn test_declarations_inside_branches_and_loops() {
    let output = output_of(
        r#"
        int main() {
            int c = 0;
            if (c > 0) { int x = 1; printf(x); }
            int y = 2;
            printf(5);
            printf(y);
            int i = 0;
            while (i < 1) { int sq = i + 7; printf(sq); i = i + 1; }
        }
    "#,
    );
    assert_eq!(output, ["5", "2", "7"]);

    // one scope per call, so a second pass over the declaration collides
    assert!(matches!(
        runtime_error("int main() { int i = 0; while (i < 2) { int sq = i; i = i + 1; } }"),
        RuntimeError::AlreadyDeclared { ref name, .. } if name == "sq"
    ));
}

#[test]
fn test_while_loop() {
    let output = output_of(
        r#"
        int main() {
            int i = 0;
            while (i < 3) { printf(i); i = i + 1; }
        }
    "#,
    );
    assert_eq!(output, ["0", "1", "2"]);
}

#[test]
fn test_if_else() {
    assert_eq!(output_of("int main() { if (1 < 2) printf(1); else printf(2); }"), ["1"]);
    assert_eq!(output_of("int main() { if (1 > 2) printf(1); else printf(2); }"), ["2"]);
    assert!(output_of("int main() { if (1 > 2) printf(1); }").is_empty());
}

#[test]
fn test_function_call() {
    let output = output_of("int add(int a, int b) { return a + b; } int main() { printf(add(2,3)); }");
    assert_eq!(output, ["5"]);
}

#[test]
fn test_arity_mismatch() {
    let err = runtime_error("int add(int a, int b) { return a + b; } int main() { printf(add(2)); }");
    assert!(matches!(
        err,
        RuntimeError::ArityMismatch {
            expected: 2,
            got: 1,
            ..
        }
    ));
}

#[test]
fn test_missing_return_value() {
    let err = runtime_error("int f() { printf(1); } int main() { f(); }");
    assert!(matches!(err, RuntimeError::MissingReturnValue { ref function, .. } if function == "f"));
}

#[test]
fn test_unexpected_return_value() {
    let err = runtime_error("void f() { return 1; } int main() { f(); }");
    assert!(matches!(err, RuntimeError::UnexpectedReturnValue { .. }));
}

#[test]
fn test_returned_value_keeps_its_type() {
    let output = output_of(
        r#"
        int pos(int x) { return x > 0; }
        int main() {
            if (pos(3)) printf(1);
            if (pos(0 - 3)) printf(2); else printf(3);
        }
    "#,
    );
    assert_eq!(output, ["1", "3"]);

    assert_eq!(output_of("int f() { return \"s\"; } int main() { printf(f() + 1); }"), ["s1"]);
    assert_eq!(output_of("int f() { return 2 > 1; } int main() { int n = f(); printf(n + 1); }"), ["2"]);
}

#[test]
fn test_main_is_exempt_from_return_checks() {
    assert_eq!(output_of("int main() { printf(1); }"), ["1"]);
    assert_eq!(output_of("void main() { printf(2); return 0; }"), ["2"]);
}

#[test]
fn test_return_unwinds_loops_and_blocks() {
    let output = output_of(
        r#"
        int first_over(int limit) {
            int i = 0;
            while (1 > 0) {
                if (i > limit) {
                    return i;
                }
                i = i + 1;
            }
            printf(999);
            return 0 - 1;
        }
        int main() { printf(first_over(4)); }
    "#,
    );
    assert_eq!(output, ["5"]);
}

#[test]
fn test_type_errors() {
    assert!(matches!(
        runtime_error("int main() { int x = 1; x = \"hi\"; }"),
        RuntimeError::TypeMismatch { .. }
    ));
    assert!(matches!(
        runtime_error("int main() { printf(1 - \"a\"); }"),
        RuntimeError::TypeMismatch { .. }
    ));
    assert!(matches!(
        runtime_error("int main() { str s = 1; }"),
        RuntimeError::TypeMismatch { .. }
    ));
    assert!(matches!(
        runtime_error("int main() { if (1) printf(1); }"),
        RuntimeError::TypeMismatch { .. }
    ));
    assert!(matches!(
        runtime_error("int main() { while (\"x\") printf(1); }"),
        RuntimeError::TypeMismatch { .. }
    ));
}

#[test]
fn test_division_by_zero() {
    assert!(matches!(
        runtime_error("int main() { printf(5 / 0); }"),
        RuntimeError::DivisionByZero { .. }
    ));
}

#[test]
fn test_declaration_errors() {
    assert!(matches!(
        runtime_error("int main() { int x; int x; }"),
        RuntimeError::AlreadyDeclared { ref name, .. } if name == "x"
    ));
    assert!(matches!(
        runtime_error("int main() { y = 1; }"),
        RuntimeError::UndeclaredVariable { .. }
    ));
    assert!(matches!(
        runtime_error("int main() { printf(y); }"),
        RuntimeError::UndefinedVariable { .. }
    ));
}

#[test]
fn test_defaults_and_bool_widening() {
    let output = output_of(
        r#"
        int main() {
            int n;
            str s;
            printf(n);
            printf(s);
            n = 3 > 1;
            printf(n + 1);
            printf(1 == 1);
        }
    "#,
    );
    assert_eq!(output, ["0", "", "2", "1"]);
}

#[test]
fn test_callee_cannot_see_caller_locals() {
    let err = runtime_error("int f() { return x; } int main() { int x = 1; printf(f()); }");
    assert!(matches!(err, RuntimeError::UndefinedVariable { ref name, .. } if name == "x"));
}

#[test]
fn test_arguments_are_copied() {
    let output = output_of(
        r#"
        void bump(int x) { x = x + 1; printf(x); }
        int main() { int x = 1; bump(x); printf(x); }
    "#,
    );
    assert_eq!(output, ["2", "1"]);
}

#[test]
fn test_bool_argument_widens_to_int() {
    assert_eq!(output_of("int id(int v) { return v; } int main() { printf(id(2 > 1) + 1); }"), ["2"]);
    assert!(matches!(
        runtime_error("int id(int v) { return v; } int main() { id(\"s\"); }"),
        RuntimeError::TypeMismatch { .. }
    ));
}

#[test]
fn test_logical_operators_evaluate_both_sides() {
    let output = output_of(
        r#"
        int noisy() { printf(7); return 1; }
        int main() {
            printf(0 && noisy());
            printf(1 || noisy());
        }
    "#,
    );
    assert_eq!(output, ["7", "0", "7", "1"]);
}

#[test]
fn test_function_errors() {
    assert!(matches!(
        runtime_error("int main() { nope(); }"),
        RuntimeError::UndefinedFunction { ref name, .. } if name == "nope"
    ));
    assert!(matches!(
        runtime_error("int f() { return 1; } int f() { return 2; } int main() { }"),
        RuntimeError::AlreadyDeclaredFunction { .. }
    ));
    assert!(matches!(
        runtime_error("int f() { return 1; }"),
        RuntimeError::UndefinedFunction { ref name, .. } if name == "main"
    ));
}

#[test]
fn test_printing_void_result_fails() {
    assert!(matches!(
        runtime_error("void f() { } int main() { printf(f()); }"),
        RuntimeError::TypeMismatch { .. }
    ));
}

#[test]
fn test_scanf() {
    let source = "int main() { int a = scanf(); int b = scanf(); printf(a * b); }";
    let (result, output) = run_with_input(source, &["6", "  -7 "]);
    assert!(result.is_ok(), "Execution failed: {:?}", result);
    assert_eq!(output, ["-42"]);

    let (result, _) = run_with_input(source, &["6", "seven"]);
    assert!(matches!(result, Err(Error::Runtime(RuntimeError::InvalidInput { .. }))));

    let (result, _) = run_with_input(source, &["6"]);
    assert!(matches!(result, Err(Error::Runtime(RuntimeError::InvalidInput { .. }))));
}

#[test]
fn test_call_depth_limit() {
    let program = parse("int down(int n) { return down(n + 1); } int main() { down(0); }").expect("Parsing failed");
    let mut console = MockConsole::new();
    let mut interpreter =
        Interpreter::new(program, &mut console).with_config(InterpreterConfig { max_call_depth: 16 });

    let result = interpreter.run();
    assert!(matches!(
        result,
        Err(RuntimeError::CallDepthExceeded { limit: 16, .. })
    ));
}

#[test]
fn test_interpreter_can_run_twice() {
    let program = parse("int main() { printf(scanf() + 1); }").expect("Parsing failed");
    let mut interpreter = Interpreter::new(program, MockConsole::with_input(["1", "2"]));

    interpreter.run().expect("first run failed");
    interpreter.run().expect("second run failed");
    assert_eq!(interpreter.console().get_output(), ["2", "3"]);
}

#[test]
fn test_syntax_errors_abort() {
    let (result, output) = run("int main() { printf(1) }");
    assert!(matches!(result, Err(Error::Parse(ParseError::Syntax { .. }))));
    assert!(output.is_empty());

    let (result, _) = run("int main() { printf(1 # 2); }");
    assert!(matches!(result, Err(Error::Parse(ParseError::Lex(_)))));
}

#[test]
fn test_errors_carry_locations() {
    let (result, _) = run("int main() {\n  int x = 1;\n  x = x / 0;\n}");
    let err = result.unwrap_err();
    assert_eq!(err.location().line, 3);
    assert!(err.to_string().contains("line 3"));
}

#[test]
fn test_functions_demo() {
    let path = Path::new("demos/functions.c");
    let source = fs::read_to_string(path).expect("Failed to read demo file");

    let (result, output) = run(&source);
    assert!(result.is_ok(), "Execution failed: {:?}", result);
    assert_eq!(output, ["120", "hello, world", "42"]);
}

#[test]
fn test_loop_demo() {
    let path = Path::new("demos/loop.c");
    let source = fs::read_to_string(path).expect("Failed to read demo file");

    let (result, output) = run_with_input(&source, &["5"]);
    assert!(result.is_ok(), "Execution failed: {:?}", result);
    assert_eq!(output, ["15"]);

    let (result, output) = run_with_input(&source, &["3"]);
    assert!(result.is_ok(), "Execution failed: {:?}", result);
    assert_eq!(output, ["-6"]);
}
