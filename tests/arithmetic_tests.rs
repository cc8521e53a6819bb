use minic::console::MockConsole;
use minic::interpreter::errors::RuntimeError;
use minic::Error;
use std::fs;
use std::path::Path;

/// Print a single expression from `main` and return the printed line
fn eval(expr: &str) -> Result<String, Error> {
    let source = format!("int main() {{ printf({}); }}", expr);
    let mut console = MockConsole::new();
    minic::interpret(&source, &mut console)?;
    Ok(console.get_output().join("\n"))
}

#[test]
fn test_arithmetic_demo() {
    let path = Path::new("demos/arithmetic.c");
    let source = fs::read_to_string(path).expect("Failed to read demo file");

    let mut console = MockConsole::new();
    minic::interpret(&source, &mut console).expect("Execution failed");

    assert_eq!(
        console.get_output(),
        ["3", "-4", "14", "20", "3", "1", "1", "0", "1", "n = 42", "2"]
    );
}

#[test]
fn test_precedence_and_associativity() {
    let cases = [
        ("1 + 2 * 3", "7"),
        ("(1 + 2) * 3", "9"),
        ("20 / 2 / 5", "2"),
        ("2 * 3 - 4 * 5", "-14"),
        ("100 - 10 - 1", "89"),
        ("-3 * -3", "9"),
        ("- - 4", "4"),
        ("+5 - +2", "3"),
        ("8 / 3 * 3 + 8 - 8 / 3 * 3", "8"),
    ];

    for (expr, expected) in cases {
        assert_eq!(eval(expr).unwrap(), expected, "evaluating {}", expr);
    }
}

#[test]
fn test_floor_division() {
    assert_eq!(eval("7 / 2").unwrap(), "3");
    assert_eq!(eval("-7 / 2").unwrap(), "-4");
    assert_eq!(eval("7 / -2").unwrap(), "-4");
    assert_eq!(eval("-7 / -2").unwrap(), "3");
    assert_eq!(eval("-6 / 3").unwrap(), "-2");
}

#[test]
fn test_comparisons_yield_bool() {
    assert_eq!(eval("3 > 2").unwrap(), "1");
    assert_eq!(eval("3 < 2").unwrap(), "0");
    assert_eq!(eval("2 == 2").unwrap(), "1");
    assert_eq!(eval("2 != 2").unwrap(), "0");
    assert_eq!(eval("\"abc\" < \"abd\"").unwrap(), "1");
    assert_eq!(eval("\"b\" == \"b\"").unwrap(), "1");
    assert_eq!(eval("(1 < 2) == 1").unwrap(), "1");
}

#[test]
fn test_logic_and_not() {
    assert_eq!(eval("!0").unwrap(), "1");
    assert_eq!(eval("!!7").unwrap(), "1");
    assert_eq!(eval("!(1 == 1)").unwrap(), "0");
    assert_eq!(eval("2 && 3").unwrap(), "1");
    assert_eq!(eval("0 || 0").unwrap(), "0");
    assert_eq!(eval("(1 > 2) || (2 > 1)").unwrap(), "1");
}

#[test]
fn test_relational_operators_do_not_chain() {
    assert!(matches!(eval("1 < 2 < 3"), Err(Error::Parse(_))));
}

#[test]
fn test_string_rules() {
    assert_eq!(eval("\"a\" + \"b\" + 1").unwrap(), "ab1");
    assert_eq!(eval("1 + 2 + \"x\"").unwrap(), "3x");
    assert_eq!(eval("\"v\" + (1 < 2)").unwrap(), "v1");

    for expr in ["\"a\" * 2", "-\"a\"", "!\"a\"", "\"a\" && 1", "\"1\" == 1", "\"a\" < 1"] {
        assert!(
            matches!(eval(expr), Err(Error::Runtime(RuntimeError::TypeMismatch { .. }))),
            "expected a type mismatch for {}",
            expr
        );
    }
}

#[test]
fn test_bool_operands_of_strict_integer_operators() {
    assert_eq!(eval("(1 < 2) + 1").unwrap(), "2");
    assert!(matches!(
        eval("(1 < 2) * 3"),
        Err(Error::Runtime(RuntimeError::TypeMismatch { .. }))
    ));
    assert!(matches!(
        eval("-(1 < 2)"),
        Err(Error::Runtime(RuntimeError::TypeMismatch { .. }))
    ));
}

#[test]
fn test_overflow_and_division_by_zero() {
    assert!(matches!(
        eval("9223372036854775807 + 1"),
        Err(Error::Runtime(RuntimeError::IntegerOverflow { .. }))
    ));
    assert!(matches!(
        eval("1 / (2 - 2)"),
        Err(Error::Runtime(RuntimeError::DivisionByZero { .. }))
    ));
    assert!(matches!(eval("99999999999999999999"), Err(Error::Parse(_))));
}
