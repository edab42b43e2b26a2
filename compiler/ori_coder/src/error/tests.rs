use super::*;
use crate::LocalVar;
use pretty_assertions::assert_eq;

#[test]
fn test_too_large_message() {
    let err = CodeError::FunctionTooLarge {
        size: 1 << 24,
        max: (1 << 24) - 1,
    };
    assert_eq!(
        err.to_string(),
        "function too large for parser: 16777216 byte node exceeds the 16777215 byte limit"
    );
}

#[test]
fn test_underflow_names_stack() {
    let err = CodeError::StackUnderflow {
        stack: StackKind::Expression,
    };
    assert_eq!(err.to_string(), "expression stack underflow");
}

#[test]
fn test_expected_immediate_shows_operand() {
    let err = CodeError::ExpectedImmediate {
        what: "list position",
        found: Operand::Local(LocalVar(3)),
    };
    assert_eq!(
        err.to_string(),
        "expected an immediate list position, found Local(LocalVar(3))"
    );
}
