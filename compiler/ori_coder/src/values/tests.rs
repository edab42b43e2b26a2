use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_indices_are_zero_based_and_dense() {
    let mut table = ValuesTable::default();
    let a = table.push(Value::String("a".into()));
    let b = table.push(Value::Int(1 << 62));
    assert_eq!(a, ValueId::new(0));
    assert_eq!(b, ValueId::new(1));
    assert_eq!(table.len(), 2);
    let frozen = table.freeze();
    assert_eq!(frozen.get(b.index()), Some(&Value::Int(1 << 62)));
    assert_eq!(frozen.get(2), None);
}

#[test]
fn test_equal_values_are_not_merged() {
    let mut table = ValuesTable::default();
    let first = table.push(Value::FloatText("3.14".into()));
    let second = table.push(Value::FloatText("3.14".into()));
    assert_ne!(first, second);
}

#[test]
fn test_freeze_preserves_order() {
    let mut table = ValuesTable::default();
    table.push(Value::Pragma("#% x".into()));
    table.push(Value::Float(0.5));
    let frozen = table.freeze();
    assert_eq!(
        &*frozen,
        &[Value::Pragma("#% x".into()), Value::Float(0.5)]
    );
}

#[test]
fn test_display() {
    assert_eq!(Value::String("hi".into()).to_string(), "\"hi\"");
    assert_eq!(Value::Float(1.0).to_string(), "1.0");
    assert_eq!(Value::BigInt("123456789012345678901234".into()).to_string(), "123456789012345678901234");
    assert_eq!(Value::Int(-7).kind(), "int");
}
