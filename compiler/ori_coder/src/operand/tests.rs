use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn test_zero_word_is_absent() {
    assert_eq!(Operand::decode(0), None);
}

#[test]
fn test_node_offsets_are_untagged() {
    let op = Operand::Node(NodeId::new(48));
    assert_eq!(op.encode(), 48);
    assert_eq!(Operand::decode(48), Some(op));
    assert_eq!(op.node(), Some(NodeId::new(48)));
    assert_eq!(op.as_int(), None);
}

#[test]
fn test_immediate_bounds() {
    assert!(fits_immediate(IMMEDIATE_MIN));
    assert!(fits_immediate(IMMEDIATE_MAX));
    assert!(!fits_immediate(IMMEDIATE_MIN - 1));
    assert!(!fits_immediate(IMMEDIATE_MAX + 1));
    assert_eq!(Operand::int(IMMEDIATE_MAX + 1), None);
    assert_eq!(Operand::int(-5), Some(Operand::Int(-5)));
}

#[test]
fn test_negative_immediate_keeps_sign() {
    let word = Operand::Int(-1).encode();
    assert_eq!(word & 0b11, 0b01);
    assert_eq!(Operand::decode(word), Some(Operand::Int(-1)));

    let word = Operand::Int(IMMEDIATE_MIN).encode();
    assert_eq!(Operand::decode(word), Some(Operand::Int(IMMEDIATE_MIN)));
}

#[test]
fn test_local_reference_tag() {
    let word = Operand::Local(LocalVar(7)).encode();
    assert_eq!(word, (7 << 2) | 0b11);
    assert_eq!(Operand::decode(word), Some(Operand::Local(LocalVar(7))));
}

#[test]
fn test_enclosing_var_packing() {
    let var = EnclosingVar::new(2, 5);
    assert_eq!(var.raw(), 0x0002_0005);
    assert_eq!(EnclosingVar::from_raw(var.raw()), var);
}

#[test]
fn test_node_id_debug() {
    assert_eq!(format!("{:?}", NodeId::new(40)), "NodeId(@40)");
}

proptest! {
    #[test]
    fn immediate_ints_survive_encoding(value in IMMEDIATE_MIN..=IMMEDIATE_MAX) {
        let op = Operand::Int(value);
        prop_assert_eq!(Operand::decode(op.encode()), Some(op));
    }
}
