use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_raw_values_follow_declaration_order() {
    for (index, tag) in NodeTag::ALL.iter().enumerate() {
        assert_eq!(usize::from(tag.raw()), index, "{tag:?}");
        assert_eq!(NodeTag::from_raw(tag.raw()), Some(*tag));
    }
    let past_end = u8::try_from(NodeTag::ALL.len()).unwrap_or(u8::MAX);
    assert_eq!(NodeTag::from_raw(past_end), None);
}

#[test]
fn test_seq_family() {
    assert_eq!(NodeTag::seq(0), None);
    assert_eq!(NodeTag::seq(1), Some(NodeTag::SeqStat));
    assert_eq!(NodeTag::seq(2), Some(NodeTag::SeqStat2));
    assert_eq!(NodeTag::seq(7), Some(NodeTag::SeqStat7));
    assert_eq!(NodeTag::seq(8), None);
    assert!(NodeTag::SeqStat5.is_seq());
    assert!(!NodeTag::If.is_seq());
}

#[test]
fn test_call_families() {
    assert_eq!(NodeTag::func_call(0), NodeTag::FuncCall0Args);
    assert_eq!(NodeTag::func_call(6), NodeTag::FuncCall6Args);
    assert_eq!(NodeTag::func_call(7), NodeTag::FuncCallXArgs);
    assert_eq!(NodeTag::func_call(200), NodeTag::FuncCallXArgs);
    assert_eq!(NodeTag::proc_call(3), NodeTag::ProcCall3Args);
    assert_eq!(NodeTag::proc_call(9), NodeTag::ProcCallXArgs);
}

#[test]
fn test_loop_families() {
    assert_eq!(NodeTag::For.loop_with_body(1), Some(NodeTag::For));
    assert_eq!(NodeTag::For.loop_with_body(3), Some(NodeTag::For3));
    assert_eq!(NodeTag::ForRange.loop_with_body(2), Some(NodeTag::ForRange2));
    assert_eq!(NodeTag::While.loop_with_body(2), Some(NodeTag::While2));
    assert_eq!(NodeTag::Repeat.loop_with_body(3), Some(NodeTag::Repeat3));
    assert_eq!(NodeTag::Repeat.loop_with_body(4), None);
    assert_eq!(NodeTag::For2.loop_with_body(1), None);
}

#[test]
fn test_statement_split() {
    assert!(NodeTag::Pragma.is_statement());
    assert!(NodeTag::ReturnVoid.is_statement());
    assert!(!NodeTag::FuncCall0Args.is_statement());
    assert!(!NodeTag::Sum.is_statement());
}

#[test]
fn test_slot_kinds() {
    assert_eq!(NodeTag::AssLVar.slot_kind(0, 2), SlotKind::Raw);
    assert_eq!(NodeTag::AssLVar.slot_kind(1, 2), SlotKind::Operand);
    assert_eq!(NodeTag::ElmListLev.slot_kind(2, 3), SlotKind::Raw);
    assert_eq!(NodeTag::ElmListLev.slot_kind(1, 3), SlotKind::Operand);
    assert_eq!(NodeTag::ElmRecName.slot_kind(1, 2), SlotKind::Raw);
    assert_eq!(NodeTag::ElmRecExpr.slot_kind(1, 2), SlotKind::Operand);
    assert_eq!(NodeTag::FloatLazy.slot_kind(0, 2), SlotKind::Raw);
    assert_eq!(NodeTag::FloatLazy.slot_kind(1, 2), SlotKind::Value);
    assert_eq!(NodeTag::FloatEager.slot_kind(2, 3), SlotKind::Raw);
    assert_eq!(NodeTag::String.slot_kind(0, 1), SlotKind::Value);
    assert_eq!(NodeTag::Sum.slot_kind(0, 2), SlotKind::Operand);
}

#[test]
fn test_display_uses_name() {
    assert_eq!(NodeTag::ReturnObj.to_string(), "return");
    assert_eq!(NodeTag::SeqStat3.to_string(), "seq-3");
}
