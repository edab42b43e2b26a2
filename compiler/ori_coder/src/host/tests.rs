use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_default_float_conversion() {
    let mut host = DefaultHost;
    assert_eq!(host.convert_float("2.5", None), Ok(2.5));
    assert_eq!(host.convert_float("1e3", Some('l')), Ok(1000.0));
    assert!(host.convert_float("two", None).is_err());
}

#[test]
fn test_default_record_names() {
    let mut host = DefaultHost;
    assert_eq!(host.record_name_for_int(17), Ok(RecordName(17)));
    assert_eq!(
        host.record_name_for_int(i64::from(u32::MAX)),
        Ok(RecordName(u32::MAX))
    );
}

#[test]
fn test_default_rejects_unnamed_integers() {
    let mut host = DefaultHost;
    for value in [-1, -2, i64::from(u32::MAX) + 1] {
        assert_eq!(
            host.record_name_for_int(value),
            Err(CodeError::InvalidRecordName { value })
        );
    }
}
