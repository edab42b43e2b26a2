use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_classify_lazy() {
    assert_eq!(
        FloatLiteral::classify("3.14"),
        Ok(FloatLiteral::Lazy { text: "3.14" })
    );
    assert_eq!(
        FloatLiteral::classify("1.5e10"),
        Ok(FloatLiteral::Lazy { text: "1.5e10" })
    );
}

#[test]
fn test_classify_eager_without_mark() {
    assert_eq!(
        FloatLiteral::classify("3.14_"),
        Ok(FloatLiteral::Eager {
            text: "3.14",
            mark: None
        })
    );
}

#[test]
fn test_classify_eager_with_mark() {
    assert_eq!(
        FloatLiteral::classify("3.14_l"),
        Ok(FloatLiteral::Eager {
            text: "3.14",
            mark: Some('l')
        })
    );
}

#[test]
fn test_classify_rejects_empty() {
    assert!(matches!(
        FloatLiteral::classify(""),
        Err(CodeError::MalformedFloat { .. })
    ));
}

#[test]
fn test_zero_spellings() {
    for text in ["0.0", "0.000", ".0", "00.", "0.0e7", "0.e-3"] {
        assert_eq!(common_float_index(text), Some(FLOAT_ZERO_INDEX), "{text}");
    }
}

#[test]
fn test_one_spellings() {
    for text in ["1.", "1.0", "01.000", "1.0e0", "1.0e+00", "1.E-0"] {
        assert_eq!(common_float_index(text), Some(FLOAT_ONE_INDEX), "{text}");
    }
}

#[test]
fn test_other_values_are_not_common() {
    for text in ["0.5", "0.01", "2.0", "10.0", "1.5", "1.0e5", "3.14", "1", "0"] {
        assert_eq!(common_float_index(text), None, "{text}");
    }
}

#[test]
fn test_lazy_index_reserved_for_common_values() {
    assert_eq!(lazy_index("0.000"), Ok(FLOAT_ZERO_INDEX));
    assert_eq!(lazy_index("1.0"), Ok(FLOAT_ONE_INDEX));
}

#[test]
fn test_fresh_indices_are_distinct() {
    let first = lazy_index("3.14");
    let second = lazy_index("3.14");
    assert!(matches!(first, Ok(i) if i >= FIRST_FRESH_INDEX));
    assert!(matches!(second, Ok(i) if i >= FIRST_FRESH_INDEX));
    assert_ne!(first, second);
}

#[test]
fn test_restore_moves_counter_forward() {
    let target = next_index() + 100;
    restore(target);
    assert!(next_index() >= target);
}
