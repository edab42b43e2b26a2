use super::*;
use pretty_assertions::assert_eq;

fn pending(args: i32) -> PendingFunction {
    PendingFunction {
        arg_count: args,
        local_count: 0,
        names: Vec::new(),
        body: Body::new(64, SourceId(3), 1),
    }
}

#[test]
fn test_restores_in_reverse_order() {
    let mut scopes = ScopeStack::default();
    scopes.push(Continuation {
        cursor: 0,
        function: None,
    });
    scopes.push(Continuation {
        cursor: 96,
        function: Some(pending(2)),
    });
    assert_eq!(scopes.depth(), 2);

    let inner = scopes.pop();
    assert!(matches!(
        inner,
        Ok(Continuation { cursor: 96, function: Some(ref f) }) if f.arg_count == 2
    ));
    assert!(matches!(
        scopes.pop(),
        Ok(Continuation {
            cursor: 0,
            function: None
        })
    ));
    assert_eq!(scopes.depth(), 0);
}

#[test]
fn test_underflow() {
    let mut scopes = ScopeStack::default();
    assert!(matches!(scopes.pop(), Err(CodeError::ScopeUnderflow)));
}

#[test]
fn test_pending_source() {
    assert_eq!(pending(0).source(), SourceId(3));
}
