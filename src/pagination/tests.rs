//! Tests for pagination module

use super::*;
use crate::error::{Error, FailureKind};
use crate::types::ContinuationToken;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

fn token(raw: &str) -> ContinuationToken {
    ContinuationToken::new(raw).unwrap()
}

// ============================================================================
// NextPage Tests
// ============================================================================

#[test]
fn test_next_page_token() {
    let next = NextPage::Continue(token("Bilbo"));
    assert!(!next.is_done());
    assert_eq!(next.token().map(ContinuationToken::as_str), Some("Bilbo"));

    assert!(NextPage::Done.is_done());
    assert!(NextPage::Done.token().is_none());
}

// ============================================================================
// ContinuationPaginator Tests
// ============================================================================

#[test]
fn test_continuation_first_request_has_no_token() {
    let paginator = ContinuationPaginator::default();
    assert!(paginator.request_params(None).is_empty());
}

#[test]
fn test_continuation_round_trip() {
    let paginator = ContinuationPaginator::default();

    let body = json!({
        "continue": {"apcontinue": "T1", "continue": "-||"},
        "query": {"allpages": [{"title": "Aragorn"}, {"title": "Bilbo"}]}
    });

    let next = paginator.next_page(&body).unwrap();
    assert_eq!(next, NextPage::Continue(token("T1")));

    assert_eq!(
        paginator.request_params(next.token()),
        vec![("apcontinue".to_string(), "T1".to_string())]
    );
}

#[test]
fn test_continuation_done_without_token() {
    let paginator = ContinuationPaginator::default();

    let body = json!({
        "batchcomplete": "",
        "query": {"allpages": [{"title": "Frodo"}]}
    });

    assert!(paginator.next_page(&body).unwrap().is_done());
}

#[test_case(json!({"continue": {"apcontinue": ""}}) ; "empty string")]
#[test_case(json!({"continue": {"apcontinue": null}}) ; "null token")]
#[test_case(json!({"continue": false}) ; "continue not an object")]
#[test_case(json!({"continue": {"continue": "-||"}}) ; "other continuation only")]
fn test_continuation_absent_token_is_done(body: serde_json::Value) {
    let paginator = ContinuationPaginator::default();
    assert!(paginator.next_page(&body).unwrap().is_done());
}

#[test_case(json!({"continue": {"apcontinue": false}}), "a boolean" ; "boolean false")]
#[test_case(json!({"continue": {"apcontinue": true}}), "a boolean" ; "boolean true")]
#[test_case(json!({"continue": {"apcontinue": 42}}), "a number" ; "number")]
#[test_case(json!({"continue": {"apcontinue": ["T1"]}}), "an array" ; "array")]
fn test_continuation_non_string_token_is_protocol_error(body: serde_json::Value, kind: &str) {
    let paginator = ContinuationPaginator::default();

    let err = paginator.next_page(&body).unwrap_err();
    assert_eq!(err.failure_kind(), FailureKind::Protocol);
    match err {
        Error::Protocol { message } => assert_eq!(
            message,
            format!("'continue.apcontinue' is {kind}, expected a string")
        ),
        other => panic!("Expected protocol error, got {other:?}"),
    }
}

#[test]
fn test_continuation_custom_param_and_path() {
    let paginator = ContinuationPaginator::new("cmcontinue", "continue.cmcontinue");

    let body = json!({"continue": {"cmcontinue": "page|123"}});
    let next = paginator.next_page(&body).unwrap();

    assert_eq!(next, NextPage::Continue(token("page|123")));
    assert_eq!(
        paginator.request_params(next.token()),
        vec![("cmcontinue".to_string(), "page|123".to_string())]
    );
}
