//! Tests for decode module

use super::*;
use crate::error::{Error, FailureKind};
use pretty_assertions::assert_eq;
use test_case::test_case;

#[test]
fn test_decode_allpages_batch() {
    let body = r#"{
        "batchcomplete": "",
        "continue": {"apcontinue": "Bilbo_Baggins", "continue": "-||"},
        "query": {"allpages": [
            {"pageid": 1, "ns": 0, "title": "Aragorn"},
            {"pageid": 2, "ns": 0, "title": "Arwen"}
        ]}
    }"#;

    let batch = AllPagesDecoder::new().decode(body).unwrap();

    assert_eq!(batch.titles, vec!["Aragorn", "Arwen"]);
    assert_eq!(batch.len(), 2);
    assert_eq!(batch.raw["continue"]["apcontinue"], "Bilbo_Baggins");
}

#[test]
fn test_decode_empty_allpages() {
    let batch = AllPagesDecoder::new()
        .decode(r#"{"query": {"allpages": []}}"#)
        .unwrap();
    assert!(batch.is_empty());
}

#[test]
fn test_decode_keeps_duplicates_and_order() {
    let body = r#"{"query": {"allpages": [
        {"title": "Frodo"}, {"title": "Bilbo"}, {"title": "Frodo"}
    ]}}"#;

    let batch = AllPagesDecoder::new().decode(body).unwrap();
    assert_eq!(batch.titles, vec!["Frodo", "Bilbo", "Frodo"]);
}

#[test]
fn test_decode_malformed_json() {
    let err = AllPagesDecoder::new().decode("<!DOCTYPE html>").unwrap_err();
    assert!(matches!(err, Error::JsonParse(_)));
    assert_eq!(err.failure_kind(), FailureKind::Protocol);
}

#[test_case(r#"{}"#, "response has no 'query.allpages'" ; "missing query")]
#[test_case(r#"{"query": {}}"#, "response has no 'query.allpages'" ; "missing allpages")]
#[test_case(r#"{"query": {"allpages": {"title": "x"}}}"#, "'query.allpages' is an object, expected an array" ; "allpages not array")]
#[test_case(r#"{"query": {"allpages": [{"pageid": 3}]}}"#, "record 0 in 'query.allpages' has no string 'title'" ; "record without title")]
#[test_case(r#"{"query": {"allpages": [{"title": "A"}, {"title": 7}]}}"#, "record 1 in 'query.allpages' has no string 'title'" ; "numeric title")]
fn test_decode_shape_errors(body: &str, expected: &str) {
    let err = AllPagesDecoder::new().decode(body).unwrap_err();
    match err {
        Error::Protocol { message } => assert_eq!(message, expected),
        other => panic!("Expected protocol error, got {other:?}"),
    }
}

#[test]
fn test_decode_api_error_envelope() {
    let body = r#"{"error": {"code": "badvalue", "info": "Unrecognized value for parameter \"list\": allpagez."}}"#;

    let err = AllPagesDecoder::new().decode(body).unwrap_err();
    assert_eq!(err.failure_kind(), FailureKind::Protocol);
    assert!(err.to_string().contains("API error 'badvalue'"));
}

#[test]
fn test_decode_custom_record_path() {
    let body = r#"{"query": {"categorymembers": [{"title": "Category:Hobbits"}]}}"#;

    let batch = AllPagesDecoder::new()
        .with_record_path("query.categorymembers")
        .decode(body)
        .unwrap();
    assert_eq!(batch.titles, vec!["Category:Hobbits"]);
}
