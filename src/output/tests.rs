//! Tests for output module

use super::*;
use crate::collector::{CollectionOutcome, CollectorStats, CompletionStatus};
use crate::error::FailureKind;
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn titles(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

#[test]
fn test_titles_to_json_is_pretty_array() {
    let bytes = titles_to_json(&titles(&["Aragorn", "Bilbo", "Frodo"])).unwrap();
    let text = std::str::from_utf8(&bytes).unwrap();

    assert_eq!(text, "[\n  \"Aragorn\",\n  \"Bilbo\",\n  \"Frodo\"\n]");
}

#[test]
fn test_titles_to_json_empty() {
    let bytes = titles_to_json(&[]).unwrap();
    assert_eq!(&bytes[..], b"[]");
}

#[test]
fn test_titles_to_json_escapes() {
    let bytes = titles_to_json(&titles(&["\"Quoted\" Title", "Lúthien"])).unwrap();
    let parsed: Vec<String> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(parsed, vec!["\"Quoted\" Title", "Lúthien"]);
}

#[test]
fn test_titles_to_lines() {
    let bytes = titles_to_lines(&titles(&["Bree", "Rivendell"]));
    assert_eq!(&bytes[..], b"Bree\nRivendell");
}

#[test]
fn test_run_summary_json() {
    let outcome = CollectionOutcome {
        titles: titles(&["Aragorn", "Bilbo"]),
        status: CompletionStatus::Aborted {
            kind: FailureKind::Transport,
            message: "Request timeout after 200ms".to_string(),
        },
        stats: CollectorStats {
            requests: 2,
            batches: 1,
            titles: 2,
            duration_ms: 450,
        },
    };
    let started = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let finished = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 1).unwrap();

    let summary = RunSummary::new(
        "https://tolkiengateway.net/w/api.php",
        500,
        &outcome,
        started,
        finished,
    );
    let value: Value = serde_json::from_slice(&summary.to_json().unwrap()).unwrap();

    assert_eq!(
        value,
        json!({
            "source": "https://tolkiengateway.net/w/api.php",
            "page_size": 500,
            "total_titles": 2,
            "status": {
                "state": "aborted",
                "kind": "transport",
                "message": "Request timeout after 200ms"
            },
            "stats": {"requests": 2, "batches": 1, "titles": 2, "duration_ms": 450},
            "started_at": "2024-03-01T12:00:00Z",
            "finished_at": "2024-03-01T12:00:01Z"
        })
    );
}
