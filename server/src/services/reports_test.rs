use serde_json::json;
use time::macros::date;

use super::*;

fn write(dir: &Path, name: &str, body: &str) {
    std::fs::write(dir.join(name), body).expect("write fixture");
}

// =============================================================================
// parse_date / filter_timeline
// =============================================================================

#[test]
fn parse_date_accepts_iso_day() {
    assert_eq!(parse_date("2024-03-01").expect("date"), date!(2024 - 03 - 01));
}

#[test]
fn parse_date_rejects_other_shapes() {
    for raw in ["2024/03/01", "01-03-2024", "2024-13-01", ""] {
        assert!(matches!(parse_date(raw), Err(ReportError::InvalidDate(_))), "accepted {raw:?}");
    }
}

#[test]
fn filter_timeline_keeps_events_from_start_newest_first() {
    let events = vec![
        json!({"date": "2023-12-31T10:00:00Z", "event_type": "Trade"}),
        json!({"date": "2024-01-05T09:00:00Z", "event_type": "Dividend"}),
        json!({"date": "2024-01-01T00:00:00Z", "event_type": "Trade"}),
        json!({"date": "2024-01-05T17:30:00Z", "event_type": "Trade"}),
    ];
    let kept = filter_timeline(events, date!(2024 - 01 - 01));
    let dates: Vec<&str> = kept.iter().map(|e| e["date"].as_str().unwrap_or_default()).collect();
    assert_eq!(
        dates,
        vec!["2024-01-05T17:30:00Z", "2024-01-05T09:00:00Z", "2024-01-01T00:00:00Z"]
    );
}

#[test]
fn filter_timeline_drops_undated_events() {
    let events = vec![json!({"event_type": "Trade"}), json!({"date": 12})];
    assert!(filter_timeline(events, date!(2020 - 01 - 01)).is_empty());
}

#[test]
fn portfolio_is_empty_only_for_empty_positions() {
    assert!(portfolio_is_empty(&json!({"positions": []})));
    assert!(!portfolio_is_empty(&json!({"positions": [{"isin": "X"}]})));
    assert!(!portfolio_is_empty(&json!({"total_value": 1})));
}

#[test]
fn report_file_names() {
    assert_eq!(Report::Taxation.file_name(), "taxation.json");
    assert_eq!(Report::Pl.name(), "pl");
}

// =============================================================================
// file access
// =============================================================================

#[tokio::test]
async fn read_report_missing_file_is_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = read_report(dir.path(), "taxation.json").await.expect_err("missing");
    assert!(matches!(err, ReportError::NotFound(path) if path.ends_with("taxation.json")));
}

#[tokio::test]
async fn read_report_returns_raw_text() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "pl.json", r#"{"realized":12.5}"#);
    assert_eq!(read_report(dir.path(), "pl.json").await.expect("read"), r#"{"realized":12.5}"#);
}

#[tokio::test]
async fn read_report_json_flags_malformed_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "timeline.json", "[oops");
    let err = read_report_json(dir.path(), "timeline.json").await.expect_err("malformed");
    assert!(matches!(err, ReportError::Malformed { .. }));
}

#[tokio::test]
async fn empty_portfolio_without_events_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "portfolio.json", r#"{"positions":[]}"#);
    assert!(matches!(read_portfolio(dir.path()).await, Err(ReportError::EmptyPortfolio)));

    write(dir.path(), "events.json", "[]");
    assert!(read_portfolio(dir.path()).await.is_ok());
}

#[tokio::test]
async fn positions_prefer_dated_snapshot() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "positions.json", r#"["latest"]"#);
    write(dir.path(), "positions-2024-06-30.json", r#"["june"]"#);

    assert_eq!(read_positions(dir.path(), Some("2024-06-30")).await.expect("dated"), r#"["june"]"#);
    assert_eq!(read_positions(dir.path(), Some("2024-07-01")).await.expect("fallback"), r#"["latest"]"#);
    assert_eq!(read_positions(dir.path(), None).await.expect("latest"), r#"["latest"]"#);
}

#[tokio::test]
async fn positions_reject_malformed_date() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert!(matches!(
        read_positions(dir.path(), Some("yesterday")).await,
        Err(ReportError::InvalidDate(_))
    ));
}

#[tokio::test]
async fn environment_details_reports_imported_events() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert_eq!(environment_details(dir.path()).await.events_present, Some(false));
    write(dir.path(), "events.json", "[]");
    assert_eq!(environment_details(dir.path()).await.events_present, Some(true));
}

#[tokio::test]
async fn timeline_that_is_not_a_list_is_malformed() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "timeline.json", r#"{"events":[]}"#);
    let err = read_timeline(dir.path(), "2024-01-01").await.expect_err("wrong shape");
    assert!(matches!(err, ReportError::Malformed { ref path, .. } if path.ends_with("timeline.json")));
}

#[tokio::test]
async fn docker_detection_matches_marker_file() {
    let expected = std::path::Path::new("/.dockerenv").exists();
    assert_eq!(is_running_in_docker().await, expected);
    let dir = tempfile::tempdir().expect("tempdir");
    assert_eq!(environment_details(dir.path()).await.in_docker, Some(expected));
}
