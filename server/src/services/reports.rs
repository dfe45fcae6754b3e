//! Pre-computed report files.
//!
//! SYSTEM CONTEXT
//! ==============
//! The CLI writes portfolio, performance and tax results as JSON files into
//! the reports directory. The API only serves them; nothing here computes
//! financial figures.

use std::path::{Path, PathBuf};

use serde_json::Value;
use session::ErrorDetails;
use time::Date;
use time::macros::format_description;

/// File whose presence means events have been imported.
const EVENTS_MARKER: &str = "events.json";
const DOCKER_MARKER: &str = "/.dockerenv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    Portfolio,
    Pl,
    Performance,
    Dividends,
    Taxation,
    Positions,
    Timeline,
}

impl Report {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Portfolio => "portfolio",
            Self::Pl => "pl",
            Self::Performance => "performance",
            Self::Dividends => "dividends",
            Self::Taxation => "taxation",
            Self::Positions => "positions",
            Self::Timeline => "timeline",
        }
    }

    #[must_use]
    pub fn file_name(self) -> String {
        format!("{}.json", self.name())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("the file '{}' could not be found", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read '{}': {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("'{}' is not valid JSON: {source}", path.display())]
    Malformed { path: PathBuf, source: serde_json::Error },
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("portfolio is empty and no events have been imported")]
    EmptyPortfolio,
}

/// Read a report file as raw JSON text.
pub async fn read_report(dir: &Path, file_name: &str) -> Result<String, ReportError> {
    let path = dir.join(file_name);
    match tokio::fs::read_to_string(&path).await {
        Ok(data) => Ok(data),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(ReportError::NotFound(path)),
        Err(source) => Err(ReportError::Io { path, source }),
    }
}

/// Read and parse a report file.
pub async fn read_report_json(dir: &Path, file_name: &str) -> Result<Value, ReportError> {
    let data = read_report(dir, file_name).await?;
    serde_json::from_str(&data).map_err(|source| ReportError::Malformed { path: dir.join(file_name), source })
}

/// Portfolio report, rejected when it holds no positions and nothing was imported.
pub async fn read_portfolio(dir: &Path) -> Result<String, ReportError> {
    let data = read_report(dir, &Report::Portfolio.file_name()).await?;
    let empty = serde_json::from_str::<Value>(&data).is_ok_and(|value| portfolio_is_empty(&value));
    if empty && !events_present(dir).await {
        return Err(ReportError::EmptyPortfolio);
    }
    Ok(data)
}

/// Positions as of `date`, falling back to the latest snapshot.
pub async fn read_positions(dir: &Path, date: Option<&str>) -> Result<String, ReportError> {
    if let Some(raw) = date {
        let date = parse_date(raw)?;
        match read_report(dir, &format!("positions-{date}.json")).await {
            Err(ReportError::NotFound(_)) => {}
            other => return other,
        }
    }
    read_report(dir, &Report::Positions.file_name()).await
}

/// Timeline events on or after `start_date`, newest first.
pub async fn read_timeline(dir: &Path, start_date: &str) -> Result<Vec<Value>, ReportError> {
    let start = parse_date(start_date)?;
    let file_name = Report::Timeline.file_name();
    let value = read_report_json(dir, &file_name).await?;
    let events: Vec<Value> =
        serde_json::from_value(value).map_err(|source| ReportError::Malformed { path: dir.join(&file_name), source })?;
    Ok(filter_timeline(events, start))
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Result<Date, ReportError> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| ReportError::InvalidDate(raw.to_owned()))
}

fn event_date(event: &Value) -> Option<Date> {
    let raw = event.get("date")?.as_str()?;
    let day = raw.get(..10)?;
    parse_date(day).ok()
}

#[must_use]
pub fn filter_timeline(events: Vec<Value>, start: Date) -> Vec<Value> {
    let mut kept: Vec<(Date, Value)> = events
        .into_iter()
        .filter_map(|event| {
            let Some(date) = event_date(&event) else {
                tracing::debug!(?event, "skipping timeline event without a date");
                return None;
            };
            (date >= start).then_some((date, event))
        })
        .collect();
    kept.sort_by(|(a_date, a), (b_date, b)| {
        b_date
            .cmp(a_date)
            .then_with(|| date_text(b).cmp(date_text(a)))
    });
    kept.into_iter().map(|(_, event)| event).collect()
}

fn date_text(event: &Value) -> &str {
    event.get("date").and_then(Value::as_str).unwrap_or_default()
}

#[must_use]
pub fn portfolio_is_empty(value: &Value) -> bool {
    value
        .get("positions")
        .and_then(Value::as_array)
        .is_some_and(Vec::is_empty)
}

pub async fn events_present(dir: &Path) -> bool {
    tokio::fs::try_exists(dir.join(EVENTS_MARKER)).await.unwrap_or(false)
}

pub async fn is_running_in_docker() -> bool {
    tokio::fs::try_exists(DOCKER_MARKER).await.unwrap_or(false)
}

/// Hints attached to report errors so clients can pick the right empty state.
pub async fn environment_details(dir: &Path) -> ErrorDetails {
    ErrorDetails {
        in_docker: Some(is_running_in_docker().await),
        events_present: Some(events_present(dir).await),
    }
}

#[cfg(test)]
#[path = "reports_test.rs"]
mod tests;
