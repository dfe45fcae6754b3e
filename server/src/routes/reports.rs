//! Report routes serving the pre-computed dashboard JSON.

use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use serde_json::Value;
use session::ApiError;

use crate::error::ErrorResponse;
use crate::services::reports::{self, Report, ReportError};
use crate::state::AppState;

fn json_body(data: String) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], data).into_response()
}

/// Map a report failure to its API error, attaching environment hints so the
/// client can tell "nothing imported yet" from "calculation not run".
async fn report_failure(state: &AppState, err: ReportError) -> ErrorResponse {
    let api = match &err {
        ReportError::InvalidDate(_) => {
            return ErrorResponse(ApiError::new(StatusCode::BAD_REQUEST.as_u16(), "InvalidDate", &err.to_string()));
        }
        ReportError::NotFound(_) => ApiError::new(StatusCode::NOT_FOUND.as_u16(), "FileNotFound", &err.to_string()),
        ReportError::EmptyPortfolio => ApiError::new(
            StatusCode::NOT_FOUND.as_u16(),
            "EmptyPortfolioError",
            "Empty portfolio without events",
        ),
        ReportError::Io { .. } | ReportError::Malformed { .. } => {
            tracing::error!(error = %err, "report read failed");
            ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                "InternalServerError",
                "An unexpected error occurred while reading the file.",
            )
        }
    };
    let details = reports::environment_details(&state.config.reports_dir).await;
    ErrorResponse(api.with_details(&details))
}

async fn serve_report(state: &AppState, report: Report) -> Result<Response, ErrorResponse> {
    match reports::read_report(&state.config.reports_dir, &report.file_name()).await {
        Ok(data) => Ok(json_body(data)),
        Err(err) => Err(report_failure(state, err).await),
    }
}

/// `GET /api/portfolio`
pub async fn portfolio(State(state): State<AppState>) -> Result<Response, ErrorResponse> {
    match reports::read_portfolio(&state.config.reports_dir).await {
        Ok(data) => Ok(json_body(data)),
        Err(err) => Err(report_failure(&state, err).await),
    }
}

/// `GET /api/pl`
pub async fn pl(State(state): State<AppState>) -> Result<Response, ErrorResponse> {
    serve_report(&state, Report::Pl).await
}

/// `GET /api/performance`
pub async fn performance(State(state): State<AppState>) -> Result<Response, ErrorResponse> {
    serve_report(&state, Report::Performance).await
}

/// `GET /api/dividends`
pub async fn dividends(State(state): State<AppState>) -> Result<Response, ErrorResponse> {
    serve_report(&state, Report::Dividends).await
}

/// `GET /api/taxation`
pub async fn taxation(State(state): State<AppState>) -> Result<Response, ErrorResponse> {
    serve_report(&state, Report::Taxation).await
}

#[derive(Debug, Deserialize)]
pub struct PositionsQuery {
    pub date: Option<String>,
}

/// `GET /api/positions?date=YYYY-MM-DD`
pub async fn positions(
    State(state): State<AppState>,
    Query(query): Query<PositionsQuery>,
) -> Result<Response, ErrorResponse> {
    match reports::read_positions(&state.config.reports_dir, query.date.as_deref()).await {
        Ok(data) => Ok(json_body(data)),
        Err(err) => Err(report_failure(&state, err).await),
    }
}

#[derive(Debug, Deserialize)]
pub struct TimelineQuery {
    pub start_date: String,
}

/// `GET /api/timeline?start_date=YYYY-MM-DD`
pub async fn timeline(
    State(state): State<AppState>,
    Query(query): Query<TimelineQuery>,
) -> Result<Json<Vec<Value>>, ErrorResponse> {
    match reports::read_timeline(&state.config.reports_dir, &query.start_date).await {
        Ok(events) => Ok(Json(events)),
        Err(err) => Err(report_failure(&state, err).await),
    }
}
