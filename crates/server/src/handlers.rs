//! Request handlers.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use lexiscope_core::{ANONYMOUS_REQUESTER, validate_url};
use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::config::ServerConfig;
use crate::db;
use crate::state::AppState;

/// Header carrying the caller's identity.
pub const REQUESTER_HEADER: &str = "x-requester";

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 500;

/// Body of `POST /data`.
#[derive(Debug, Deserialize)]
pub struct AnalyzeForm {
    #[serde(rename = "Url")]
    pub url: String,
}

/// Body of `POST /api/analyze`.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub url: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PageParams {
    fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

/// Identity from the requester header, or the anonymous sentinel.
pub fn requester_from(headers: &HeaderMap) -> &str {
    headers
        .get(REQUESTER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(ANONYMOUS_REQUESTER)
}

/// Accepts absolute http(s) URLs only.
fn parse_target(raw: &str) -> Result<Url, String> {
    let url = validate_url(raw.trim()).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("Unsupported URL scheme: {}", other)),
    }
}

fn can_view_history(config: &ServerConfig, requester: &str, owner: &str) -> bool {
    requester.eq_ignore_ascii_case(owner) || config.is_super_user(requester)
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

pub async fn health() -> impl IntoResponse {
    StatusCode::OK
}

pub async fn analyze_form(
    State(state): State<AppState>, headers: HeaderMap, Form(form): Form<AnalyzeForm>,
) -> Response {
    analyze(&state, &form.url, requester_from(&headers)).await
}

pub async fn analyze_json(
    State(state): State<AppState>, headers: HeaderMap, Json(request): Json<AnalyzeRequest>,
) -> Response {
    analyze(&state, &request.url, requester_from(&headers)).await
}

/// Fetch failures still answer 200 with an empty result; only a malformed URL is rejected.
async fn analyze(state: &AppState, raw_url: &str, requester: &str) -> Response {
    let url = match parse_target(raw_url) {
        Ok(url) => url,
        Err(message) => return error_response(StatusCode::UNPROCESSABLE_ENTITY, message),
    };

    let result = state.analyzer.analyze(url.as_str(), requester).await;
    Json(result).into_response()
}

/// Stored analyses for one requester, newest first.
///
/// Only the owner of the history or a super user may read it.
pub async fn user_history(
    State(state): State<AppState>, headers: HeaderMap, Path(email): Path<String>, Query(params): Query<PageParams>,
) -> Response {
    let requester = requester_from(&headers);
    if !can_view_history(&state.config, requester, &email) {
        tracing::warn!(requester, email = %email, "History access denied");
        return error_response(StatusCode::FORBIDDEN, "Not authorized to view these analyses");
    }

    let loaded = tokio::try_join!(
        db::count_by_requester(&state.pool, &email),
        db::list_by_requester(&state.pool, &email, params.limit(), params.offset()),
    );

    match loaded {
        Ok((count, analyses)) => Json(json!({
            "email": email,
            "count": count,
            "analyses": analyses,
        }))
        .into_response(),
        Err(e) => {
            tracing::error!(email = %email, "Failed to load analyses: {:#}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load analyses")
        }
    }
}

/// Every stored analysis. Restricted to configured super users.
pub async fn dashboard(
    State(state): State<AppState>, headers: HeaderMap, Query(params): Query<PageParams>,
) -> Response {
    let requester = requester_from(&headers);
    if !state.config.is_super_user(requester) {
        tracing::warn!(requester, "Dashboard access denied");
        return error_response(StatusCode::FORBIDDEN, "Not authorized to view all analyses");
    }

    let loaded = tokio::try_join!(
        db::count_all(&state.pool),
        db::list_all(&state.pool, params.limit(), params.offset()),
    );

    match loaded {
        Ok((count, analyses)) => Json(json!({
            "count": count,
            "analyses": analyses,
        }))
        .into_response(),
        Err(e) => {
            tracing::error!("Failed to load analyses: {:#}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load analyses")
        }
    }
}
