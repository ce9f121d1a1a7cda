use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::{Local, Utc};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::warn;

use catalog::remote::fetch_catalog;

use crate::{
    database::load_table,
    error::AppError,
    gaps::{GapEntry, find_gaps},
    issues::{RequestOutcome, submit_request},
    keywords::{HOT_THRESHOLD, HotLevel, MAX_KEYWORD_CHARS, is_hot},
    ranking::{
        HOT_LIST_LIMIT, HotEntry, SYNC_EXPORT_LIMIT, debug_summary, sync_export, top_hot,
    },
    state::AppState,
    stats::record_search,
    utils::{keyword_from_body, timestamp},
};

pub const ENDPOINTS: [&str; 8] = [
    "/api/record",
    "/api/hot",
    "/api/sync",
    "/api/debug",
    "/api/gaps",
    "/api/request",
    "/api/health",
    "/api/ping",
];

#[derive(Deserialize)]
pub struct RecordParams {
    q: Option<String>,
    keyword: Option<String>,
}

pub async fn record_get_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RecordParams>,
) -> Response {
    let raw = params.q.or(params.keyword).unwrap_or_default();

    record_keyword(state, raw, Method::GET).await
}

pub async fn record_post_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RecordParams>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let raw = keyword_from_body(&headers, params.q.as_deref(), &body).unwrap_or_default();

    record_keyword(state, raw, Method::POST).await
}

async fn record_keyword(state: Arc<AppState>, raw: String, method: Method) -> Response {
    let mut connection = state.redis_connection.clone();

    match record_search(&mut connection, &raw).await {
        Ok((keyword, count)) => {
            let body = json!({
                "success": true,
                "keyword": keyword,
                "count": count,
                "method": method.as_str(),
                "timestamp": timestamp(),
                "isHot": is_hot(count),
                "hotLevel": HotLevel::classify(count),
            });

            (
                StatusCode::OK,
                [(header::CACHE_CONTROL, "no-store")],
                Json(body),
            )
                .into_response()
        }
        Err(AppError::MissingKeyword) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "error": "Missing keyword",
                "usage": {
                    "GET": "/api/record?q=<keyword>",
                    "POST": r#"{"keyword":"<keyword>"}"#,
                },
            })),
        )
            .into_response(),
        Err(AppError::KeywordTooLong(length)) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "error": "Keyword too long",
                "maxLength": MAX_KEYWORD_CHARS,
                "receivedLength": length,
            })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn hot_handler(State(state): State<Arc<AppState>>) -> Json<Vec<HotEntry>> {
    let mut connection = state.redis_connection.clone();
    let table = load_table(&mut connection).await;

    Json(top_hot(&table, HOT_THRESHOLD, HOT_LIST_LIMIT))
}

#[derive(Deserialize)]
pub struct SyncParams {
    key: Option<String>,
}

pub async fn sync_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SyncParams>,
) -> Result<Response, AppError> {
    if params.key.as_deref() != Some(state.config.sync_key.as_str()) {
        return Err(AppError::Unauthorized);
    }

    let mut connection = state.redis_connection.clone();
    let table = load_table(&mut connection).await;

    Ok(Json(sync_export(&table, HOT_THRESHOLD, SYNC_EXPORT_LIMIT)).into_response())
}

pub async fn debug_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    let mut connection = state.redis_connection.clone();
    let table = load_table(&mut connection).await;

    Json(json!({
        "debug": true,
        "summary": debug_summary(&table, HOT_THRESHOLD),
        "timestamp": timestamp(),
    }))
}

pub async fn gaps_handler(State(state): State<Arc<AppState>>) -> Json<Vec<GapEntry>> {
    let mut connection = state.redis_connection.clone();
    let table = load_table(&mut connection).await;

    let items = match fetch_catalog(&state.http_client, &state.config.catalog_url).await {
        Ok(items) => items,
        Err(e) => {
            warn!("Catalog fetch failed, every hot keyword will report as a gap: {e}");
            Vec::new()
        }
    };

    let today = Local::now().date_naive();

    Json(find_gaps(&table, &items, HOT_THRESHOLD, today))
}

#[derive(Deserialize)]
pub struct ResourceRequest {
    keyword: String,
}

pub async fn request_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ResourceRequest>,
) -> Result<Json<Value>, AppError> {
    let keyword = payload.keyword.trim();

    if keyword.is_empty() {
        return Err(AppError::MissingKeyword);
    }

    let outcome = submit_request(&state.http_client, &state.config, keyword).await?;

    let message = match outcome {
        RequestOutcome::Bumped => "Request bumped",
        RequestOutcome::Created => "Request submitted",
    };

    Ok(Json(json!({ "message": message })))
}

pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "hotwords-api",
        "timestamp": timestamp(),
        "endpoints": ENDPOINTS,
    }))
}

pub async fn ping_handler() -> Json<Value> {
    Json(json!({
        "pong": Utc::now().timestamp_millis(),
        "timestamp": timestamp(),
    }))
}

pub async fn not_found_handler() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Endpoint not found",
            "available": ENDPOINTS,
        })),
    )
}
