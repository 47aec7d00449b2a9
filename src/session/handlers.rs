use super::protocol::*;
use super::registry::{SessionId, SessionRegistry};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionRegistry>,
    pub long_poll: Duration,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(ENDPOINT_PAGE, get(handle_page))
        .route(ENDPOINT_EVENTS, post(handle_event))
        .route(ENDPOINT_VIEW, get(handle_view))
        .route(ENDPOINT_CLOSE, post(handle_close))
        .route(ENDPOINT_HEALTH, get(handle_health))
        .with_state(state)
}

pub async fn handle_page(
    State(state): State<AppState>,
) -> Result<Html<String>, (StatusCode, String)> {
    let id = state.sessions.open();

    match state.sessions.renderer().render_shell(&id.0) {
        Ok(page) => Ok(Html(page)),
        Err(e) => {
            tracing::error!("Failed to render page for session {}: {:#}", id.0, e);
            state.sessions.close(&id);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "page unavailable".to_string()))
        }
    }
}

pub async fn handle_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(event): Json<UiEvent>,
) -> (StatusCode, Json<EventResponse>) {
    let Some(handle) = state.sessions.handle(&SessionId(id.clone())) else {
        tracing::debug!("Event for unknown session {}", id);
        return (StatusCode::NOT_FOUND, Json(EventResponse { accepted: false }));
    };

    match handle.send(event.into()) {
        Ok(_) => (StatusCode::ACCEPTED, Json(EventResponse { accepted: true })),
        Err(e) => {
            tracing::warn!("Failed to deliver event to session {}: {}", id, e);
            (StatusCode::GONE, Json(EventResponse { accepted: false }))
        }
    }
}

pub async fn handle_view(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ViewParams>,
) -> Result<Json<ViewResponse>, (StatusCode, String)> {
    let handle = state
        .sessions
        .handle(&SessionId(id.clone()))
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("unknown session {}", id)))?;

    let view = match params.since {
        Some(since) => handle.view_after(since, state.long_poll).await,
        None => handle.current_view(),
    };

    Ok(Json(view))
}

pub async fn handle_close(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    if state.sessions.close(&SessionId(id)) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

pub async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        sessions: state.sessions.len(),
    })
}
