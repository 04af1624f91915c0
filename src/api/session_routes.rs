//! # Session Routes
//!
//! Session CRUD plus the dynamic filter endpoint. Listing (and filtering)
//! return the flattened view with referent names resolved; update and
//! delete on a missing id are 404s.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};

use crate::db::types::{NewSession, SessionFilter, SessionPatch, SessionView};

use super::errors::{ApiError, ApiResult};
use super::{ApiState, MessageResponse};

pub fn session_routes(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/sessions", get(list_sessions))
        .route("/sessions", post(create_session))
        .route("/sessions/:id", put(update_session))
        .route("/sessions/:id", delete(delete_session))
        .route("/sessions/filter", post(filter_sessions))
        .with_state(state)
}

async fn list_sessions(State(state): State<Arc<ApiState>>) -> ApiResult<Json<Vec<SessionView>>> {
    Ok(Json(state.store.list_sessions()?))
}

async fn create_session(
    State(state): State<Arc<ApiState>>,
    body: Result<Json<NewSession>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(session) = body?;
    state.store.insert_session(&session)?;
    Ok(Json(MessageResponse::new("Session added")))
}

async fn update_session(
    State(state): State<Arc<ApiState>>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<SessionPatch>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = path?;
    let Json(patch) = body?;
    if !state.store.update_session(id, &patch)? {
        return Err(ApiError::SessionNotFound(id));
    }
    Ok(Json(MessageResponse::new("Session updated")))
}

async fn delete_session(
    State(state): State<Arc<ApiState>>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = path?;
    if !state.store.delete_session(id)? {
        return Err(ApiError::SessionNotFound(id));
    }
    Ok(Json(MessageResponse::new("Session deleted")))
}

async fn filter_sessions(
    State(state): State<Arc<ApiState>>,
    body: Result<Json<SessionFilter>, JsonRejection>,
) -> ApiResult<Json<Vec<SessionView>>> {
    let Json(filter) = body?;
    Ok(Json(state.store.filter_sessions(&filter)?))
}
