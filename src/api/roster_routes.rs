//! # Roster Routes
//!
//! List and create endpoints for tutors, students and subjects. These
//! entities are append-only: there are no update or delete endpoints.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::db::types::NamedRow;

use super::errors::ApiResult;
use super::{ApiState, MessageResponse};

/// Body for creating a tutor/student/subject.
#[derive(Debug, Deserialize)]
pub struct CreateNamed {
    pub name: String,
}

pub fn roster_routes(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/tutors", get(list_tutors).post(create_tutor))
        .route("/students", get(list_students).post(create_student))
        .route("/subjects", get(list_subjects).post(create_subject))
        .with_state(state)
}

async fn list_tutors(State(state): State<Arc<ApiState>>) -> ApiResult<Json<Vec<NamedRow>>> {
    Ok(Json(state.store.list_tutors()?))
}

async fn list_students(State(state): State<Arc<ApiState>>) -> ApiResult<Json<Vec<NamedRow>>> {
    Ok(Json(state.store.list_students()?))
}

async fn list_subjects(State(state): State<Arc<ApiState>>) -> ApiResult<Json<Vec<NamedRow>>> {
    Ok(Json(state.store.list_subjects()?))
}

async fn create_tutor(
    State(state): State<Arc<ApiState>>,
    body: Result<Json<CreateNamed>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let Json(body) = body?;
    state.store.insert_tutor(&body.name)?;
    Ok((StatusCode::CREATED, Json(MessageResponse::new("Tutor added"))))
}

async fn create_student(
    State(state): State<Arc<ApiState>>,
    body: Result<Json<CreateNamed>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let Json(body) = body?;
    state.store.insert_student(&body.name)?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Student added")),
    ))
}

async fn create_subject(
    State(state): State<Arc<ApiState>>,
    body: Result<Json<CreateNamed>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let Json(body) = body?;
    state.store.insert_subject(&body.name)?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Subject added")),
    ))
}
