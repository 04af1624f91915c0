//! # HTTP Layer
//!
//! Axum routers for the tutoring API, all mounted under `/api`:
//! - `roster_routes`: tutors/students/subjects list + create
//! - `session_routes`: session CRUD and the dynamic filter
//! - `report_routes`: the aggregate report
//!
//! Every handler performs at most one storage operation and maps failures
//! to a JSON `{error, code}` body via [`errors::ApiError`].

pub mod config;
pub mod errors;
pub mod report_routes;
pub mod roster_routes;
pub mod server;
pub mod session_routes;

use serde::Serialize;

use crate::db::Store;

/// State shared across all handlers.
pub struct ApiState {
    pub store: Store,
}

/// Success body for mutating endpoints: `{"message": "..."}`.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
