//! # Domain Types
//!
//! Record shapes for the four entities plus the request/response payloads
//! the HTTP layer exchanges with the storage layer.
//!
//! The session payloads (`NewSession`, `SessionPatch`) are explicit
//! allow-lists: `deny_unknown_fields` rejects any key that is not a session
//! column instead of silently applying it.

use serde::{Deserialize, Serialize};

/// A tutor, student or subject row: `{id, name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedRow {
    pub id: i64,
    pub name: String,
}

/// One tutoring appointment as stored.
///
/// Referent ids are nullable and unconstrained; they may point at rows that
/// no longer exist (or never did).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: i64,
    pub tutor_id: Option<i64>,
    pub student_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub date: String,
    pub duration_minutes: i64,
    pub notes: String,
}

/// A session flattened for listing, with referent names resolved.
///
/// Missing referents resolve to the literal string "Unknown".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub id: i64,
    pub tutor_name: String,
    pub student_name: String,
    pub subject_name: String,
    pub date: String,
    pub duration_minutes: i64,
    pub notes: String,
}

/// Payload for creating a session.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewSession {
    #[serde(default)]
    pub tutor_id: Option<i64>,
    #[serde(default)]
    pub student_id: Option<i64>,
    #[serde(default)]
    pub subject_id: Option<i64>,
    pub date: String,
    pub duration_minutes: i64,
    pub notes: String,
}

/// Partial update for a session; only present fields are overwritten.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionPatch {
    #[serde(default)]
    pub tutor_id: Option<i64>,
    #[serde(default)]
    pub student_id: Option<i64>,
    #[serde(default)]
    pub subject_id: Option<i64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl SessionPatch {
    /// Apply the present fields onto an existing session record.
    pub fn apply(&self, session: &mut Session) {
        if let Some(id) = self.tutor_id {
            session.tutor_id = Some(id);
        }
        if let Some(id) = self.student_id {
            session.student_id = Some(id);
        }
        if let Some(id) = self.subject_id {
            session.subject_id = Some(id);
        }
        if let Some(date) = &self.date {
            session.date = date.clone();
        }
        if let Some(minutes) = self.duration_minutes {
            session.duration_minutes = minutes;
        }
        if let Some(notes) = &self.notes {
            session.notes = notes.clone();
        }
    }
}

/// Optional predicates for the dynamic session filter.
///
/// Absent fields are omitted from the query entirely. Date bounds compare
/// lexically, which is correct only for zero-padded ISO dates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionFilter {
    #[serde(default)]
    pub tutor_id: Option<i64>,
    #[serde(default)]
    pub student_id: Option<i64>,
    #[serde(default)]
    pub min_duration: Option<i64>,
    #[serde(default)]
    pub max_duration: Option<i64>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// Parameters for the aggregate report.
///
/// The id fields are optional; the date bounds are mandatory and checked at
/// the handler boundary (both are needed for the BETWEEN comparison).
#[derive(Debug, Clone, Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub tutor_id: Option<i64>,
    #[serde(default)]
    pub subject_id: Option<i64>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// One summary row over the matching sessions.
///
/// `avg_duration` and `total_time` are null (not 0) when no rows match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub total_sessions: i64,
    pub avg_duration: Option<f64>,
    pub total_time: Option<i64>,
}
