//! # Store
//!
//! All read/write operations over a single SQLite connection behind a
//! mutex. One HTTP request performs at most one operation here, so the
//! connection's implicit per-statement transaction is the only isolation
//! in play.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use tracing::debug;

use super::schema;
use super::types::{NamedRow, NewSession, Report, Session, SessionFilter, SessionPatch, SessionView};

/// Name substituted for a referent that does not resolve to a row.
const UNKNOWN: &str = "Unknown";

const SESSION_COLUMNS: &str =
    "id, tutor_id, student_id, subject_id, date, duration_minutes, notes";

/// Database handle. Single connection, locked per operation.
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Open or create a database file at the given path.
    pub fn open(path: &Path) -> rusqlite::Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "
            PRAGMA foreign_keys = ON;
            PRAGMA journal_mode = WAL;
            ",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> rusqlite::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap()
    }

    /// Drop, recreate and seed the schema. See [`schema::init_schema`].
    pub fn init_schema(&self) -> rusqlite::Result<()> {
        schema::init_schema(&self.conn())
    }

    /// Create any missing tables/indexes. See [`schema::ensure_schema`].
    pub fn ensure_schema(&self) -> rusqlite::Result<()> {
        schema::ensure_schema(&self.conn())
    }

    // ============================================
    // Roster operations (tutors, students, subjects)
    // ============================================

    pub fn list_tutors(&self) -> rusqlite::Result<Vec<NamedRow>> {
        self.list_named("SELECT id, name FROM tutors")
    }

    pub fn list_students(&self) -> rusqlite::Result<Vec<NamedRow>> {
        self.list_named("SELECT id, name FROM students")
    }

    pub fn list_subjects(&self) -> rusqlite::Result<Vec<NamedRow>> {
        self.list_named("SELECT id, name FROM subjects")
    }

    pub fn insert_tutor(&self, name: &str) -> rusqlite::Result<i64> {
        self.insert_named("INSERT INTO tutors (name) VALUES (?1)", name)
    }

    pub fn insert_student(&self, name: &str) -> rusqlite::Result<i64> {
        self.insert_named("INSERT INTO students (name) VALUES (?1)", name)
    }

    pub fn insert_subject(&self, name: &str) -> rusqlite::Result<i64> {
        self.insert_named("INSERT INTO subjects (name) VALUES (?1)", name)
    }

    fn list_named(&self, sql: &str) -> rusqlite::Result<Vec<NamedRow>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(NamedRow {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;
        rows.collect()
    }

    fn insert_named(&self, sql: &str, name: &str) -> rusqlite::Result<i64> {
        let conn = self.conn();
        conn.execute(sql, params![name])?;
        Ok(conn.last_insert_rowid())
    }

    // ============================================
    // Session operations
    // ============================================

    /// List every session with referent names resolved.
    ///
    /// Names are resolved by independent point lookups per session rather
    /// than a SQL join; a dangling or null referent yields "Unknown".
    pub fn list_sessions(&self) -> rusqlite::Result<Vec<SessionView>> {
        let conn = self.conn();
        let sessions = Self::query_sessions(
            &conn,
            &format!("SELECT {SESSION_COLUMNS} FROM sessions"),
            Vec::new(),
        )?;
        sessions.iter().map(|s| Self::resolve_view(&conn, s)).collect()
    }

    pub fn insert_session(&self, session: &NewSession) -> rusqlite::Result<i64> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO sessions (tutor_id, student_id, subject_id, date, duration_minutes, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                session.tutor_id,
                session.student_id,
                session.subject_id,
                session.date,
                session.duration_minutes,
                session.notes,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn get_session(&self, id: i64) -> rusqlite::Result<Option<Session>> {
        let conn = self.conn();
        Self::fetch_session(&conn, id)
    }

    /// Overwrite the fields present in `patch`. Returns false when no
    /// session has the given id.
    pub fn update_session(&self, id: i64, patch: &SessionPatch) -> rusqlite::Result<bool> {
        let conn = self.conn();
        let Some(mut session) = Self::fetch_session(&conn, id)? else {
            return Ok(false);
        };
        patch.apply(&mut session);
        conn.execute(
            "UPDATE sessions
             SET tutor_id = ?1, student_id = ?2, subject_id = ?3,
                 date = ?4, duration_minutes = ?5, notes = ?6
             WHERE id = ?7",
            params![
                session.tutor_id,
                session.student_id,
                session.subject_id,
                session.date,
                session.duration_minutes,
                session.notes,
                id,
            ],
        )?;
        Ok(true)
    }

    /// Delete a session. Returns false when no session has the given id.
    pub fn delete_session(&self, id: i64) -> rusqlite::Result<bool> {
        let conn = self.conn();
        let affected = conn.execute("DELETE FROM sessions WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }

    // ============================================
    // Dynamic filter query
    // ============================================

    /// Select sessions matching the present filter fields.
    ///
    /// Builds `SELECT ... WHERE 1=1` plus one parameter-bound AND clause
    /// per present field; values are never interpolated into the SQL text.
    pub fn filter_sessions(&self, filter: &SessionFilter) -> rusqlite::Result<Vec<SessionView>> {
        let conn = self.conn();

        let mut sql = format!("SELECT {SESSION_COLUMNS} FROM sessions WHERE 1=1");
        let mut values: Vec<Value> = Vec::new();

        if let Some(id) = filter.tutor_id {
            sql.push_str(" AND tutor_id = ?");
            values.push(Value::Integer(id));
        }
        if let Some(id) = filter.student_id {
            sql.push_str(" AND student_id = ?");
            values.push(Value::Integer(id));
        }
        if let Some(minutes) = filter.min_duration {
            sql.push_str(" AND duration_minutes >= ?");
            values.push(Value::Integer(minutes));
        }
        if let Some(minutes) = filter.max_duration {
            sql.push_str(" AND duration_minutes <= ?");
            values.push(Value::Integer(minutes));
        }
        if let Some(date) = &filter.start_date {
            sql.push_str(" AND date >= ?");
            values.push(Value::Text(date.clone()));
        }
        if let Some(date) = &filter.end_date {
            sql.push_str(" AND date <= ?");
            values.push(Value::Text(date.clone()));
        }

        debug!(sql = %sql, bound = values.len(), "session filter query");

        let sessions = Self::query_sessions(&conn, &sql, values)?;
        sessions.iter().map(|s| Self::resolve_view(&conn, s)).collect()
    }

    // ============================================
    // Aggregate report
    // ============================================

    /// Count, average and sum session durations over a date range.
    ///
    /// The id predicates collapse to true when the parameter is null; the
    /// date bounds are always applied, so callers must supply both. AVG and
    /// SUM are null (not 0) when no rows match.
    pub fn report(
        &self,
        tutor_id: Option<i64>,
        subject_id: Option<i64>,
        start_date: &str,
        end_date: &str,
    ) -> rusqlite::Result<Report> {
        let conn = self.conn();
        conn.query_row(
            "SELECT COUNT(*), AVG(duration_minutes), SUM(duration_minutes)
             FROM sessions
             WHERE (?1 IS NULL OR tutor_id = ?1)
               AND (?2 IS NULL OR subject_id = ?2)
               AND date BETWEEN ?3 AND ?4",
            params![tutor_id, subject_id, start_date, end_date],
            |row| {
                Ok(Report {
                    total_sessions: row.get(0)?,
                    avg_duration: row.get(1)?,
                    total_time: row.get(2)?,
                })
            },
        )
    }

    // ============================================
    // Internals
    // ============================================

    fn query_sessions(
        conn: &Connection,
        sql: &str,
        values: Vec<Value>,
    ) -> rusqlite::Result<Vec<Session>> {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params_from_iter(values), Self::row_to_session)?;
        rows.collect()
    }

    fn fetch_session(conn: &Connection, id: i64) -> rusqlite::Result<Option<Session>> {
        conn.query_row(
            &format!("SELECT {SESSION_COLUMNS} FROM sessions WHERE id = ?1"),
            params![id],
            Self::row_to_session,
        )
        .optional()
    }

    fn row_to_session(row: &Row) -> rusqlite::Result<Session> {
        Ok(Session {
            id: row.get(0)?,
            tutor_id: row.get(1)?,
            student_id: row.get(2)?,
            subject_id: row.get(3)?,
            date: row.get(4)?,
            duration_minutes: row.get(5)?,
            notes: row.get(6)?,
        })
    }

    fn resolve_view(conn: &Connection, session: &Session) -> rusqlite::Result<SessionView> {
        Ok(SessionView {
            id: session.id,
            tutor_name: Self::name_of(conn, "SELECT name FROM tutors WHERE id = ?1", session.tutor_id)?,
            student_name: Self::name_of(
                conn,
                "SELECT name FROM students WHERE id = ?1",
                session.student_id,
            )?,
            subject_name: Self::name_of(
                conn,
                "SELECT name FROM subjects WHERE id = ?1",
                session.subject_id,
            )?,
            date: session.date.clone(),
            duration_minutes: session.duration_minutes,
            notes: session.notes.clone(),
        })
    }

    fn name_of(conn: &Connection, sql: &str, id: Option<i64>) -> rusqlite::Result<String> {
        let Some(id) = id else {
            return Ok(UNKNOWN.to_string());
        };
        let name: Option<String> = conn.query_row(sql, params![id], |r| r.get(0)).optional()?;
        Ok(name.unwrap_or_else(|| UNKNOWN.to_string()))
    }
}
