//! # Database Schema
//!
//! Table and index DDL, executed as embedded SQL batches.
//!
//! `init_schema` drops everything and rebuilds from scratch (including the
//! sample rows), so re-running `tutorlog init` always yields the same state.
//! `ensure_schema` only creates missing tables/indexes and never seeds.

use rusqlite::Connection;

/// Table definitions, created in dependency-free order.
///
/// `sessions` carries the three referent ids as plain nullable integer
/// columns; no FOREIGN KEY constraint is declared, and a dangling referent
/// is resolved to the name "Unknown" at read time.
const TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS tutors (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS students (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS subjects (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS sessions (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    tutor_id         INTEGER,
    student_id       INTEGER,
    subject_id       INTEGER,
    date             TEXT NOT NULL,
    duration_minutes INTEGER NOT NULL,
    notes            TEXT NOT NULL
);
"#;

/// Supporting indexes for the filter and report queries.
const INDEXES: &str = r#"
CREATE INDEX IF NOT EXISTS idx_sessions_tutor_subject_date ON sessions(tutor_id, subject_id, date);
CREATE INDEX IF NOT EXISTS idx_sessions_student ON sessions(student_id);
CREATE INDEX IF NOT EXISTS idx_tutors_name ON tutors(name);
"#;

const DROP_ALL: &str = r#"
DROP TABLE IF EXISTS sessions;
DROP TABLE IF EXISTS subjects;
DROP TABLE IF EXISTS students;
DROP TABLE IF EXISTS tutors;
"#;

/// Sample rows inserted by `init_schema`.
const SEED: &str = r#"
INSERT INTO tutors (name) VALUES ('Alice Smith');
INSERT INTO students (name) VALUES ('John Doe');
INSERT INTO subjects (name) VALUES ('Math');
"#;

/// Drop and recreate all tables and indexes, then insert the sample rows.
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(DROP_ALL)?;
    conn.execute_batch(TABLES)?;
    conn.execute_batch(INDEXES)?;
    conn.execute_batch(SEED)?;
    Ok(())
}

/// Create any missing tables and indexes without touching existing data.
pub fn ensure_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(TABLES)?;
    conn.execute_batch(INDEXES)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<String>, _>>()
            .unwrap()
    }

    #[test]
    fn test_init_creates_all_tables() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();

        assert_eq!(
            table_names(&conn),
            vec!["sessions", "students", "subjects", "tutors"]
        );
    }

    #[test]
    fn test_init_seeds_sample_rows() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();

        let name: String = conn
            .query_row("SELECT name FROM tutors WHERE id = 1", [], |r| r.get(0))
            .unwrap();
        assert_eq!(name, "Alice Smith");

        let students: i64 = conn
            .query_row("SELECT COUNT(*) FROM students", [], |r| r.get(0))
            .unwrap();
        assert_eq!(students, 1);
    }

    #[test]
    fn test_init_is_rerunnable() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn.execute(
            "INSERT INTO sessions (tutor_id, student_id, subject_id, date, duration_minutes, notes)
             VALUES (1, 1, 1, '2024-01-05', 60, 'intro')",
            [],
        )
        .unwrap();

        // Second init wipes everything back to the seeded state.
        init_schema(&conn).unwrap();
        let sessions: i64 = conn
            .query_row("SELECT COUNT(*) FROM sessions", [], |r| r.get(0))
            .unwrap();
        assert_eq!(sessions, 0);
        let tutors: i64 = conn
            .query_row("SELECT COUNT(*) FROM tutors", [], |r| r.get(0))
            .unwrap();
        assert_eq!(tutors, 1);
    }

    #[test]
    fn test_ensure_preserves_existing_data() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn.execute("INSERT INTO tutors (name) VALUES ('Bob')", [])
            .unwrap();

        ensure_schema(&conn).unwrap();
        let tutors: i64 = conn
            .query_row("SELECT COUNT(*) FROM tutors", [], |r| r.get(0))
            .unwrap();
        assert_eq!(tutors, 2);
    }

    #[test]
    fn test_indexes_created() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name LIKE 'idx_%'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(count, 3);
    }
}
