//! tutorlog - a small REST API for recording tutoring sessions
//!
//! Tutors, students, subjects and sessions in a local SQLite file,
//! served over HTTP/JSON.

pub mod api;
pub mod cli;
pub mod db;
