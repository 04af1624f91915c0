//! # Storage Layer
//!
//! SQLite-backed storage for the tutoring record types:
//! - `schema`: table/index DDL, initialization and seeding
//! - `types`: domain records and request/response payload shapes
//! - `store`: typed read/write operations over a single connection

pub mod schema;
pub mod store;
pub mod types;

pub use store::Store;
