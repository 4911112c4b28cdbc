//! Database module: import connection plus the facility directory tables.
//!
//! Layout:
//! - `connection.rs`: single unpooled connection the importer runs on
//! - `guard.rs`: scoped foreign key suppression on that connection
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for the facility tables (SQLite-first)
//! - `sqlite.rs`: pooled facility store and seeder

pub mod connection;
pub mod guard;
pub mod models;
pub mod schema;
pub mod sqlite;

pub use connection::Connection;
pub use guard::ForeignKeyGuard;
pub use models::{Facility, FacilityPhoto, Marker};
pub use schema::SQLITE_INIT;
pub use sqlite::{FacilityStore, SqlitePool};
