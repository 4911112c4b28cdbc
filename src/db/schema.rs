//! SQL DDL for the facility directory tables.
//! SQLite-first; the live MySQL schema is owned by the web application and
//! the legacy export brings its own DDL.

/// SQLite schema with:
/// - `markers`: map pins a facility can point at
/// - `facilities`: `name` UNIQUE, `marker_id` FK to `markers`
/// - `facility_photos`: `facility_id` FK to `facilities`, cascading delete
/// - timestamps stored as RFC3339 TEXT, nullable for rows loaded from dumps
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS markers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    latitude REAL NOT NULL,
    longitude REAL NOT NULL,
    created_at TEXT NULL,
    updated_at TEXT NULL
);

CREATE TABLE IF NOT EXISTS facilities (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    category TEXT NULL,
    department TEXT NULL,
    description TEXT NULL,
    floor_number INTEGER NULL,
    hours TEXT NULL,
    marker_id INTEGER NULL REFERENCES markers(id) ON DELETE SET NULL,
    status TEXT NOT NULL DEFAULT 'active',
    created_at TEXT NULL,
    updated_at TEXT NULL
);

CREATE TABLE IF NOT EXISTS facility_photos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    facility_id INTEGER NOT NULL REFERENCES facilities(id) ON DELETE CASCADE,
    path TEXT NOT NULL,
    caption TEXT NULL,
    created_at TEXT NULL,
    updated_at TEXT NULL
);

CREATE INDEX IF NOT EXISTS idx_facilities_marker_id ON facilities(marker_id);
CREATE INDEX IF NOT EXISTS idx_facility_photos_facility_id ON facility_photos(facility_id);
"#;
