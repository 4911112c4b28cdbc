#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use navigator_import::Importer;
use navigator_import::config::{Config, DatabaseConfig};
use navigator_import::db::FacilityStore;
use tempfile::TempDir;

/// A throwaway SQLite database with the facility tables created, plus a
/// directory to drop SQL scripts into.
pub struct Fixture {
    pub dir: TempDir,
    pub db: DatabaseConfig,
    pub store: FacilityStore,
}

impl Fixture {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let db_path = dir.path().join("navigator.sqlite");
        let db = DatabaseConfig::sqlite(db_path.display().to_string());
        let store = FacilityStore::connect(&db)
            .await
            .expect("failed to open facility store");
        store.init_schema().await.expect("failed to init schema");
        Self { dir, db, store }
    }

    pub fn write_script(&self, sql: &str) -> PathBuf {
        let path = self.dir.path().join("navigator_export.sql");
        fs::write(&path, sql).expect("failed to write script");
        path
    }

    pub fn missing_script(&self) -> PathBuf {
        self.dir.path().join("does-not-exist.sql")
    }

    pub fn importer(&self, script: PathBuf) -> Importer {
        Importer::new(script, self.db.clone())
    }

    pub fn config(&self, script: PathBuf) -> Config {
        let mut cfg = Config::default();
        cfg.database = self.db.clone();
        cfg.import.script_path = script;
        cfg
    }
}

pub const LIBRARY_INSERT: &str =
    "INSERT INTO facilities (name, category) VALUES ('Library','Educational');";
