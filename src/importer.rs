//! One-shot bulk import of a trusted SQL dump.
//!
//! The script is read whole, then run as a single unprepared batch on a
//! dedicated connection with foreign key enforcement switched off for the
//! duration. Nothing wraps the batch in a transaction: statements that ran
//! before a failing one stay applied, and re-running an `INSERT`-only dump
//! is not idempotent.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{error, info, warn};

use crate::config::{Config, DatabaseConfig};
use crate::db::{Connection, ForeignKeyGuard};
use crate::error::ImportError;

/// Progress points reported to the caller while an import runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStage {
    ReadingScript,
    Connecting,
    DisablingChecks,
    Executing,
    RestoringChecks,
}

impl fmt::Display for ImportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = match self {
            ImportStage::ReadingScript => "Reading SQL file...",
            ImportStage::Connecting => "Connecting to database...",
            ImportStage::DisablingChecks => "Disabling foreign key checks...",
            ImportStage::Executing => "Executing SQL statements...",
            ImportStage::RestoringChecks => "Re-enabling foreign key checks...",
        };
        f.write_str(line)
    }
}

#[derive(Debug, Clone)]
pub struct ImportReport {
    pub script_path: PathBuf,
    pub bytes: usize,
    pub rows_affected: u64,
    pub elapsed: Duration,
}

#[derive(Debug, Clone)]
pub struct Importer {
    script_path: PathBuf,
    database: DatabaseConfig,
}

impl Importer {
    pub fn new(script_path: impl Into<PathBuf>, database: DatabaseConfig) -> Self {
        Self {
            script_path: script_path.into(),
            database,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.import.script_path.clone(), cfg.database.clone())
    }

    pub fn script_path(&self) -> &Path {
        &self.script_path
    }

    pub async fn run(&self) -> Result<ImportReport, ImportError> {
        self.run_with(|_| {}).await
    }

    /// Import the script, calling `observe` as each stage starts.
    pub async fn run_with<F>(&self, mut observe: F) -> Result<ImportReport, ImportError>
    where
        F: FnMut(ImportStage),
    {
        let started = Instant::now();
        let path = self.script_path.as_path();

        match tokio::fs::try_exists(path).await {
            Ok(true) => {}
            Ok(false) => {
                warn!(path = %path.display(), "SQL file not found; nothing imported");
                return Err(ImportError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            Err(source) => {
                return Err(ImportError::ReadScript {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }

        observe(ImportStage::ReadingScript);
        let sql = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ImportError::ReadScript {
                path: path.to_path_buf(),
                source,
            })?;

        observe(ImportStage::Connecting);
        let mut conn = Connection::open(&self.database).await.map_err(|e| {
            error!(target_db = %self.database.display_target(), error = %e, "database connection failed");
            ImportError::Connection(e)
        })?;

        let outcome = apply_script(&mut conn, &sql, &mut observe).await;

        if let Err(e) = conn.close().await {
            warn!(error = %e, "failed to close import connection");
        }

        let rows_affected = outcome?;
        let report = ImportReport {
            script_path: path.to_path_buf(),
            bytes: sql.len(),
            rows_affected,
            elapsed: started.elapsed(),
        };
        info!(
            path = %path.display(),
            bytes = report.bytes,
            rows_affected,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "database import finished"
        );
        Ok(report)
    }
}

/// Run `sql` on `conn` with foreign key checks suppressed, restoring them
/// whatever the batch does.
///
/// If both the batch and the restore fail, the batch error is returned and
/// the restore error is logged. A transaction the script opened and never
/// finished is rolled back, since SQLite will not re-enable checks inside it.
pub async fn apply_script<F>(
    conn: &mut Connection,
    sql: &str,
    observe: &mut F,
) -> Result<u64, ImportError>
where
    F: FnMut(ImportStage),
{
    observe(ImportStage::DisablingChecks);
    let mut guard = ForeignKeyGuard::disable(conn)
        .await
        .map_err(ImportError::Execution)?;

    observe(ImportStage::Executing);
    let executed = guard.connection().execute_script(sql).await;

    observe(ImportStage::RestoringChecks);
    let restored = guard.restore().await;

    match (executed, restored) {
        (Ok(rows), Ok(())) => Ok(rows),
        (Err(e), Ok(())) => {
            error!(error = %e, "SQL batch failed; earlier statements remain applied");
            Err(ImportError::Execution(e))
        }
        (Ok(_), Err(e)) => Err(e),
        (Err(e), Err(restore_err)) => {
            error!(error = %e, "SQL batch failed");
            warn!(error = %restore_err, "re-enabling foreign key checks also failed");
            Err(ImportError::Execution(e))
        }
    }
}
