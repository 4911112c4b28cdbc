use axum::http::StatusCode;
use sqlx::Error as SqlxError;
use std::path::PathBuf;
use thiserror::Error as ThisError;

use crate::config::Driver;

#[derive(Debug, ThisError)]
pub enum ImportError {
    #[error("SQL file not found at: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read SQL file {}: {}", .path.display(), .source)]
    ReadScript {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("database connection failed: {0}")]
    Connection(#[source] SqlxError),

    #[error("{0}")]
    Execution(#[source] SqlxError),

    #[error("script applied but foreign key checks could not be re-enabled: {0}")]
    RestoreChecks(#[source] SqlxError),

    #[error("foreign key checks are still disabled after restoring them")]
    ChecksStillDisabled,
}

impl ImportError {
    /// Message reported by the database engine itself, when there is one.
    pub fn engine_message(&self) -> Option<&str> {
        match self {
            ImportError::Connection(e)
            | ImportError::Execution(e)
            | ImportError::RestoreChecks(e) => e.as_database_error().map(|db| db.message()),
            _ => None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ImportError::NotFound { .. } => StatusCode::NOT_FOUND,
            ImportError::Connection(_) => StatusCode::SERVICE_UNAVAILABLE,
            ImportError::ReadScript { .. }
            | ImportError::Execution(_)
            | ImportError::RestoreChecks(_)
            | ImportError::ChecksStillDisabled => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("the facility store only supports sqlite, configured driver is {0}")]
    UnsupportedDriver(Driver),
}
