use tracing::{error, warn};

use super::connection::Connection;
use crate::error::ImportError;

/// Holds a connection with foreign key enforcement switched off.
///
/// `restore` switches it back on and confirms the engine agrees. Every path
/// out of an import must go through `restore`; dropping the guard instead
/// leaves the session with checks disabled, which is logged.
pub struct ForeignKeyGuard<'c> {
    conn: &'c mut Connection,
}

impl<'c> ForeignKeyGuard<'c> {
    pub async fn disable(conn: &'c mut Connection) -> Result<Self, sqlx::Error> {
        if !conn.set_foreign_key_checks(false).await? {
            warn!(driver = %conn.driver(), "engine kept foreign key checks on");
        }
        Ok(Self { conn })
    }

    pub fn connection(&mut self) -> &mut Connection {
        &mut *self.conn
    }

    /// Re-enable checks. A transaction the script left open pins the
    /// setting on SQLite, so it is rolled back before a second attempt.
    pub async fn restore(self) -> Result<(), ImportError> {
        if self
            .conn
            .set_foreign_key_checks(true)
            .await
            .map_err(ImportError::RestoreChecks)?
        {
            return Ok(());
        }

        warn!("foreign key checks still off; rolling back transaction left open by the script");
        self.conn
            .rollback_open_transaction()
            .await
            .map_err(ImportError::RestoreChecks)?;
        if self
            .conn
            .set_foreign_key_checks(true)
            .await
            .map_err(ImportError::RestoreChecks)?
        {
            Ok(())
        } else {
            Err(ImportError::ChecksStillDisabled)
        }
    }
}

impl Drop for ForeignKeyGuard<'_> {
    fn drop(&mut self) {
        if self.conn.checks_disabled() {
            error!(
                driver = %self.conn.driver(),
                "foreign key guard released without restoring checks; discard this connection"
            );
        }
    }
}
