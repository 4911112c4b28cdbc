use sqlx::mysql::MySqlConnectOptions;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection as _, Executor as _, MySqlConnection, SqliteConnection};
use tracing::{debug, warn};

use crate::config::{DatabaseConfig, Driver};

enum Inner {
    Sqlite(SqliteConnection),
    MySql(MySqlConnection),
}

/// A single, unpooled connection to the import target.
///
/// Tracks whether this session currently has foreign key enforcement turned
/// off so that callers can tell when a session ends in that state.
pub struct Connection {
    inner: Inner,
    checks_disabled: bool,
}

impl Connection {
    pub async fn open(cfg: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let inner = match cfg.connection {
            Driver::Sqlite => {
                let opts = SqliteConnectOptions::new()
                    .filename(&cfg.database)
                    .create_if_missing(true)
                    .foreign_keys(true);
                Inner::Sqlite(opts.connect().await?)
            }
            Driver::Mysql => {
                let opts = MySqlConnectOptions::new()
                    .host(&cfg.host)
                    .port(cfg.port)
                    .database(&cfg.database)
                    .username(&cfg.username)
                    .password(&cfg.password);
                Inner::MySql(opts.connect().await?)
            }
        };
        debug!(target_db = %cfg.display_target(), "import connection opened");
        Ok(Self {
            inner,
            checks_disabled: false,
        })
    }

    pub fn driver(&self) -> Driver {
        match self.inner {
            Inner::Sqlite(_) => Driver::Sqlite,
            Inner::MySql(_) => Driver::Mysql,
        }
    }

    pub fn checks_disabled(&self) -> bool {
        self.checks_disabled
    }

    /// Run a multi-statement string as-is, without preparing or binding.
    /// Returns the total rows affected across all statements.
    pub async fn execute_script(&mut self, sql: &str) -> Result<u64, sqlx::Error> {
        if sql.trim().is_empty() {
            return Ok(0);
        }
        let rows = match &mut self.inner {
            Inner::Sqlite(c) => c.execute(sqlx::raw_sql(sql)).await?.rows_affected(),
            Inner::MySql(c) => c.execute(sqlx::raw_sql(sql)).await?.rows_affected(),
        };
        Ok(rows)
    }

    /// Switch foreign key enforcement and read the setting back from the
    /// engine. Returns whether the session now matches `enabled`; SQLite
    /// ignores the pragma while a transaction is open.
    pub async fn set_foreign_key_checks(&mut self, enabled: bool) -> Result<bool, sqlx::Error> {
        match &mut self.inner {
            Inner::Sqlite(c) => {
                let stmt = if enabled {
                    "PRAGMA foreign_keys = ON"
                } else {
                    "PRAGMA foreign_keys = OFF"
                };
                c.execute(sqlx::raw_sql(stmt)).await?;
            }
            Inner::MySql(c) => {
                let stmt = if enabled {
                    "SET FOREIGN_KEY_CHECKS = 1"
                } else {
                    "SET FOREIGN_KEY_CHECKS = 0"
                };
                c.execute(sqlx::raw_sql(stmt)).await?;
            }
        }
        let enforced = self.foreign_key_checks().await?;
        self.checks_disabled = !enforced;
        Ok(enforced == enabled)
    }

    /// Roll back a transaction a script opened and never finished.
    pub async fn rollback_open_transaction(&mut self) -> Result<(), sqlx::Error> {
        match &mut self.inner {
            Inner::Sqlite(c) => {
                c.execute(sqlx::raw_sql("ROLLBACK")).await?;
            }
            Inner::MySql(c) => {
                c.execute(sqlx::raw_sql("ROLLBACK")).await?;
            }
        }
        Ok(())
    }

    /// Ask the engine whether foreign keys are currently enforced on this session.
    pub async fn foreign_key_checks(&mut self) -> Result<bool, sqlx::Error> {
        let flag: i64 = match &mut self.inner {
            Inner::Sqlite(c) => {
                sqlx::query_scalar("PRAGMA foreign_keys")
                    .fetch_one(&mut *c)
                    .await?
            }
            Inner::MySql(c) => {
                sqlx::query_scalar("SELECT CAST(@@FOREIGN_KEY_CHECKS AS SIGNED)")
                    .fetch_one(&mut *c)
                    .await?
            }
        };
        Ok(flag != 0)
    }

    /// Close the session. A session closed with checks still disabled takes
    /// the setting with it.
    pub async fn close(self) -> Result<(), sqlx::Error> {
        if self.checks_disabled {
            warn!("closing import connection with foreign key checks still disabled");
        }
        match self.inner {
            Inner::Sqlite(c) => c.close().await,
            Inner::MySql(c) => c.close().await,
        }
    }
}
