use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Optional config file read from the working directory.
pub const CONFIG_FILE: &str = "navigator.toml";

/// `DB_*` keys that are always text. Env values are otherwise parsed, which
/// would turn a password like `007123` into the integer `7123`.
const DB_TEXT_KEYS: [&str; 4] = ["host", "database", "username", "password"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub basic: BasicConfig,
    pub database: DatabaseConfig,
    pub import: ImportConfig,
}

impl Config {
    /// Layered sources, later ones win:
    /// defaults, `navigator.toml`, `NAVIGATOR_*` (with `__` as section separator)
    /// and finally the `DB_*` variables mapped onto `[database]`.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed("NAVIGATOR_").split("__"))
            .merge(
                Env::prefixed("DB_")
                    .only(&["connection", "port"])
                    .map(|key| format!("database.{key}").into()),
            )
            .merge(Serialized::default("database", db_text_vars()))
    }

    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }
}

/// Raw, unparsed values of the textual `DB_*` variables.
fn db_text_vars() -> BTreeMap<String, String> {
    Env::prefixed("DB_")
        .only(&DB_TEXT_KEYS)
        .iter()
        .map(|(key, value)| (key.as_str().to_ascii_lowercase(), value))
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicConfig {
    pub loglevel: String,
    pub listen_addr: String,
    /// When set, the HTTP import trigger requires this key.
    pub import_key: Option<String>,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            loglevel: "info".to_string(),
            listen_addr: "0.0.0.0:8000".to_string(),
            import_key: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    #[default]
    Sqlite,
    Mysql,
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Driver::Sqlite => write!(f, "sqlite"),
            Driver::Mysql => write!(f, "mysql"),
        }
    }
}

/// Connection parameters. For SQLite `database` is the file path and the
/// network fields are ignored.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub connection: Driver,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            connection: Driver::Sqlite,
            host: "127.0.0.1".to_string(),
            port: 3306,
            database: "database/navigator.sqlite".to_string(),
            username: "root".to_string(),
            password: String::new(),
        }
    }
}

impl DatabaseConfig {
    pub fn sqlite(path: impl Into<String>) -> Self {
        Self {
            connection: Driver::Sqlite,
            database: path.into(),
            ..Self::default()
        }
    }

    /// Human-readable target without credentials, for logs and status lines.
    pub fn display_target(&self) -> String {
        match self.connection {
            Driver::Sqlite => format!("sqlite:{}", self.database),
            Driver::Mysql => format!(
                "mysql://{}@{}:{}/{}",
                self.username, self.host, self.port, self.database
            ),
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("connection", &self.connection)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    pub script_path: PathBuf,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            script_path: PathBuf::from("database/navigator_export.sql"),
        }
    }
}
