pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod importer;
pub mod middleware;
pub mod router;

pub use error::{ImportError, StoreError};
pub use importer::{ImportReport, ImportStage, Importer};
