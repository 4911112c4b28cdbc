use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::sync::Mutex;

use crate::config::Config;
use crate::handlers::import::{health_handler, import_handler};
use crate::importer::Importer;

#[derive(Clone)]
pub struct NavigatorState {
    pub importer: Arc<Importer>,
    /// Held for the length of one import; a second request is turned away.
    pub import_lock: Arc<Mutex<()>>,
    import_key: Option<Arc<str>>,
}

impl NavigatorState {
    pub fn new(importer: Importer, import_key: Option<&str>) -> Self {
        Self {
            importer: Arc::new(importer),
            import_key: import_key.map(Arc::from),
            import_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(Importer::from_config(cfg), cfg.basic.import_key.as_deref())
    }

    pub fn import_key(&self) -> Option<&str> {
        self.import_key.as_deref()
    }
}

pub fn navigator_router(state: NavigatorState) -> Router {
    Router::new()
        .route("/import", get(import_handler).post(import_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}
