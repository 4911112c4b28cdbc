use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::{info, warn};

use crate::error::ImportError;
use crate::importer::ImportReport;
use crate::middleware::auth::RequireImportKey;
use crate::router::NavigatorState;

/// GET|POST /import -> runs the import and renders an HTML status page.
pub async fn import_handler(
    State(state): State<NavigatorState>,
    _auth: RequireImportKey,
) -> Response {
    let Ok(_running) = state.import_lock.try_lock() else {
        warn!("import requested while another import is running");
        return ImportPage::busy().into_response();
    };

    info!(path = %state.importer.script_path().display(), "HTTP import triggered");
    let mut lines = Vec::new();
    let outcome = state
        .importer
        .run_with(|stage| lines.push(stage.to_string()))
        .await;

    ImportPage {
        lines,
        outcome: Some(outcome),
    }
    .into_response()
}

/// GET /health
pub async fn health_handler() -> &'static str {
    "ok"
}

/// Status lines gathered during an import plus its result.
pub struct ImportPage {
    pub lines: Vec<String>,
    /// `None` when the import never started.
    pub outcome: Option<Result<ImportReport, ImportError>>,
}

impl ImportPage {
    fn busy() -> Self {
        Self {
            lines: Vec::new(),
            outcome: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        match &self.outcome {
            Some(Ok(_)) => StatusCode::OK,
            Some(Err(e)) => e.status_code(),
            None => StatusCode::CONFLICT,
        }
    }

    pub fn render(&self) -> String {
        let mut body = String::from(
            "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Database import</title></head>\n<body>\n",
        );
        for line in &self.lines {
            body.push_str(&escape_html(line));
            body.push_str("<br>\n");
        }
        match &self.outcome {
            Some(Ok(report)) => {
                body.push_str("<h2 style='color: green;'>Database imported successfully!</h2>\n");
                body.push_str(&format!(
                    "<p>{} rows affected from {} ({} bytes) in {} ms.</p>\n",
                    report.rows_affected,
                    escape_html(&report.script_path.display().to_string()),
                    report.bytes,
                    report.elapsed.as_millis()
                ));
            }
            Some(Err(err)) => {
                body.push_str("<h2 style='color: red;'>Import failed:</h2>\n");
                body.push_str(&format!("<p>{}</p>\n", escape_html(&err.to_string())));
            }
            None => {
                body.push_str("<h2 style='color: orange;'>An import is already running.</h2>\n");
            }
        }
        body.push_str("</body>\n</html>\n");
        body
    }
}

impl IntoResponse for ImportPage {
    fn into_response(self) -> Response {
        (self.status(), Html(self.render())).into_response()
    }
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
