//! Command implementations behind the CLI.

use std::io::Write;

use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::Config;
use crate::db::FacilityStore;
use crate::error::StoreError;
use crate::importer::Importer;
use crate::router::{NavigatorState, navigator_router};

pub const EXIT_OK: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

/// Run the import, writing status lines to `out`. A failure line goes to
/// both `out` and `err`. Returns the process exit code.
pub async fn import<O: Write, E: Write>(cfg: &Config, out: &mut O, err: &mut E) -> u8 {
    let importer = Importer::from_config(cfg);
    let _ = writeln!(out, "Starting database import...");

    let outcome = importer
        .run_with(|stage| {
            let _ = writeln!(out, "{stage}");
        })
        .await;

    match outcome {
        Ok(report) => {
            let _ = writeln!(
                out,
                "Database imported successfully! ({} rows affected in {} ms)",
                report.rows_affected,
                report.elapsed.as_millis()
            );
            EXIT_OK
        }
        Err(e) => {
            let _ = writeln!(out, "Import failed: {e}");
            let _ = writeln!(err, "Import failed: {e}");
            EXIT_FAILURE
        }
    }
}

/// Serve the HTTP import trigger until the process is stopped.
pub async fn serve(cfg: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let state = NavigatorState::from_config(cfg);
    let app = navigator_router(state);

    let listener = TcpListener::bind(&cfg.basic.listen_addr).await?;
    info!("HTTP server listening on {}", cfg.basic.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;
    Ok(())
}

/// Create the facility tables and insert the fixture rows.
pub async fn seed<O: Write, E: Write>(cfg: &Config, out: &mut O, err: &mut E) -> u8 {
    match seed_store(cfg).await {
        Ok(inserted) => {
            let _ = writeln!(out, "Quick data seeded successfully! ({inserted} new facilities)");
            EXIT_OK
        }
        Err(e) => {
            error!(error = %e, "seeding failed");
            let _ = writeln!(err, "Seeding failed: {e}");
            EXIT_FAILURE
        }
    }
}

async fn seed_store(cfg: &Config) -> Result<u64, StoreError> {
    let store = FacilityStore::connect(&cfg.database).await?;
    store.init_schema().await?;
    store.seed_quick_data().await
}
