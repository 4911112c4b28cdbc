mod common;

use common::{Fixture, LIBRARY_INSERT};
use navigator_import::commands::{self, EXIT_FAILURE, EXIT_OK};

#[tokio::test]
async fn import_command_prints_status_lines_and_exits_zero() {
    let fx = Fixture::new().await;
    let cfg = fx.config(fx.write_script(LIBRARY_INSERT));
    let (mut out, mut err) = (Vec::new(), Vec::new());

    let code = commands::import(&cfg, &mut out, &mut err).await;

    assert_eq!(code, EXIT_OK);
    let out = String::from_utf8(out).expect("stdout was not utf-8");
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "Starting database import...");
    assert_eq!(lines[1], "Reading SQL file...");
    assert_eq!(lines[4], "Executing SQL statements...");
    assert!(lines[6].starts_with("Database imported successfully!"));
    assert!(err.is_empty());
}

#[tokio::test]
async fn import_command_exits_one_when_script_is_missing() {
    let fx = Fixture::new().await;
    let missing = fx.missing_script();
    let cfg = fx.config(missing.clone());
    let (mut out, mut err) = (Vec::new(), Vec::new());

    let code = commands::import(&cfg, &mut out, &mut err).await;

    assert_eq!(code, EXIT_FAILURE);
    let err = String::from_utf8(err).expect("stderr was not utf-8");
    assert_eq!(
        err.trim_end(),
        format!("Import failed: SQL file not found at: {}", missing.display())
    );
    let out = String::from_utf8(out).expect("stdout was not utf-8");
    assert!(!out.contains("Reading SQL file..."));
    assert!(out.contains("Import failed: SQL file not found at:"));
}

#[tokio::test]
async fn import_command_exits_one_on_engine_error() {
    let fx = Fixture::new().await;
    let cfg = fx.config(fx.write_script("DROP TABLE no_such_table;"));
    let (mut out, mut err) = (Vec::new(), Vec::new());

    let code = commands::import(&cfg, &mut out, &mut err).await;

    assert_eq!(code, EXIT_FAILURE);
    let err = String::from_utf8(err).expect("stderr was not utf-8");
    assert!(err.contains("no such table: no_such_table"), "unexpected: {err}");
}
