use clap::Parser;
use mimalloc::MiMalloc;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use navigator_import::cli::{Cli, Commands};
use navigator_import::commands;
use navigator_import::config::Config;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut cfg = Config::load()?;
    if let Some(script) = cli.script.clone() {
        cfg.import.script_path = script;
    }

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        target_db = %cfg.database.display_target(),
        script = %cfg.import.script_path.display(),
        loglevel = %cfg.basic.loglevel,
        import_key = cfg.basic.import_key.is_some(),
    );

    let code = match cli.command() {
        Commands::Import => {
            commands::import(&cfg, &mut std::io::stdout(), &mut std::io::stderr()).await
        }
        Commands::Seed => commands::seed(&cfg, &mut std::io::stdout(), &mut std::io::stderr()).await,
        Commands::Serve => {
            commands::serve(&cfg).await?;
            commands::EXIT_OK
        }
    };
    Ok(ExitCode::from(code))
}
