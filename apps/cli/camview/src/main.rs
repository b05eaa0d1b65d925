use camview::cli::Cli;
use camview::commands;
use camview::context::{AppContext, log_dir, resolve_paths};
use camview::error::CamviewError;
use camview::logger::initialize as LoggerInitialize;

use camview_core::config::try_load_dotenv;

use std::io::stdout;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.json;

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            if json {
                match serde_json::to_string(&e) {
                    Ok(body) => eprintln!("{body}"),
                    Err(_) => eprintln!("{e}"),
                }
            } else {
                eprintln!("{e}");
            }
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<(), CamviewError> {
    // Before path detection: .env may set CAMVIEW_DATA_DIR
    let env = try_load_dotenv();

    let paths = resolve_paths(cli.config_dir.as_deref())?;
    let log_dir = log_dir(&paths);

    // Initialize logger FIRST
    LoggerInitialize(&log_dir, cli.verbose)?;

    info!("camview {} starting", env!("CARGO_PKG_VERSION"));
    info!("Log directory: {}", log_dir.display());
    if let Some(path) = env.path {
        info!("Environment loaded from {}", path.display());
    }

    let mut ctx = AppContext::start(paths).await?;
    commands::run(cli.command, &mut ctx, &cli.out, &mut stdout().lock()).await
}
