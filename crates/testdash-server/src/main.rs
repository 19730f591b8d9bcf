//! # Testdash Cache CLI
//!
//! Loads configuration, connects to the cache, runs one administrative
//! command and shuts the pool down.

use clap::Parser;
use std::process::ExitCode;
use testdash_cache::build_cache_manager;
use testdash_config::ConfigLoader;
use testdash_core::logging::{init_logging, LogFormat};
use testdash_core::{DashError, DashResult};
use testdash_server::cli::{Cli, OutputFormat};
use testdash_server::commands::{execute, CommandOutput};
use testdash_server::startup::print_startup_info;
use tracing::{debug, error};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let format = cli.output;

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Command failed: {}", e);
            match format {
                OutputFormat::Human => eprintln!("error: {e}"),
                OutputFormat::Json => eprintln!(
                    "{}",
                    serde_json::json!({
                        "error": e.error_code(),
                        "message": e.to_string(),
                        "retriable": e.is_retriable(),
                    })
                ),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> DashResult<()> {
    let loader = match &cli.config_dir {
        Some(dir) => ConfigLoader::new(dir.clone())?,
        None => ConfigLoader::from_default_location()?,
    };
    let config = loader.into_config();

    let format = config.observability.log_format.parse::<LogFormat>()?;
    init_logging(&config.observability.filter_directive(), format)?;
    debug!("Version: {}", env!("CARGO_PKG_VERSION"));

    let cache = build_cache_manager(&config).await?;
    print_startup_info(&config, &cache);

    let result = execute(&cli.command, &cache).await;
    cache.shutdown();

    print_output(&result?, cli.output)
}

fn print_output(output: &CommandOutput, format: OutputFormat) -> DashResult<()> {
    match format {
        OutputFormat::Human => println!("{output}"),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(output)
                .map_err(|e| DashError::serialization(e.to_string()))?;
            println!("{json}");
        }
    }
    Ok(())
}
