//! rdcli binary
//!
//! Command-line interface for the Raindrop.io bookmark API.

use clap::Parser;
use rdcli::cli::{map_error, Cli, RunContext};
use rdcli::config::{ConfigLoader, RuntimeConfig};
use rdcli::error::CliError;
use rdcli::logging::init_logging;
use rdcli::output::OutputFormat;
use std::io::IsTerminal;
use std::process;
use tracing::{debug, info};

fn main() {
    let cli = Cli::parse();

    // Used only if configuration itself cannot be resolved.
    let fallback_format = cli
        .format
        .unwrap_or_else(|| OutputFormat::default_for_terminal(std::io::stdout().is_terminal()));

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => fail(&e, fallback_format),
    };

    if let Err(e) = init_logging(Some(&config.logging)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("rdcli starting");
    let format = config.effective_format();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => fail(&CliError::Output(e.into()), format),
    };

    let context = match RunContext::new(config, &cli.global_options()) {
        Ok(ctx) => ctx,
        Err(e) => fail(&e, format),
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match runtime.block_on(context.execute(&cli.command, &mut out)) {
        Ok(()) => debug!("Command completed successfully"),
        Err(e) => fail(&e, format),
    }
}

/// Defaults, config file, environment, then command-line flags.
fn load_config(cli: &Cli) -> Result<RuntimeConfig, CliError> {
    let file = ConfigLoader::load(cli.config.as_deref())?;
    Ok(RuntimeConfig::resolve(file, &cli.overrides())?)
}

fn fail(e: &CliError, format: OutputFormat) -> ! {
    debug!(error = %e, "Command failed");
    eprintln!("{}", map_error(e, format, chrono::Utc::now().timestamp()));
    process::exit(1);
}
