mod render;
mod resolve;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::resolve::{InputArgs, ResolveArgs};

#[derive(Debug, Parser)]
#[command(name = "buybox-cli")]
#[command(about = "Find who holds the primary offer for marketplace product identifiers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve seller, shipper and status for each identifier
    Resolve(ResolveArgs),
    /// Print the identifiers that pass validation, one per line
    Validate(InputArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parsed before configuration so `--help` works with a broken environment.
    let cli = Cli::parse();

    let config = buybox_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(config.env.is_development())
        .init();
    tracing::debug!(
        env = %config.env,
        base_url = %config.marketplace_base_url,
        "configuration loaded"
    );

    match cli.command {
        Commands::Resolve(args) => resolve::run_resolve(config, &args).await,
        Commands::Validate(input) => resolve::run_validate(&input),
    }
}

#[cfg(test)]
mod tests;
