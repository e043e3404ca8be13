//! notedate CLI

use clap::Parser;
use notedate::{Cli, OutputFormat};
use simple_logger::SimpleLogger;
use tracing_subscriber::EnvFilter;

fn level_for(verbose: u8) -> log::LevelFilter {
    match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let level = level_for(cli.verbose);

    match cli.log_format {
        OutputFormat::Json => {
            // RUST_LOG wins over -v when set
            let filter = EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase()));
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;
        }
        OutputFormat::Human => {
            SimpleLogger::new()
                .with_level(level)
                .with_utc_timestamps()
                .init()
                .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    log::info!("notedate v{}", env!("CARGO_PKG_VERSION"));

    notedate::run(cli).await
}
