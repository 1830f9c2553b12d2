use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bookshelf_mcp::config::Config;

#[derive(Parser)]
#[command(name = "bookshelf-mcp")]
#[command(about = "Personal book-collection tracker served over MCP (stdio)")]
#[command(version)]
struct Cli {
    /// Library file (default: $BOOKSHELF_LIBRARY or ./library.json)
    library: Option<PathBuf>,

    /// Log level for stderr output (default: $BOOKSHELF_LOG or info)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env().with_overrides(cli.library, cli.log_level);

    init_logging(&config.log_level)?;

    bookshelf_mcp::interface::mcp::run(config.library_path).await
}

/// stdout carries the MCP transport, so logs go to stderr.
fn init_logging(log_level: &str) -> anyhow::Result<()> {
    let env_filter = log_filter(log_level)?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .try_init();
    Ok(())
}

fn log_filter(log_level: &str) -> anyhow::Result<EnvFilter> {
    EnvFilter::try_new(format!("bookshelf_mcp={log_level}"))
        .with_context(|| format!("Invalid log level '{log_level}'"))
}
