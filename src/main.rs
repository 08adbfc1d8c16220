// awsprof - materialize AWS CLI profiles from configured SSO sessions

mod aws_config;
mod cli;
mod error;
mod sso;
mod ui;

use clap::Parser;
use error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let log_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    // Logs go to stderr; stdout is reserved for command output that
    // shells may evaluate (e.g. the switch export line).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    cli::execute(args).await
}
