// CLI interface
pub mod commands;

use crate::error::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "awsprof")]
#[command(about = "Materialize AWS CLI profiles from configured SSO sessions", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the AWS shared config file
    #[arg(long, env = "AWS_CONFIG_FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pick an account/role under an SSO session and create a profile for it
    Init {
        /// SSO session name (skips the session picker)
        #[arg(long)]
        session: Option<String>,
    },

    /// Create or update one profile per account/role pair of every SSO session
    Sync {
        /// Only sync this SSO session
        #[arg(long)]
        session: Option<String>,
    },

    /// Pick an existing profile and print an AWS_PROFILE export line
    ///
    /// Evaluate the output in your shell: eval "$(awsprof switch)"
    Switch,

    /// Generate shell completion scripts
    Completions {
        /// Shell type to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Clone, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

pub async fn execute(args: Cli) -> Result<()> {
    match args.command {
        Commands::Init { session } => commands::init::execute(args.config, session).await,
        Commands::Sync { session } => commands::sync::execute(args.config, session).await,
        Commands::Switch => commands::switch::execute(args.config),
        Commands::Completions { shell } => commands::completions::execute(shell),
    }
}
