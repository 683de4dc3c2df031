//! openai-do CLI - Command-line client for the OpenAI API.
//!
//! This is the main entry point for the `openai-do` command-line tool. The
//! `tokens` commands run locally against the bundled GPT-2/3 token encoder.

mod commands;

use clap::{Parser, Subcommand};
use commands::TokensCommand;
use env_logger::Env;
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "openai-do")]
#[command(about = "A command-line client for the OpenAI API", long_about = None)]
#[command(version)]
struct Cli {
    /// Log level (error, warn, info, debug, trace); overrides RUST_LOG
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<LevelFilter>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Commands relating to tokens
    Tokens(TokensCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    match cli.command {
        Commands::Tokens(cmd) => commands::run(cmd)?,
    }

    Ok(())
}

fn init_logging(level: Option<LevelFilter>) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    builder.format_timestamp_millis();
    if let Some(level) = level {
        builder.filter_level(level);
    }
    let _ = builder.try_init();
}
