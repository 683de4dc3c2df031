//! Encode command implementation.

use super::format::{self, Report};
use super::{JsonOutput, TextInput};
use anyhow::Result as AnyhowResult;
use clap::Parser;
use serde_json::Value;

/// Encode command arguments.
#[derive(Parser)]
pub struct EncodeCommand {
    #[command(flatten)]
    pub input: TextInput,

    #[command(flatten)]
    pub json: JsonOutput,

    /// Also print the number of tokens
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

pub fn run(cmd: EncodeCommand) -> AnyhowResult<String> {
    let text = cmd.input.read()?;
    let tokens = super::encoder()?.encode(&text)?;

    render(&tokens, &cmd.json, cmd.verbose)
}

fn render(tokens: &[u32], json: &JsonOutput, verbose: bool) -> AnyhowResult<String> {
    if json.to_json {
        return format::json(&Value::from(tokens.to_vec()), json.pretty);
    }

    Ok(Report::titled("Token Encoding")
        .label("Tokens", format!("{:?}", tokens))
        .verbose_label(verbose, "Count", tokens.len())
        .finish())
}
