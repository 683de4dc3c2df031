//! Count command implementation.

use super::format::Report;
use super::TextInput;
use anyhow::Result as AnyhowResult;
use clap::Parser;

/// Count command arguments.
#[derive(Parser)]
pub struct CountCommand {
    #[command(flatten)]
    pub input: TextInput,
}

pub fn run(cmd: CountCommand) -> AnyhowResult<String> {
    let text = cmd.input.read()?;
    let count = super::encoder()?.count(&text)?;
    log::debug!("counted {} tokens in {} bytes", count, text.len());

    Ok(render(count))
}

fn render(count: usize) -> String {
    Report::titled("Token Count").label("Count", count).finish()
}
