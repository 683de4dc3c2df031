//! CLI commands for openai-do.

pub mod count;
pub mod decode;
pub mod encode;
pub mod format;

pub use count::CountCommand;
pub use decode::DecodeCommand;
pub use encode::EncodeCommand;

use anyhow::{Context, Result as AnyhowResult};
use clap::{Args, Parser, Subcommand};
use openai_do_tokenizer::Tokenizer;
use std::io::Read;

/// Tokens command arguments.
#[derive(Parser)]
pub struct TokensCommand {
    #[command(subcommand)]
    pub command: TokensSubcommand,
}

#[derive(Subcommand)]
pub enum TokensSubcommand {
    /// Estimate the number of tokens a text input will be encoded into
    ///
    /// This is performed locally, based on the published GPT-2/3 token encoder.
    Count(CountCommand),
    /// Encode the input text into the tokens array used by GPT-2/3
    ///
    /// This is performed locally. Exact tokens when calling the API may differ.
    Encode(EncodeCommand),
    /// Decode a token array into a text value
    ///
    /// This is performed locally. Exact text when calling the API may differ.
    Decode(DecodeCommand),
}

pub fn run(cmd: TokensCommand) -> AnyhowResult<()> {
    let output = match cmd.command {
        TokensSubcommand::Count(cmd) => count::run(cmd)?,
        TokensSubcommand::Encode(cmd) => encode::run(cmd)?,
        TokensSubcommand::Decode(cmd) => decode::run(cmd)?,
    };

    print!("{}", output);
    Ok(())
}

/// The shared GPT-2/3 token encoder.
fn encoder() -> AnyhowResult<&'static Tokenizer> {
    Tokenizer::gpt2_shared().context("failed to load the GPT-2/3 token encoder")
}

/// Text input, given either positionally or with `--input`.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct TextInput {
    /// The text to process (`-` reads standard input)
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// The text to process, as an option
    #[arg(short, long = "input", value_name = "TEXT")]
    pub input: Option<String>,
}

impl TextInput {
    /// Resolve the text, reading standard input for `-`.
    pub fn read(self) -> AnyhowResult<String> {
        let value = self.text.or(self.input).unwrap_or_default();
        if value != "-" {
            return Ok(value);
        }

        let mut buffer = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buffer)
            .context("failed to read standard input")?;
        String::from_utf8(buffer).context("standard input is not valid UTF-8")
    }
}

/// Options for printing the result as JSON.
#[derive(Args, Debug, Default)]
pub struct JsonOutput {
    /// Output the result as JSON
    #[arg(long)]
    pub to_json: bool,

    /// Pretty-print the JSON output
    #[arg(long, requires = "to_json")]
    pub pretty: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_input_positional_or_option() {
        let cmd = CountCommand::try_parse_from(["count", "Hello, world!"]).unwrap();
        assert_eq!(cmd.input.read().unwrap(), "Hello, world!");

        let cmd = CountCommand::try_parse_from(["count", "--input", "Hello, world!"]).unwrap();
        assert_eq!(cmd.input.read().unwrap(), "Hello, world!");
    }

    #[test]
    fn test_text_input_is_required() {
        assert!(CountCommand::try_parse_from(["count"]).is_err());
    }

    #[test]
    fn test_text_input_rejects_both_forms() {
        assert!(CountCommand::try_parse_from(["count", "a", "--input", "b"]).is_err());
    }

    #[test]
    fn test_text_input_rejects_extra_words() {
        assert!(CountCommand::try_parse_from(["count", "Hello,", "world!"]).is_err());
    }

    #[test]
    fn test_pretty_requires_to_json() {
        assert!(EncodeCommand::try_parse_from(["encode", "hi", "--pretty"]).is_err());
        assert!(EncodeCommand::try_parse_from(["encode", "hi", "--to-json", "--pretty"]).is_ok());
    }
}
