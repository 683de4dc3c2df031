//! Decode command implementation.

use super::format::{self, Report};
use super::JsonOutput;
use anyhow::{bail, Context, Result as AnyhowResult};
use clap::Parser;
use serde_json::Value;

/// Decode command arguments.
#[derive(Parser)]
#[command(after_help = "Examples:\n  \
    openai-do tokens decode 15496 11 995 0\n  \
    openai-do tokens decode --from-json '[15496, 11, 995, 0]'")]
pub struct DecodeCommand {
    /// The tokens to decode, as space-separated integers
    #[arg(value_name = "TOKEN", allow_negative_numbers = true)]
    pub values: Vec<String>,

    /// The tokens to decode, as an option
    #[arg(
        short,
        long = "input",
        value_name = "TOKEN",
        num_args = 1..,
        allow_negative_numbers = true
    )]
    pub input: Vec<String>,

    /// Read the tokens from a single JSON array
    #[arg(long)]
    pub from_json: bool,

    #[command(flatten)]
    pub json: JsonOutput,
}

pub fn run(cmd: DecodeCommand) -> AnyhowResult<String> {
    let values: Vec<String> = cmd.values.into_iter().chain(cmd.input).collect();
    let tokens = parse_tokens(&values, cmd.from_json)?;
    let text = super::encoder()?.decode(&tokens)?;

    render(&text, &cmd.json)
}

/// Parse the command's token arguments.
fn parse_tokens(values: &[String], from_json: bool) -> AnyhowResult<Vec<u32>> {
    if from_json {
        let [value] = values else {
            bail!(
                "Expected a single JSON array, but got {} values.\n\
                 Example: tokens decode --from-json '[15496, 11, 995, 0]'",
                values.len()
            );
        };
        return serde_json::from_str(value)
            .with_context(|| format!("Expected a JSON array of token IDs, got {:?}.", value));
    }

    if values.is_empty() {
        bail!("Specify at least one integer value to decode.\nExample: tokens decode 15496 11 995 0");
    }

    values.iter().map(|value| parse_token(value)).collect()
}

fn parse_token(value: &str) -> AnyhowResult<u32> {
    let Ok(int) = value.parse::<i64>() else {
        bail!("Expected an integer, got {:?}.\nExample: tokens decode 15496 11 995 0", value);
    };
    u32::try_from(int).with_context(|| format!("Unknown token ID: {}", int))
}

fn render(text: &str, json: &JsonOutput) -> AnyhowResult<String> {
    if json.to_json {
        return format::json(&Value::from(text), json.pretty);
    }

    Ok(Report::titled("Token Decoding").block("Text", text).finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELLO_BLOCK: &str =
        "Token Decoding\n\nText:\n─────────────\nHello, world!\n─────────────\n";

    fn decode(args: &[&str]) -> AnyhowResult<String> {
        let args = std::iter::once("decode").chain(args.iter().copied());
        run(DecodeCommand::try_parse_from(args).unwrap())
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_decode_integers() {
        assert_eq!(decode(&["15496", "11", "995", "0"]).unwrap(), HELLO_BLOCK);
        assert_eq!(
            decode(&["--input", "15496", "11", "995", "0"]).unwrap(),
            HELLO_BLOCK
        );
    }

    #[test]
    fn test_decode_from_json() {
        assert_eq!(
            decode(&["--from-json", "-i", "[15496, 11, 995, 0]"]).unwrap(),
            HELLO_BLOCK
        );
    }

    #[test]
    fn test_decode_to_json() {
        assert_eq!(
            decode(&["--from-json", "-i", "[15496, 11, 995, 0]", "--to-json"]).unwrap(),
            "\"Hello, world!\"\n"
        );
    }

    #[test]
    fn test_decode_requires_values() {
        let err = parse_tokens(&[], false).unwrap_err();
        assert!(err.to_string().starts_with("Specify at least one integer value to decode."));
    }

    #[test]
    fn test_decode_rejects_non_integer() {
        let err = parse_tokens(&strings(&["15496", "x"]), false).unwrap_err();
        assert!(err.to_string().starts_with("Expected an integer, got \"x\"."));
    }

    #[test]
    fn test_decode_negative_is_unknown_token() {
        let err = parse_tokens(&strings(&["-1"]), false).unwrap_err();
        assert_eq!(err.to_string(), "Unknown token ID: -1");
    }

    #[test]
    fn test_from_json_takes_one_value() {
        assert!(parse_tokens(&strings(&["[1]", "[2]"]), true).is_err());
        assert!(parse_tokens(&strings(&["1, 2"]), true).is_err());
        assert_eq!(parse_tokens(&strings(&["[1, 2]"]), true).unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_decode_unknown_token_fails() {
        assert!(decode(&["999999999"]).is_err());
    }
}
