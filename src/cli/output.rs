//! Output formatting for CLI commands.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::chatbot::Reply;
use crate::cli::args::{OutputFormat, WayfarerArgs};
use crate::error::Result;
use crate::ml::decision::IntentPrediction;

/// Human-readable rendering of a command result.
pub trait HumanReadable {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()>;
}

/// Result structure for answering an utterance.
#[derive(Debug, Serialize, Deserialize)]
pub struct AskResult {
    pub utterance: String,
    #[serde(flatten)]
    pub reply: Reply,
}

/// Result structure for classifying an utterance.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifyResult {
    pub utterance: String,
    pub tokens: Vec<String>,
    pub matched_terms: Vec<String>,
    pub predictions: Vec<IntentPrediction>,
}

/// Result structure for vocabulary derivation.
#[derive(Debug, Serialize, Deserialize)]
pub struct VocabularyResult {
    pub path: String,
    pub vocabulary_size: usize,
    pub num_classes: usize,
}

/// One row of the intent listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct IntentSummary {
    pub tag: String,
    pub patterns: usize,
    pub responses: usize,
}

/// Result structure for the intent listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct IntentListing {
    pub intents: Vec<IntentSummary>,
}

impl HumanReadable for AskResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}", self.reply.response())
    }
}

impl HumanReadable for Reply {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}", self.response())
    }
}

impl HumanReadable for ClassifyResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Tokens: {}", self.tokens.join(" "))?;
        writeln!(out, "Matched terms: {}", self.matched_terms.join(" "))?;
        writeln!(out)?;

        if self.predictions.is_empty() {
            return writeln!(out, "No intent above the confidence threshold");
        }

        writeln!(out, "Predictions:")?;
        writeln!(out, "────────────")?;
        for (i, prediction) in self.predictions.iter().enumerate() {
            writeln!(
                out,
                "{:>2}. {:<28} {:.4}",
                i + 1,
                prediction.intent,
                prediction.probability
            )?;
        }
        Ok(())
    }
}

impl HumanReadable for VocabularyResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Path: {}", self.path)?;
        writeln!(out, "Vocabulary size: {}", self.vocabulary_size)?;
        writeln!(out, "Classes: {}", self.num_classes)
    }
}

impl HumanReadable for IntentListing {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{:<28} {:>8} {:>9}", "TAG", "PATTERNS", "RESPONSES")?;
        for intent in &self.intents {
            writeln!(
                out,
                "{:<28} {:>8} {:>9}",
                intent.tag, intent.patterns, intent.responses
            )?;
        }
        writeln!(out)?;
        writeln!(out, "Total intents: {}", self.intents.len())
    }
}

/// Output a result to stdout in the specified format.
pub fn output_result<T: Serialize + HumanReadable>(
    message: &str,
    result: &T,
    args: &WayfarerArgs,
) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_result(&mut out, message, result, args)
}

/// Write a result in the specified format.
pub fn write_result<T: Serialize + HumanReadable>(
    out: &mut dyn Write,
    message: &str,
    result: &T,
    args: &WayfarerArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                writeln!(out, "{message}")?;
                writeln!(out)?;
            }
            result.write_human(out)?;
        }
        OutputFormat::Json => write_json(out, result, args.pretty)?,
    }
    Ok(())
}

/// Write a result as one JSON document followed by a newline.
pub fn write_json<T: Serialize>(out: &mut dyn Write, result: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    writeln!(out, "{json}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(extra: &[&str]) -> WayfarerArgs {
        let mut argv = vec!["wayfarer"];
        argv.extend_from_slice(extra);
        argv.push("intents");
        WayfarerArgs::try_parse_from(argv).unwrap()
    }

    fn listing() -> IntentListing {
        IntentListing {
            intents: vec![IntentSummary {
                tag: "greeting".to_string(),
                patterns: 4,
                responses: 3,
            }],
        }
    }

    #[test]
    fn test_human_output() {
        let mut out = Vec::new();
        write_result(&mut out, "Intents", &listing(), &args(&[])).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("greeting"));
        assert!(text.contains("Total intents: 1"));
        assert!(!text.starts_with("Intents"));
    }

    #[test]
    fn test_json_output() {
        let mut out = Vec::new();
        let json = args(&["--format", "json"]);
        write_result(&mut out, "Intents", &listing(), &json).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["intents"][0]["tag"], "greeting");
        assert_eq!(value["intents"][0]["responses"], 3);
    }

    #[test]
    fn test_ask_result_json_is_flat() {
        let result = AskResult {
            utterance: "hi".to_string(),
            reply: Reply::Matched {
                intent: "greeting".to_string(),
                probability: 0.5,
                response: "Hello!".to_string(),
            },
        };

        let mut out = Vec::new();
        write_json(&mut out, &result, false).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["outcome"], "matched");
        assert_eq!(value["intent"], "greeting");
        assert_eq!(value["response"], "Hello!");
    }

    #[test]
    fn test_classify_without_predictions() {
        let result = ClassifyResult {
            utterance: "xyz".to_string(),
            tokens: vec!["xyz".to_string()],
            matched_terms: vec![],
            predictions: vec![],
        };

        let mut out = Vec::new();
        result.write_human(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("No intent above the confidence threshold"));
    }
}
