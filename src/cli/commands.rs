//! Command implementations for the wayfarer CLI.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use log::{debug, info};

use crate::chatbot::Chatbot;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::ChatbotConfig;
use crate::error::Result;
use crate::ml::intents::IntentTable;
use crate::ml::vocabulary::VocabularyBuilder;

/// Lines that end an interactive session.
const QUIT_COMMANDS: [&str; 2] = ["quit", "exit"];

/// Execute a CLI command.
pub fn execute_command(args: WayfarerArgs) -> Result<()> {
    let config = args.chatbot_config()?;
    debug!("Effective configuration: {config:?}");

    match &args.command {
        Command::Ask(ask_args) => ask(ask_args, &config, &args),
        Command::Classify(classify_args) => classify(classify_args, &config, &args),
        Command::Chat => chat(&config, &args),
        Command::BuildVocabulary(build_args) => build_vocabulary(build_args, &config, &args),
        Command::Intents => list_intents(&config, &args),
    }
}

/// Answer a single utterance.
fn ask(ask_args: &AskArgs, config: &ChatbotConfig, args: &WayfarerArgs) -> Result<()> {
    let chatbot = Chatbot::from_config(config)?;
    let reply = chatbot.reply(&ask_args.utterance)?;

    output_result(
        "Reply",
        &AskResult {
            utterance: ask_args.utterance.clone(),
            reply,
        },
        args,
    )
}

/// Show the ranked predictions for an utterance.
fn classify(
    classify_args: &ClassifyArgs,
    config: &ChatbotConfig,
    args: &WayfarerArgs,
) -> Result<()> {
    let chatbot = Chatbot::from_config(config)?;
    let utterance = &classify_args.utterance;

    let tokens = chatbot.encoder().tokenize_and_normalize(utterance)?;
    let matched_terms = chatbot
        .encoder()
        .matched_terms(utterance)?
        .into_iter()
        .map(str::to_string)
        .collect();
    let predictions = chatbot.classify(utterance)?;

    output_result(
        "Classification",
        &ClassifyResult {
            utterance: utterance.clone(),
            tokens,
            matched_terms,
            predictions,
        },
        args,
    )
}

/// Interactive session over stdin.
fn chat(config: &ChatbotConfig, args: &WayfarerArgs) -> Result<()> {
    let chatbot = Chatbot::from_config(config)?;

    if args.verbosity() > 0 && matches!(args.output_format, OutputFormat::Human) {
        eprintln!("Ask me about your trip. Type 'quit' to leave.");
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();
    let answered = run_chat(
        &chatbot,
        stdin.lock(),
        &mut stdout.lock(),
        &mut stderr.lock(),
        args,
    )?;
    info!("Answered {answered} messages");

    Ok(())
}

/// Answer each non-blank line of `input` until EOF or a quit command.
///
/// A request that fails (for example with `UnknownIntent`) is reported on
/// `errors` and the session continues. Returns the number of lines answered.
pub fn run_chat<R: BufRead>(
    chatbot: &Chatbot,
    input: R,
    output: &mut dyn Write,
    errors: &mut dyn Write,
    args: &WayfarerArgs,
) -> Result<usize> {
    let mut answered = 0;

    for line in input.lines() {
        let line = line?;
        let utterance = line.trim();

        if utterance.is_empty() {
            continue;
        }
        if QUIT_COMMANDS
            .iter()
            .any(|quit| utterance.eq_ignore_ascii_case(quit))
        {
            break;
        }

        match chatbot.reply(utterance) {
            Ok(reply) => {
                match args.output_format {
                    OutputFormat::Human => reply.write_human(output)?,
                    OutputFormat::Json => write_json(output, &reply, args.pretty)?,
                }
                output.flush()?;
                answered += 1;
            }
            Err(e) => writeln!(errors, "Error: {e}")?,
        }
    }

    Ok(answered)
}

/// Derive and save the vocabulary artifact.
fn build_vocabulary(
    build_args: &BuildVocabularyArgs,
    config: &ChatbotConfig,
    args: &WayfarerArgs,
) -> Result<()> {
    let intents = load_intents(config)?;
    let builder = VocabularyBuilder::new(Arc::new(config.analyzer()?));
    let metadata = builder.build(&intents)?;
    metadata.save(&build_args.output)?;

    output_result(
        "Vocabulary written",
        &VocabularyResult {
            path: build_args.output.display().to_string(),
            vocabulary_size: metadata.vocabulary_size(),
            num_classes: metadata.num_classes(),
        },
        args,
    )
}

/// List the intents in the configured table.
fn list_intents(config: &ChatbotConfig, args: &WayfarerArgs) -> Result<()> {
    let intents = load_intents(config)?;

    let listing = IntentListing {
        intents: intents
            .records()
            .iter()
            .map(|record| IntentSummary {
                tag: record.tag.clone(),
                patterns: record.patterns.len(),
                responses: record.responses.len(),
            })
            .collect(),
    };

    output_result("Intents", &listing, args)
}

fn load_intents(config: &ChatbotConfig) -> Result<IntentTable> {
    match &config.intents_path {
        Some(path) => IntentTable::from_file(path),
        None => IntentTable::travel(),
    }
}
