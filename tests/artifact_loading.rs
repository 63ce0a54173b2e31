mod common;

use std::path::Path;

use tempfile::TempDir;

use wayfarer::chatbot::Chatbot;
use wayfarer::config::ChatbotConfig;
use wayfarer::error::{Result, WayfarerError};
use wayfarer::ml::classifier::{Activation, DenseLayer, DenseNetwork};
use wayfarer::ml::vocabulary::ModelMetadata;

use common::{keyword_network, sample_intents, sample_metadata};

/// Write the sample model, metadata, and intent table into `dir`.
fn write_artifacts(dir: &Path, extension: &str) -> Result<ChatbotConfig> {
    let intents = sample_intents()?;
    let metadata = sample_metadata(&intents)?;
    let network = keyword_network(&metadata, &intents)?;

    let model_path = dir.join(format!("model.{extension}"));
    let metadata_path = dir.join(format!("data.{extension}"));
    let intents_path = dir.join("intents.json");

    network.save(&model_path)?;
    metadata.save(&metadata_path)?;
    std::fs::write(&intents_path, intents.to_json_string()?)?;

    Ok(ChatbotConfig {
        model_path,
        metadata_path,
        intents_path: Some(intents_path),
        seed: Some(5),
        ..Default::default()
    })
}

fn assert_model_load<T: std::fmt::Debug>(result: Result<T>) {
    assert!(
        matches!(result, Err(WayfarerError::ModelLoad { .. })),
        "expected ModelLoad, got {result:?}"
    );
}

#[test]
fn chatbot_loads_json_artifacts() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write_artifacts(dir.path(), "json")?;

    let chatbot = Chatbot::from_config(&config)?;
    assert_eq!(chatbot.labels().len(), 4);
    assert_eq!(chatbot.reply("Good morning")?.intent(), Some("greeting"));
    Ok(())
}

#[test]
fn chatbot_loads_bincode_artifacts() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write_artifacts(dir.path(), "bin")?;

    let chatbot = Chatbot::from_config(&config)?;
    assert_eq!(
        chatbot.reply("Do I need a visa?")?.intent(),
        Some("visa_requirements")
    );

    // Same artifacts in JSON behave identically.
    let json_dir = TempDir::new()?;
    let json_chatbot = Chatbot::from_config(&write_artifacts(json_dir.path(), "json")?)?;
    for utterance in ["Hi", "Bye", "Thank you", "zzz"] {
        assert_eq!(
            chatbot.classify(utterance)?,
            json_chatbot.classify(utterance)?
        );
    }
    Ok(())
}

#[test]
fn missing_artifacts_fail_to_load() -> Result<()> {
    let dir = TempDir::new()?;
    let mut config = write_artifacts(dir.path(), "json")?;
    config.model_path = dir.path().join("absent.json");

    assert_model_load(Chatbot::from_config(&config));
    Ok(())
}

#[test]
fn malformed_artifacts_fail_to_load() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write_artifacts(dir.path(), "json")?;

    std::fs::write(&config.metadata_path, "{\"words\": [\"hello\"")?;
    assert_model_load(Chatbot::from_config(&config));

    let empty_vocabulary = r#"{"words": [], "classes": ["greeting"]}"#;
    std::fs::write(&config.metadata_path, empty_vocabulary)?;
    assert_model_load(Chatbot::from_config(&config));
    Ok(())
}

#[test]
fn unsupported_extension_fails_to_load() -> Result<()> {
    let dir = TempDir::new()?;
    let mut config = write_artifacts(dir.path(), "json")?;

    let h5 = dir.path().join("model.h5");
    std::fs::copy(&config.model_path, &h5)?;
    config.model_path = h5;

    assert_model_load(Chatbot::from_config(&config));
    Ok(())
}

#[test]
fn inconsistent_artifacts_fail_to_load() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write_artifacts(dir.path(), "json")?;
    let metadata = ModelMetadata::load(&config.metadata_path)?;

    // One input too many.
    let wide = DenseNetwork::new(vec![DenseLayer::new(
        vec![vec![0.0; metadata.num_classes()]; metadata.vocabulary_size() + 1],
        vec![0.0; metadata.num_classes()],
        Activation::Softmax,
    )?])?;
    wide.save(&config.model_path)?;
    assert_model_load(Chatbot::from_config(&config));

    // One output too few.
    let narrow = DenseNetwork::new(vec![DenseLayer::new(
        vec![vec![0.0; metadata.num_classes() - 1]; metadata.vocabulary_size()],
        vec![0.0; metadata.num_classes() - 1],
        Activation::Softmax,
    )?])?;
    narrow.save(&config.model_path)?;
    assert_model_load(Chatbot::from_config(&config));
    Ok(())
}

#[test]
fn two_layer_network_round_trips_through_bincode() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("model.bincode");

    let network = DenseNetwork::new(vec![
        DenseLayer::new(
            vec![vec![1.0, -1.0], vec![0.5, 0.5], vec![-1.0, 1.0]],
            vec![0.0, 0.1],
            Activation::Relu,
        )?,
        DenseLayer::new(
            vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]],
            vec![0.0, 0.0, 0.0],
            Activation::Softmax,
        )?,
    ])?;
    network.save(&path)?;

    assert_eq!(DenseNetwork::load(&path)?, network);
    Ok(())
}

#[test]
fn lexicon_from_config_shapes_matching() -> Result<()> {
    let dir = TempDir::new()?;
    let plain = write_artifacts(dir.path(), "json")?;

    let lexicon_path = dir.path().join("lexicon.txt");
    std::fs::write(&lexicon_path, "need\nvisa\n")?;
    let with_lexicon = ChatbotConfig {
        lexicon_path: Some(lexicon_path),
        ..plain.clone()
    };

    let chatbot = Chatbot::from_config(&plain)?;
    let matched = chatbot.encoder().matched_terms("Visa needed")?;
    assert_eq!(matched, vec!["visa"]);

    let chatbot = Chatbot::from_config(&with_lexicon)?;
    let matched = chatbot.encoder().matched_terms("Visa needed")?;
    assert_eq!(matched, vec!["need", "visa"]);
    Ok(())
}
