// SPDX-FileCopyrightText: 2026 Rafaga Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Rafaga configuration system.

use rafaga_config::diagnostic::{suggest_key, ConfigError};
use rafaga_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_rafaga_config() {
    let toml = r#"
[gemini]
api_key = "test-key-123"
flash_lite_model = "gemini-2.0-flash-lite-preview-02-05"
flash_model = "gemini-2.5-flash"

[chat]
system_instruction = "Eres un asistente de marketing conciso."
temperature = 0.9
max_image_bytes = 2097152
image_prompt = "Describe esta imagen"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.gemini.api_key.as_deref(), Some("test-key-123"));
    assert_eq!(
        config.gemini.flash_lite_model,
        "gemini-2.0-flash-lite-preview-02-05"
    );
    assert_eq!(config.gemini.flash_model, "gemini-2.5-flash");
    assert_eq!(
        config.chat.system_instruction.as_deref(),
        Some("Eres un asistente de marketing conciso.")
    );
    assert_eq!(config.chat.temperature, 0.9);
    assert_eq!(config.chat.max_image_bytes, 2 * 1024 * 1024);
}

/// An empty config gets compiled defaults for every field.
#[test]
fn empty_toml_uses_defaults() {
    let config = load_config_from_str("").expect("empty TOML is valid");
    assert!(config.gemini.api_key.is_none());
    assert_eq!(config.gemini.flash_model, "gemini-2.5-flash");
    assert_eq!(config.chat.temperature, 0.7);
    assert_eq!(config.chat.max_image_bytes, 4 * 1024 * 1024);
    assert_eq!(config.chat.image_prompt, "Describe esta imagen");
}

/// Unknown field in [chat] produces an UnknownKey error with a suggestion.
#[test]
fn unknown_field_produces_suggestion() {
    let toml = r#"
[chat]
temprature = 0.5
"#;
    let errors = load_and_validate_str(toml).unwrap_err();
    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::UnknownKey { key, suggestion, .. }
            if key == "temprature" && suggestion.as_deref() == Some("temperature")
    )));
}

/// Unknown section keys are rejected too.
#[test]
fn unknown_section_is_rejected() {
    let toml = r#"
[gemni]
api_key = "x"
"#;
    assert!(load_and_validate_str(toml).is_err());
}

/// A wrong-typed value surfaces as a diagnostic, not a panic.
#[test]
fn wrong_type_produces_diagnostic() {
    let toml = r#"
[chat]
max_image_bytes = "lots"
"#;
    let errors = load_and_validate_str(toml).unwrap_err();
    assert!(!errors.is_empty());
}

/// Validation collects every violation instead of failing fast.
#[test]
fn validation_collects_all_violations() {
    let toml = r#"
[gemini]
flash_model = ""

[chat]
temperature = 5.0
"#;
    let errors = load_and_validate_str(toml).unwrap_err();
    let validation_errors: Vec<_> = errors
        .iter()
        .filter(|e| matches!(e, ConfigError::Validation { .. }))
        .collect();
    assert_eq!(validation_errors.len(), 2);
}

/// The suggestion helper is conservative about distant strings.
#[test]
fn suggestion_threshold_filters_noise() {
    let valid = &["api_key", "flash_model", "flash_lite_model"];
    assert_eq!(suggest_key("flash_modle", valid), Some("flash_model".into()));
    assert_eq!(suggest_key("qqqqqq", valid), None);
}
