// SPDX-FileCopyrightText: 2026 Rafaga Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Rafaga chat core.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, environment variable
//! overrides, and Elm-style diagnostic error rendering with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use rafaga_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("Chat model: {}", config.gemini.flash_lite_model);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{ChatConfig, GeminiConfig, RafagaConfig};

/// Load configuration from the XDG hierarchy and validate it.
///
/// This is the high-level entry point that:
/// 1. Loads config from TOML files + env vars via Figment
/// 2. On success: runs post-deserialization validation
/// 3. On Figment error: converts to rich miette diagnostics with typo suggestions
///
/// Returns either a valid `RafagaConfig` or a list of diagnostic errors.
pub fn load_and_validate() -> Result<RafagaConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            // Read TOML source files for error source span information
            let toml_sources = collect_toml_sources();
            Err(diagnostic::figment_to_config_errors(err, &toml_sources))
        }
    }
}

/// Load configuration from a specific TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<RafagaConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Collect TOML source file contents for error span resolution.
fn collect_toml_sources() -> Vec<(String, String)> {
    let mut sources = Vec::new();

    // Local config
    if let Ok(content) = std::fs::read_to_string("rafaga.toml") {
        let path = std::env::current_dir()
            .map(|d| d.join("rafaga.toml").display().to_string())
            .unwrap_or_else(|_| "rafaga.toml".to_string());
        sources.push((path, content));
    }

    // XDG user config
    if let Some(config_dir) = dirs::config_dir() {
        let path = config_dir.join("rafaga/rafaga.toml");
        if let Ok(content) = std::fs::read_to_string(&path) {
            sources.push((path.display().to_string(), content));
        }
    }

    // System config
    let system_path = std::path::Path::new("/etc/rafaga/rafaga.toml");
    if let Ok(content) = std::fs::read_to_string(system_path) {
        sources.push((system_path.display().to_string(), content));
    }

    sources
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_inline_config_loads() {
        let config = load_and_validate_str(
            r#"
[gemini]
api_key = "test-key"

[chat]
system_instruction = "Eres un asistente de marketing."
temperature = 0.9
"#,
        )
        .unwrap();
        assert_eq!(config.chat.temperature, 0.9);
        assert_eq!(
            config.chat.system_instruction.as_deref(),
            Some("Eres un asistente de marketing.")
        );
    }

    #[test]
    fn typo_in_key_produces_suggestion() {
        let errors = load_and_validate_str(
            r#"
[chat]
temprature = 0.5
"#,
        )
        .unwrap_err();

        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigError::UnknownKey { key, suggestion, .. }
                if key == "temprature" && suggestion.as_deref() == Some("temperature")
        )));
    }

    #[test]
    fn out_of_range_value_surfaces_as_validation_error() {
        let errors = load_and_validate_str(
            r#"
[chat]
temperature = 9.0
"#,
        )
        .unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { .. })));
    }

    #[test]
    fn wrong_type_surfaces_as_invalid_type() {
        let errors = load_and_validate_str(
            r#"
[chat]
temperature = "hot"
"#,
        )
        .unwrap_err();
        assert!(!errors.is_empty());
    }
}
