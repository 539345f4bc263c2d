// SPDX-FileCopyrightText: 2026 Rafaga Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as value ranges and non-empty identifiers.

use crate::diagnostic::ConfigError;
use crate::model::RafagaConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &RafagaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.gemini.flash_lite_model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gemini.flash_lite_model must not be empty".to_string(),
        });
    }

    if config.gemini.flash_model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gemini.flash_model must not be empty".to_string(),
        });
    }

    if let Some(key) = &config.gemini.api_key {
        if key.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "gemini.api_key must not be empty when set".to_string(),
            });
        }
    }

    let temperature = config.chat.temperature;
    if !(0.0..=2.0).contains(&temperature) {
        errors.push(ConfigError::Validation {
            message: format!(
                "chat.temperature must be within [0.0, 2.0], got {temperature}"
            ),
        });
    }

    if config.chat.max_image_bytes == 0 {
        errors.push(ConfigError::Validation {
            message: "chat.max_image_bytes must be positive".to_string(),
        });
    }

    if config.chat.image_prompt.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "chat.image_prompt must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
