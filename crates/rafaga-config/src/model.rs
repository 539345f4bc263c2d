// SPDX-FileCopyrightText: 2026 Rafaga Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Rafaga chat core.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Rafaga configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RafagaConfig {
    /// Gemini API settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Conversation behavior settings.
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Gemini API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// API key. Usually supplied via `RAFAGA_GEMINI_API_KEY` rather than a file.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Low-latency model used for interactive chat turns.
    #[serde(default = "default_flash_lite_model")]
    pub flash_lite_model: String,

    /// Higher-quality model for turns where latency matters less.
    #[serde(default = "default_flash_model")]
    pub flash_model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            flash_lite_model: default_flash_lite_model(),
            flash_model: default_flash_model(),
        }
    }
}

fn default_flash_lite_model() -> String {
    "gemini-2.0-flash-lite-preview-02-05".to_string()
}

fn default_flash_model() -> String {
    "gemini-2.5-flash".to_string()
}

/// Conversation behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChatConfig {
    /// Persona/system instruction sent with every request, if set.
    #[serde(default)]
    pub system_instruction: Option<String>,

    /// Sampling temperature. Must be within `[0.0, 2.0]`.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum decoded size of an attached image, in bytes.
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,

    /// Prompt substituted for image-only submissions.
    #[serde(default = "default_image_prompt")]
    pub image_prompt: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            system_instruction: None,
            temperature: default_temperature(),
            max_image_bytes: default_max_image_bytes(),
            image_prompt: default_image_prompt(),
        }
    }
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_image_bytes() -> usize {
    4 * 1024 * 1024
}

fn default_image_prompt() -> String {
    "Describe esta imagen".to_string()
}
