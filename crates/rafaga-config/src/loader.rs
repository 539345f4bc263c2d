// SPDX-FileCopyrightText: 2026 Rafaga Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./rafaga.toml` > `~/.config/rafaga/rafaga.toml` > `/etc/rafaga/rafaga.toml`
//! with environment variable overrides via `RAFAGA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::RafagaConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/rafaga/rafaga.toml` (system-wide)
/// 3. `~/.config/rafaga/rafaga.toml` (user XDG config)
/// 4. `./rafaga.toml` (local directory)
/// 5. `RAFAGA_*` environment variables
pub fn load_config() -> Result<RafagaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RafagaConfig::default()))
        .merge(Toml::file("/etc/rafaga/rafaga.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("rafaga/rafaga.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("rafaga.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Useful for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<RafagaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RafagaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<RafagaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RafagaConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `RAFAGA_GEMINI_API_KEY` must map to
/// `gemini.api_key`, not `gemini.api.key`.
fn env_provider() -> Env {
    Env::prefixed("RAFAGA_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: RAFAGA_GEMINI_API_KEY -> "gemini_api_key"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("gemini_", "gemini.", 1)
            .replacen("chat_", "chat.", 1);
        mapped.into()
    })
}
