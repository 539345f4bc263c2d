// SPDX-FileCopyrightText: 2026 Rafaga Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Rafaga chat core.

use thiserror::Error;

/// The primary error type used across the Rafaga workspace.
#[derive(Debug, Error)]
pub enum RafagaError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Provider errors (HTTP failure, malformed stream, API rejection).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Submission rejected before any request was made (empty input, oversized image).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A response stream is already in flight for this conversation.
    #[error("a response is already streaming")]
    Busy,

    /// The in-flight stream was cancelled before completion.
    #[error("generation cancelled")]
    Cancelled,

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
