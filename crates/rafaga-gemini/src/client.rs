// SPDX-FileCopyrightText: 2026 Rafaga Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini generative-content API.
//!
//! Provides [`GeminiClient`] which handles request construction, API-key
//! authentication, and streaming SSE responses. The client is stateless
//! aside from credentials: construct it once at application start and pass
//! it wherever a generation is issued. Each submission gets exactly one
//! request attempt -- transient failures are surfaced, never retried.

use std::pin::Pin;
use std::time::Duration;

use futures::Stream;
use rafaga_core::RafagaError;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

use crate::sse;
use crate::types::{ApiErrorResponse, GenerateContentChunk, GenerateContentRequest};

/// Base URL for the Gemini generative-language API.
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// HTTP client for Gemini API communication.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
}

impl GeminiClient {
    /// Creates a new Gemini API client authenticated with the given key.
    pub fn new(api_key: &str) -> Result<Self, RafagaError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(api_key).map_err(|e| {
                RafagaError::Config(format!("invalid API key header value: {e}"))
            })?,
        );
        headers.insert(
            "content-type",
            HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| RafagaError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Overrides the base URL. Primarily for tests against a mock server.
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Opens a streaming generation request against the given model and
    /// returns the parsed chunk stream.
    ///
    /// A non-2xx response is normalized into [`RafagaError::Provider`] with
    /// the API's own error message when the body parses as one.
    pub async fn stream_generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<
        Pin<Box<dyn Stream<Item = Result<GenerateContentChunk, RafagaError>> + Send>>,
        RafagaError,
    > {
        let url = format!(
            "{}/models/{}:streamGenerateContent?alt=sse",
            self.base_url, model
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| RafagaError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model, "streaming response received");

        if status.is_success() {
            return Ok(sse::parse_sse_stream(response));
        }

        let body = response.text().await.unwrap_or_default();
        let error_msg = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
            format!(
                "Gemini API error ({}): {}",
                api_err.error.status.as_deref().unwrap_or("UNKNOWN"),
                api_err.error.message
            )
        } else {
            format!("API returned {status}: {body}")
        };
        Err(RafagaError::Provider {
            message: error_msg,
            source: None,
        })
    }
}
