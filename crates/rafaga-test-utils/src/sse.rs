// SPDX-FileCopyrightText: 2026 Rafaga Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builder for scripted Gemini SSE stream bodies.
//!
//! Produces the `data: {json}` event framing of
//! `streamGenerateContent?alt=sse`, for serving through wiremock.

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a raw SSE body out of scripted response chunks.
#[derive(Debug, Default)]
pub struct SseBody {
    events: Vec<String>,
}

impl SseBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a chunk carrying one text fragment.
    pub fn text(self, text: &str) -> Self {
        let data = serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": text}], "role": "model"}}]
        });
        self.raw(&data.to_string())
    }

    /// Appends a chunk carrying a text fragment plus cumulative usage
    /// counters, the way the provider reports them on the final chunk.
    pub fn text_with_usage(self, text: &str, input_tokens: u32, output_tokens: u32) -> Self {
        let data = serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": text}], "role": "model"},
                "finishReason": "STOP"
            }],
            "usageMetadata": {
                "promptTokenCount": input_tokens,
                "candidatesTokenCount": output_tokens,
                "totalTokenCount": input_tokens + output_tokens
            }
        });
        self.raw(&data.to_string())
    }

    /// Appends a usage-only chunk with no candidate text.
    pub fn usage(self, input_tokens: u32, output_tokens: u32) -> Self {
        let data = serde_json::json!({
            "usageMetadata": {
                "promptTokenCount": input_tokens,
                "candidatesTokenCount": output_tokens,
                "totalTokenCount": input_tokens + output_tokens
            }
        });
        self.raw(&data.to_string())
    }

    /// Appends a raw data payload verbatim (e.g., malformed JSON to script
    /// a mid-stream fault).
    pub fn raw(mut self, data: &str) -> Self {
        self.events.push(format!("data: {data}\n\n"));
        self
    }

    /// Renders the full SSE body.
    pub fn build(self) -> String {
        self.events.concat()
    }
}

/// Mounts a mock for the streaming endpoint of `model`, serving `body` as
/// an SSE response.
pub async fn mount_gemini_stream(server: &MockServer, model: &str, body: String) {
    Mock::given(method("POST"))
        .and(path(format!("/models/{model}:streamGenerateContent")))
        .and(query_param("alt", "sse"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string(body),
        )
        .mount(server)
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_chunks_use_sse_framing() {
        let body = SseBody::new().text("hola").build();
        assert!(body.starts_with("data: {"));
        assert!(body.ends_with("\n\n"));
        assert!(body.contains("\"text\":\"hola\""));
    }

    #[test]
    fn usage_chunk_reports_cumulative_counts() {
        let body = SseBody::new().usage(10, 25).build();
        assert!(body.contains("\"promptTokenCount\":10"));
        assert!(body.contains("\"candidatesTokenCount\":25"));
        assert!(body.contains("\"totalTokenCount\":35"));
    }

    #[test]
    fn events_concatenate_in_order() {
        let body = SseBody::new().text("a").text("b").build();
        let first = body.find("\"text\":\"a\"").unwrap();
        let second = body.find("\"text\":\"b\"").unwrap();
        assert!(first < second);
    }
}
