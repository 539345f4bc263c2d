// SPDX-FileCopyrightText: 2026 Rafaga Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gemini `generateContent` request/response wire types.
//!
//! Request types serialize to the camelCase JSON the API expects; response
//! types deserialize leniently, since streamed chunks may carry candidate
//! parts, usage metadata, both, or neither.

use rafaga_core::ImageData;
use serde::{Deserialize, Serialize};

// --- Request types ---

/// A request to the Gemini `streamGenerateContent` endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Ordered content turns. For a single-turn demo request this is one
    /// user turn whose parts hold the optional image followed by the text.
    pub contents: Vec<Content>,

    /// Persona/behavior override sent with the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,

    /// Sampling parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// A content turn: an ordered list of parts with an optional role.
#[derive(Debug, Clone, Serialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<Part>,
}

impl Content {
    /// A role-less content block holding a single text part (used for
    /// system instructions).
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part::text(text)],
        }
    }

    /// A user-role content block with the given parts.
    pub fn user(parts: Vec<Part>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts,
        }
    }
}

/// One part of a content turn: text or inline binary data.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: Blob,
    },
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    /// Wraps an image attachment as an inline-data part.
    pub fn inline_image(image: &ImageData) -> Self {
        Part::InlineData {
            inline_data: Blob {
                mime_type: image.mime_type.clone(),
                data: image.data.clone(),
            },
        }
    }
}

/// Inline binary payload: MIME type plus base64 data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    pub mime_type: String,
    pub data: String,
}

/// Sampling configuration for a generation request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
}

// --- Response types ---

/// One streamed response chunk.
///
/// Any field may be absent: early chunks typically carry text only, and the
/// provider usually reports usage counters on the final chunk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateContentChunk {
    pub candidates: Option<Vec<Candidate>>,
    pub usage_metadata: Option<UsageMetadata>,
}

impl GenerateContentChunk {
    /// Concatenated text of the first candidate's parts, or `None` when the
    /// chunk carries no text (usage-only chunks, empty candidates).
    pub fn text(&self) -> Option<String> {
        let candidate = self.candidates.as_ref()?.first()?;
        let parts = candidate.content.as_ref()?.parts.as_ref()?;
        let text: String = parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() { None } else { Some(text) }
    }
}

/// A response candidate.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

/// Content of a response candidate.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CandidateContent {
    pub parts: Option<Vec<ResponsePart>>,
}

/// One part of a response candidate. Non-text parts deserialize with
/// `text = None` and are skipped.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResponsePart {
    pub text: Option<String>,
}

/// Cumulative token usage reported by the provider.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UsageMetadata {
    /// Prompt (input) token count.
    pub prompt_token_count: Option<u32>,
    /// Generated (output) token count.
    pub candidates_token_count: Option<u32>,
}

/// Error body returned by the API on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// Error details within an API error response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    pub code: Option<i32>,
    pub message: String,
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_text_only_request() {
        let req = GenerateContentRequest {
            contents: vec![Content::user(vec![Part::text("hola")])],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                temperature: 0.7,
                top_p: 0.9,
            }),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hola");
        let temperature = json["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.7).abs() < 1e-6);
        let top_p = json["generationConfig"]["topP"].as_f64().unwrap();
        assert!((top_p - 0.9).abs() < 1e-6);
        assert!(json.get("systemInstruction").is_none());
    }

    #[test]
    fn serialize_multimodal_request_image_precedes_text() {
        let image = ImageData {
            mime_type: "image/jpeg".into(),
            data: "abc123==".into(),
        };
        let req = GenerateContentRequest {
            contents: vec![Content::user(vec![
                Part::inline_image(&image),
                Part::text("Describe esta imagen"),
            ])],
            system_instruction: None,
            generation_config: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        let parts = json["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(parts[0]["inlineData"]["data"], "abc123==");
        assert_eq!(parts[1]["text"], "Describe esta imagen");
    }

    #[test]
    fn serialize_system_instruction_without_role() {
        let req = GenerateContentRequest {
            contents: vec![Content::user(vec![Part::text("qué eres")])],
            system_instruction: Some(Content::text("Eres un sistema de demostración.")),
            generation_config: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json["systemInstruction"]["parts"][0]["text"],
            "Eres un sistema de demostración."
        );
        assert!(json["systemInstruction"].get("role").is_none());
    }

    #[test]
    fn deserialize_text_chunk() {
        let json = r#"{"candidates":[{"content":{"parts":[{"text":"Hola"}],"role":"model"}}]}"#;
        let chunk: GenerateContentChunk = serde_json::from_str(json).unwrap();
        assert_eq!(chunk.text().as_deref(), Some("Hola"));
        assert!(chunk.usage_metadata.is_none());
    }

    #[test]
    fn deserialize_final_chunk_with_usage() {
        let json = r#"{
            "candidates":[{"content":{"parts":[{"text":"."}]},"finishReason":"STOP"}],
            "usageMetadata":{"promptTokenCount":12,"candidatesTokenCount":34,"totalTokenCount":46}
        }"#;
        let chunk: GenerateContentChunk = serde_json::from_str(json).unwrap();
        assert_eq!(chunk.text().as_deref(), Some("."));
        let usage = chunk.usage_metadata.unwrap();
        assert_eq!(usage.prompt_token_count, Some(12));
        assert_eq!(usage.candidates_token_count, Some(34));
    }

    #[test]
    fn deserialize_usage_only_chunk_has_no_text() {
        let json = r#"{"usageMetadata":{"promptTokenCount":5,"candidatesTokenCount":0}}"#;
        let chunk: GenerateContentChunk = serde_json::from_str(json).unwrap();
        assert!(chunk.text().is_none());
        assert_eq!(
            chunk.usage_metadata.unwrap().candidates_token_count,
            Some(0)
        );
    }

    #[test]
    fn non_text_parts_are_skipped() {
        let json = r#"{"candidates":[{"content":{"parts":[{"thought":true},{"text":"visible"}]}}]}"#;
        let chunk: GenerateContentChunk = serde_json::from_str(json).unwrap();
        assert_eq!(chunk.text().as_deref(), Some("visible"));
    }

    #[test]
    fn multiple_text_parts_concatenate() {
        let json = r#"{"candidates":[{"content":{"parts":[{"text":"a"},{"text":"b"}]}}]}"#;
        let chunk: GenerateContentChunk = serde_json::from_str(json).unwrap();
        assert_eq!(chunk.text().as_deref(), Some("ab"));
    }

    #[test]
    fn deserialize_api_error_response() {
        let json = r#"{
            "error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}
        }"#;
        let err: ApiErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(err.error.code, Some(400));
        assert_eq!(err.error.status.as_deref(), Some("INVALID_ARGUMENT"));
        assert_eq!(err.error.message, "API key not valid.");
    }
}
