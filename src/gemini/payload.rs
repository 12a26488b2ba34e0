//! Wire types for `models/*:generateContent`.
//!
//! A request is a list of content blocks, each an ordered list of parts
//! (text or inline base64 binary), plus an optional generation config for
//! aspect ratio, response modality, voice and thinking budget. Field names
//! follow the REST API's camelCase.

use serde::{Deserialize, Serialize};

use crate::model::AspectRatio;

#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GeminiRequest {
    /// Single-block request from an ordered part list, no config.
    pub fn from_parts(parts: Vec<Part>) -> Self {
        Self {
            contents: vec![Content { role: None, parts }],
            generation_config: None,
        }
    }

    /// Multi-turn request: one content block per conversation turn, each
    /// carrying its role.
    pub fn from_contents(contents: Vec<Content>) -> Self {
        Self {
            contents,
            generation_config: None,
        }
    }

    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = Some(config);
        self
    }
}

#[derive(Debug, Serialize)]
pub struct Content {
    /// "user" or "model". Omitted for single-turn requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn with_role(role: impl Into<String>, parts: Vec<Part>) -> Self {
        Self {
            role: Some(role.into()),
            parts,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    pub fn inline(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Part::InlineData {
            inline_data: InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InlineData {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Default, Serialize)]
pub struct GenerationConfig {
    #[serde(rename = "imageConfig", skip_serializing_if = "Option::is_none")]
    pub image_config: Option<ImageConfig>,
    #[serde(rename = "responseModalities", skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<String>>,
    #[serde(rename = "speechConfig", skip_serializing_if = "Option::is_none")]
    pub speech_config: Option<SpeechConfig>,
    #[serde(rename = "thinkingConfig", skip_serializing_if = "Option::is_none")]
    pub thinking_config: Option<ThinkingConfig>,
}

impl GenerationConfig {
    pub fn for_image(ratio: AspectRatio) -> Self {
        Self {
            image_config: Some(ImageConfig {
                aspect_ratio: ratio.as_str().to_string(),
            }),
            ..Default::default()
        }
    }

    pub fn for_speech(voice: &str) -> Self {
        Self {
            response_modalities: Some(vec!["AUDIO".to_string()]),
            speech_config: Some(SpeechConfig {
                voice_config: VoiceConfig {
                    prebuilt_voice_config: PrebuiltVoiceConfig {
                        voice_name: voice.to_string(),
                    },
                },
            }),
            ..Default::default()
        }
    }

    pub fn for_thinking(budget: u32) -> Self {
        Self {
            thinking_config: Some(ThinkingConfig {
                thinking_budget: budget,
            }),
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ImageConfig {
    #[serde(rename = "aspectRatio")]
    pub aspect_ratio: String,
}

#[derive(Debug, Serialize)]
pub struct SpeechConfig {
    #[serde(rename = "voiceConfig")]
    pub voice_config: VoiceConfig,
}

#[derive(Debug, Serialize)]
pub struct VoiceConfig {
    #[serde(rename = "prebuiltVoiceConfig")]
    pub prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Debug, Serialize)]
pub struct PrebuiltVoiceConfig {
    #[serde(rename = "voiceName")]
    pub voice_name: String,
}

#[derive(Debug, Serialize)]
pub struct ThinkingConfig {
    #[serde(rename = "thinkingBudget")]
    pub thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GeminiResponse {
    /// First text part across the first candidate, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates.first()?.content.parts.iter().find_map(|p| {
            let text = p.text.as_deref()?;
            (!text.is_empty()).then_some(text)
        })
    }

    /// First inline binary part across the first candidate, if any.
    pub fn first_inline(&self) -> Option<&ResponseBlob> {
        self.candidates
            .first()?
            .content
            .parts
            .iter()
            .find_map(|p| p.inline_data.as_ref())
    }
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: ResponseContent,
}

#[derive(Debug, Deserialize)]
pub struct ResponseContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, rename = "inlineData", alias = "inline_data")]
    pub inline_data: Option<ResponseBlob>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseBlob {
    #[serde(rename = "mimeType", alias = "mime_type", default)]
    pub mime_type: Option<String>,
    pub data: String,
}

/// Base64 payload of a `data:<mime>;base64,<payload>` URL.
pub fn data_url_payload(url: &str) -> Option<&str> {
    if !url.starts_with("data:") {
        return None;
    }
    url.split(',').nth(1)
}

/// MIME type of a data URL, defaulting to image/png.
pub fn data_url_mime(url: &str) -> &str {
    url.split(':')
        .nth(1)
        .and_then(|s| s.split(';').next())
        .filter(|s| !s.is_empty())
        .unwrap_or("image/png")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_to_the_rest_shape() {
        let request = GeminiRequest::from_parts(vec![
            Part::inline("QUJD", "image/png"),
            Part::text("describe this"),
        ])
        .with_config(GenerationConfig::for_image(AspectRatio::Wide));

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": [{
                    "parts": [
                        { "inlineData": { "mimeType": "image/png", "data": "QUJD" } },
                        { "text": "describe this" }
                    ]
                }],
                "generationConfig": {
                    "imageConfig": { "aspectRatio": "16:9" }
                }
            })
        );
    }

    #[test]
    fn multi_turn_request_carries_roles() {
        let request = GeminiRequest::from_contents(vec![
            Content::with_role("user", vec![Part::text("hi")]),
            Content::with_role("model", vec![Part::text("hello")]),
            Content::with_role("user", vec![Part::text("what now?")]),
        ]);

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": [
                    { "role": "user", "parts": [{ "text": "hi" }] },
                    { "role": "model", "parts": [{ "text": "hello" }] },
                    { "role": "user", "parts": [{ "text": "what now?" }] }
                ]
            })
        );
    }

    #[test]
    fn config_omits_unset_blocks() {
        let value = serde_json::to_value(GenerationConfig::for_thinking(0)).unwrap();
        assert_eq!(value, json!({ "thinkingConfig": { "thinkingBudget": 0 } }));
    }

    #[test]
    fn speech_config_nests_the_prebuilt_voice() {
        let value = serde_json::to_value(GenerationConfig::for_speech("Kore")).unwrap();
        assert_eq!(
            value,
            json!({
                "responseModalities": ["AUDIO"],
                "speechConfig": {
                    "voiceConfig": { "prebuiltVoiceConfig": { "voiceName": "Kore" } }
                }
            })
        );
    }

    #[test]
    fn response_text_and_inline_extraction() {
        let raw = json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "" },
                        { "text": "hello" },
                        { "inlineData": { "mimeType": "image/png", "data": "QUJD" } }
                    ]
                }
            }]
        });
        let response: GeminiResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(response.first_text(), Some("hello"));
        let blob = response.first_inline().unwrap();
        assert_eq!(blob.data, "QUJD");
        assert_eq!(blob.mime_type.as_deref(), Some("image/png"));
    }

    #[test]
    fn empty_candidates_extract_nothing() {
        let response: GeminiResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.first_text().is_none());
        assert!(response.first_inline().is_none());
    }

    #[test]
    fn data_url_helpers_split_mime_and_payload() {
        let url = "data:image/jpeg;base64,/9j/4AAQ";
        assert_eq!(data_url_payload(url), Some("/9j/4AAQ"));
        assert_eq!(data_url_mime(url), "image/jpeg");
        assert_eq!(data_url_payload("plain text"), None);
        assert_eq!(data_url_mime("data:;base64,AA"), "image/png");
    }
}
