use super::payload::{Content, GeminiRequest, GeminiResponse, GenerationConfig, Part};
use super::{Attachment, GeminiError, CHAT_MODEL, IMAGE_MODEL, TTS_MODEL};
use crate::model::{AspectRatio, ChatMessage};
use base64::Engine;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// The phrase the API returns for an invalid or restricted key. Spotting
/// it anywhere in an error body must reset the auth gate.
const ENTITY_NOT_FOUND: &str = "Requested entity was not found";

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn generate_content(
        &self,
        model: &str,
        request: &GeminiRequest,
    ) -> Result<GeminiResponse, GeminiError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );
        let response = self.http.post(&url).json(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status.as_u16(), body));
        }
        Ok(response.json().await?)
    }

    /// Synthesize an image. Returns the result as a PNG data URL. A
    /// reference attachment, when present, leads the part list so the
    /// model treats it as guidance.
    pub async fn generate_image(
        &self,
        prompt: &str,
        reference: Option<&Attachment>,
        ratio: AspectRatio,
    ) -> Result<String, GeminiError> {
        let mut parts = vec![Part::text(prompt)];
        if let Some(attachment) = reference {
            parts.insert(0, Part::inline(&attachment.data, &attachment.mime_type));
        }
        let request = GeminiRequest::from_parts(parts)
            .with_config(GenerationConfig::for_image(ratio));

        let response = self.generate_content(IMAGE_MODEL, &request).await?;
        let blob = response.first_inline().ok_or(GeminiError::EmptyResponse)?;
        Ok(format!("data:image/png;base64,{}", blob.data))
    }

    /// Edit/outpaint an image per the assembled directive. The source
    /// image leads, the instruction text follows.
    pub async fn edit_image(
        &self,
        source: &Attachment,
        directive: &str,
        ratio: AspectRatio,
    ) -> Result<String, GeminiError> {
        let request = GeminiRequest::from_parts(vec![
            Part::inline(&source.data, &source.mime_type),
            Part::text(format!("Execute the following changes: {}", directive)),
        ])
        .with_config(GenerationConfig::for_image(ratio));

        let response = self.generate_content(IMAGE_MODEL, &request).await?;
        let blob = response.first_inline().ok_or(GeminiError::EmptyResponse)?;
        Ok(format!("data:image/png;base64,{}", blob.data))
    }

    /// One inference turn: optional attachment part, then the text.
    /// `thinking` pins the thinking budget instead of leaving it to the
    /// model.
    pub async fn chat(
        &self,
        text: &str,
        attachment: Option<&Attachment>,
        thinking: bool,
    ) -> Result<String, GeminiError> {
        let mut parts = Vec::new();
        if let Some(a) = attachment {
            parts.push(Part::inline(&a.data, &a.mime_type));
        }
        parts.push(Part::text(text));

        let mut request = GeminiRequest::from_parts(parts);
        if thinking {
            request = request.with_config(GenerationConfig::for_thinking(0));
        }

        let response = self.generate_content(CHAT_MODEL, &request).await?;
        response
            .first_text()
            .map(|t| t.to_string())
            .ok_or(GeminiError::EmptyResponse)
    }

    /// Multi-turn conversation. `turns` must end with the user's latest
    /// message; an attachment, when present, rides on that final turn.
    pub async fn chat_session(
        &self,
        turns: &[ChatMessage],
        attachment: Option<&Attachment>,
        thinking: bool,
    ) -> Result<String, GeminiError> {
        let mut contents: Vec<Content> = turns
            .iter()
            .map(|turn| Content::with_role(turn.role.as_str(), vec![Part::text(&turn.text)]))
            .collect();
        if let (Some(a), Some(last)) = (attachment, contents.last_mut()) {
            last.parts.insert(0, Part::inline(&a.data, &a.mime_type));
        }

        let mut request = GeminiRequest::from_contents(contents);
        if thinking {
            request = request.with_config(GenerationConfig::for_thinking(0));
        }

        let response = self.generate_content(CHAT_MODEL, &request).await?;
        response
            .first_text()
            .map(|t| t.to_string())
            .ok_or(GeminiError::EmptyResponse)
    }

    /// Speech-to-text over an inline audio attachment.
    pub async fn transcribe(&self, audio: &Attachment) -> Result<String, GeminiError> {
        let request = GeminiRequest::from_parts(vec![
            Part::inline(&audio.data, &audio.mime_type),
            Part::text("Transcribe this audio exactly. Only return the transcription text."),
        ]);

        let response = self.generate_content(CHAT_MODEL, &request).await?;
        response
            .first_text()
            .map(|t| t.to_string())
            .ok_or(GeminiError::EmptyResponse)
    }

    /// Text-to-speech. Returns raw little-endian PCM16 at
    /// [`super::TTS_SAMPLE_RATE`], decoded from the inline base64 part.
    pub async fn speak(&self, text: &str, voice: &str) -> Result<Vec<u8>, GeminiError> {
        let request = GeminiRequest::from_parts(vec![Part::text(text)])
            .with_config(GenerationConfig::for_speech(voice));

        let response = self.generate_content(TTS_MODEL, &request).await?;
        let blob = response.first_inline().ok_or(GeminiError::EmptyResponse)?;
        base64::engine::general_purpose::STANDARD
            .decode(&blob.data)
            .map_err(|_| GeminiError::EmptyResponse)
    }
}

fn classify_failure(status: u16, body: String) -> GeminiError {
    if status == 401 || status == 403 || body.contains(ENTITY_NOT_FOUND) {
        return GeminiError::CredentialRejected;
    }
    GeminiError::Api { status, body }
}
