//! Gemini boundary: request assembly and the HTTP client.
//!
//! Everything hard happens on the other side of this wire. The local
//! obligations are payload shape, credential handling, and error
//! classification; results come back as data URLs or text and are handed
//! to the vault by the workflow layer.

use std::path::Path;
use thiserror::Error;

pub mod client;
pub mod payload;

pub use client::GeminiClient;

pub const IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const CHAT_MODEL: &str = "gemini-3-flash-preview";
pub const TTS_MODEL: &str = "gemini-2.5-flash-preview-tts";

pub const DEFAULT_VOICE: &str = "Kore";

/// Sample rate of the PCM16 stream the TTS model returns.
pub const TTS_SAMPLE_RATE: u32 = 24_000;

#[derive(Error, Debug)]
pub enum GeminiError {
    /// The specific unauthorized/entity-not-found signal. The caller must
    /// treat the credential as invalid and reset the auth gate.
    #[error("API Key invalid or restricted")]
    CredentialRejected,

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Gemini API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Model returned no usable content")]
    EmptyResponse,
}

/// A binary part attached to a request: base64 payload plus MIME type.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub data: String,
    pub mime_type: String,
}

impl Attachment {
    pub fn new(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Read a file and base64-encode it, guessing the MIME type from the
    /// extension.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        use base64::Engine;
        let bytes = std::fs::read(path)?;
        let data = base64::engine::general_purpose::STANDARD.encode(bytes);
        Ok(Self {
            data,
            mime_type: mime_for_path(path).to_string(),
        })
    }

    /// Split a `data:<mime>;base64,<payload>` URL into an attachment.
    pub fn from_data_url(url: &str) -> Option<Self> {
        let data = payload::data_url_payload(url)?;
        Some(Self {
            data: data.to_string(),
            mime_type: payload::data_url_mime(url).to_string(),
        })
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("mov") => "video/quicktime",
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",
        Some("m4a") => "audio/mp4",
        _ => "application/octet-stream",
    }
}
