use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "3:4")]
    Portrait,
    #[serde(rename = "4:3")]
    Landscape,
    #[serde(rename = "9:16")]
    Tall,
    #[serde(rename = "16:9")]
    Wide,
}

impl AspectRatio {
    /// The wire string Gemini expects in `imageConfig.aspectRatio`.
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait => "3:4",
            AspectRatio::Landscape => "4:3",
            AspectRatio::Tall => "9:16",
            AspectRatio::Wide => "16:9",
        }
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        AspectRatio::Square
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "1:1" => Ok(AspectRatio::Square),
            "3:4" => Ok(AspectRatio::Portrait),
            "4:3" => Ok(AspectRatio::Landscape),
            "9:16" => Ok(AspectRatio::Tall),
            "16:9" => Ok(AspectRatio::Wide),
            other => Err(format!(
                "Unknown aspect ratio '{}' (expected 1:1, 3:4, 4:3, 9:16 or 16:9)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSize {
    #[serde(rename = "1K")]
    OneK,
    #[serde(rename = "2K")]
    TwoK,
    #[serde(rename = "4K")]
    FourK,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::OneK => "1K",
            ImageSize::TwoK => "2K",
            ImageSize::FourK => "4K",
        }
    }
}

impl Default for ImageSize {
    fn default() -> Self {
        ImageSize::OneK
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageSize {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "1K" => Ok(ImageSize::OneK),
            "2K" => Ok(ImageSize::TwoK),
            "4K" => Ok(ImageSize::FourK),
            other => Err(format!("Unknown size '{}' (expected 1K, 2K or 4K)", other)),
        }
    }
}

/// Provenance of a vaulted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Generated,
    Edited,
    Upscaled,
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SourceType::Generated => "generated",
            SourceType::Edited => "edited",
            SourceType::Upscaled => "upscaled",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Newest,
    Oldest,
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Newest
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "newest" => Ok(SortOrder::Newest),
            "oldest" => Ok(SortOrder::Oldest),
            other => Err(format!("Unknown sort order '{}'", other)),
        }
    }
}

/// One saved output in the vault.
///
/// The `id` is minted by whichever producer created the record (generate,
/// edit, upscale, reference import) and is opaque beyond uniqueness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRecord {
    pub id: String,
    pub url: String,
    pub prompt: String,
    #[serde(rename = "aspectRatio")]
    pub aspect_ratio: AspectRatio,
    pub size: ImageSize,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "sourceType")]
    pub source_type: SourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl ResultRecord {
    pub fn new(
        prefix: &str,
        url: String,
        prompt: String,
        aspect_ratio: AspectRatio,
        size: ImageSize,
        source_type: SourceType,
    ) -> Self {
        Self {
            id: format!("{}_{}", prefix, Uuid::new_v4().simple()),
            url,
            prompt,
            aspect_ratio,
            size,
            timestamp: Utc::now(),
            source_type,
            tags: None,
        }
    }
}

/// Partial update for a vaulted record. Absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct RecordPatch {
    pub prompt: Option<String>,
    pub tags: Option<Vec<String>>,
    pub source_type: Option<SourceType>,
}

/// The manual-correction sliders of the editor. Brightness, contrast,
/// saturation and exposure are percentages in 0..=200 (100 = neutral);
/// crop is a percentage from center in 0..=50.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditParams {
    pub brightness: u32,
    pub contrast: u32,
    pub saturation: u32,
    pub exposure: u32,
    pub crop: u32,
}

impl Default for EditParams {
    fn default() -> Self {
        Self {
            brightness: 100,
            contrast: 100,
            saturation: 100,
            exposure: 100,
            crop: 0,
        }
    }
}

impl EditParams {
    pub fn clamped(self) -> Self {
        Self {
            brightness: self.brightness.min(200),
            contrast: self.contrast.min(200),
            saturation: self.saturation.min(200),
            exposure: self.exposure.min(200),
            crop: self.crop.min(50),
        }
    }

    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }
}

/// One point-in-time editor state in the undo/redo sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    #[serde(rename = "aspectRatio")]
    pub aspect_ratio: AspectRatio,
    pub params: EditParams,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    /// Wire name used by the conversation endpoint.
    pub fn as_str(self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Model => "model",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
        }
    }
}

/// A reusable prompt style. Built-ins ship with the binary; custom ones
/// are persisted in the presets namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StylePreset {
    pub id: String,
    pub name: String,
    pub tags: String,
    #[serde(default, rename = "isCustom")]
    pub is_custom: bool,
}

impl StylePreset {
    pub fn custom(name: impl Into<String>, tags: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: format!("custom_{}", Uuid::new_v4().simple()),
            name,
            tags: tags.into(),
            is_custom: true,
        }
    }
}

pub fn builtin_presets() -> Vec<StylePreset> {
    let builtin = |id: &str, name: &str, tags: &str| StylePreset {
        id: id.to_string(),
        name: name.to_string(),
        tags: tags.to_string(),
        is_custom: false,
    };
    vec![
        builtin(
            "anime",
            "Anime",
            "Anime style, vibrant colors, expressive eyes, cel shaded",
        ),
        builtin(
            "fantasy",
            "Fantasy",
            "Fantasy art, ethereal, mystical, intricate details, epic scale",
        ),
        builtin(
            "scifi",
            "Sci-Fi",
            "Sci-fi, futuristic, cinematic, high tech, industrial",
        ),
        builtin(
            "abstract",
            "Abstract",
            "Abstract expressionism, bold shapes, conceptual, artistic texture",
        ),
        builtin(
            "cyberpunk",
            "Cyberpunk",
            "Cyberpunk aesthetic, neon lights, rainy city, futuristic noir",
        ),
        builtin(
            "retro",
            "Retro",
            "Vintage 80s, synthwave, retro-futurism, VHS aesthetic",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_ratio_round_trips_through_wire_string() {
        for ratio in [
            AspectRatio::Square,
            AspectRatio::Portrait,
            AspectRatio::Landscape,
            AspectRatio::Tall,
            AspectRatio::Wide,
        ] {
            assert_eq!(ratio.as_str().parse::<AspectRatio>().unwrap(), ratio);
        }
    }

    #[test]
    fn record_serializes_with_wire_field_names() {
        let record = ResultRecord::new(
            "img",
            "data:image/png;base64,AA==".into(),
            "a quiet harbor".into(),
            AspectRatio::Wide,
            ImageSize::TwoK,
            SourceType::Generated,
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["aspectRatio"], "16:9");
        assert_eq!(json["sourceType"], "generated");
        assert_eq!(json["size"], "2K");
        // tags are omitted entirely until set
        assert!(json.get("tags").is_none());
    }

    #[test]
    fn minted_ids_carry_prefix_and_differ() {
        let a = ResultRecord::new(
            "edit",
            String::new(),
            String::new(),
            AspectRatio::Square,
            ImageSize::OneK,
            SourceType::Edited,
        );
        let b = ResultRecord::new(
            "edit",
            String::new(),
            String::new(),
            AspectRatio::Square,
            ImageSize::OneK,
            SourceType::Edited,
        );
        assert!(a.id.starts_with("edit_"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn params_clamp_to_slider_bounds() {
        let params = EditParams {
            brightness: 900,
            contrast: 100,
            saturation: 201,
            exposure: 0,
            crop: 75,
        }
        .clamped();
        assert_eq!(params.brightness, 200);
        assert_eq!(params.saturation, 200);
        assert_eq!(params.crop, 50);
        assert_eq!(params.exposure, 0);
    }

    #[test]
    fn builtins_are_not_custom() {
        let presets = builtin_presets();
        assert_eq!(presets.len(), 6);
        assert!(presets.iter().all(|p| !p.is_custom));
    }
}
