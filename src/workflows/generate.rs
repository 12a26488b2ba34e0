use crate::commands::{save, CmdMessage, CmdResult};
use crate::error::Result;
use crate::gemini::{Attachment, GeminiClient};
use crate::model::{AspectRatio, ImageSize, ResultRecord, SourceType};
use crate::store::KeyValueStore;
use crate::vault::Vault;

#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub prompt: String,
    pub negative: Option<String>,
    pub ratio: AspectRatio,
    pub size: ImageSize,
    pub reference: Option<Attachment>,
}

/// The prompt actually sent: the user directive, with the negative prompt
/// folded in as an exclusion clause.
pub fn assemble_prompt(prompt: &str, negative: Option<&str>) -> String {
    match negative.map(str::trim).filter(|n| !n.is_empty()) {
        Some(negative) => format!("{}. Exclude: {}.", prompt, negative),
        None => prompt.to_string(),
    }
}

/// Generate an image and vault the result. When a reference image guides
/// the render, the reference itself is vaulted first so the comparison
/// view can find it later.
pub async fn run<S: KeyValueStore>(
    client: &GeminiClient,
    store: &mut S,
    vault: &mut Vault,
    request: GenerateRequest,
) -> Result<CmdResult> {
    let prompt = assemble_prompt(&request.prompt, request.negative.as_deref());

    let mut result = CmdResult::default();
    if let Some(reference) = &request.reference {
        let source = ResultRecord::new(
            "src",
            reference.to_data_url(),
            "Reference Context Source".to_string(),
            AspectRatio::Square,
            ImageSize::OneK,
            SourceType::Generated,
        );
        let saved = save::run(store, vault, source)?;
        result.messages.extend(saved.messages);
    }

    // The suspension point. Nothing has been committed for the render
    // itself yet, so an error here leaves the vault untouched.
    let url = client
        .generate_image(&prompt, request.reference.as_ref(), request.ratio)
        .await?;

    let record = ResultRecord::new(
        "img",
        url,
        prompt,
        request.ratio,
        request.size,
        SourceType::Generated,
    );
    let saved = save::run(store, vault, record)?;
    result.affected_records = saved.affected_records;
    result.messages.extend(saved.messages);
    result.add_message(CmdMessage::success("Render successful."));
    Ok(result)
}
