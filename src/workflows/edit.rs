use crate::commands::{save, CmdMessage, CmdResult};
use crate::error::Result;
use crate::gemini::{Attachment, GeminiClient};
use crate::history::EditHistory;
use crate::model::{AspectRatio, EditParams, ImageSize, ResultRecord, Snapshot, SourceType};
use crate::store::KeyValueStore;
use crate::vault::Vault;

#[derive(Debug, Clone)]
pub struct EditRequest {
    pub source: Attachment,
    pub prompt: Option<String>,
    pub ratio: AspectRatio,
    pub params: EditParams,
}

/// The full instruction sent to the model: the outpainting sentence for
/// the target ratio, the user directive (or a default enhancement), and
/// the manual-correction sentence from the sliders. Neutral sliders add
/// nothing.
pub fn assemble_directive(prompt: Option<&str>, ratio: AspectRatio, params: &EditParams) -> String {
    let ratio_context = format!(
        "Expand and reformat the image into a {} aspect ratio by intelligently \
         outpainting and generating new matching content to fill the frame seamlessly.",
        ratio
    );
    let directive = prompt
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or("Enhance the details");

    if params.is_neutral() {
        return format!("{} {}.", ratio_context, directive);
    }
    format!(
        "{} {}. Apply adjustments: brightness {}%, contrast {}%, saturation {}%.",
        ratio_context, directive, params.brightness, params.contrast, params.saturation
    )
}

/// Run one edit pass: call the model, commit the resulting snapshot to
/// the history, and vault the record. The commit happens only after the
/// call succeeds, so a failed edit leaves both structures untouched.
pub async fn run<S: KeyValueStore>(
    client: &GeminiClient,
    store: &mut S,
    vault: &mut Vault,
    history: &mut EditHistory,
    request: EditRequest,
) -> Result<CmdResult> {
    let params = request.params.clamped();
    let directive = assemble_directive(request.prompt.as_deref(), request.ratio, &params);

    let url = client
        .edit_image(&request.source, &directive, request.ratio)
        .await?;

    history.commit(Snapshot {
        image_url: url.clone(),
        aspect_ratio: request.ratio,
        params,
    });

    let record = ResultRecord::new(
        "edit",
        url,
        directive,
        request.ratio,
        ImageSize::OneK,
        SourceType::Edited,
    );
    let mut result = save::run(store, vault, record)?;
    result.add_message(CmdMessage::success("Neural edit finalized."));
    Ok(result)
}
