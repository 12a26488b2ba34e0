use crate::commands::{CmdMessage, CmdResult, ComparisonPair};
use crate::error::{AuraError, Result};
use crate::vault::Vault;

/// Pair a processed record with its inferred generated source. The lookup
/// is a prompt-containment heuristic, so a miss is an ordinary outcome
/// reported as info, never an error.
pub fn run(vault: &Vault, id: &str) -> Result<CmdResult> {
    let Some(processed) = vault.get(id) else {
        return Err(AuraError::RecordNotFound(id.to_string()));
    };

    let mut result = CmdResult::default();
    match vault.find_original(processed) {
        Some(original) => {
            result.comparison = Some(ComparisonPair {
                original: original.clone(),
                processed: processed.clone(),
            });
        }
        None => {
            result.add_message(CmdMessage::info("Original source not found in vault."));
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AspectRatio, ImageSize, ResultRecord, SourceType};

    fn record(id: &str, prompt: &str, source_type: SourceType) -> ResultRecord {
        ResultRecord {
            id: id.to_string(),
            url: String::new(),
            prompt: prompt.to_string(),
            aspect_ratio: AspectRatio::Square,
            size: ImageSize::OneK,
            timestamp: chrono::Utc::now(),
            source_type,
            tags: None,
        }
    }

    #[test]
    fn finds_the_generated_source() {
        let mut vault = Vault::new();
        vault.add(record("src", "a red lighthouse", SourceType::Generated));
        vault.add(record(
            "edit",
            "Expand to 16:9. a red lighthouse. Enhance.",
            SourceType::Edited,
        ));

        let result = run(&vault, "edit").unwrap();
        let pair = result.comparison.unwrap();
        assert_eq!(pair.original.id, "src");
        assert_eq!(pair.processed.id, "edit");
    }

    #[test]
    fn miss_reports_info_not_error() {
        let mut vault = Vault::new();
        vault.add(record("edit", "orphan directive", SourceType::Upscaled));

        let result = run(&vault, "edit").unwrap();
        assert!(result.comparison.is_none());
        assert!(result
            .messages
            .iter()
            .any(|m| m.content == "Original source not found in vault."));
    }
}
