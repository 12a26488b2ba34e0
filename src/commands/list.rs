use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::SortOrder;
use crate::vault::Vault;

/// Filter/sort view over the vault. Pure read; the vault's insertion
/// order is untouched.
pub fn run(vault: &Vault, filter: &str, sort: SortOrder) -> Result<CmdResult> {
    Ok(CmdResult::default().with_listed_records(vault.list(filter, sort)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AspectRatio, ImageSize, ResultRecord, SourceType};
    use chrono::{Duration, Utc};

    fn record(id: &str, prompt: &str, age_hours: i64) -> ResultRecord {
        ResultRecord {
            id: id.to_string(),
            url: String::new(),
            prompt: prompt.to_string(),
            aspect_ratio: AspectRatio::Square,
            size: ImageSize::OneK,
            timestamp: Utc::now() - Duration::hours(age_hours),
            source_type: SourceType::Generated,
            tags: None,
        }
    }

    #[test]
    fn empty_filter_lists_everything() {
        let mut vault = Vault::new();
        vault.add(record("a", "harbor", 2));
        vault.add(record("b", "meadow", 1));

        let result = run(&vault, "", SortOrder::Newest).unwrap();
        assert_eq!(result.listed_records.len(), 2);
        assert_eq!(result.listed_records[0].id, "b");
    }

    #[test]
    fn filter_and_oldest_sort_combine() {
        let mut vault = Vault::new();
        vault.add(record("a", "Misty harbor", 3));
        vault.add(record("b", "meadow", 2));
        vault.add(record("c", "harbor at night", 1));

        let result = run(&vault, "HARBOR", SortOrder::Oldest).unwrap();
        let ids: Vec<&str> = result.listed_records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }
}
