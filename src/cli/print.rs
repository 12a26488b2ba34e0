use auragen::commands::{CmdMessage, ComparisonPair, MessageLevel};
use auragen::model::{ResultRecord, StylePreset};
use colored::Colorize;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_records(records: &[ResultRecord]) {
    if records.is_empty() {
        println!("Vault is empty.");
        return;
    }

    for record in records {
        let tags = record
            .tags
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(|t| format!("  [{}]", t.join(", ")))
            .unwrap_or_default();
        println!(
            "{}  {}  {} {} {}{}",
            record.id.yellow(),
            record.timestamp.format("%Y-%m-%d %H:%M"),
            record.source_type.to_string().cyan(),
            record.aspect_ratio,
            record.size,
            tags.dimmed()
        );
        println!("    {}", preview(&record.prompt).italic());
    }
}

pub(super) fn print_presets(presets: &[StylePreset]) {
    for preset in presets {
        let marker = if preset.is_custom { "*" } else { " " };
        println!("{} {:<12} {}", marker, preset.name.bold(), preset.tags.dimmed());
    }
}

pub(super) fn print_comparison(pair: &ComparisonPair) {
    println!("{}", "Original Context".dimmed());
    println!("  {}  {}", pair.original.id.yellow(), preview(&pair.original.prompt));
    println!("{}", "Processed Result".cyan());
    println!("  {}  {}", pair.processed.id.yellow(), preview(&pair.processed.prompt));
}

fn preview(prompt: &str) -> String {
    let flat: String = prompt
        .chars()
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect();
    if flat.chars().count() > 80 {
        let truncated: String = flat.chars().take(79).collect();
        format!("{}…", truncated)
    } else {
        flat
    }
}
