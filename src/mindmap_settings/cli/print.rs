use colored::Colorize;
use mindmap_settings::api::{BlockSummary, CmdMessage, MessageLevel, ScopedValue};
use mindmap_settings::error::Result;
use mindmap_settings::model::SettingsMap;

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

pub(super) fn print_settings(settings: &SettingsMap) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(settings)?);
    Ok(())
}

pub(super) fn print_value(value: &ScopedValue) {
    println!("{}", value.value);
}

/// One line per block: ordinal, 1-based line range, stored settings.
pub(super) fn print_blocks(blocks: &[BlockSummary]) {
    for block in blocks {
        let lines = format!(
            "lines {}-{}",
            block.section.line_start + 1,
            block.section.line_end + 1
        );
        let settings = match &block.settings {
            Some(settings) if settings.is_empty() => "(no settings)".dimmed(),
            Some(settings) => serde_json::Value::Object(settings.clone()).to_string().normal(),
            None => "(invalid header)".red(),
        };
        println!("{} {} {}", block.id.to_string().yellow(), lines, settings);
    }
}
