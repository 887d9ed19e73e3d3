//! Transcript rendering
//!
//! Turns chat messages into display blocks. Assistant schedule replies become
//! [`RenderedBlock::Card`]s, either straight from the structured entries the
//! message carries or, for messages that only have text, by re-parsing the
//! schedule line grammar from [`super::schedule`].

use super::conversation::ChatMessage;
use super::schedule::{parse_schedule_line, ScheduleCard, ENTRY_MARKER};
use chrono::Local;
use colored::Colorize;

/// One visual unit of a rendered message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedBlock {
    /// A parsed schedule entry
    Card(ScheduleCard),
    /// A non-schedule line inside a schedule reply
    Highlight(String),
    /// Whole message shown as-is, line breaks preserved
    Plain(String),
}

/// Render a message into display blocks
pub fn render_message(message: &ChatMessage) -> Vec<RenderedBlock> {
    if message.is_assistant() {
        if let Some(entries) = message.schedule() {
            return entries
                .iter()
                .map(|entry| RenderedBlock::Card(ScheduleCard::from(entry)))
                .collect();
        }
        if message.content().contains(ENTRY_MARKER) {
            return render_schedule_text(message.content());
        }
    }
    vec![RenderedBlock::Plain(message.content().to_string())]
}

/// Re-parse schedule text line by line
///
/// Lines that match the schedule grammar become cards, other non-blank lines
/// become highlights, blank lines are dropped.
pub fn render_schedule_text(content: &str) -> Vec<RenderedBlock> {
    content
        .split('\n')
        .filter_map(|line| {
            if line.trim().starts_with(ENTRY_MARKER) {
                if let Some(card) = parse_schedule_line(line) {
                    return Some(RenderedBlock::Card(card));
                }
            }
            if line.trim().is_empty() {
                None
            } else {
                Some(RenderedBlock::Highlight(line.to_string()))
            }
        })
        .collect()
}

/// Render a message for the terminal, with a sender/time header
pub fn paint_message(message: &ChatMessage) -> String {
    let time = message
        .timestamp()
        .with_timezone(&Local)
        .format("%H:%M")
        .to_string();
    let header = if message.is_assistant() {
        format!("{} {}", "assistant".cyan().bold(), time.dimmed())
    } else {
        format!("{} {}", "you".green().bold(), time.dimmed())
    };

    let body: Vec<String> = render_message(message).iter().map(paint_block).collect();
    format!("{}\n{}\n", header, body.join("\n"))
}

/// Render a single block for the terminal
pub fn paint_block(block: &RenderedBlock) -> String {
    match block {
        RenderedBlock::Card(card) => format!(
            "  {}\n    {}  {}  {}\n    {} {}",
            card.title.blue().bold(),
            format!("ID: {}", card.task_id).on_bright_blue(),
            format!("Start: {}", card.start).green(),
            format!("⏱ {} min", card.duration_minutes).yellow(),
            "Summary:".bold(),
            card.summary
        ),
        RenderedBlock::Highlight(line) => format!("  {}", line.blue()),
        RenderedBlock::Plain(text) => text
            .lines()
            .map(|l| format!("  {}", l))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}
