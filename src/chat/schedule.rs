//! Schedule entries and their line grammar
//!
//! A suggested schedule is shown to the user as one line per entry:
//!
//! ```text
//! • [<taskId>] <title> — start: <suggestedStart>, duration: <durationMinutes> min. Summary: <summary>
//! ```
//!
//! [`format_schedule`] produces that text and [`parse_schedule_line`] reads it
//! back. The two must stay byte-for-byte in sync; fields are inserted
//! verbatim, so a title containing `" — start: "` or a newline cannot be
//! recovered exactly.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Prefix every formatted schedule line starts with
pub const ENTRY_MARKER: &str = "• [";

/// One proposed task placement returned by the suggestion service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    /// Backend task identifier
    pub task_id: i64,
    /// Task title
    pub title: String,
    /// Suggested start, as the service wrote it
    pub suggested_start: String,
    /// Suggested duration in minutes
    pub duration_minutes: u32,
    /// One-line summary of the work
    pub summary: String,
}

/// A schedule line parsed back out of chat text
///
/// Fields are kept as text. `duration_minutes` is constrained to digits by
/// the grammar but is not range-checked, so any digit run renders as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleCard {
    /// Task identifier text between the brackets
    pub task_id: String,
    /// Task title
    pub title: String,
    /// Start text
    pub start: String,
    /// Duration in minutes, digits as written
    pub duration_minutes: String,
    /// Summary text (rest of the line)
    pub summary: String,
}

impl From<&ScheduleEntry> for ScheduleCard {
    fn from(entry: &ScheduleEntry) -> Self {
        Self {
            task_id: entry.task_id.to_string(),
            title: entry.title.clone(),
            start: entry.suggested_start.clone(),
            duration_minutes: entry.duration_minutes.to_string(),
            summary: entry.summary.clone(),
        }
    }
}

fn schedule_line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^• \[(.+?)\] (.+?) — start: (.+?), duration: (\d+) min\. Summary: (.+)$")
            .unwrap_or_else(|e| unreachable!("schedule line pattern is static: {}", e))
    })
}

/// Format a single entry as one schedule line
pub fn format_entry(entry: &ScheduleEntry) -> String {
    format!(
        "{}{}] {} — start: {}, duration: {} min. Summary: {}",
        ENTRY_MARKER,
        entry.task_id,
        entry.title,
        entry.suggested_start,
        entry.duration_minutes,
        entry.summary
    )
}

/// Format entries in the order given, one line each, joined by `\n`
///
/// # Examples
///
/// ```
/// use taskmate::chat::schedule::{format_schedule, ScheduleEntry};
///
/// let text = format_schedule(&[ScheduleEntry {
///     task_id: 1,
///     title: "Write report".to_string(),
///     suggested_start: "2025-09-05T09:00".to_string(),
///     duration_minutes: 60,
///     summary: "Draft Q3 report".to_string(),
/// }]);
/// assert_eq!(
///     text,
///     "• [1] Write report — start: 2025-09-05T09:00, duration: 60 min. Summary: Draft Q3 report"
/// );
/// ```
pub fn format_schedule(entries: &[ScheduleEntry]) -> String {
    entries
        .iter()
        .map(format_entry)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse one line of [`format_schedule`] output
///
/// Returns `None` for any line that does not match the grammar exactly,
/// including lines with leading whitespace.
pub fn parse_schedule_line(line: &str) -> Option<ScheduleCard> {
    let caps = schedule_line_pattern().captures(line)?;
    Some(ScheduleCard {
        task_id: caps[1].to_string(),
        title: caps[2].to_string(),
        start: caps[3].to_string(),
        duration_minutes: caps[4].to_string(),
        summary: caps[5].to_string(),
    })
}
