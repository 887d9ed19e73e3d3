//! Chat assistant pipeline
//!
//! ```text
//! user text ─▶ classifier ─┬─▶ canned rejection
//!                          └─▶ suggestion request ─▶ schedule formatter ─▶ transcript ─▶ renderer
//! ```
//!
//! - `classifier`: finds a `<Month> <year>` mention in free text
//! - `suggestion`: asks the suggestion service for that month
//! - `schedule`: schedule entries and their one-line text grammar
//! - `conversation`: chat messages and the append-only transcript
//! - `render`: turns messages into cards and text blocks
//! - `session`: the `submit` entry point tying it all together

pub mod classifier;
pub mod conversation;
pub mod render;
pub mod schedule;
pub mod session;
pub mod suggestion;

pub use classifier::{classify, MonthYear};
pub use conversation::{ChatMessage, Sender, Transcript};
pub use render::{render_message, RenderedBlock};
pub use schedule::{format_schedule, ScheduleCard, ScheduleEntry};
pub use session::{ChatSession, ReplyPacing, SubmissionState, GREETING};
pub use suggestion::{SuggestionOutcome, SuggestionResponse, SuggestionService};

use thiserror::Error;

/// Why a submission produced a canned reply instead of a schedule
///
/// Every variant is recovered locally; the user sees
/// [`ChatFailure::user_message`], never the underlying cause.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatFailure {
    /// Message names no month and year
    #[error("no month/year found in message")]
    NoMonthYearFound,
    /// Month/year token could not be split into month and year
    #[error("month/year token could not be decomposed")]
    UnparsableMonthYear,
    /// Service answered with an empty or missing schedule
    #[error("suggestion service returned no entries")]
    EmptySuggestionResult,
    /// Network, status or decoding failure
    #[error("suggestion request failed")]
    TransportOrServerError,
}

impl ChatFailure {
    /// Fixed text shown to the user for this failure
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NoMonthYearFound => "Please include a specific month and year in your question so I can provide relevant task suggestions.",
            Self::UnparsableMonthYear => {
                "I couldn't identify the month and year in your question. Please try again."
            }
            Self::EmptySuggestionResult => {
                "I couldn't fetch task suggestions at the moment. Please try again later."
            }
            Self::TransportOrServerError => {
                "There was an error fetching task suggestions. Please try again later."
            }
        }
    }
}
