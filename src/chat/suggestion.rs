//! Schedule suggestion requests
//!
//! The assistant turns an accepted month/year into a fixed question and asks
//! the suggestion service exactly once. Whatever comes back is collapsed
//! into a [`SuggestionOutcome`]; transport details never reach the user.

use super::classifier::MonthYear;
use super::schedule::ScheduleEntry;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Body returned by the suggestion service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionResponse {
    /// Proposed placements in service order; may be absent
    #[serde(default)]
    pub schedule: Option<Vec<ScheduleEntry>>,
}

/// Something that can propose a schedule for a natural-language question
///
/// Implemented by [`crate::api::ApiClient`] against the REST backend and by
/// in-memory fakes in tests.
#[async_trait]
pub trait SuggestionService: Send + Sync {
    /// Ask for a schedule
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-success status or an
    /// undecodable body
    async fn suggest(&self, question: &str) -> Result<SuggestionResponse>;
}

/// Result of one suggestion round-trip
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionOutcome {
    /// Non-empty schedule, in the order the service sent it
    Schedule(Vec<ScheduleEntry>),
    /// Service answered but proposed nothing
    Empty,
    /// Transport, status or decoding failure
    Failed(String),
}

/// Build the question sent for a month/year
///
/// # Examples
///
/// ```
/// use taskmate::chat::classifier::MonthYear;
/// use taskmate::chat::suggestion::build_question;
///
/// let month_year = MonthYear { month: "September".into(), year: "2025".into() };
/// assert_eq!(build_question(&month_year), "How should I arrange my tasks in September 2025?");
/// ```
pub fn build_question(month_year: &MonthYear) -> String {
    format!(
        "How should I arrange my tasks in {} {}?",
        month_year.month, month_year.year
    )
}

/// Ask `service` for a schedule covering `month_year`
///
/// Issues exactly one call. No retries.
pub async fn request_suggestions(
    service: &dyn SuggestionService,
    month_year: &MonthYear,
) -> SuggestionOutcome {
    let question = build_question(month_year);
    tracing::debug!("Requesting suggestions: {}", question);

    match service.suggest(&question).await {
        Ok(SuggestionResponse {
            schedule: Some(entries),
        }) if !entries.is_empty() => {
            tracing::info!("Received {} suggested entries for {}", entries.len(), month_year);
            SuggestionOutcome::Schedule(entries)
        }
        Ok(_) => {
            tracing::info!("Suggestion service returned no entries for {}", month_year);
            SuggestionOutcome::Empty
        }
        Err(e) => {
            tracing::warn!("Suggestion request failed: {:#}", e);
            SuggestionOutcome::Failed(e.to_string())
        }
    }
}
