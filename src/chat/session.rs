//! Chat session: the single entry point driving the assistant pipeline
//!
//! Each [`ChatSession::submit`] call walks
//! `Classifying → {Rejected | Requesting → {Succeeded | EmptyResult | Failed}}`
//! and always ends with exactly one new assistant message in the transcript.

use super::classifier::classify;
use super::conversation::{ChatMessage, Transcript};
use super::schedule::format_schedule;
use super::suggestion::{request_suggestions, SuggestionOutcome, SuggestionService};
use super::ChatFailure;
use crate::config::ChatConfig;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

/// Greeting every new session opens with
pub const GREETING: &str = "Hi! I'm your AI task assistant. I can help you organize and prioritize your tasks. Try asking me something like 'How should I arrange my tasks in September 2025?' (Note that I can only provide suggestions when your questions include month and year.)";

/// Artificial "thinking" delay applied before each reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyPacing {
    min: Duration,
    max: Duration,
}

impl ReplyPacing {
    /// Delay drawn uniformly from `[min, max]`; bounds are swapped if inverted
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// No delay at all
    pub fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// Pick the next delay
    pub fn next_delay(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        let min = self.min.as_millis() as u64;
        let max = self.max.as_millis() as u64;
        Duration::from_millis(rand::rng().random_range(min..=max))
    }
}

impl From<&ChatConfig> for ReplyPacing {
    fn from(config: &ChatConfig) -> Self {
        Self::new(
            Duration::from_millis(config.reply_delay_min_ms),
            Duration::from_millis(config.reply_delay_max_ms),
        )
    }
}

/// How a submission ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    /// No month/year in the message, or it could not be decomposed
    Rejected,
    /// A schedule was formatted into the reply
    Succeeded,
    /// The service proposed nothing
    EmptyResult,
    /// The service call failed
    Failed,
}

/// Conversation with the task assistant
///
/// Owns the transcript; callers get read-only access through
/// [`ChatSession::transcript`].
pub struct ChatSession {
    service: Arc<dyn SuggestionService>,
    transcript: Transcript,
    pacing: ReplyPacing,
}

impl ChatSession {
    /// Start a session whose transcript opens with [`GREETING`]
    pub fn new(service: Arc<dyn SuggestionService>, pacing: ReplyPacing) -> Self {
        let mut transcript = Transcript::new();
        transcript.push(ChatMessage::assistant(GREETING));
        Self {
            service,
            transcript,
            pacing,
        }
    }

    /// Submit user text and wait for the assistant's reply
    ///
    /// Input is trimmed; blank input is ignored and returns `None` without
    /// touching the transcript. Otherwise one user message and then one
    /// assistant message are appended, and the assistant message is
    /// returned along with how the submission ended.
    pub async fn submit(&mut self, text: &str) -> Option<(&ChatMessage, SubmissionState)> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.transcript.push(ChatMessage::user(text));

        let delay = self.pacing.next_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let (reply, state) = self.answer(text).await;
        Some((self.transcript.push(reply), state))
    }

    async fn answer(&self, text: &str) -> (ChatMessage, SubmissionState) {
        let month_year = match classify(text) {
            Ok(month_year) => month_year,
            Err(failure) => return (failure_reply(failure), SubmissionState::Rejected),
        };

        match request_suggestions(self.service.as_ref(), &month_year).await {
            SuggestionOutcome::Schedule(entries) => {
                let content = format_schedule(&entries);
                (
                    ChatMessage::assistant_with_schedule(content, entries),
                    SubmissionState::Succeeded,
                )
            }
            SuggestionOutcome::Empty => (
                failure_reply(ChatFailure::EmptySuggestionResult),
                SubmissionState::EmptyResult,
            ),
            SuggestionOutcome::Failed(_) => (
                failure_reply(ChatFailure::TransportOrServerError),
                SubmissionState::Failed,
            ),
        }
    }

    /// Read-only view of the conversation so far
    pub fn transcript(&self) -> &[ChatMessage] {
        self.transcript.messages()
    }
}

fn failure_reply(failure: ChatFailure) -> ChatMessage {
    tracing::debug!("Replying with canned message for {:?}", failure);
    ChatMessage::assistant(failure.user_message())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::conversation::Sender;
    use crate::chat::render::{render_message, RenderedBlock};
    use crate::test_utils::FakeSuggestionService;

    fn session(service: Arc<FakeSuggestionService>) -> ChatSession {
        ChatSession::new(service, ReplyPacing::none())
    }

    #[tokio::test]
    async fn test_new_session_opens_with_greeting() {
        let s = session(Arc::new(FakeSuggestionService::with_entries(Vec::new())));
        assert_eq!(s.transcript().len(), 1);
        assert_eq!(s.transcript()[0].content(), GREETING);
        assert_eq!(s.transcript()[0].sender(), Sender::Assistant);
    }

    #[tokio::test]
    async fn test_scenario_september_schedule() {
        let service = Arc::new(FakeSuggestionService::with_entries(vec![
            FakeSuggestionService::sample_entry(),
        ]));
        let mut s = session(service.clone());

        let (reply, state) = s
            .submit("How should I arrange my tasks in September 2025?")
            .await
            .unwrap();
        assert_eq!(state, SubmissionState::Succeeded);
        assert_eq!(
            reply.content(),
            "• [1] Write report — start: 2025-09-05T09:00, duration: 60 min. Summary: Draft Q3 report"
        );
        assert_eq!(service.call_count(), 1);
    }

    #[tokio::test]
    async fn test_scenario_no_month_year_skips_service() {
        let service = Arc::new(FakeSuggestionService::with_entries(vec![
            FakeSuggestionService::sample_entry(),
        ]));
        let mut s = session(service.clone());

        let (reply, state) = s.submit("What should I do?").await.unwrap();
        assert_eq!(state, SubmissionState::Rejected);
        assert_eq!(reply.content(), ChatFailure::NoMonthYearFound.user_message());
        assert_eq!(service.call_count(), 0);
    }

    #[tokio::test]
    async fn test_scenario_service_failure() {
        let service = Arc::new(FakeSuggestionService::failing("HTTP 500"));
        let mut s = session(service);

        let (reply, state) = s.submit("Plan October 2025").await.unwrap();
        assert_eq!(state, SubmissionState::Failed);
        assert_eq!(
            reply.content(),
            "There was an error fetching task suggestions. Please try again later."
        );
        assert!(!reply.content().contains("HTTP 500"));
    }

    #[tokio::test]
    async fn test_empty_schedule_gives_fixed_message() {
        let service = Arc::new(FakeSuggestionService::with_entries(Vec::new()));
        let mut s = session(service);

        let (reply, state) = s.submit("november 2025").await.unwrap();
        assert_eq!(state, SubmissionState::EmptyResult);
        assert_eq!(
            reply.content(),
            "I couldn't fetch task suggestions at the moment. Please try again later."
        );
    }

    #[tokio::test]
    async fn test_each_submission_appends_user_then_assistant() {
        let service = Arc::new(FakeSuggestionService::with_entries(vec![
            FakeSuggestionService::sample_entry(),
        ]));
        let mut s = session(service);

        s.submit("  hello  ").await;
        s.submit("August 2026").await;

        let senders: Vec<Sender> = s.transcript().iter().map(|m| m.sender()).collect();
        assert_eq!(
            senders,
            vec![
                Sender::Assistant,
                Sender::User,
                Sender::Assistant,
                Sender::User,
                Sender::Assistant
            ]
        );
        assert_eq!(s.transcript()[1].content(), "hello");
    }

    #[tokio::test]
    async fn test_blank_input_is_ignored() {
        let service = Arc::new(FakeSuggestionService::with_entries(Vec::new()));
        let mut s = session(service);
        assert!(s.submit("   \n").await.is_none());
        assert_eq!(s.transcript().len(), 1);
    }

    #[tokio::test]
    async fn test_schedule_reply_renders_as_cards() {
        let service = Arc::new(FakeSuggestionService::with_entries(vec![
            FakeSuggestionService::sample_entry(),
        ]));
        let mut s = session(service);
        s.submit("September 2025").await;

        let last = s.transcript().last().unwrap();
        let blocks = render_message(last);
        assert!(matches!(&blocks[..], [RenderedBlock::Card(c)] if c.title == "Write report"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pacing_delay_is_applied() {
        let service = Arc::new(FakeSuggestionService::with_entries(Vec::new()));
        let pacing = ReplyPacing::new(Duration::from_millis(1000), Duration::from_millis(2000));
        let mut s = ChatSession::new(service, pacing);

        let start = tokio::time::Instant::now();
        s.submit("What now?").await;
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(1000));
        assert!(elapsed <= Duration::from_millis(2100));
    }

    #[test]
    fn test_pacing_bounds() {
        let pacing = ReplyPacing::new(Duration::from_millis(50), Duration::from_millis(10));
        for _ in 0..50 {
            let d = pacing.next_delay();
            assert!(d >= Duration::from_millis(10) && d <= Duration::from_millis(50));
        }
        assert_eq!(ReplyPacing::none().next_delay(), Duration::ZERO);
    }
}
