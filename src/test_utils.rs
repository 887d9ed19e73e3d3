//! Test utilities for taskmate
//!
//! Provides an in-memory [`SuggestionService`], temporary config files and
//! assertion helpers shared by unit tests.

use crate::chat::schedule::ScheduleEntry;
use crate::chat::suggestion::{SuggestionResponse, SuggestionService};
use crate::error::{Result, TaskmateError};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::TempDir;

enum FakeReply {
    Response(SuggestionResponse),
    Error(String),
}

/// Suggestion service that answers from memory and records every question
pub struct FakeSuggestionService {
    reply: FakeReply,
    questions: Mutex<Vec<String>>,
}

impl FakeSuggestionService {
    /// Always answer with `entries`
    pub fn with_entries(entries: Vec<ScheduleEntry>) -> Self {
        Self::with_response(SuggestionResponse {
            schedule: Some(entries),
        })
    }

    /// Always answer with `response`
    pub fn with_response(response: SuggestionResponse) -> Self {
        Self {
            reply: FakeReply::Response(response),
            questions: Mutex::new(Vec::new()),
        }
    }

    /// Always fail with `message`
    pub fn failing(message: &str) -> Self {
        Self {
            reply: FakeReply::Error(message.to_string()),
            questions: Mutex::new(Vec::new()),
        }
    }

    /// The entry used throughout the chat tests
    pub fn sample_entry() -> ScheduleEntry {
        ScheduleEntry {
            task_id: 1,
            title: "Write report".to_string(),
            suggested_start: "2025-09-05T09:00".to_string(),
            duration_minutes: 60,
            summary: "Draft Q3 report".to_string(),
        }
    }

    /// Questions received so far, oldest first
    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }

    /// Number of calls received
    pub fn call_count(&self) -> usize {
        self.questions.lock().unwrap().len()
    }
}

#[async_trait]
impl SuggestionService for FakeSuggestionService {
    async fn suggest(&self, question: &str) -> Result<SuggestionResponse> {
        self.questions.lock().unwrap().push(question.to_string());
        match &self.reply {
            FakeReply::Response(response) => Ok(response.clone()),
            FakeReply::Error(message) => Err(TaskmateError::Api {
                status: 500,
                message: message.clone(),
            }
            .into()),
        }
    }
}

/// Create a temporary directory for testing
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Write `content` to `name` inside `dir`
pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

/// Assert that an error's message contains `expected`
///
/// # Panics
///
/// Panics if the result is Ok or the message does not match
pub fn assert_error_contains<T>(result: Result<T>, expected: &str) {
    match result {
        Ok(_) => panic!("Expected error containing '{}' but got Ok", expected),
        Err(e) => {
            let error_msg = e.to_string();
            assert!(
                error_msg.contains(expected),
                "Error message '{}' does not contain '{}'",
                error_msg,
                expected
            );
        }
    }
}

/// A complete configuration file exercising every section
pub fn test_config_yaml() -> String {
    r#"
api:
  base_url: http://127.0.0.1:9/api/v1
  timeout_seconds: 5
  suggestion_path: /tasks/suggestions
chat:
  reply_delay_min_ms: 0
  reply_delay_max_ms: 10
auth:
  keyring_service: taskmate-test
  keyring_user: api_token
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_records_questions() {
        let fake = FakeSuggestionService::with_entries(vec![FakeSuggestionService::sample_entry()]);
        let response = fake.suggest("q1").await.unwrap();
        assert_eq!(response.schedule.unwrap().len(), 1);
        assert_eq!(fake.questions(), vec!["q1".to_string()]);
    }

    #[tokio::test]
    async fn test_fake_failing() {
        let fake = FakeSuggestionService::failing("boom");
        assert_error_contains(fake.suggest("q").await, "boom");
        assert_eq!(fake.call_count(), 1);
    }

    #[test]
    fn test_create_test_file() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "test.txt", "content");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "content");
    }

    #[test]
    #[should_panic(expected = "Expected error containing")]
    fn test_assert_error_contains_ok() {
        assert_error_contains(Ok(()), "error");
    }

    #[test]
    fn test_test_config_yaml_parses() {
        let config: crate::config::Config = serde_yaml::from_str(&test_config_yaml()).unwrap();
        assert_eq!(config.auth.keyring_service, "taskmate-test");
        assert!(config.validate().is_ok());
    }
}
