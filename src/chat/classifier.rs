//! Month/year detection for chat messages
//!
//! The assistant only answers questions that name a specific month, written
//! as a full English month name followed by a four digit year
//! (`September 2025`, `march   2026`). Matching is case-insensitive and the
//! first occurrence in the message wins.
//!
//! # Examples
//!
//! ```
//! use taskmate::chat::classifier::classify;
//!
//! let found = classify("How should I arrange my tasks in September 2025?").unwrap();
//! assert_eq!(found.month, "September");
//! assert_eq!(found.year, "2025");
//!
//! assert!(classify("What should I do?").is_err());
//! ```

use super::ChatFailure;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Full English month names, January first
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

fn month_year_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // ASCII-only case folding: `ſ` (U+017F) must not stand in for `s`
        let names = MONTH_NAMES.join("|");
        Regex::new(&format!(r"(?i-u:({}))\s+[0-9]{{4}}", names))
            .unwrap_or_else(|e| unreachable!("month/year pattern is static: {}", e))
    })
}

/// A month and year extracted from user text
///
/// Both fields keep the text exactly as the user typed it, so a message
/// containing `september 2025` yields `month == "september"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthYear {
    /// Month name as matched
    pub month: String,
    /// Four digit year as matched
    pub year: String,
}

impl MonthYear {
    /// 1-based month number (January = 1)
    pub fn month_number(&self) -> u32 {
        month_from_name(&self.month).unwrap_or(1)
    }

    /// Year as an integer
    pub fn year_number(&self) -> i32 {
        self.year.parse().unwrap_or_default()
    }
}

impl fmt::Display for MonthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month, self.year)
    }
}

/// Look up a full month name, ignoring case
///
/// Returns the 1-based month number, or `None` for anything that is not one
/// of [`MONTH_NAMES`].
pub fn month_from_name(name: &str) -> Option<u32> {
    MONTH_NAMES
        .iter()
        .position(|m| m.eq_ignore_ascii_case(name.trim()))
        .map(|idx| idx as u32 + 1)
}

/// Find the first `<Month> <year>` mention in `text`
///
/// # Errors
///
/// - [`ChatFailure::NoMonthYearFound`] when no month/year token is present
/// - [`ChatFailure::UnparsableMonthYear`] when the matched token does not
///   decompose into exactly a month and a year
pub fn classify(text: &str) -> Result<MonthYear, ChatFailure> {
    let Some(found) = month_year_pattern().find(text) else {
        tracing::debug!("No month/year token in message");
        return Err(ChatFailure::NoMonthYearFound);
    };

    let mut tokens = found.as_str().split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(month), Some(year), None) => {
            let month_year = MonthYear {
                month: month.to_string(),
                year: year.to_string(),
            };
            tracing::debug!("Classified message as {}", month_year);
            Ok(month_year)
        }
        _ => {
            tracing::debug!("Could not decompose month/year token: {:?}", found.as_str());
            Err(ChatFailure::UnparsableMonthYear)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_scenario_question() {
        let found = classify("How should I arrange my tasks in September 2025?").unwrap();
        assert_eq!(
            found,
            MonthYear {
                month: "September".to_string(),
                year: "2025".to_string()
            }
        );
    }

    #[test]
    fn test_classify_without_month_year() {
        assert_eq!(
            classify("What should I do?"),
            Err(ChatFailure::NoMonthYearFound)
        );
        assert_eq!(classify(""), Err(ChatFailure::NoMonthYearFound));
    }

    #[test]
    fn test_classify_is_case_insensitive_and_keeps_casing() {
        let found = classify("plan for DECEMBER 2030 please").unwrap();
        assert_eq!(found.month, "DECEMBER");
        assert_eq!(found.year, "2030");
        assert_eq!(found.month_number(), 12);
    }

    #[test]
    fn test_classify_folds_ascii_case_only() {
        assert_eq!(
            classify("ſeptember 2025"),
            Err(ChatFailure::NoMonthYearFound)
        );
        assert_eq!(classify("SEPTEMBER 2025").unwrap().month, "SEPTEMBER");
    }

    #[test]
    fn test_classify_requires_four_digit_year() {
        assert_eq!(classify("May 25"), Err(ChatFailure::NoMonthYearFound));
        assert_eq!(classify("May, 2025"), Err(ChatFailure::NoMonthYearFound));
    }

    #[test]
    fn test_classify_abbreviations_do_not_match() {
        assert_eq!(classify("Sept 2025"), Err(ChatFailure::NoMonthYearFound));
    }

    #[test]
    fn test_classify_longer_year_takes_first_four_digits() {
        let found = classify("June 20251").unwrap();
        assert_eq!(found.year, "2025");
    }

    #[test]
    fn test_classify_first_match_wins() {
        let found = classify("Compare March 2025 with April 2026").unwrap();
        assert_eq!(found.to_string(), "March 2025");
    }

    #[test]
    fn test_classify_any_whitespace_between_tokens() {
        let found = classify("tasks in July\t\t2027").unwrap();
        assert_eq!(found.month, "July");
        assert_eq!(found.year, "2027");

        let found = classify("tasks in July\n2027").unwrap();
        assert_eq!(found.year, "2027");
    }

    #[test]
    fn test_month_from_name() {
        assert_eq!(month_from_name("january"), Some(1));
        assert_eq!(month_from_name(" September "), Some(9));
        assert_eq!(month_from_name("Sept"), None);
        assert_eq!(month_from_name(""), None);
    }
}
