//! Question extraction heuristic.
//!
//! Finds the first question-shaped run of text in a model reply. This is
//! text matching, not understanding: a reply whose question lacks a `?`
//! is missed, and rhetorical questions are picked up. Callers treat the
//! result as best-effort.

use std::sync::LazyLock;

use regex::Regex;

/// A run of non-terminal characters ending in `?`
#[allow(clippy::unwrap_used)]
static QUESTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^.!?]*\?").unwrap());

/// Extract the first question from `text`, trimmed. `None` when the text
/// contains no `?`.
pub fn extract_question(text: &str) -> Option<String> {
    QUESTION_PATTERN
        .find(text)
        .map(|m| m.as_str().trim().to_string())
        .filter(|q| !q.is_empty())
}

/// Case-fold a question for duplicate detection
pub fn normalize_question(question: &str) -> String {
    question.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_first_question() {
        let text = "Thanks for sharing. What drew you to the role? And how long have you been there?";
        assert_eq!(
            extract_question(text).as_deref(),
            Some("What drew you to the role?")
        );
    }

    #[test]
    fn no_question_mark_yields_none() {
        assert_eq!(extract_question("Tell me more about that."), None);
        assert_eq!(extract_question(""), None);
    }

    #[test]
    fn leading_sentence_is_not_included() {
        let text = "Got it! Anything else bug you?";
        assert_eq!(extract_question(text).as_deref(), Some("Anything else bug you?"));
    }

    #[test]
    fn normalize_case_folds() {
        assert_eq!(
            normalize_question("  What Is Your Role? "),
            normalize_question("what is your role?")
        );
    }
}
