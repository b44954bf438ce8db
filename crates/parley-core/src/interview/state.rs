//! Conversation state tracking.
//!
//! One `ConversationState` per interview session. It is updated exactly once
//! per respondent message, before the next question is generated, and
//! decides whether the current topic survives that message.
//!
//! Transition rules, in order:
//! 1. Short-answer streak: answers of at most three whitespace tokens extend
//!    the streak, anything longer resets it.
//! 2. Struggle detection: case-insensitive substring match against
//!    [`STRUGGLE_SIGNALS`].
//! 3. Abandon on struggle or a streak of two: the current topic (if any)
//!    moves to `failed_topics` and all counters reset.
//! 4. Fatigue: a topic that is still set gains an attempt; the third attempt
//!    abandons it.
//!
//! The tracker never picks a topic itself. `current_topic` is only set
//! through [`ConversationState::set_current_topic`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::questions::normalize_question;
use crate::constants::interview::{
    SHORT_ANSWER_MAX_TOKENS, SHORT_ANSWER_STREAK_LIMIT, TOPIC_ATTEMPT_LIMIT,
};

/// Phrases that mark a respondent as struggling with the current topic.
pub const STRUGGLE_SIGNALS: &[&str] = &[
    "i dont know",
    "not sure",
    "confused",
    "dont understand",
    "what do you mean",
    "??",
    "why",
    "can we move on",
    "different topic",
    "next question",
];

/// What a single `update` observed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnSignals {
    pub is_short: bool,
    pub is_struggling: bool,
    /// Topic moved into `failed_topics` during this update
    pub abandoned: Option<String>,
}

/// Per-session record of topic history, repetition guards, and struggle signals
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConversationState {
    /// Topic presently being probed; `None` means free to introduce a new one
    pub current_topic: Option<String>,
    /// Every topic ever introduced
    pub attempted_topics: BTreeSet<String>,
    /// Topics explicitly abandoned; never reintroduced
    pub failed_topics: BTreeSet<String>,
    /// Case-folded question texts already surfaced to the respondent
    pub asked_questions: BTreeSet<String>,
    /// Consecutive short answers
    pub short_answer_streak: u32,
    /// Consecutive turns spent on `current_topic`
    pub topic_attempt_count: u32,
}

/// Whether `message` counts as a short answer
pub fn is_short_answer(message: &str) -> bool {
    message.split_whitespace().count() <= SHORT_ANSWER_MAX_TOKENS
}

/// Whether `message` contains any struggle signal (case-insensitive)
pub fn is_struggling(message: &str) -> bool {
    let lower = message.to_lowercase();
    STRUGGLE_SIGNALS.iter().any(|signal| lower.contains(signal))
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one respondent message to the state.
    pub fn update(&mut self, message: &str) -> TurnSignals {
        let mut signals = TurnSignals {
            is_short: is_short_answer(message),
            is_struggling: is_struggling(message),
            abandoned: None,
        };

        if signals.is_short {
            self.short_answer_streak += 1;
        } else {
            self.short_answer_streak = 0;
        }

        if signals.is_struggling || self.short_answer_streak >= SHORT_ANSWER_STREAK_LIMIT {
            if let Some(topic) = self.current_topic.take() {
                self.failed_topics.insert(topic.clone());
                signals.abandoned = Some(topic);
            }
            self.topic_attempt_count = 0;
            self.short_answer_streak = 0;
        }

        // Only reachable when the abandon rule above left the topic in place
        if self.current_topic.is_some() {
            self.topic_attempt_count += 1;
            if self.topic_attempt_count >= TOPIC_ATTEMPT_LIMIT {
                if let Some(topic) = self.current_topic.take() {
                    self.failed_topics.insert(topic.clone());
                    signals.abandoned = Some(topic);
                }
                self.topic_attempt_count = 0;
            }
        }

        debug!(
            short = signals.is_short,
            struggling = signals.is_struggling,
            abandoned = ?signals.abandoned,
            streak = self.short_answer_streak,
            attempts = self.topic_attempt_count,
            "Conversation state updated"
        );

        signals
    }

    /// Commit to a topic. Refuses topics that already failed.
    ///
    /// Resets the attempt counter when the topic changes.
    pub fn set_current_topic(&mut self, topic: impl Into<String>) -> bool {
        let topic = topic.into();
        if self.failed_topics.contains(&topic) {
            return false;
        }
        if self.current_topic.as_deref() != Some(topic.as_str()) {
            self.topic_attempt_count = 0;
        }
        self.attempted_topics.insert(topic.clone());
        self.current_topic = Some(topic);
        true
    }

    /// Remember a question so it is listed as already asked
    pub fn record_question(&mut self, question: &str) {
        self.asked_questions.insert(normalize_question(question));
    }

    /// Whether a question (case-insensitively) was already asked
    pub fn has_asked(&self, question: &str) -> bool {
        self.asked_questions.contains(&normalize_question(question))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_topic(topic: &str) -> ConversationState {
        let mut state = ConversationState::new();
        assert!(state.set_current_topic(topic));
        state
    }

    #[test]
    fn two_short_answers_abandon_topic() {
        let mut state = with_topic("career");

        let first = state.update("idk");
        assert!(first.is_short);
        assert_eq!(state.short_answer_streak, 1);
        assert_eq!(state.current_topic.as_deref(), Some("career"));

        let second = state.update("sure");
        assert_eq!(second.abandoned.as_deref(), Some("career"));
        assert_eq!(state.current_topic, None);
        assert!(state.failed_topics.contains("career"));
        assert_eq!(state.short_answer_streak, 0);
        assert_eq!(state.topic_attempt_count, 0);
    }

    #[test]
    fn fresh_session_short_answers_without_topic() {
        let mut state = ConversationState::new();

        state.update("idk");
        assert_eq!(state.short_answer_streak, 1);
        assert_eq!(state.current_topic, None);

        state.update("sure");
        // Streak hit the limit and reset even though there was nothing to abandon
        assert_eq!(state.short_answer_streak, 0);
        assert!(state.failed_topics.is_empty());
    }

    #[test]
    fn struggle_signal_abandons_immediately() {
        let mut state = with_topic("management style");

        let signals =
            state.update("Honestly I am Not Sure how to answer that one, it is hard to say");
        assert!(signals.is_struggling);
        assert!(!signals.is_short);
        assert_eq!(state.current_topic, None);
        assert!(state.failed_topics.contains("management style"));
    }

    #[test]
    fn struggle_signal_is_substring_match() {
        assert!(is_struggling("WHY would you ask that"));
        assert!(is_struggling("huh??"));
        assert!(is_struggling("can we move on please"));
        assert!(!is_struggling("I really enjoy the work I do"));
    }

    #[test]
    fn long_answer_resets_streak() {
        let mut state = ConversationState::new();
        state.update("ok");
        assert_eq!(state.short_answer_streak, 1);
        state.update("I have been working in logistics for about ten years now");
        assert_eq!(state.short_answer_streak, 0);
    }

    #[test]
    fn fatigue_abandons_on_third_attempt() {
        let mut state = with_topic("hobbies");
        let long = "I like to spend weekends hiking with my family";

        state.update(long);
        assert_eq!(state.topic_attempt_count, 1);
        state.update(long);
        assert_eq!(state.topic_attempt_count, 2);

        let signals = state.update(long);
        assert_eq!(signals.abandoned.as_deref(), Some("hobbies"));
        assert_eq!(state.topic_attempt_count, 0);
        assert_eq!(state.current_topic, None);
        assert!(state.failed_topics.contains("hobbies"));
    }

    #[test]
    fn attempts_only_count_with_topic() {
        let mut state = ConversationState::new();
        for _ in 0..5 {
            state.update("I like to spend weekends hiking with my family");
        }
        assert_eq!(state.topic_attempt_count, 0);
    }

    #[test]
    fn abandon_rule_prevents_fatigue_count_same_update() {
        let mut state = with_topic("pay");
        state.update("My pay is fine but I would rather talk about something else");
        assert_eq!(state.topic_attempt_count, 1);

        state.update("next question");
        assert_eq!(state.topic_attempt_count, 0);
        assert_eq!(state.current_topic, None);
    }

    #[test]
    fn failed_topic_never_returns() {
        let mut state = with_topic("family");
        state.update("why");
        assert!(state.failed_topics.contains("family"));

        assert!(!state.set_current_topic("family"));
        assert_eq!(state.current_topic, None);

        assert!(state.set_current_topic("travel"));
        for msg in ["ok", "fine", "I went to Spain last year with friends"] {
            state.update(msg);
            assert_ne!(state.current_topic.as_deref(), Some("family"));
        }
    }

    #[test]
    fn duplicate_questions_are_case_folded() {
        let mut state = ConversationState::new();
        state.record_question("what is your role?");
        assert!(state.has_asked("What Is Your Role?"));
        state.record_question("What Is Your Role?");
        assert_eq!(state.asked_questions.len(), 1);
    }

    #[test]
    fn switching_topic_resets_attempts() {
        let mut state = with_topic("a");
        state.update("a long enough answer to count as engaged");
        assert_eq!(state.topic_attempt_count, 1);

        assert!(state.set_current_topic("b"));
        assert_eq!(state.topic_attempt_count, 0);
        assert!(state.attempted_topics.contains("a"));
        assert!(state.attempted_topics.contains("b"));
    }
}
