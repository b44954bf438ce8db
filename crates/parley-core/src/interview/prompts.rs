//! Prompt text for the single-agent interviewer.

use std::collections::BTreeSet;

use super::context::InterviewContext;
use super::state::ConversationState;

/// Render a set for embedding in a prompt: `"a", "b"` or `none`
pub fn render_set(items: &BTreeSet<String>) -> String {
    if items.is_empty() {
        return "none".to_string();
    }
    items
        .iter()
        .map(|item| format!("\"{item}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

/// System instruction carrying the tracker's constraints and the fixed rule set
pub fn interviewer_system_prompt(state: &ConversationState) -> String {
    let failed = render_set(&state.failed_topics);
    let asked = render_set(&state.asked_questions);

    format!(
        r#"You are an empathetic interviewer having a natural conversation.

KEY PRINCIPLES:
1. NEVER REPEAT - Each question must be unique
2. RESPECT SIGNALS - If someone struggles, change topics immediately
3. STAY FRESH - Don't return to topics that didn't work
4. BE NATURAL - Talk like a real person, not a survey bot

CONVERSATION RULES:
1. If user gives short answers twice in a row -> Change topic
2. If user struggles with a topic 3 times -> Abandon that topic completely
3. Never ask about topics marked as failed: {failed}
4. Never repeat these previous questions: {asked}

SIGNS TO CHANGE TOPIC:
- Short answers (1-3 words)
- "I don't know" or "Not sure"
- Confusion signals ("??", "what do you mean")
- Explicit requests ("can we move on", "next question")

GOOD TOPIC CHANGES:
- "Let's try something different - [new topic]"
- "How about we talk about [new topic] instead?"
- "That's fine, let's switch gears. [new topic]"
- "No problem, let me ask about [new topic] instead"

Current failed topics: {failed}
Current topic attempts: {attempts}
Short answer count: {streak}
"#,
        attempts = state.topic_attempt_count,
        streak = state.short_answer_streak,
    )
}

/// User-turn payload: interview context, the respondent's message, and the
/// constraints restated
pub fn interviewer_user_prompt(
    message: &str,
    context: &InterviewContext,
    state: &ConversationState,
) -> String {
    format!(
        r#"
Context: {ctx}
Goals: {goals}
Additional Info: {extra}

User's message: {message}

Remember:
1. Never repeat any of these questions: {asked}
2. Never return to these failed topics: {failed}
3. If user is struggling, immediately switch to a new topic
4. Keep responses natural and conversational
"#,
        ctx = context.context,
        goals = context.goals,
        extra = context.additional_context,
        asked = render_set(&state.asked_questions),
        failed = render_set(&state.failed_topics),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_set_empty_and_filled() {
        let mut set = BTreeSet::new();
        assert_eq!(render_set(&set), "none");
        set.insert("b".to_string());
        set.insert("a".to_string());
        assert_eq!(render_set(&set), "\"a\", \"b\"");
    }

    #[test]
    fn system_prompt_lists_failed_topics_and_counters() {
        let mut state = ConversationState::new();
        state.failed_topics.insert("salary".to_string());
        state.asked_questions.insert("how are you?".to_string());
        state.short_answer_streak = 1;

        let prompt = interviewer_system_prompt(&state);
        assert!(prompt.contains("Never ask about topics marked as failed: \"salary\""));
        assert!(prompt.contains("Never repeat these previous questions: \"how are you?\""));
        assert!(prompt.contains("Short answer count: 1"));
        assert!(prompt.contains("Current topic attempts: 0"));
    }

    #[test]
    fn user_prompt_embeds_context_and_message() {
        let context = InterviewContext::new("Warehouse staff", "Find pain points", "Night shift");
        let prompt = interviewer_user_prompt("the scanners break", &context, &ConversationState::new());
        assert!(prompt.contains("Context: Warehouse staff"));
        assert!(prompt.contains("Goals: Find pain points"));
        assert!(prompt.contains("Additional Info: Night shift"));
        assert!(prompt.contains("User's message: the scanners break"));
    }
}
