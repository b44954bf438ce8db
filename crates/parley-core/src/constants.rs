//! Shared constants

pub mod ai {
    /// Model used when neither config nor environment picks one
    pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
    /// Sampling temperature for every interview call
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;
    /// Output cap per completion
    pub const MAX_OUTPUT_TOKENS: usize = 1024;
    /// Anthropic API version header value
    pub const ANTHROPIC_VERSION: &str = "2023-06-01";
}

pub mod interview {
    /// Answers with at most this many whitespace tokens count as short
    pub const SHORT_ANSWER_MAX_TOKENS: usize = 3;
    /// Consecutive short answers that force a topic change
    pub const SHORT_ANSWER_STREAK_LIMIT: u32 = 2;
    /// Turns spent on one topic before it is abandoned
    pub const TOPIC_ATTEMPT_LIMIT: u32 = 3;
    /// Discussion turns replayed into the panel prompt
    pub const DISCUSSION_WINDOW: usize = 3;
}

pub mod server {
    pub const DEFAULT_PORT: u16 = 5001;
}

pub mod paths {
    pub const CONFIG_DIR_NAME: &str = ".parley";
    pub const CONFIG_FILE_NAME: &str = "config.toml";
    pub const LOG_FILE_NAME: &str = "parley.log";
}
