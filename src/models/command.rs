/// Trailing comment typed after the command when every line is staged for review.
pub const REVIEW_COMMENT: &str = " # <- review then press Enter";

/// What happens after a command's text has been typed into its pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    /// Press Enter straight away.
    Execute,
    /// Append [`REVIEW_COMMENT`] and press Enter.
    Review,
    /// Leave the text sitting unsubmitted at the prompt.
    Manual,
}

impl SubmitMode {
    /// `confirm_each` always wins over `auto_execute`.
    pub fn from_flags(auto_execute: bool, confirm_each: bool) -> Self {
        if confirm_each {
            SubmitMode::Review
        } else if auto_execute {
            SubmitMode::Execute
        } else {
            SubmitMode::Manual
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SubmitMode::Execute => "executed",
            SubmitMode::Review => "staged for review",
            SubmitMode::Manual => "typed, not submitted",
        }
    }
}

/// One configured command. Position in the list decides its pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub text: String,
    pub mode: SubmitMode,
}

impl CommandSpec {
    pub fn new(text: impl Into<String>, mode: SubmitMode) -> Self {
        Self {
            text: text.into(),
            mode,
        }
    }
}
