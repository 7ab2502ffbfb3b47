//! Display labels for the chat widget.

use serde::Serialize;

/// Panel title of the research assistant.
pub const RESEARCHER_TITLE: &str = "Your Researcher Assistant";

/// Greeting shown before the first user message.
pub const RESEARCHER_INITIAL: &str = "Hi! 👋 What is the topic of your research?";

/// Placeholder of the message input.
pub const RESEARCHER_PLACEHOLDER: &str = "Type your research topic here...";

/// Text for the widget's three label slots.
///
/// There is no `Default`: every label must be supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatLabels {
    pub title: String,
    pub initial: String,
    pub placeholder: String,
}

impl ChatLabels {
    pub fn new(
        title: impl Into<String>,
        initial: impl Into<String>,
        placeholder: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            initial: initial.into(),
            placeholder: placeholder.into(),
        }
    }

    /// Labels of the research assistant.
    pub fn researcher() -> Self {
        Self::new(RESEARCHER_TITLE, RESEARCHER_INITIAL, RESEARCHER_PLACEHOLDER)
    }
}
