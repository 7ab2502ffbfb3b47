//! Chat widget rendering.
//!
//! The widget is a fixed HTML fragment: three label slots, a full-width
//! layout class, and the endpoint it posts to. [`ChatWidget::render_page`]
//! wraps it in a minimal page shell with a small client script that sends
//! the user's message and appends the streamed reply text.

use std::sync::LazyLock;

use minijinja::{Environment, context};
use thiserror::Error;

use crate::endpoint::EndpointConfig;
use crate::labels::ChatLabels;

/// Layout class requesting full-width presentation.
pub const FULL_WIDTH_CLASS: &str = "w-full";

const WIDGET_TEMPLATE: &str = "chat_widget.html";
const PAGE_TEMPLATE: &str = "page.html";

/// Widget rendering failure.
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// A chat panel with fixed labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatWidget {
    labels: ChatLabels,
    class_name: &'static str,
    endpoint: EndpointConfig,
}

impl ChatWidget {
    pub fn new(labels: ChatLabels, endpoint: EndpointConfig) -> Self {
        Self {
            labels,
            class_name: FULL_WIDTH_CLASS,
            endpoint,
        }
    }

    /// The research assistant's chat panel.
    pub fn simple_chat() -> Self {
        Self::new(ChatLabels::researcher(), EndpointConfig::langgraph4j())
    }

    pub fn labels(&self) -> &ChatLabels {
        &self.labels
    }

    pub fn class_name(&self) -> &str {
        self.class_name
    }

    /// Endpoint the widget posts messages to.
    pub fn endpoint(&self) -> &EndpointConfig {
        &self.endpoint
    }

    /// Render the widget fragment.
    pub fn render(&self) -> Result<String, WidgetError> {
        self.render_template(WIDGET_TEMPLATE)
    }

    /// Render a complete HTML page hosting the widget.
    pub fn render_page(&self) -> Result<String, WidgetError> {
        self.render_template(PAGE_TEMPLATE)
    }

    fn render_template(&self, name: &str) -> Result<String, WidgetError> {
        let env = templates()?;
        let rendered = env.get_template(name)?.render(context! {
            labels => &self.labels,
            class_name => self.class_name,
            endpoint => self.endpoint.path(),
        })?;
        Ok(rendered)
    }
}

/// Parsed once per process. `.html` names get HTML auto-escaping.
static TEMPLATES: LazyLock<Result<Environment<'static>, minijinja::Error>> = LazyLock::new(|| {
    let mut env = Environment::new();
    env.add_template(WIDGET_TEMPLATE, include_str!("../templates/chat_widget.html"))?;
    env.add_template(PAGE_TEMPLATE, include_str!("../templates/page.html"))?;
    Ok(env)
});

fn templates() -> Result<&'static Environment<'static>, WidgetError> {
    TEMPLATES
        .as_ref()
        .map_err(|e| WidgetError::Template(minijinja::Error::new(e.kind(), e.to_string())))
}
