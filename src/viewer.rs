//! Message detail panel.

use crate::models::{Body, MessageDetail};
use crate::Result;
use tracing::warn;

/// Shown in place of a missing or blank subject.
pub const NO_SUBJECT: &str = "(No subject)";

/// Body selected for display, owned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBody {
    Html(String),
    Text(String),
    Empty,
}

/// An opened message, ready to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub id: String,
    pub subject: String,
    pub from_address: String,
    pub body: MessageBody,
}

impl MessageView {
    pub fn new(id: impl Into<String>, detail: &MessageDetail) -> Self {
        let subject = detail
            .subject
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(NO_SUBJECT)
            .to_string();

        let body = match detail.body() {
            Body::Html(html) => MessageBody::Html(html.to_string()),
            Body::Text(text) => MessageBody::Text(text.to_string()),
            Body::Empty => MessageBody::Empty,
        };

        Self {
            id: id.into(),
            subject,
            from_address: detail.from_address.clone(),
            body,
        }
    }
}

/// State of the detail panel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetailView {
    #[default]
    Hidden,
    Loading { id: String },
    Open(MessageView),
    Error { id: String, reason: String },
}

impl DetailView {
    /// Map the outcome of a detail request onto the panel.
    pub fn from_result(id: &str, result: Result<MessageDetail>) -> Self {
        match result {
            Ok(detail) => Self::Open(MessageView::new(id, &detail)),
            Err(err) => {
                warn!(id, error = %err, "failed to open message");
                Self::Error {
                    id: id.to_string(),
                    reason: err.to_string(),
                }
            }
        }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(subject: Option<&str>, html: Option<&str>, text: Option<&str>) -> MessageDetail {
        MessageDetail {
            subject: subject.map(str::to_string),
            from_address: "x@y.com".to_string(),
            html_content: html.map(str::to_string),
            text_content: text.map(str::to_string),
        }
    }

    #[test]
    fn html_wins_when_both_bodies_exist() {
        let view = MessageView::new("1", &detail(Some("Hi"), Some("<p>rich</p>"), Some("plain")));
        assert_eq!(view.body, MessageBody::Html("<p>rich</p>".into()));
        assert_eq!(view.subject, "Hi");
        assert_eq!(view.from_address, "x@y.com");
    }

    #[test]
    fn text_is_used_without_html() {
        let view = MessageView::new("1", &detail(Some("Hi"), None, Some("plain")));
        assert_eq!(view.body, MessageBody::Text("plain".into()));
    }

    #[test]
    fn blank_subject_uses_placeholder() {
        assert_eq!(MessageView::new("1", &detail(None, None, None)).subject, NO_SUBJECT);
        assert_eq!(MessageView::new("1", &detail(Some("  "), None, None)).subject, NO_SUBJECT);
        assert_eq!(
            MessageView::new("1", &detail(None, None, None)).body,
            MessageBody::Empty
        );
    }

    #[test]
    fn failure_is_an_explicit_error_panel() {
        let view = DetailView::from_result(
            "5",
            Err(crate::Error::Api {
                endpoint: "/inbox".into(),
                message: "missing `result`".into(),
            }),
        );
        assert!(view.is_visible());
        assert!(matches!(view, DetailView::Error { ref id, .. } if id == "5"));
    }
}
