//! Plain-text rendering of the view models, for terminal front ends.

use crate::catalog::CatalogState;
use crate::inbox::{InboxView, EMPTY_STATE, ERROR_STATE, LOADING_STATE};
use crate::viewer::{DetailView, MessageBody, MessageView};
use std::fmt::Write;

/// Width used when wrapping HTML bodies.
pub const DEFAULT_WIDTH: usize = 80;

/// The domain picker: one line per option, the selected one marked with `*`.
pub fn render_catalog(state: &CatalogState) -> String {
    let mut out = String::new();
    match state {
        CatalogState::NotLoaded => out.push_str("(domains not loaded)\n"),
        CatalogState::Loaded(_) => {}
        CatalogState::Unavailable { reason, .. } => {
            let _ = writeln!(out, "Domain list unavailable: {reason}");
        }
    }
    if let Some(catalog) = state.catalog() {
        for domain in catalog.options() {
            let marker = if catalog.selected() == Some(domain.as_str()) {
                '*'
            } else {
                ' '
            };
            let _ = writeln!(out, "{marker} {domain}");
        }
    }
    out
}

/// The message list.
pub fn render_inbox(view: &InboxView) -> String {
    match view {
        InboxView::Idle => String::new(),
        InboxView::Loading => format!("{LOADING_STATE}\n"),
        InboxView::Empty => format!("{EMPTY_STATE}\n"),
        InboxView::Error(_) => format!("{ERROR_STATE}\n"),
        InboxView::Messages(rows) => {
            let mut out = String::new();
            for row in rows {
                let _ = writeln!(out, "[{}] {}", row.id, row.from_address);
                let _ = writeln!(out, "    {}", row.subject);
                let _ = writeln!(out, "    {}", row.received);
            }
            out
        }
    }
}

/// The detail panel. HTML is converted to wrapped text unless `raw` is set.
pub fn render_detail(view: &DetailView, width: usize, raw: bool) -> String {
    match view {
        DetailView::Hidden => String::new(),
        DetailView::Loading { id } => format!("Loading message {id}...\n"),
        DetailView::Error { id, reason } => format!("Could not open message {id}: {reason}\n"),
        DetailView::Open(message) => render_message(message, width, raw),
    }
}

fn render_message(message: &MessageView, width: usize, raw: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", message.subject);
    let _ = writeln!(out, "From: {}", message.from_address);
    let _ = writeln!(out, "{}", "-".repeat(width.min(DEFAULT_WIDTH)));
    match &message.body {
        MessageBody::Html(html) if raw => out.push_str(html),
        MessageBody::Html(html) => out.push_str(&html_to_text(html, width)),
        MessageBody::Text(text) => out.push_str(text),
        MessageBody::Empty => {}
    }
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

fn html_to_text(html: &str, width: usize) -> String {
    html2text::from_read(html.as_bytes(), width.max(20))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DomainCatalog;
    use crate::inbox::MessageRow;

    fn open(body: MessageBody) -> DetailView {
        DetailView::Open(MessageView {
            id: "1".into(),
            subject: "Hi".into(),
            from_address: "x@y.com".into(),
            body,
        })
    }

    #[test]
    fn empty_inbox_renders_indicator_not_blank() {
        assert_eq!(render_inbox(&InboxView::Empty), "No emails yet\n");
    }

    #[test]
    fn error_inbox_renders_generic_message() {
        assert_eq!(
            render_inbox(&InboxView::Error("boom".into())),
            "Error loading emails\n"
        );
    }

    #[test]
    fn rows_show_sender_subject_and_time() {
        let out = render_inbox(&InboxView::Messages(vec![MessageRow {
            id: "1".into(),
            from_address: "x@y.com".into(),
            subject: "Hi".into(),
            received: "2023-11-14 22:13:20".into(),
        }]));
        assert!(out.contains("x@y.com"));
        assert!(out.contains("Hi"));
        assert!(out.contains("2023-11-14 22:13:20"));
    }

    #[test]
    fn catalog_marks_selected_domain() {
        let state = CatalogState::Loaded(DomainCatalog::new(
            vec!["a.com".into(), "b.com".into()],
            "a.com",
        ));
        assert_eq!(render_catalog(&state), "* a.com\n  b.com\n");
    }

    #[test]
    fn html_body_is_converted_to_text() {
        let out = render_detail(&open(MessageBody::Html("<p>Hello <b>there</b></p>".into())), 80, false);
        assert!(out.starts_with("Hi\nFrom: x@y.com\n"));
        assert!(out.contains("Hello"));
        assert!(!out.contains("<p>"));
    }

    #[test]
    fn raw_flag_keeps_markup() {
        let out = render_detail(&open(MessageBody::Html("<p>Hello</p>".into())), 80, true);
        assert!(out.contains("<p>Hello</p>"));
    }

    #[test]
    fn hidden_panel_renders_nothing() {
        assert!(render_detail(&DetailView::Hidden, 80, false).is_empty());
    }
}
