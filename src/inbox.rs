//! Inbox view model: what the message list shows after a sync.

use crate::models::MessageSummary;
use crate::Result;
use chrono::{Local, TimeZone};
use tracing::warn;

/// Text shown when the mailbox has no messages.
pub const EMPTY_STATE: &str = "No emails yet";
/// Text shown when the inbox could not be loaded.
pub const ERROR_STATE: &str = "Error loading emails";
/// Text shown while a sync is in flight.
pub const LOADING_STATE: &str = "Loading...";

/// One rendered inbox row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRow {
    /// Message id, used to open the message.
    pub id: String,
    pub from_address: String,
    /// Subject, empty when the message has none.
    pub subject: String,
    /// Receive time formatted in the local time zone.
    pub received: String,
}

impl From<&MessageSummary> for MessageRow {
    fn from(summary: &MessageSummary) -> Self {
        Self {
            id: summary.id.clone(),
            from_address: summary.from_address.clone(),
            subject: summary.subject.clone().unwrap_or_default(),
            received: format_timestamp(summary.received_at),
        }
    }
}

/// State of the message list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InboxView {
    /// Never synced.
    #[default]
    Idle,
    Loading,
    /// Synced, and the mailbox is empty.
    Empty,
    /// Rows in server order.
    Messages(Vec<MessageRow>),
    /// The sync failed; carries the underlying error text.
    Error(String),
}

impl InboxView {
    /// Map the outcome of a listing request onto a view.
    pub fn from_result(result: Result<Vec<MessageSummary>>) -> Self {
        match result {
            Ok(messages) if messages.is_empty() => Self::Empty,
            Ok(messages) => Self::Messages(messages.iter().map(MessageRow::from).collect()),
            Err(err) => {
                warn!(error = %err, "inbox sync failed");
                Self::Error(err.to_string())
            }
        }
    }

    /// Rows currently shown, empty for every non-list state.
    pub fn rows(&self) -> &[MessageRow] {
        match self {
            Self::Messages(rows) => rows,
            _ => &[],
        }
    }
}

/// Format epoch seconds as local date and time.
///
/// Out-of-range values are shown as the raw number.
pub fn format_timestamp(epoch_secs: i64) -> String {
    match Local.timestamp_opt(epoch_secs, 0).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => epoch_secs.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn summary(id: &str, subject: Option<&str>, received_at: i64) -> MessageSummary {
        MessageSummary {
            id: id.to_string(),
            from_address: "x@y.com".to_string(),
            subject: subject.map(str::to_string),
            received_at,
        }
    }

    #[test]
    fn empty_result_is_the_empty_state() {
        assert_eq!(InboxView::from_result(Ok(vec![])), InboxView::Empty);
    }

    #[test]
    fn rows_keep_server_order_and_format_time() {
        let view = InboxView::from_result(Ok(vec![
            summary("2", Some("Later"), 1700000100),
            summary("1", Some("Hi"), 1700000000),
        ]));

        let rows = view.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, "2");
        assert_eq!(rows[1].from_address, "x@y.com");
        assert_eq!(rows[1].subject, "Hi");
        assert_eq!(rows[1].received, format_timestamp(1700000000));
    }

    #[test]
    fn formatted_timestamp_matches_local_clock() {
        let expected = Local
            .timestamp_opt(1700000000, 0)
            .unwrap()
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        assert_eq!(format_timestamp(1700000000), expected);
        assert!(format_timestamp(1700000000).starts_with("2023-11-1"));
    }

    #[test]
    fn out_of_range_timestamp_is_shown_raw() {
        assert_eq!(format_timestamp(i64::MAX), i64::MAX.to_string());
    }

    #[test]
    fn failure_becomes_error_state() {
        let view = InboxView::from_result(Err(Error::Api {
            endpoint: "/emails".into(),
            message: "success flag was false".into(),
        }));
        assert!(matches!(view, InboxView::Error(ref msg) if msg.contains("/emails")));
        assert!(view.rows().is_empty());
    }

    #[test]
    fn missing_subject_renders_as_blank() {
        let row = MessageRow::from(&summary("9", None, 0));
        assert_eq!(row.subject, "");
    }
}
