//! Wire models for the Barid API.

use serde::{Deserialize, Deserializer};

/// Response envelope shared by every Barid endpoint.
///
/// `result` is optional because failed responses frequently omit it.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the service considers the request successful.
    #[serde(default)]
    pub success: bool,
    /// Payload; only meaningful when `success` is true.
    pub result: Option<T>,
}

/// One inbox entry as returned by `GET /emails/{address}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageSummary {
    /// Message identifier, used to fetch the full message.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Sender email address.
    pub from_address: String,
    /// Subject line, if the message has one.
    #[serde(default)]
    pub subject: Option<String>,
    /// Unix timestamp (seconds) of when the message was received.
    pub received_at: i64,
}

/// Full message as returned by `GET /inbox/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageDetail {
    #[serde(default)]
    pub subject: Option<String>,
    pub from_address: String,
    /// HTML body, preferred for display when present.
    #[serde(default)]
    pub html_content: Option<String>,
    /// Plain-text body.
    #[serde(default)]
    pub text_content: Option<String>,
}

/// The body chosen for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Body<'a> {
    Html(&'a str),
    Text(&'a str),
    Empty,
}

impl MessageDetail {
    /// Pick the body to display: HTML wins over plain text, empty strings count as absent.
    pub fn body(&self) -> Body<'_> {
        fn non_empty(s: &Option<String>) -> Option<&str> {
            s.as_deref().filter(|s| !s.trim().is_empty())
        }
        match (non_empty(&self.html_content), non_empty(&self.text_content)) {
            (Some(html), _) => Body::Html(html),
            (None, Some(text)) => Body::Text(text),
            (None, None) => Body::Empty,
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Num(n) => n.to_string(),
    })
}
