//! Barid disposable inbox
//!
//! An async client for the Barid temporary email API, plus the session, view models
//! and controller behind the `barid-inbox` terminal front end.
//!
//! # Example
//! ```no_run
//! use barid_inbox::{Client, SessionAddress};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), barid_inbox::Error> {
//!     let client = Client::new()?;
//!     let domains = client.list_domains().await?;
//!     let session = SessionAddress::generate(domains.first().map_or("barid.site", String::as_str));
//!     println!("Send mail to: {session}");
//!
//!     for msg in client.list_emails(&session.address(), 20).await? {
//!         println!("From: {}, Subject: {:?}", msg.from_address, msg.subject);
//!     }
//!     Ok(())
//! }
//! ```

mod catalog;
mod client;
mod clipboard;
mod config;
mod controller;
mod error;
mod fence;
mod inbox;
mod models;
pub mod render;
mod session;
mod viewer;

pub use catalog::{CatalogState, DomainCatalog};
pub use client::{Client, ClientBuilder, DEFAULT_BASE_URL, DEFAULT_PAGE_LIMIT};
pub use clipboard::{
    copy_address, Clipboard, CopyButton, SystemClipboard, COPIED_LABEL, COPY_LABEL,
};
pub use config::{default_config_path, Config, DEFAULT_DOMAIN};
pub use controller::{Command, InboxController, Snapshot};
pub use error::{ConfigError, Error};
pub use fence::{RequestFence, Ticket};
pub use inbox::{format_timestamp, InboxView, MessageRow, EMPTY_STATE, ERROR_STATE};
pub use models::{ApiResponse, Body, MessageDetail, MessageSummary};
pub use session::SessionAddress;
pub use viewer::{DetailView, MessageBody, MessageView, NO_SUBJECT};

/// Result type alias for Barid operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
