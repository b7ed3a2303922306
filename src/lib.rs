//! # Mailinator Client
//! Asynchronous wrapper around the Mailinator public inbox web endpoints, providing methods to list a public inbox, fetch full messages, and reduce them to a simple from/to/subject/body view using [`Client`] and [`ClientBuilder`].
//!
//! ## Audience and uses
//! For Rust developers who need to read mail sent to a throwaway public address in integration tests, demos, or automation scripts: pick a mailbox name, poll [`Client::inbox_status`] for [`MessageSummary`] entries, then fetch each one with [`Client::message_detail`] or [`Client::simplified_mail`].
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. Each client spaces its requests at least one second apart and keeps its own cookie jar; independent clients do not coordinate.
//!
//! ## Out of scope
//! No authentication, private inboxes, retries, pagination, or push notification. Public inboxes are readable by anyone who knows the name.
//!
//! ## Errors
//! Transport failures and non-2xx statuses surface as [`Error::Request`]; bodies that do not match the expected JSON become [`Error::Json`]. [`Client::simplified_mail`] returns [`Error::EmptyParts`] for messages without MIME parts. The crate-wide [`Result`] alias wraps these errors.
//!
//! ## Example
//! ```no_run
//! use mailinator_client::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mailinator_client::Error> {
//!     let client = Client::new("myalias@mailinator.com")?;
//!
//!     let inbox = client.inbox_status().await?;
//!     for msg in &inbox {
//!         let mail = client.simplified_mail(msg).await?;
//!         println!("From: {}, Subject: {}", mail.from, mail.subject);
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod models;
mod rate_limit;
mod request;
mod session;

pub use client::{Client, ClientBuilder};
pub use error::Error;
pub use models::{
    InboxStatus, MessageData, MessageDetail, MessageHeaders, MessageId, MessageSummary, Part,
    SimplifiedMail,
};

/// Result type alias for Mailinator operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
