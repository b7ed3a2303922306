//! Per-client session state: the mailbox being read and its cookies.

use reqwest::cookie::Jar;
use std::sync::Arc;

/// Mailbox name plus the cookie jar shared by every request of one client.
#[derive(Debug)]
pub(crate) struct Session {
    mailbox: String,
    cookies: Arc<Jar>,
}

impl Session {
    /// Start a session for `mailbox`, which may be a bare name or a full address.
    pub(crate) fn new(mailbox: &str) -> Self {
        Self {
            mailbox: local_part(mailbox).to_string(),
            cookies: Arc::new(Jar::default()),
        }
    }

    pub(crate) fn mailbox(&self) -> &str {
        &self.mailbox
    }

    pub(crate) fn cookies(&self) -> Arc<Jar> {
        self.cookies.clone()
    }
}

/// Everything before the first `@`, or the whole input when there is none.
fn local_part(mailbox: &str) -> &str {
    mailbox.split('@').next().unwrap_or(mailbox)
}
