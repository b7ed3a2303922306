//! Records returned by the Mailinator public inbox endpoints.
//!
//! Field names on the wire follow the service (`public_msgs`, `fromfull`,
//! `seconds_ago`, ...) and are mapped to snake_case fields here. Only the
//! identifying keys are required; every other key may be absent or `null`.

use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit JSON `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Snapshot of a public inbox as returned by the status endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboxStatus {
    /// Messages currently visible in the inbox, newest first as served.
    #[serde(rename = "public_msgs")]
    pub public_messages: Vec<MessageSummary>,
    /// Mailbox name in the service's encoded form.
    #[serde(rename = "enc_public_to", default, deserialize_with = "null_as_default")]
    pub encoded_public_recipient: String,
    /// Mailbox name the listing belongs to.
    #[serde(rename = "public_to", default, deserialize_with = "null_as_default")]
    pub public_recipient: String,
}

impl InboxStatus {
    /// Number of messages in the listing.
    pub fn len(&self) -> usize {
        self.public_messages.len()
    }

    /// Whether the listing is empty.
    pub fn is_empty(&self) -> bool {
        self.public_messages.is_empty()
    }

    /// Iterate over the message summaries.
    pub fn iter(&self) -> std::slice::Iter<'_, MessageSummary> {
        self.public_messages.iter()
    }
}

impl IntoIterator for InboxStatus {
    type Item = MessageSummary;
    type IntoIter = std::vec::IntoIter<MessageSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.public_messages.into_iter()
    }
}

impl<'a> IntoIterator for &'a InboxStatus {
    type Item = &'a MessageSummary;
    type IntoIter = std::slice::Iter<'a, MessageSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.public_messages.iter()
    }
}

/// One entry of the inbox listing.
///
/// The `id` is the only key linking a summary to its [`MessageDetail`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSummary {
    /// Message identifier, accepted by the message endpoint.
    pub id: String,
    /// Sender including display name.
    #[serde(rename = "fromfull", default, deserialize_with = "null_as_default")]
    pub from_full: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subject: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub from: String,
    /// Sender before any rewriting by the service.
    #[serde(rename = "origfrom", default, deserialize_with = "null_as_default")]
    pub original_from: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub to: String,
    /// Receive timestamp as reported by the service.
    #[serde(rename = "time", default, deserialize_with = "null_as_default")]
    pub epoch_seconds: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub seconds_ago: i64,
}

/// Header values the service extracts from a message or one of its parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageHeaders {
    pub date: Option<String>,
    #[serde(rename = "xpriority")]
    pub x_priority: Option<String>,
    pub subject: Option<String>,
    pub importance: Option<String>,
    #[serde(rename = "messageid")]
    pub message_id: Option<String>,
    pub received: Option<String>,
    pub from: Option<String>,
    #[serde(rename = "contenttype")]
    pub content_type: Option<String>,
    pub to: Option<String>,
    #[serde(rename = "errorsto")]
    pub errors_to: Option<String>,
    #[serde(rename = "replyto")]
    pub reply_to: Option<String>,
}

/// A single MIME part of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: MessageHeaders,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
}

/// Full message as returned by the message endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDetail {
    pub data: MessageData,
}

/// Body of a [`MessageDetail`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageData {
    #[serde(rename = "fromfull", default, deserialize_with = "null_as_default")]
    pub from_full: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: MessageHeaders,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subject: String,
    #[serde(rename = "requestId", default, deserialize_with = "null_as_default")]
    pub request_id: String,
    /// MIME parts in the order the service lists them.
    #[serde(default, deserialize_with = "null_as_default")]
    pub parts: Vec<Part>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub from: String,
    #[serde(rename = "origfrom", default, deserialize_with = "null_as_default")]
    pub original_from: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub to: String,
    pub id: String,
    #[serde(rename = "time", default, deserialize_with = "null_as_default")]
    pub epoch_seconds: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub seconds_ago: i64,
}

impl MessageDetail {
    /// Project this message onto a [`SimplifiedMail`] under the given id.
    ///
    /// Only the first part's body is kept; later alternatives (usually HTML)
    /// are dropped. Fails with [`Error::EmptyParts`] when there are no parts.
    pub fn simplify(self, id: impl Into<String>) -> Result<SimplifiedMail> {
        let id = id.into();
        let MessageData {
            from_full,
            to,
            subject,
            parts,
            ..
        } = self.data;

        let body = parts
            .into_iter()
            .next()
            .map(|part| part.body)
            .ok_or_else(|| Error::EmptyParts { id: id.clone() })?;

        Ok(SimplifiedMail {
            id,
            from: from_full,
            to,
            subject,
            body,
        })
    }
}

/// Reduced from/to/subject/body view of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifiedMail {
    pub id: String,
    /// Sender including display name.
    pub from: String,
    pub to: String,
    pub subject: String,
    /// Body of the first MIME part.
    pub body: String,
}

/// Anything that identifies a message: a raw id or a listing entry.
pub trait MessageId {
    /// The id passed to the message endpoint.
    fn message_id(&self) -> &str;
}

impl MessageId for str {
    fn message_id(&self) -> &str {
        self
    }
}

impl MessageId for String {
    fn message_id(&self) -> &str {
        self
    }
}

impl MessageId for MessageSummary {
    fn message_id(&self) -> &str {
        &self.id
    }
}

impl<T: MessageId + ?Sized> MessageId for &T {
    fn message_id(&self) -> &str {
        (**self).message_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATUS: &str = r#"{"public_msgs":[{"id":"abc123","fromfull":"a@b.com","subject":"Hi","from":"a@b.com","to":"testuser@mailinator.com","time":1000,"seconds_ago":5}],"public_to":"testuser"}"#;

    fn detail_with_parts(parts: &str) -> String {
        format!(
            r#"{{"data":{{"fromfull":"Alice <a@b.com>","headers":{{"subject":"Hi","messageid":"<m1@b.com>","contenttype":"multipart/alternative"}},"subject":"Hi","requestId":"r-1","parts":{parts},"from":"Alice","origfrom":"a@b.com","to":"testuser","id":"abc123","time":1000,"seconds_ago":5}}}}"#
        )
    }

    #[test]
    fn status_maps_wire_names() {
        let status: InboxStatus = serde_json::from_str(STATUS).unwrap();
        assert_eq!(status.len(), 1);
        assert_eq!(status.public_recipient, "testuser");
        assert_eq!(status.encoded_public_recipient, "");

        let msg = &status.public_messages[0];
        assert_eq!(msg.id, "abc123");
        assert_eq!(msg.from_full, "a@b.com");
        assert_eq!(msg.to, "testuser@mailinator.com");
        assert_eq!(msg.epoch_seconds, 1000);
        assert_eq!(msg.seconds_ago, 5);
        assert_eq!(msg.original_from, "");
    }

    #[test]
    fn null_fields_become_defaults() {
        let status: InboxStatus = serde_json::from_str(
            r#"{"public_msgs":[{"id":"x","subject":null,"time":null}],"enc_public_to":null}"#,
        )
        .unwrap();
        let msg = &status.public_messages[0];
        assert_eq!(msg.subject, "");
        assert_eq!(msg.epoch_seconds, 0);
    }

    #[test]
    fn status_without_listing_is_rejected() {
        assert!(serde_json::from_str::<InboxStatus>(r#"{"public_to":"x"}"#).is_err());
        assert!(serde_json::from_str::<InboxStatus>("").is_err());
        assert!(serde_json::from_str::<InboxStatus>(r#"{"public_msgs":[{"id":"a""#).is_err());
    }

    #[test]
    fn detail_keeps_every_part_verbatim() {
        let json = detail_with_parts(
            r#"[{"headers":{"contenttype":"text/plain"},"body":"hello"},{"headers":{"contenttype":"text/html"},"body":"<html>hello</html>"},{"body":"third"}]"#,
        );
        let detail: MessageDetail = serde_json::from_str(&json).unwrap();
        let data = &detail.data;

        assert_eq!(data.id, "abc123");
        assert_eq!(data.request_id, "r-1");
        assert_eq!(data.headers.message_id.as_deref(), Some("<m1@b.com>"));
        assert_eq!(data.headers.date, None);
        assert_eq!(data.parts.len(), 3);
        assert_eq!(data.parts[0].body, "hello");
        assert_eq!(data.parts[0].headers.content_type.as_deref(), Some("text/plain"));
        assert_eq!(data.parts[1].body, "<html>hello</html>");
        assert_eq!(data.parts[2].headers, MessageHeaders::default());
    }

    #[test]
    fn simplify_takes_first_part_only() {
        let json = detail_with_parts(r#"[{"body":"hello"},{"body":"<html>hello</html>"}]"#);
        let detail: MessageDetail = serde_json::from_str(&json).unwrap();

        let mail = detail.simplify("abc123").unwrap();
        assert_eq!(
            mail,
            SimplifiedMail {
                id: "abc123".into(),
                from: "Alice <a@b.com>".into(),
                to: "testuser".into(),
                subject: "Hi".into(),
                body: "hello".into(),
            }
        );
    }

    #[test]
    fn simplify_without_parts_fails() {
        let detail: MessageDetail = serde_json::from_str(&detail_with_parts("[]")).unwrap();
        match detail.simplify("abc123") {
            Err(Error::EmptyParts { id }) => assert_eq!(id, "abc123"),
            other => panic!("expected EmptyParts, got {other:?}"),
        }
    }

    #[test]
    fn message_id_from_summary_and_strings() {
        let status: InboxStatus = serde_json::from_str(STATUS).unwrap();
        let summary = &status.public_messages[0];
        let owned = String::from("abc123");

        assert_eq!(summary.message_id(), "abc123");
        assert_eq!("abc123".message_id(), "abc123");
        assert_eq!(owned.message_id(), "abc123");
        assert_eq!((&summary).message_id(), "abc123");
    }
}
