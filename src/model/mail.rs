use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// Connection details for one mailbox session. Built fresh per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailboxCredentials {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub secret: String,
    /// Folder selected right after login
    pub folder: String,
}

/// IMAP search expression plus the size of the window to process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    pub query: String,
    /// Always at least 1 (checked when the config is loaded)
    pub limit: usize,
}

/// A fetched message after header and body decoding
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedMessage {
    /// Server-assigned identifier the message was fetched with
    pub id: String,
    pub subject: String,
    pub sender: String,
    /// The `Date` header as sent, empty when missing
    pub raw_date: String,
    /// `None` when the date is missing or unparsable; sorts as the earliest time
    pub timestamp: Option<DateTime<FixedOffset>>,
    pub text_body: String,
    pub html_body: String,
}

/// An anchor pulled out of an HTML body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedLink {
    /// Visible text, trimmed (may be empty)
    pub text: String,
    pub href: String,
}

impl ExtractedLink {
    pub fn new(text: impl Into<String>, href: impl Into<String>) -> Self {
        ExtractedLink {
            text: text.into(),
            href: href.into(),
        }
    }
}

/// One processed message, ready for sorting and display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MailRecord {
    pub id: String,
    pub raw_date: String,
    pub timestamp: Option<DateTime<FixedOffset>>,
    pub sender: String,
    pub subject: String,
    pub snippet: String,
    pub links: Vec<ExtractedLink>,
}
