//! In-memory mailbox used by tests across the crate.

use std::cell::RefCell;
use std::rc::Rc;

use super::mailbox::{MailSession, MailTransport, MailboxError};
use crate::model::MailboxCredentials;

/// Messages are addressed as "1", "2", ... in the order given.
#[derive(Debug, Clone, Default)]
pub struct FakeTransport {
    pub messages: Vec<Vec<u8>>,
    /// Selectable folders; empty means every folder exists
    pub folders: Vec<String>,
    pub reject_login: bool,
    pub reject_search: bool,
    pub reject_fetch: Vec<String>,
    pub log: Rc<RefCell<Vec<String>>>,
}

impl FakeTransport {
    pub fn with_messages(messages: Vec<Vec<u8>>) -> Self {
        FakeTransport {
            messages,
            ..Default::default()
        }
    }

    pub fn credentials(&self) -> MailboxCredentials {
        MailboxCredentials {
            host: "imap.test".into(),
            port: 993,
            username: "me@test".into(),
            secret: "pw".into(),
            folder: "INBOX".into(),
        }
    }

    /// Every session call made so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

impl MailTransport for FakeTransport {
    type Session = FakeSession;

    fn connect(&self, _credentials: &MailboxCredentials) -> Result<FakeSession, MailboxError> {
        self.log.borrow_mut().push("connect".into());
        if self.reject_login {
            return Err(MailboxError::Authentication("invalid credentials".into()));
        }
        Ok(FakeSession {
            transport: self.clone(),
        })
    }
}

pub struct FakeSession {
    transport: FakeTransport,
}

impl FakeSession {
    fn record(&self, call: String) {
        self.transport.log.borrow_mut().push(call);
    }
}

impl MailSession for FakeSession {
    fn select(&mut self, folder: &str) -> Result<(), MailboxError> {
        self.record(format!("select {}", folder));
        let folders = &self.transport.folders;
        if folders.is_empty() || folders.iter().any(|f| f == folder) {
            Ok(())
        } else {
            Err(MailboxError::Rejected("no such mailbox".into()))
        }
    }

    fn search(&mut self, query: &str) -> Result<Vec<String>, MailboxError> {
        self.record(format!("search {}", query));
        if self.transport.reject_search {
            return Err(MailboxError::Rejected("bad search".into()));
        }
        Ok((1..=self.transport.messages.len())
            .map(|i| i.to_string())
            .collect())
    }

    fn fetch(&mut self, id: &str) -> Result<Option<Vec<u8>>, MailboxError> {
        self.record(format!("fetch {}", id));
        if self.transport.reject_fetch.iter().any(|r| r == id) {
            return Err(MailboxError::Rejected("fetch refused".into()));
        }
        let index = id.parse::<usize>().ok().and_then(|n| n.checked_sub(1));
        Ok(index.and_then(|i| self.transport.messages.get(i).cloned()))
    }

    fn logout(&mut self) -> Result<(), MailboxError> {
        self.record("logout".into());
        Ok(())
    }
}

/// A multipart/alternative message with the given parts. Empty bodies are
/// left out.
pub fn raw_message(subject: &str, date: Option<&str>, text: &str, html: &str) -> Vec<u8> {
    let mut out = String::new();
    out.push_str("From: Account Team <info@account.example.com>\r\n");
    out.push_str(&format!("Subject: {}\r\n", subject));
    if let Some(date) = date {
        out.push_str(&format!("Date: {}\r\n", date));
    }
    out.push_str("MIME-Version: 1.0\r\n");
    out.push_str("Content-Type: multipart/alternative; boundary=\"b1\"\r\n\r\n");
    if !text.is_empty() {
        out.push_str("--b1\r\nContent-Type: text/plain; charset=utf-8\r\n\r\n");
        out.push_str(text);
        out.push_str("\r\n");
    }
    if !html.is_empty() {
        out.push_str("--b1\r\nContent-Type: text/html; charset=utf-8\r\n\r\n");
        out.push_str(html);
        out.push_str("\r\n");
    }
    out.push_str("--b1--\r\n");
    out.into_bytes()
}
