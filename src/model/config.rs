use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use super::mail::{MailboxCredentials, SearchCriteria};

/// Configuration from mlf.toml
///
/// Upper-case aliases accept the key names of the older secrets file
/// (`ACCESS_KEY`, `ID`, `PW`, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Shared secret the dashboard password is checked against
    #[serde(default, alias = "ACCESS_KEY")]
    pub access_key: Option<String>,
    #[serde(default, alias = "ID")]
    pub user: Option<String>,
    #[serde(default, alias = "PW")]
    pub password: Option<String>,
    #[serde(default = "default_server", alias = "SERVER")]
    pub server: String,
    #[serde(default = "default_port", alias = "PORT")]
    pub port: u16,
    #[serde(default = "default_mailbox", alias = "MAILBOX")]
    pub mailbox: String,
    /// IMAP SEARCH expression
    #[serde(default = "default_criteria", alias = "CRITERIA")]
    pub criteria: String,
    /// How many of the most recent matches are fetched
    #[serde(default = "default_limit", alias = "LIMIT")]
    pub limit: usize,
    /// Drop messages whose plain-text body does not contain this
    #[serde(default, alias = "ONLY_INCLUDE_TEXT")]
    pub only_include_text: Option<String>,
    #[serde(default, alias = "LINK_TEXT_FILTER")]
    pub link_text_filter: Option<String>,
    #[serde(default, alias = "LINK_HREF_FILTER")]
    pub link_href_filter: Option<String>,
    #[serde(default = "default_true", alias = "ONLY_WITH_LINKS")]
    pub only_with_links: bool,
    /// Exact subjects to keep. Empty keeps every subject.
    #[serde(default, alias = "SUBJECTS")]
    pub subjects: Vec<String>,
    /// Connect/read/write timeout for the IMAP socket
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            access_key: None,
            user: None,
            password: None,
            server: default_server(),
            port: default_port(),
            mailbox: default_mailbox(),
            criteria: default_criteria(),
            limit: default_limit(),
            only_include_text: None,
            link_text_filter: None,
            link_href_filter: None,
            only_with_links: true,
            subjects: Vec::new(),
            timeout_secs: default_timeout_secs(),
            ui: UiConfig::default(),
        }
    }
}

fn default_server() -> String {
    "imap.naver.com".to_string()
}

fn default_port() -> u16 {
    993
}

fn default_mailbox() -> String {
    "INBOX".to_string()
}

fn default_criteria() -> String {
    "ALL".to_string()
}

fn default_limit() -> usize {
    20
}

fn default_true() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    30
}

/// Treat `Some("")` and whitespace-only values as unset
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    pub fn access_key(&self) -> Option<&str> {
        non_empty(&self.access_key)
    }

    /// Credentials for the session, or `None` if user or password is missing
    pub fn credentials(&self) -> Option<MailboxCredentials> {
        let username = non_empty(&self.user)?;
        let secret = non_empty(&self.password)?;
        Some(MailboxCredentials {
            host: self.server.clone(),
            port: self.port,
            username: username.to_string(),
            secret: secret.to_string(),
            folder: self.mailbox.clone(),
        })
    }

    pub fn search_criteria(&self) -> SearchCriteria {
        SearchCriteria {
            query: self.criteria.clone(),
            limit: self.limit,
        }
    }

    pub fn filters(&self) -> LinkFilters {
        LinkFilters {
            only_include_text: non_empty(&self.only_include_text).map(str::to_string),
            link_text_filter: non_empty(&self.link_text_filter).map(str::to_string),
            link_href_filter: non_empty(&self.link_href_filter).map(str::to_string),
            subjects: self.subjects.clone(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Per-message filters applied while assembling records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkFilters {
    pub only_include_text: Option<String>,
    pub link_text_filter: Option<String>,
    pub link_href_filter: Option<String>,
    pub subjects: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Theme color overrides, e.g. `highlight = "#FB4196"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}
