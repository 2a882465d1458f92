use serde::Serialize;

use crate::model::{AppConfig, MAX_DETAIL_LINKS, NO_TEXT_LABEL, ScanReport};

/// Printed in place of a configured secret
pub const MASKED: &str = "********";
const NOT_SET: &str = "(not set)";

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

/// Effective configuration with secrets masked
#[derive(Serialize)]
pub struct ConfigJson {
    pub access_key: Option<&'static str>,
    pub user: Option<String>,
    pub password: Option<&'static str>,
    pub server: String,
    pub port: u16,
    pub mailbox: String,
    pub criteria: String,
    pub limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_include_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_text_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_href_filter: Option<String>,
    pub only_with_links: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subjects: Vec<String>,
    pub timeout_secs: u64,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn config_to_json(config: &AppConfig) -> ConfigJson {
    ConfigJson {
        access_key: config.access_key().map(|_| MASKED),
        user: config.user.clone().filter(|u| !u.trim().is_empty()),
        password: config
            .password
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(|_| MASKED),
        server: config.server.clone(),
        port: config.port,
        mailbox: config.mailbox.clone(),
        criteria: config.criteria.clone(),
        limit: config.limit,
        only_include_text: config.only_include_text.clone(),
        link_text_filter: config.link_text_filter.clone(),
        link_href_filter: config.link_href_filter.clone(),
        only_with_links: config.only_with_links,
        subjects: config.subjects.clone(),
        timeout_secs: config.timeout_secs,
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

fn or_not_set(value: Option<&str>) -> String {
    value.map_or_else(|| NOT_SET.to_string(), |v| format!("{:?}", v))
}

/// Masked secrets print bare, without quotes
fn secret_or_not_set(masked: Option<&str>) -> String {
    masked.unwrap_or(NOT_SET).to_string()
}

/// Format the effective config as `key = value` lines, secrets masked
pub fn format_config(config: &AppConfig) -> Vec<String> {
    let json = config_to_json(config);
    let mut lines = vec![
        format!("access_key = {}", secret_or_not_set(json.access_key)),
        format!("user = {}", or_not_set(json.user.as_deref())),
        format!("password = {}", secret_or_not_set(json.password)),
        format!("server = {:?}", json.server),
        format!("port = {}", json.port),
        format!("mailbox = {:?}", json.mailbox),
        format!("criteria = {:?}", json.criteria),
        format!("limit = {}", json.limit),
        format!(
            "only_include_text = {}",
            or_not_set(json.only_include_text.as_deref())
        ),
        format!(
            "link_text_filter = {}",
            or_not_set(json.link_text_filter.as_deref())
        ),
        format!(
            "link_href_filter = {}",
            or_not_set(json.link_href_filter.as_deref())
        ),
        format!("only_with_links = {}", json.only_with_links),
    ];
    if !json.subjects.is_empty() {
        lines.push(format!("subjects = {:?}", json.subjects));
    }
    lines.push(format!("timeout_secs = {}", json.timeout_secs));
    lines
}

/// `* ` for today, two spaces otherwise
fn today_marker(is_today: bool) -> &'static str {
    if is_today { "* " } else { "  " }
}

/// Format a report: summary, quick links, then per-message details
pub fn format_report(report: &ScanReport) -> Vec<String> {
    let mut lines = vec![report.summary()];

    if report.quick_links.is_empty() {
        lines.push("No matching links.".to_string());
        return lines;
    }

    lines.push(String::new());
    lines.push("Quick Links".to_string());
    for quick in &report.quick_links {
        lines.push(format!(
            "{}{} <{}> - {}",
            today_marker(quick.is_today),
            quick.label,
            quick.href,
            quick.subject
        ));
    }

    lines.push(String::new());
    lines.push("Details".to_string());
    for view in &report.records {
        let header = if view.is_today {
            format!("* TODAY | {}", view.title())
        } else {
            format!("  {}", view.title())
        };
        lines.push(header);
        lines.push(format!("    From: {}", view.record.sender));
        lines.push(format!("    Snippet: {}", view.record.snippet));
        if view.record.links.is_empty() {
            lines.push("    No matching links.".to_string());
        }
        for link in view.record.links.iter().take(MAX_DETAIL_LINKS) {
            let label = if link.text.is_empty() {
                NO_TEXT_LABEL
            } else {
                link.text.as_str()
            };
            lines.push(format!("    - {} <{}>", label, link.href));
        }
    }
    lines
}
