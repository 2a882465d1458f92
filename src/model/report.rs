use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use super::mail::MailRecord;

/// Label shown for links whose anchor text is empty
pub const NO_TEXT_LABEL: &str = "(no text)";
/// Links listed under one message in the details view
pub const MAX_DETAIL_LINKS: usize = 20;

/// A flattened entry of the quick-links list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuickLink {
    pub label: String,
    pub href: String,
    pub subject: String,
    pub timestamp: Option<DateTime<FixedOffset>>,
    pub is_today: bool,
}

/// A record plus its "today" marker, in display order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordView {
    #[serde(flatten)]
    pub record: MailRecord,
    pub is_today: bool,
}

impl RecordView {
    /// `#id | date | subject`
    pub fn title(&self) -> String {
        format!(
            "#{} | {} | {}",
            self.record.id, self.record.raw_date, self.record.subject
        )
    }
}

/// Everything the dashboard or the `scan` command renders after a run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScanReport {
    pub records: Vec<RecordView>,
    pub quick_links: Vec<QuickLink>,
}

impl ScanReport {
    pub fn summary(&self) -> String {
        format!(
            "Collected {} link(s) from {} email(s).",
            self.quick_links.len(),
            self.records.len()
        )
    }
}
