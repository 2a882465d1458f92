use crate::model::{DecodedMessage, ExtractedLink, LinkFilters, MailRecord};
use crate::parse::extract_links;

/// Characters of body text kept in a snippet
pub const SNIPPET_CHARS: usize = 200;
/// Appended to a snippet that was cut
pub const ELLIPSIS: char = '\u{2026}';

/// Trim and fold CR/LF into spaces so the body reads as one line.
pub fn normalize_body(text: &str) -> String {
    text.trim().replace(['\r', '\n'], " ")
}

/// First [`SNIPPET_CHARS`] characters, plus an ellipsis if anything was cut.
pub fn snippet(normalized: &str) -> String {
    match normalized.char_indices().nth(SNIPPET_CHARS) {
        Some((cut, _)) => {
            let mut out = normalized[..cut].to_string();
            out.push(ELLIPSIS);
            out
        }
        None => normalized.to_string(),
    }
}

/// Run the link-text pass and the href pass and keep the first non-empty
/// result, text pass first. With neither filter set every anchor is kept.
pub fn select_links(html: &str, filters: &LinkFilters) -> Vec<ExtractedLink> {
    let text_filter = filters.link_text_filter.as_deref();
    let href_filter = filters.link_href_filter.as_deref();

    if text_filter.is_none() && href_filter.is_none() {
        return extract_links(html, None, None);
    }

    let by_text = match text_filter {
        Some(needle) => extract_links(html, Some(needle), None),
        None => Vec::new(),
    };
    if !by_text.is_empty() {
        return by_text;
    }
    match href_filter {
        Some(needle) => extract_links(html, None, Some(needle)),
        None => Vec::new(),
    }
}

/// Build the record for one decoded message, or `None` when a filter drops it.
pub fn assemble_record(message: DecodedMessage, filters: &LinkFilters) -> Option<MailRecord> {
    if !filters.subjects.is_empty() && !filters.subjects.iter().any(|s| *s == message.subject) {
        log::debug!("message {}: subject {:?} not listed", message.id, message.subject);
        return None;
    }

    let text = normalize_body(&message.text_body);
    if let Some(needle) = filters.only_include_text.as_deref()
        && !text.contains(needle)
    {
        log::debug!("message {}: body lacks {:?}", message.id, needle);
        return None;
    }

    let links = select_links(&message.html_body, filters);
    Some(MailRecord {
        id: message.id,
        raw_date: message.raw_date,
        timestamp: message.timestamp,
        sender: message.sender,
        subject: message.subject,
        snippet: snippet(&text),
        links,
    })
}
