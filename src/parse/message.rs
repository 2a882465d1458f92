use chrono::{DateTime, FixedOffset, NaiveDateTime};
use mailparse::{DispositionType, MailHeaderMap, ParsedMail};

use crate::model::DecodedMessage;

/// The slice of a MIME part the body walk needs
pub trait MessagePart: Sized {
    /// Lower-case `type/subtype`
    fn mime_type(&self) -> &str;
    fn is_attachment(&self) -> bool;
    /// Declared charset, if any
    fn charset(&self) -> Option<&str>;
    /// Payload with the transfer encoding already removed
    fn payload(&self) -> Vec<u8>;
    fn subparts(&self) -> &[Self];
}

impl MessagePart for ParsedMail<'_> {
    fn mime_type(&self) -> &str {
        &self.ctype.mimetype
    }

    fn is_attachment(&self) -> bool {
        self.get_content_disposition().disposition == DispositionType::Attachment
    }

    fn charset(&self) -> Option<&str> {
        Some(self.ctype.charset.as_str()).filter(|c| !c.is_empty())
    }

    fn payload(&self) -> Vec<u8> {
        match self.get_body_raw() {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("could not remove transfer encoding: {}", e);
                Vec::new()
            }
        }
    }

    fn subparts(&self) -> &[Self] {
        &self.subparts
    }
}

/// First non-attachment part of the given mime type, walking the tree
/// depth-first starting at (and including) `part`.
pub fn find_part<'a, P: MessagePart>(part: &'a P, mime: &str) -> Option<&'a P> {
    if !part.is_attachment() && part.mime_type().eq_ignore_ascii_case(mime) {
        return Some(part);
    }
    part.subparts()
        .iter()
        .find_map(|child| find_part(child, mime))
}

/// Decoded body of the first matching part, or an empty string
pub fn body_of<P: MessagePart>(root: &P, mime: &str) -> String {
    find_part(root, mime)
        .map(|part| decode_payload(&part.payload(), part.charset()))
        .unwrap_or_default()
}

fn is_utf8_compatible(label: &str) -> bool {
    matches!(
        label.to_ascii_lowercase().as_str(),
        "us-ascii" | "ascii" | "utf-8" | "utf8"
    )
}

/// Decode a payload with its declared charset. Unknown labels and malformed
/// input fall back to UTF-8 with U+FFFD replacement, so this never fails.
pub fn decode_payload(bytes: &[u8], charset: Option<&str>) -> String {
    let label = charset
        .map(str::trim)
        .filter(|l| !l.is_empty() && !is_utf8_compatible(l));

    if let Some(label) = label {
        match charset::Charset::for_label(label.as_bytes()) {
            Some(cs) => {
                let (text, malformed) = cs.decode_without_bom_handling(bytes);
                if !malformed {
                    return text.into_owned();
                }
                log::debug!("malformed {} payload, decoding as UTF-8", label);
            }
            None => log::debug!("unknown charset {:?}, decoding as UTF-8", label),
        }
    }

    String::from_utf8_lossy(bytes).into_owned()
}

/// `Date` layouts without a zone offset, read as UTC
const NAIVE_DATE_FORMATS: &[&str] = &["%a, %d %b %Y %H:%M:%S", "%d %b %Y %H:%M:%S"];

/// Parse a `Date` header. A header without a zone offset is read as UTC;
/// anything else that does not parse gives `None`.
pub fn parse_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(dt);
    }
    NAIVE_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|naive| naive.and_utc().fixed_offset())
}

fn header_text(headers: &[mailparse::MailHeader<'_>], name: &str) -> String {
    let Some(header) = headers.get_first_header(name) else {
        return String::new();
    };
    let decoded = header.get_value();
    if decoded.is_empty() {
        // keep the raw bytes rather than lose the field
        String::from_utf8_lossy(header.get_value_raw()).trim().to_string()
    } else {
        decoded
    }
}

/// Decode one raw RFC 822 message. Never fails: a message that cannot be
/// parsed comes back with its raw bytes as the text body.
pub fn decode_message(id: &str, raw: &[u8]) -> DecodedMessage {
    let parsed = match mailparse::parse_mail(raw) {
        Ok(parsed) => parsed,
        Err(e) => {
            log::warn!("message {}: MIME parse failed ({}), keeping raw text", id, e);
            return DecodedMessage {
                id: id.to_string(),
                subject: String::new(),
                sender: String::new(),
                raw_date: String::new(),
                timestamp: None,
                text_body: String::from_utf8_lossy(raw).into_owned(),
                html_body: String::new(),
            };
        }
    };

    let headers = parsed.headers.as_slice();
    let raw_date = header_text(headers, "Date");
    let timestamp = parse_date(&raw_date);
    if timestamp.is_none() && !raw_date.is_empty() {
        log::debug!("message {}: unparsable date {:?}", id, raw_date);
    }

    DecodedMessage {
        id: id.to_string(),
        subject: header_text(headers, "Subject"),
        sender: header_text(headers, "From"),
        raw_date,
        timestamp,
        text_body: body_of(&parsed, "text/plain"),
        html_body: body_of(&parsed, "text/html"),
    }
}
