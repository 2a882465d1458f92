use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};

use crate::model::{MailRecord, NO_TEXT_LABEL, QuickLink, RecordView, ScanReport};

/// Newest first. Records without a timestamp go last; ties keep their order.
pub fn sort_records(records: &mut [MailRecord]) {
    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

/// Drop records with no links
pub fn filter_with_links(records: Vec<MailRecord>) -> Vec<MailRecord> {
    records.into_iter().filter(|r| !r.links.is_empty()).collect()
}

/// Whether `timestamp` falls on `today` as seen in `tz`
pub fn is_today<Tz: TimeZone>(
    timestamp: Option<&DateTime<FixedOffset>>,
    today: NaiveDate,
    tz: &Tz,
) -> bool {
    timestamp.is_some_and(|ts| ts.with_timezone(tz).date_naive() == today)
}

/// One entry per link, records in order, links in extraction order
pub fn quick_links<Tz: TimeZone>(records: &[MailRecord], today: NaiveDate, tz: &Tz) -> Vec<QuickLink> {
    records
        .iter()
        .flat_map(|record| {
            let marked = is_today(record.timestamp.as_ref(), today, tz);
            record.links.iter().map(move |link| QuickLink {
                label: if link.text.is_empty() {
                    NO_TEXT_LABEL.to_string()
                } else {
                    link.text.clone()
                },
                href: link.href.clone(),
                subject: record.subject.clone(),
                timestamp: record.timestamp,
                is_today: marked,
            })
        })
        .collect()
}

/// Sort, optionally filter, and flatten one run's records into the render model.
pub fn build_report<Tz: TimeZone>(
    mut records: Vec<MailRecord>,
    only_with_links: bool,
    today: NaiveDate,
    tz: &Tz,
) -> ScanReport {
    sort_records(&mut records);
    if only_with_links {
        records = filter_with_links(records);
    }

    let quick_links = quick_links(&records, today, tz);
    let records = records
        .into_iter()
        .map(|record| RecordView {
            is_today: is_today(record.timestamp.as_ref(), today, tz),
            record,
        })
        .collect();

    ScanReport {
        records,
        quick_links,
    }
}
