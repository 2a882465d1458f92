use chrono::{Local, NaiveDate, TimeZone};

use crate::io::config_io::ConfigError;
use crate::io::mailbox::{ImapTransport, MailSession, MailTransport, MailboxError, OpenMailbox};
use crate::model::{AppConfig, LinkFilters, MailRecord, MailboxCredentials, ScanReport, SearchCriteria};
use crate::parse::decode_message;

use super::assemble::assemble_record;
use super::results::build_report;

/// Error type for one dashboard run
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("access denied")]
    AccessDenied,
    #[error(transparent)]
    Mailbox(#[from] MailboxError),
}

/// Gate a run on the shared secret. Checks, in order: the secret is
/// configured, the entered password matches it exactly, credentials are
/// configured. Performs no I/O.
pub fn check_access(config: &AppConfig, entered: &str) -> Result<MailboxCredentials, ScanError> {
    let key = config.access_key().ok_or(ConfigError::MissingAccessKey)?;
    if entered != key {
        log::warn!("access denied");
        return Err(ScanError::AccessDenied);
    }
    config
        .credentials()
        .ok_or_else(|| ConfigError::MissingCredentials.into())
}

/// Fetch, decode and assemble the selected window of messages. Messages
/// the server will not hand over, or that a filter rejects, are skipped.
pub fn fetch_records<S: MailSession>(
    mailbox: &mut OpenMailbox<S>,
    criteria: &SearchCriteria,
    filters: &LinkFilters,
) -> Result<Vec<MailRecord>, MailboxError> {
    let ids = mailbox.search_window(criteria)?;
    let mut records = Vec::with_capacity(ids.len());

    for id in &ids {
        let Some(raw) = mailbox.fetch(id)? else {
            continue;
        };
        let message = decode_message(id, &raw);
        if let Some(record) = assemble_record(message, filters) {
            records.push(record);
        }
    }

    log::info!("kept {} of {} fetched message(s)", records.len(), ids.len());
    Ok(records)
}

/// One full run: gate, open the mailbox, collect records, build the report.
/// The session is logged out before this returns, on success or error.
pub fn run_scan<T: MailTransport, Tz: TimeZone>(
    config: &AppConfig,
    entered: &str,
    transport: &T,
    today: NaiveDate,
    tz: &Tz,
) -> Result<ScanReport, ScanError> {
    let credentials = check_access(config, entered)?;

    let records = {
        let mut mailbox = OpenMailbox::open(transport, &credentials)?;
        fetch_records(&mut mailbox, &config.search_criteria(), &config.filters())?
    };

    Ok(build_report(records, config.only_with_links, today, tz))
}

/// [`run_scan`] against the configured IMAP server, in the local time zone.
pub fn run_scan_now(config: &AppConfig, entered: &str) -> Result<ScanReport, ScanError> {
    let transport = ImapTransport::new(config.timeout());
    run_scan(config, entered, &transport, Local::now().date_naive(), &Local)
}
