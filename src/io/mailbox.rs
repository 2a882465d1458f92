use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use native_tls::{TlsConnector, TlsStream};

use crate::model::{MailboxCredentials, SearchCriteria};

/// Error type for mailbox session operations
#[derive(Debug, thiserror::Error)]
pub enum MailboxError {
    #[error("could not connect to {host}:{port}: {source}")]
    Connect {
        host: String,
        port: u16,
        source: std::io::Error,
    },
    #[error("tls error: {0}")]
    Tls(String),
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("failed to open mailbox: {0}")]
    FolderNotFound(String),
    /// The server answered NO or BAD
    #[error("server rejected command: {0}")]
    Rejected(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl From<imap::Error> for MailboxError {
    fn from(e: imap::Error) -> Self {
        match e {
            imap::Error::Io(io) => MailboxError::Io(io),
            imap::Error::No(msg) | imap::Error::Bad(msg) => MailboxError::Rejected(msg),
            other => MailboxError::Protocol(other.to_string()),
        }
    }
}

/// An authenticated session. Identifiers are opaque server tokens.
pub trait MailSession {
    fn select(&mut self, folder: &str) -> Result<(), MailboxError>;
    /// Matching identifiers in server order
    fn search(&mut self, query: &str) -> Result<Vec<String>, MailboxError>;
    /// Full RFC 822 bytes, or `None` when the response carried no body
    fn fetch(&mut self, id: &str) -> Result<Option<Vec<u8>>, MailboxError>;
    fn logout(&mut self) -> Result<(), MailboxError>;
}

/// Opens authenticated sessions
pub trait MailTransport {
    type Session: MailSession;

    fn connect(&self, credentials: &MailboxCredentials) -> Result<Self::Session, MailboxError>;
}

/// IMAP over implicit TLS
#[derive(Debug, Clone)]
pub struct ImapTransport {
    /// Applied to connect, read and write. Zero disables it.
    pub timeout: Duration,
}

impl ImapTransport {
    pub fn new(timeout: Duration) -> Self {
        ImapTransport { timeout }
    }

    fn open_stream(&self, credentials: &MailboxCredentials) -> Result<TcpStream, MailboxError> {
        let connect_error = |source| MailboxError::Connect {
            host: credentials.host.clone(),
            port: credentials.port,
            source,
        };
        let timeout = Some(self.timeout).filter(|t| !t.is_zero());

        let stream = match timeout {
            Some(limit) => {
                let addr = (credentials.host.as_str(), credentials.port)
                    .to_socket_addrs()
                    .map_err(connect_error)?
                    .next()
                    .ok_or_else(|| {
                        connect_error(std::io::Error::new(
                            std::io::ErrorKind::NotFound,
                            "host did not resolve",
                        ))
                    })?;
                TcpStream::connect_timeout(&addr, limit).map_err(connect_error)?
            }
            None => TcpStream::connect((credentials.host.as_str(), credentials.port))
                .map_err(connect_error)?,
        };
        stream.set_read_timeout(timeout)?;
        stream.set_write_timeout(timeout)?;
        Ok(stream)
    }
}

impl MailTransport for ImapTransport {
    type Session = ImapSession;

    fn connect(&self, credentials: &MailboxCredentials) -> Result<ImapSession, MailboxError> {
        let stream = self.open_stream(credentials)?;
        let tls = TlsConnector::builder()
            .build()
            .map_err(|e| MailboxError::Tls(e.to_string()))?;
        let stream = tls
            .connect(&credentials.host, stream)
            .map_err(|e| MailboxError::Tls(e.to_string()))?;

        let mut client = imap::Client::new(stream);
        client.read_greeting()?;
        let session = client
            .login(&credentials.username, &credentials.secret)
            .map_err(|(e, _client)| MailboxError::Authentication(e.to_string()))?;
        log::info!(
            "logged in to {}:{} as {}",
            credentials.host,
            credentials.port,
            credentials.username
        );
        Ok(ImapSession { session })
    }
}

pub struct ImapSession {
    session: imap::Session<TlsStream<TcpStream>>,
}

impl MailSession for ImapSession {
    fn select(&mut self, folder: &str) -> Result<(), MailboxError> {
        let mailbox = self.session.select(folder)?;
        log::info!("selected {} ({} messages)", folder, mailbox.exists);
        Ok(())
    }

    fn search(&mut self, query: &str) -> Result<Vec<String>, MailboxError> {
        // SEARCH results arrive as a set; sequence numbers ascend with arrival
        let mut ids: Vec<u32> = self.session.search(query)?.into_iter().collect();
        ids.sort_unstable();
        Ok(ids.into_iter().map(|id| id.to_string()).collect())
    }

    fn fetch(&mut self, id: &str) -> Result<Option<Vec<u8>>, MailboxError> {
        let fetches = self.session.fetch(id, "RFC822")?;
        Ok(fetches.iter().find_map(|f| f.body()).map(<[u8]>::to_vec))
    }

    fn logout(&mut self) -> Result<(), MailboxError> {
        self.session.logout()?;
        Ok(())
    }
}

/// A session with its folder selected. Logs out when dropped, whatever
/// path the run leaves by.
pub struct OpenMailbox<S: MailSession> {
    session: S,
    folder: String,
}

impl<S: MailSession> OpenMailbox<S> {
    pub fn open<T>(transport: &T, credentials: &MailboxCredentials) -> Result<Self, MailboxError>
    where
        T: MailTransport<Session = S>,
    {
        let session = transport.connect(credentials)?;
        let mut mailbox = OpenMailbox {
            session,
            folder: credentials.folder.clone(),
        };
        mailbox
            .session
            .select(&credentials.folder)
            .map_err(|e| match e {
                MailboxError::Rejected(msg) => {
                    MailboxError::FolderNotFound(format!("{} ({})", credentials.folder, msg))
                }
                other => other,
            })?;
        Ok(mailbox)
    }

    /// Run the search and return the newest `limit` identifiers, newest
    /// first. A rejected search is an empty result, not an error.
    pub fn search_window(&mut self, criteria: &SearchCriteria) -> Result<Vec<String>, MailboxError> {
        let ids = match self.session.search(&criteria.query) {
            Ok(ids) => ids,
            Err(MailboxError::Rejected(msg)) => {
                log::warn!("search {:?} rejected: {}", criteria.query, msg);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };
        log::info!(
            "search {:?} in {} matched {} message(s)",
            criteria.query,
            self.folder,
            ids.len()
        );
        Ok(select_window(&ids, criteria.limit))
    }

    /// Raw message bytes, or `None` when the fetch was refused or empty
    pub fn fetch(&mut self, id: &str) -> Result<Option<Vec<u8>>, MailboxError> {
        match self.session.fetch(id) {
            Ok(Some(raw)) => Ok(Some(raw)),
            Ok(None) => {
                log::debug!("fetch {} returned no body, skipping", id);
                Ok(None)
            }
            Err(MailboxError::Rejected(msg)) => {
                log::debug!("fetch {} rejected ({}), skipping", id, msg);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

impl<S: MailSession> Drop for OpenMailbox<S> {
    fn drop(&mut self) {
        if let Err(e) = self.session.logout() {
            log::debug!("logout failed: {}", e);
        }
    }
}

/// Last `limit` identifiers in server order, reversed.
pub fn select_window(ids: &[String], limit: usize) -> Vec<String> {
    let start = ids.len().saturating_sub(limit);
    ids[start..].iter().rev().cloned().collect()
}
