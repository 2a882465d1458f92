pub mod config_io;
pub mod mailbox;

#[cfg(test)]
pub mod fake_mailbox;
