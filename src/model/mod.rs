pub mod config;
pub mod mail;
pub mod report;

pub use config::*;
pub use mail::*;
pub use report::*;
