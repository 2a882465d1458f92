pub mod links;
pub mod message;

pub use links::extract_links;
pub use message::{MessagePart, decode_message, decode_payload, parse_date};
