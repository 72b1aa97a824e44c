//! Core domain logic for the GitHub worklog.
//!
//! This crate contains the fundamental types and logic for:
//! - Events: pull-request and issue activity pulled from GitHub
//! - Sessions: contiguous same-subject work within one calendar day
//! - Compression: folding a time-ordered event log into sessions

pub mod category;
mod compress;
pub mod event;
pub mod session;
pub mod time;

pub use category::EventCategory;
pub use compress::{CompressOptions, compress, sort_events};
pub use event::Event;
pub use session::Session;
pub use time::{TimestampError, format_timestamp, parse_timestamp};
