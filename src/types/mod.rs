//! Public types for the rtags API.

mod message;
mod subtitle;
mod tags;

pub use message::{Message, Role};
pub use subtitle::{SubtitleEntry, Timestamp};
pub use tags::{MAX_REFERENCE_WEBSITES, MAX_TAGS, TagRequest, TagResponse};
