//! Source code for Like Force Bot, a bot that puts a like button under
//! every post in a group chat and keeps score.

/// Shortened human-readable numbers.
mod humanize;
pub use humanize::format_count;

/// Identifiers pulled out of updates and callback payloads.
pub mod types;

/// Runtime configuration.
pub mod config;

/// Where posts, likes and counters live.
pub mod storage;

/// The actual liking logic, on top of storage.
mod likes;

/// Inline keyboards.
mod keyboard;

/// Functions that handle events from Telegram.
mod handlers;

/// Entry function that starts the bot.
mod entry;
pub use entry::*;

/// Environment variable that overrides where the bot key is read from.
pub const KEY_FILE_VAR: &str = "LIKEFORCE_KEY_FILE";
