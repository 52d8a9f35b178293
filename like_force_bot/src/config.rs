use std::{env, fmt::Display, path::Path, str::FromStr, time::Duration};

use serde::Deserialize;

/// Texts the bot says. Any of them can be overridden with a JSON file,
/// see [`Messages::load`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Messages {
    /// Answer to a button press that went wrong.
    pub error: String,
    /// Answer to a button press that added a like.
    pub liked: String,
    /// Answer to a button press that removed a like.
    pub disliked: String,
    /// Label of the like button.
    pub like: String,
    /// Reply to the first post of a user in a chat.
    pub first_post: String,
    /// Reply to private messages and `/help`.
    pub help: String,
    /// Reply to `/stat` when there's no user to show stats of.
    pub no_stat_target: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            error: "Something went wrong :(".to_string(),
            liked: "You liked this".to_string(),
            disliked: "You took your like back".to_string(),
            like: "👍".to_string(),
            first_post: "First blood!".to_string(),
            help: concat!(
                "This bot puts a like button under every message in a group chat ",
                "and keeps count of posts and likes of everyone in it.\n\n",
                "Add it to a group to use it. Send /stat in the group to see your stats, ",
                "or reply /stat to someone's message to see theirs."
            )
            .to_string(),
            no_stat_target: "Don't know who to show stats for.".to_string(),
        }
    }
}

impl Messages {
    /// Load messages from a JSON file. Missing file means defaults.
    ///
    /// # Errors
    ///
    /// Errors if the file exists but can't be read or parsed.
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("{} not found, using default messages", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Which storage backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Redis,
    /// Everything is lost on restart. Handy for poking at the bot locally.
    Memory,
}

impl FromStr for StorageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown storage kind {other:?}")),
        }
    }
}

pub struct Config {
    pub storage: StorageKind,
    pub redis_url: String,
    /// Long polling timeout.
    pub poll_timeout: Duration,
    pub messages: Messages,
}

impl Config {
    /// # Panics
    ///
    /// Panics if the environment holds values that don't parse, or the
    /// messages file is broken.
    #[must_use]
    pub fn load() -> Self {
        let messages_path: String = try_load("LIKEFORCE_MESSAGES", "messages.json");

        Self {
            storage: try_load("LIKEFORCE_STORAGE", "redis"),
            redis_url: try_load("LIKEFORCE_REDIS_URL", "redis://127.0.0.1:6379/"),
            poll_timeout: Duration::from_secs(try_load("LIKEFORCE_POLL_TIMEOUT", "10")),
            messages: Messages::load(Path::new(&messages_path))
                .expect("Could not load the messages file!"),
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            log::info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            log::error!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
