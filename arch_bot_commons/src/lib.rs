//! This create houses common for me functions, because some things
//! are just boilerplate and aaAAAAAAAAA

use std::{future::Future, path::PathBuf};

mod user_names;
pub use user_names::*;

/// Initialize logging and start the `closure` in an async runtime.
/// Logging is enabled by default on level `info` unless overridden
/// by environment variable `RUST_LOG`. This uses the crate
/// [pretty_env_logger][] internally, see its documentation for more details.
///
/// [pretty_env_logger]: https://docs.rs/pretty_env_logger
///
/// # Panics
///
/// Panics if the tokio runtime fails to build.
pub fn start_everything(closure: impl Future<Output = ()>) {
    let log_level = std::env::var_os("RUST_LOG")
        .unwrap_or_else(|| std::ffi::OsString::from("info"))
        .into_string()
        .unwrap_or_else(|_| String::from("info"));

    let running_as_systemd_service = std::env::var_os("JOURNAL_STREAM").is_some();

    let mut builder = match running_as_systemd_service {
        true => pretty_env_logger::formatted_builder(),
        false => pretty_env_logger::formatted_timed_builder(),
    };

    builder.parse_filters(&log_level);

    if builder.try_init().is_err() {
        log::error!("Tried to init logger twice!");
    }

    log::info!("hi");

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to build the tokio runtime!")
        .block_on(closure);
}

/// Path of the file holding the bot key. `key_debug` in debug builds and
/// `key` in release builds, unless the environment variable `override_var`
/// points somewhere else.
#[must_use]
pub fn bot_key_path(override_var: &str) -> PathBuf {
    if let Some(path) = std::env::var_os(override_var) {
        return PathBuf::from(path);
    }

    PathBuf::from(match cfg!(debug_assertions) {
        true => "key_debug",
        false => "key",
    })
}

/// Read the bot key from [`bot_key_path`], trimming the trailing newline
/// most editors leave in.
///
/// # Errors
///
/// Errors if the file can't be read.
pub fn read_bot_key(override_var: &str) -> std::io::Result<String> {
    let path = bot_key_path(override_var);
    log::debug!("Reading bot key from {}", path.display());
    Ok(std::fs::read_to_string(path)?.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_path_override() {
        // Unique name so no other test races on it.
        let var = "ARCH_BOT_COMMONS_TEST_KEY_PATH";
        std::env::set_var(var, "/tmp/some_key");
        assert_eq!(bot_key_path(var), PathBuf::from("/tmp/some_key"));
        std::env::remove_var(var);

        let default = bot_key_path(var);
        assert!(default == PathBuf::from("key_debug") || default == PathBuf::from("key"));
    }
}
