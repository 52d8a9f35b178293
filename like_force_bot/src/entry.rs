use std::sync::Arc;

use teloxide::{
    dptree::deps, error_handlers::LoggingErrorHandler, prelude::*, update_listeners::Polling,
};

use crate::{
    config::Config,
    handlers::{commands::Command, handle_callback_query, handle_message},
    storage::Store,
    KEY_FILE_VAR,
};

/// # Panics
///
/// Panics if there's no key file, the config is broken, or the storage
/// can't be reached.
pub async fn entry() {
    log::info!("ASYNC WOOOO");
    let key = arch_bot_commons::read_bot_key(KEY_FILE_VAR).expect("Could not load bot key file!");

    let bot = Bot::new(key);

    let config = Config::load();

    let store = Arc::new(
        Store::connect(&config)
            .await
            .expect("Could not connect to the storage!"),
    );
    let messages = Arc::new(config.messages);

    bot.set_my_commands(Command::generate_bot_commands())
        .await
        .expect("Failed to set bot commands!");

    log::info!("Creating the handler...");

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(handle_message))
        .branch(Update::filter_callback_query().endpoint(handle_callback_query));

    let listener = Polling::builder(bot.clone())
        .timeout(config.poll_timeout)
        .build();

    log::info!("Dispatching the dispatcher!");

    Dispatcher::builder(bot, handler)
        .default_handler(|_| async {})
        .dependencies(deps![store, messages])
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        )
        .await;

    log::info!("it appears we have been bonked.");
}
