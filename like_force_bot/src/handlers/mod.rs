use std::sync::Arc;

use arch_bot_commons::user_name_prettyprint;
use teloxide::{
    payloads::SendMessageSetters,
    requests::Requester,
    sugar::request::RequestReplyExt,
    types::{Me, Message, MessageKind},
    Bot, RequestError,
};

use crate::{
    config::Messages,
    keyboard::like_button,
    likes::register_post,
    storage::{LikeStore, Store},
    types::PostRef,
};

pub mod buttons;
pub mod commands;

pub use buttons::handle_callback_query;

pub async fn handle_message(
    bot: Bot,
    me: Me,
    message: Message,
    store: Arc<Store>,
    messages: Arc<Messages>,
) -> Result<(), RequestError> {
    // Joins, pins, title changes and the like aren't posts.
    if !matches!(message.kind, MessageKind::Common(_)) {
        return Ok(());
    }

    // Channel posts and anonymous admins have nobody to credit.
    if message.sender_chat.is_some() {
        return Ok(());
    }
    let Some(user) = &message.from else {
        return Ok(());
    };
    // Bot ignores messages made by itself.
    if user.id == me.id {
        return Ok(());
    }

    if message.chat.is_private() {
        bot.send_message(message.chat.id, messages.help.as_str())
            .await?;
        return Ok(());
    }

    if !message.chat.is_group() && !message.chat.is_supergroup() {
        return Ok(());
    }

    if commands::handle_command(&bot, &me, &message, &store, &messages).await? {
        return Ok(());
    }

    let user_name = user_name_prettyprint(user, true);
    log::info!("New message from {}", user_name);

    if let Err(e) = store
        .set_name(user.id, &user_name_prettyprint(user, false))
        .await
    {
        // Only used for /stat, not worth dropping the post over.
        log::warn!("Cannot save name of {}: {}", user_name, e);
    }

    let post = PostRef::from_message(&message);
    let stat = match register_post(&*store, post, user.id, &messages).await {
        Ok(stat) => stat,
        Err(e) => {
            log::error!("Cannot register {}: {}", post, e);
            return Ok(());
        }
    };

    bot.send_message(message.chat.id, stat)
        .reply_to(message.id)
        .reply_markup(like_button(post, 0, &messages))
        .await?;

    log::info!("Stat sent to {}", user_name);
    Ok(())
}
