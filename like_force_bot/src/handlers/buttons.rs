use std::sync::Arc;

use arch_bot_commons::user_name_prettyprint;
use teloxide::{
    payloads::{AnswerCallbackQuerySetters, EditMessageReplyMarkupSetters},
    requests::Requester,
    types::CallbackQuery,
    ApiError, Bot, RequestError,
};

use crate::{
    config::Messages,
    keyboard::like_button,
    likes::{press_like, PressOutcome},
    storage::{Store, Toggle},
    types::ButtonPress,
};

/// Every button press gets exactly one answer, even if it went wrong.
pub async fn handle_callback_query(
    bot: Bot,
    query: CallbackQuery,
    store: Arc<Store>,
    messages: Arc<Messages>,
) -> Result<(), RequestError> {
    let user_name = user_name_prettyprint(&query.from, true);
    log::info!("New button press from {}", user_name);

    let answer = press_button(&bot, &query, &store, &messages).await;

    bot.answer_callback_query(query.id.clone())
        .text(answer)
        .await?;

    log::info!("Button response sent to {}", user_name);
    Ok(())
}

/// Returns the text to answer the press with.
async fn press_button<'a>(
    bot: &Bot,
    query: &CallbackQuery,
    store: &Store,
    messages: &'a Messages,
) -> &'a str {
    let press = match ButtonPress::from_query(query) {
        Ok(press) => press,
        Err(e) => {
            log::error!("Cannot read button press: {}", e);
            return messages.error.as_str();
        }
    };

    log::debug!(
        "Button on message {} for {} pressed by {}",
        press.button.0,
        press.post,
        press.presser.id
    );

    let (toggle, likes) = match press_like(store, press.post, press.presser.id).await {
        Ok(PressOutcome::Toggled { toggle, likes }) => (toggle, likes),
        Ok(PressOutcome::UnknownPost) => {
            log::warn!("Cannot find {}", press.post);
            return messages.error.as_str();
        }
        Err(e) => {
            log::error!("Cannot toggle like on {}: {}", press.post, e);
            return messages.error.as_str();
        }
    };

    let edit_result = bot
        .edit_message_reply_markup(press.button_chat, press.button)
        .reply_markup(like_button(press.post, likes, messages))
        .await;

    match edit_result {
        // Two presses racing each other can land on the same count.
        Ok(_) | Err(RequestError::Api(ApiError::MessageNotModified)) => (),
        Err(e) => {
            log::error!("Cannot update button on {}: {}", press.post, e);
            return messages.error.as_str();
        }
    }

    match toggle {
        Toggle::Liked => messages.liked.as_str(),
        Toggle::Unliked => messages.disliked.as_str(),
    }
}
