use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::{config::Messages, format_count, types::PostRef};

fn like_label(likes: i64, messages: &Messages) -> String {
    if likes == 0 {
        messages.like.clone()
    } else {
        format!("{} {}", messages.like, format_count(likes))
    }
}

/// The one and only like button of a post.
#[must_use]
pub fn like_button(post: PostRef, likes: i64, messages: &Messages) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        like_label(likes, messages),
        post.to_callback_data(),
    )]])
}

#[cfg(test)]
mod tests {
    use teloxide::types::{ChatId, InlineKeyboardButtonKind, MessageId};

    use super::*;

    #[test]
    fn labels() {
        let messages = Messages::default();
        assert_eq!(like_label(0, &messages), "👍");
        assert_eq!(like_label(3, &messages), "👍 3");
        assert_eq!(like_label(1500, &messages), "👍 1.5k");
    }

    #[test]
    fn single_button_pointing_at_the_post() {
        let post = PostRef::new(ChatId(-42), MessageId(9));
        let markup = like_button(post, 2, &Messages::default());

        assert_eq!(markup.inline_keyboard.len(), 1);
        assert_eq!(markup.inline_keyboard[0].len(), 1);

        let button = &markup.inline_keyboard[0][0];
        assert_eq!(button.text, "👍 2");
        match &button.kind {
            InlineKeyboardButtonKind::CallbackData(data) => assert_eq!(data, "-42:9"),
            other => panic!("Unexpected button kind: {other:?}"),
        }
    }
}
