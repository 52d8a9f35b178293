use std::fmt::Display;

use teloxide::types::{CallbackQuery, ChatId, Message, MessageId, User};

/// A post in a chat that can be liked.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct PostRef {
    pub chat: ChatId,
    pub post: MessageId,
}

/// Why a callback payload could not be read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    #[error("no callback data")]
    NoData,
    #[error("no separator in callback data {0:?}")]
    NoSeparator(String),
    #[error("bad chat ID in callback data {0:?}")]
    BadChatId(String),
    #[error("bad post ID in callback data {0:?}")]
    BadPostId(String),
    #[error("callback query has no message to edit")]
    NoButtonMessage,
}

impl PostRef {
    #[must_use]
    pub fn new(chat: ChatId, post: MessageId) -> Self {
        Self { chat, post }
    }

    /// The post a fresh message in a chat makes.
    #[must_use]
    pub fn from_message(message: &Message) -> Self {
        Self::new(message.chat.id, message.id)
    }

    /// Data to put into the like button.
    ///
    /// Telegram's inline keyboards only support up to 64 bytes of callback
    /// data; two decimal integers and a colon always fit.
    #[must_use]
    pub fn to_callback_data(&self) -> String {
        format!("{}:{}", self.chat.0, self.post.0)
    }

    /// Reverse of [`Self::to_callback_data`].
    ///
    /// # Errors
    ///
    /// Errors if the data is not exactly two integers split by a colon.
    pub fn parse_callback_data(data: &str) -> Result<Self, PayloadError> {
        let (chat, post) = data
            .split_once(':')
            .ok_or_else(|| PayloadError::NoSeparator(data.to_string()))?;

        let chat = chat
            .parse()
            .map_err(|_| PayloadError::BadChatId(data.to_string()))?;
        // A second colon ends up in the post half, which then fails to parse.
        let post = post
            .parse()
            .map_err(|_| PayloadError::BadPostId(data.to_string()))?;

        Ok(Self::new(ChatId(chat), MessageId(post)))
    }
}

impl Display for PostRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "post {} in chat {}", self.post.0, self.chat)
    }
}

/// Everything pulled out of a like button press.
#[derive(Debug, Clone)]
pub struct ButtonPress<'a> {
    /// Post the button is for.
    pub post: PostRef,
    /// Message that carries the button. Not the same as the post, since
    /// the button is on the bot's reply to it.
    pub button: MessageId,
    /// Chat of the message that carries the button. Differs from the chat
    /// in the callback data once a group is upgraded to a supergroup.
    pub button_chat: ChatId,
    /// Who pressed it.
    pub presser: &'a User,
}

impl<'a> ButtonPress<'a> {
    /// # Errors
    ///
    /// Errors if the query has no data, malformed data, or no message.
    pub fn from_query(query: &'a CallbackQuery) -> Result<Self, PayloadError> {
        let data = query.data.as_deref().ok_or(PayloadError::NoData)?;
        let post = PostRef::parse_callback_data(data)?;
        let message = query
            .message
            .as_ref()
            .ok_or(PayloadError::NoButtonMessage)?;

        Ok(Self {
            post,
            button: message.id(),
            button_chat: message.chat().id,
            presser: &query.from,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use teloxide::types::UserId;

    use super::*;

    #[test]
    fn callback_data_both_ways() {
        let post = PostRef::new(ChatId(-1002065680710), MessageId(1337));
        let data = post.to_callback_data();
        assert_eq!(data, "-1002065680710:1337");
        assert_eq!(PostRef::parse_callback_data(&data).unwrap(), post);
    }

    #[test]
    fn callback_data_fits_in_telegram_limit() {
        let post = PostRef::new(ChatId(i64::MIN), MessageId(i32::MIN));
        assert!(post.to_callback_data().len() <= 64);
    }

    #[test]
    fn bad_callback_data() {
        assert_eq!(
            PostRef::parse_callback_data("12345"),
            Err(PayloadError::NoSeparator("12345".to_string()))
        );
        assert_eq!(
            PostRef::parse_callback_data("abc:1"),
            Err(PayloadError::BadChatId("abc:1".to_string()))
        );
        assert_eq!(
            PostRef::parse_callback_data("1:"),
            Err(PayloadError::BadPostId("1:".to_string()))
        );
        assert_eq!(
            PostRef::parse_callback_data("1:2:3"),
            Err(PayloadError::BadPostId("1:2:3".to_string()))
        );
        assert!(matches!(
            PostRef::parse_callback_data("like 1 2"),
            Err(PayloadError::NoSeparator(_))
        ));
    }

    /// Callback query the way Telegram sends it for a press on the bot's
    /// reply `77` in chat `-1001`.
    fn query(data: Option<&str>, with_message: bool) -> CallbackQuery {
        let mut json = serde_json::json!({
            "id": "4382bfdwdsb323b2d9",
            "from": {"id": 42, "is_bot": false, "first_name": "Herbert", "username": "herb"},
            "chat_instance": "-5428376435263",
        });
        if let Some(data) = data {
            json["data"] = serde_json::json!(data);
        }
        if with_message {
            json["message"] = serde_json::json!({
                "message_id": 77,
                "date": 1700000000,
                "chat": {"id": -1001, "type": "supergroup", "title": "Likers"},
                "from": {"id": 1, "is_bot": true, "first_name": "Like Force", "username": "Like_Force_Bot"},
                "text": "First blood!",
            });
        }
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn button_press_from_query() {
        let query = query(Some("-1001:76"), true);
        let press = ButtonPress::from_query(&query).unwrap();

        assert_eq!(press.post, PostRef::new(ChatId(-1001), MessageId(76)));
        assert_eq!(press.button, MessageId(77));
        assert_eq!(press.button_chat, ChatId(-1001));
        assert_eq!(press.presser.id, UserId(42));
    }

    #[test]
    fn button_chat_comes_from_the_message() {
        // Button made before the group got upgraded to a supergroup.
        let query = query(Some("-500:76"), true);
        let press = ButtonPress::from_query(&query).unwrap();

        assert_eq!(press.post.chat, ChatId(-500));
        assert_eq!(press.button_chat, ChatId(-1001));
    }

    #[test]
    fn button_press_without_data() {
        let query = query(None, true);
        assert_eq!(
            ButtonPress::from_query(&query).unwrap_err(),
            PayloadError::NoData
        );
    }

    #[test]
    fn button_press_without_message() {
        let query = query(Some("-1001:76"), false);
        assert_eq!(
            ButtonPress::from_query(&query).unwrap_err(),
            PayloadError::NoButtonMessage
        );
    }
}
