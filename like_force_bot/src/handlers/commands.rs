use arch_bot_commons::user_name_prettyprint;
use teloxide::{
    requests::Requester,
    sugar::request::RequestReplyExt,
    types::{BotCommand, ChatId, Me, Message, User},
    Bot, RequestError,
};

use crate::{
    config::Messages,
    format_count,
    likes::user_counts,
    storage::{LikeStore, Store},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Stat,
}

impl Command {
    pub const ALL: &'static [Command] = &[Command::Start, Command::Help, Command::Stat];

    pub fn callname(self) -> &'static str {
        match self {
            Command::Start => "/start",
            Command::Help => "/help",
            Command::Stat => "/stat",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Command::Start => "",
            Command::Help => "How this bot works",
            Command::Stat => "Posts and rating of you, or of whoever you reply to",
        }
    }

    /// Commands not shown in the command menu.
    fn hidden(self) -> bool {
        matches!(self, Command::Start)
    }

    /// Find the command this text starts with, if it's one of ours.
    pub fn parse(text: &str, bot_username: &str) -> Option<Command> {
        if !text.starts_with('/') {
            return None;
        }

        let command = text.split_whitespace().next()?;

        // If the command is "/stat@Like_Force_Bot", trim the "@" and everything after it,
        // while making sure the username is actually ours.
        let callname = if let Some((callname, username)) = command.split_once('@') {
            if !username.eq_ignore_ascii_case(bot_username) {
                return None;
            }
            callname
        } else {
            command
        };

        Command::ALL
            .iter()
            .copied()
            .find(|c| c.callname().eq_ignore_ascii_case(callname))
    }

    pub fn generate_bot_commands() -> Vec<BotCommand> {
        Command::ALL
            .iter()
            .filter(|c| !c.hidden())
            .map(|c| BotCommand {
                // Cut off the /
                command: c.callname()[1..].to_string(),
                description: c.description().to_string(),
            })
            .collect()
    }
}

/// Returns `true` if a command was parsed and responded to.
pub async fn handle_command(
    bot: &Bot,
    me: &Me,
    message: &Message,
    store: &Store,
    messages: &Messages,
) -> Result<bool, RequestError> {
    let Some(text) = message.text() else {
        return Ok(false);
    };
    let Some(command) = Command::parse(text, me.username()) else {
        return Ok(false);
    };

    log::debug!("Got command {}", command.callname());

    let response = match command {
        Command::Start | Command::Help => messages.help.clone(),
        Command::Stat => {
            let target = stat_target(me, message);
            match stat_card(store, message.chat.id, target, messages).await {
                Ok(card) => card,
                Err(e) => {
                    log::error!("Cannot get stat: {e}");
                    messages.error.clone()
                }
            }
        }
    };

    bot.send_message(message.chat.id, response)
        .reply_to(message.id)
        .await?;

    Ok(true)
}

/// Author of the replied-to message, or the sender if there's none.
fn stat_target<'a>(me: &Me, message: &'a Message) -> Option<&'a User> {
    message
        .reply_to_message()
        .and_then(|m| m.from.as_ref())
        .filter(|u| u.id != me.id)
        .or(message.from.as_ref())
}

async fn stat_card<S: LikeStore>(
    store: &S,
    chat: ChatId,
    target: Option<&User>,
    messages: &Messages,
) -> Result<String, crate::storage::Error> {
    let Some(target) = target else {
        return Ok(messages.no_stat_target.clone());
    };

    let name = match store.name(target.id).await? {
        Some(name) => name,
        None => user_name_prettyprint(target, false),
    };

    let (posts, rating) = user_counts(store, chat, target.id).await?;

    Ok(format!(
        "{}\nposts: {}\nrating: {}",
        name,
        format_count(posts),
        format_count(rating)
    ))
}
