mod memory_store;
mod redis_store;

pub use memory_store::MemoryStore;
pub use redis_store::RedisStore;

use std::future::Future;

use teloxide::types::{ChatId, UserId};

use crate::{
    config::{Config, StorageKind},
    types::PostRef,
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

/// What [`LikeStore::toggle_like`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Liked,
    Unliked,
}

/// Everything the bot remembers. Posts and likes are per post, counters are
/// per user in a chat, and display names are per user globally.
pub trait LikeStore {
    /// Remember a post and who wrote it.
    fn add_post(
        &self,
        post: PostRef,
        author: UserId,
    ) -> impl Future<Output = Result<(), Error>> + Send;
    fn has_post(&self, post: PostRef) -> impl Future<Output = Result<bool, Error>> + Send;
    fn post_author(
        &self,
        post: PostRef,
    ) -> impl Future<Output = Result<Option<UserId>, Error>> + Send;

    /// Remove the like of this user if it's there, add it otherwise.
    fn toggle_like(
        &self,
        post: PostRef,
        user: UserId,
    ) -> impl Future<Output = Result<Toggle, Error>> + Send;
    /// [`Self::toggle_like`], moving the rating of `author` along with the
    /// like in the same step: up on like, down on unlike. Either both happen
    /// or neither does.
    fn toggle_rated_like(
        &self,
        post: PostRef,
        user: UserId,
        author: UserId,
    ) -> impl Future<Output = Result<Toggle, Error>> + Send;
    fn has_like(
        &self,
        post: PostRef,
        user: UserId,
    ) -> impl Future<Output = Result<bool, Error>> + Send;
    fn like_count(&self, post: PostRef) -> impl Future<Output = Result<i64, Error>> + Send;

    fn add_user_post(
        &self,
        chat: ChatId,
        user: UserId,
    ) -> impl Future<Output = Result<(), Error>> + Send;
    /// Zero for users never seen in this chat.
    fn user_posts(
        &self,
        chat: ChatId,
        user: UserId,
    ) -> impl Future<Output = Result<i64, Error>> + Send;
    fn add_rating(
        &self,
        chat: ChatId,
        user: UserId,
    ) -> impl Future<Output = Result<(), Error>> + Send;
    fn remove_rating(
        &self,
        chat: ChatId,
        user: UserId,
    ) -> impl Future<Output = Result<(), Error>> + Send;
    /// Zero for users never seen in this chat.
    fn user_rating(
        &self,
        chat: ChatId,
        user: UserId,
    ) -> impl Future<Output = Result<i64, Error>> + Send;

    fn set_name(
        &self,
        user: UserId,
        name: &str,
    ) -> impl Future<Output = Result<(), Error>> + Send;
    fn name(&self, user: UserId) -> impl Future<Output = Result<Option<String>, Error>> + Send;
}

/// The store the bot runs with, picked by config.
pub enum Store {
    Redis(RedisStore),
    Memory(MemoryStore),
}

impl Store {
    pub async fn connect(config: &Config) -> Result<Self, Error> {
        Ok(match config.storage {
            StorageKind::Redis => Store::Redis(RedisStore::connect(&config.redis_url).await?),
            StorageKind::Memory => {
                log::warn!("Using in-memory storage. Everything will be lost on restart!");
                Store::Memory(MemoryStore::default())
            }
        })
    }
}

macro_rules! dispatch {
    ($self:ident.$method:ident($($arg:expr),*)) => {
        match $self {
            Store::Redis(s) => s.$method($($arg),*).await,
            Store::Memory(s) => s.$method($($arg),*).await,
        }
    };
}

impl LikeStore for Store {
    async fn add_post(&self, post: PostRef, author: UserId) -> Result<(), Error> {
        dispatch!(self.add_post(post, author))
    }
    async fn has_post(&self, post: PostRef) -> Result<bool, Error> {
        dispatch!(self.has_post(post))
    }
    async fn post_author(&self, post: PostRef) -> Result<Option<UserId>, Error> {
        dispatch!(self.post_author(post))
    }
    async fn toggle_like(&self, post: PostRef, user: UserId) -> Result<Toggle, Error> {
        dispatch!(self.toggle_like(post, user))
    }
    async fn toggle_rated_like(
        &self,
        post: PostRef,
        user: UserId,
        author: UserId,
    ) -> Result<Toggle, Error> {
        dispatch!(self.toggle_rated_like(post, user, author))
    }
    async fn has_like(&self, post: PostRef, user: UserId) -> Result<bool, Error> {
        dispatch!(self.has_like(post, user))
    }
    async fn like_count(&self, post: PostRef) -> Result<i64, Error> {
        dispatch!(self.like_count(post))
    }
    async fn add_user_post(&self, chat: ChatId, user: UserId) -> Result<(), Error> {
        dispatch!(self.add_user_post(chat, user))
    }
    async fn user_posts(&self, chat: ChatId, user: UserId) -> Result<i64, Error> {
        dispatch!(self.user_posts(chat, user))
    }
    async fn add_rating(&self, chat: ChatId, user: UserId) -> Result<(), Error> {
        dispatch!(self.add_rating(chat, user))
    }
    async fn remove_rating(&self, chat: ChatId, user: UserId) -> Result<(), Error> {
        dispatch!(self.remove_rating(chat, user))
    }
    async fn user_rating(&self, chat: ChatId, user: UserId) -> Result<i64, Error> {
        dispatch!(self.user_rating(chat, user))
    }
    async fn set_name(&self, user: UserId, name: &str) -> Result<(), Error> {
        dispatch!(self.set_name(user, name))
    }
    async fn name(&self, user: UserId) -> Result<Option<String>, Error> {
        dispatch!(self.name(user))
    }
}
