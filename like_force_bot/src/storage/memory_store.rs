use std::{
    collections::{HashMap, HashSet},
    sync::{Mutex, MutexGuard, PoisonError},
};

use teloxide::types::{ChatId, UserId};

use super::{Error, LikeStore, Toggle};
use crate::types::PostRef;

#[derive(Default)]
struct Inner {
    posts: HashMap<PostRef, UserId>,
    likes: HashMap<PostRef, HashSet<UserId>>,
    user_posts: HashMap<(ChatId, UserId), i64>,
    ratings: HashMap<(ChatId, UserId), i64>,
    names: HashMap<UserId, String>,
}

/// Keeps everything in process memory. Never fails.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Nothing in here can be left half-updated by a panic.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LikeStore for MemoryStore {
    async fn add_post(&self, post: PostRef, author: UserId) -> Result<(), Error> {
        self.lock().posts.insert(post, author);
        Ok(())
    }

    async fn has_post(&self, post: PostRef) -> Result<bool, Error> {
        Ok(self.lock().posts.contains_key(&post))
    }

    async fn post_author(&self, post: PostRef) -> Result<Option<UserId>, Error> {
        Ok(self.lock().posts.get(&post).copied())
    }

    async fn toggle_like(&self, post: PostRef, user: UserId) -> Result<Toggle, Error> {
        let mut inner = self.lock();
        let likers = inner.likes.entry(post).or_default();
        if likers.remove(&user) {
            Ok(Toggle::Unliked)
        } else {
            likers.insert(user);
            Ok(Toggle::Liked)
        }
    }

    async fn toggle_rated_like(
        &self,
        post: PostRef,
        user: UserId,
        author: UserId,
    ) -> Result<Toggle, Error> {
        let mut inner = self.lock();
        let likers = inner.likes.entry(post).or_default();
        let (toggle, delta) = if likers.remove(&user) {
            (Toggle::Unliked, -1)
        } else {
            likers.insert(user);
            (Toggle::Liked, 1)
        };
        *inner.ratings.entry((post.chat, author)).or_default() += delta;
        Ok(toggle)
    }

    async fn has_like(&self, post: PostRef, user: UserId) -> Result<bool, Error> {
        Ok(self
            .lock()
            .likes
            .get(&post)
            .is_some_and(|likers| likers.contains(&user)))
    }

    async fn like_count(&self, post: PostRef) -> Result<i64, Error> {
        Ok(self
            .lock()
            .likes
            .get(&post)
            .map_or(0, |likers| likers.len() as i64))
    }

    async fn add_user_post(&self, chat: ChatId, user: UserId) -> Result<(), Error> {
        *self.lock().user_posts.entry((chat, user)).or_default() += 1;
        Ok(())
    }

    async fn user_posts(&self, chat: ChatId, user: UserId) -> Result<i64, Error> {
        Ok(self
            .lock()
            .user_posts
            .get(&(chat, user))
            .copied()
            .unwrap_or(0))
    }

    async fn add_rating(&self, chat: ChatId, user: UserId) -> Result<(), Error> {
        *self.lock().ratings.entry((chat, user)).or_default() += 1;
        Ok(())
    }

    async fn remove_rating(&self, chat: ChatId, user: UserId) -> Result<(), Error> {
        *self.lock().ratings.entry((chat, user)).or_default() -= 1;
        Ok(())
    }

    async fn user_rating(&self, chat: ChatId, user: UserId) -> Result<i64, Error> {
        Ok(self.lock().ratings.get(&(chat, user)).copied().unwrap_or(0))
    }

    async fn set_name(&self, user: UserId, name: &str) -> Result<(), Error> {
        self.lock().names.insert(user, name.to_string());
        Ok(())
    }

    async fn name(&self, user: UserId) -> Result<Option<String>, Error> {
        Ok(self.lock().names.get(&user).cloned())
    }
}
