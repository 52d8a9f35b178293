//! Redis keeps everything in a handful of plain keys:
//!
//! - `likes:posts:{chat}` - hash of post ID to author user ID
//! - `likes:post:likes:{chat}:{post}` - set of user IDs that liked the post
//! - `likes:user:posts:{chat}:{user}` - counter of posts
//! - `likes:user:rating:{chat}:{user}` - counter of likes received
//! - `likes:user:login:{user}` - display name
use redis::{
    aio::{ConnectionManager, ConnectionManagerConfig},
    AsyncCommands, Client, Script,
};
use teloxide::types::{ChatId, UserId};

use super::{Error, LikeStore, Toggle};
use crate::types::PostRef;

fn key_posts(chat: ChatId) -> String {
    format!("likes:posts:{}", chat.0)
}

fn key_likes(post: PostRef) -> String {
    format!("likes:post:likes:{}:{}", post.chat.0, post.post.0)
}

fn key_user_posts(chat: ChatId, user: UserId) -> String {
    format!("likes:user:posts:{}:{}", chat.0, user.0)
}

fn key_user_rating(chat: ChatId, user: UserId) -> String {
    format!("likes:user:rating:{}:{}", chat.0, user.0)
}

fn key_user_name(user: UserId) -> String {
    format!("likes:user:login:{}", user.0)
}

/// KEYS[1] is the like set, KEYS[2] the author's rating, ARGV[1] the user.
/// Returns 1 if the like was added, 0 if it was removed.
const TOGGLE_RATED_LIKE: &str = r"
if redis.call('SREM', KEYS[1], ARGV[1]) == 1 then
    redis.call('DECR', KEYS[2])
    return 0
end
redis.call('SADD', KEYS[1], ARGV[1])
redis.call('INCR', KEYS[2])
return 1
";

pub struct RedisStore {
    conn: ConnectionManager,
    toggle_rated_like: Script,
}

impl RedisStore {
    pub async fn connect(redis_url: &str) -> Result<Self, Error> {
        let config = ConnectionManagerConfig::new().set_number_of_retries(3);

        let client = Client::open(redis_url)?;
        let conn = client.get_connection_manager_with_config(config).await?;
        log::info!("Connected to redis at {redis_url}");

        Ok(Self {
            conn,
            toggle_rated_like: Script::new(TOGGLE_RATED_LIKE),
        })
    }
}

impl LikeStore for RedisStore {
    async fn add_post(&self, post: PostRef, author: UserId) -> Result<(), Error> {
        let mut conn = self.conn.clone();
        let _: () = conn
            .hset(key_posts(post.chat), post.post.0, author.0)
            .await?;
        Ok(())
    }

    async fn has_post(&self, post: PostRef) -> Result<bool, Error> {
        let mut conn = self.conn.clone();
        Ok(conn.hexists(key_posts(post.chat), post.post.0).await?)
    }

    async fn post_author(&self, post: PostRef) -> Result<Option<UserId>, Error> {
        let mut conn = self.conn.clone();
        let author: Option<u64> = conn.hget(key_posts(post.chat), post.post.0).await?;
        Ok(author.map(UserId))
    }

    async fn toggle_like(&self, post: PostRef, user: UserId) -> Result<Toggle, Error> {
        let mut conn = self.conn.clone();
        let key = key_likes(post);

        let removed: i64 = conn.srem(&key, user.0).await?;
        if removed > 0 {
            return Ok(Toggle::Unliked);
        }

        let _: () = conn.sadd(&key, user.0).await?;
        Ok(Toggle::Liked)
    }

    async fn toggle_rated_like(
        &self,
        post: PostRef,
        user: UserId,
        author: UserId,
    ) -> Result<Toggle, Error> {
        let mut conn = self.conn.clone();
        // The like and the rating change in one atomic script.
        let added: i64 = self
            .toggle_rated_like
            .key(key_likes(post))
            .key(key_user_rating(post.chat, author))
            .arg(user.0)
            .invoke_async(&mut conn)
            .await?;

        Ok(match added {
            1 => Toggle::Liked,
            _ => Toggle::Unliked,
        })
    }

    async fn has_like(&self, post: PostRef, user: UserId) -> Result<bool, Error> {
        let mut conn = self.conn.clone();
        Ok(conn.sismember(key_likes(post), user.0).await?)
    }

    async fn like_count(&self, post: PostRef) -> Result<i64, Error> {
        let mut conn = self.conn.clone();
        Ok(conn.scard(key_likes(post)).await?)
    }

    async fn add_user_post(&self, chat: ChatId, user: UserId) -> Result<(), Error> {
        let mut conn = self.conn.clone();
        let _: () = conn.incr(key_user_posts(chat, user), 1).await?;
        Ok(())
    }

    async fn user_posts(&self, chat: ChatId, user: UserId) -> Result<i64, Error> {
        let mut conn = self.conn.clone();
        let posts: Option<i64> = conn.get(key_user_posts(chat, user)).await?;
        Ok(posts.unwrap_or(0))
    }

    async fn add_rating(&self, chat: ChatId, user: UserId) -> Result<(), Error> {
        let mut conn = self.conn.clone();
        let _: () = conn.incr(key_user_rating(chat, user), 1).await?;
        Ok(())
    }

    async fn remove_rating(&self, chat: ChatId, user: UserId) -> Result<(), Error> {
        let mut conn = self.conn.clone();
        let _: () = conn.decr(key_user_rating(chat, user), 1).await?;
        Ok(())
    }

    async fn user_rating(&self, chat: ChatId, user: UserId) -> Result<i64, Error> {
        let mut conn = self.conn.clone();
        let rating: Option<i64> = conn.get(key_user_rating(chat, user)).await?;
        Ok(rating.unwrap_or(0))
    }

    async fn set_name(&self, user: UserId, name: &str) -> Result<(), Error> {
        let mut conn = self.conn.clone();
        let _: () = conn.set(key_user_name(user), name).await?;
        Ok(())
    }

    async fn name(&self, user: UserId) -> Result<Option<String>, Error> {
        let mut conn = self.conn.clone();
        Ok(conn.get(key_user_name(user)).await?)
    }
}
