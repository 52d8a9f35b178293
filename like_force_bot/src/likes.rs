use teloxide::types::{ChatId, UserId};

use crate::{
    config::Messages,
    format_count,
    storage::{Error, LikeStore, Toggle},
    types::PostRef,
};

/// Result of [`press_like`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// The button belongs to a post this bot doesn't know. Nothing was changed.
    UnknownPost,
    /// The like was flipped. `likes` is the new like count of the post.
    Toggled { toggle: Toggle, likes: i64 },
}

/// Post count and rating of a user in a chat.
pub async fn user_counts<S: LikeStore>(
    store: &S,
    chat: ChatId,
    user: UserId,
) -> Result<(i64, i64), Error> {
    Ok((
        store.user_posts(chat, user).await?,
        store.user_rating(chat, user).await?,
    ))
}

/// Stats of a user in a chat as a human-readable message.
pub async fn user_stat<S: LikeStore>(
    store: &S,
    chat: ChatId,
    user: UserId,
    messages: &Messages,
) -> Result<String, Error> {
    let (posts, rating) = user_counts(store, chat, user).await?;

    if posts == 0 {
        return Ok(messages.first_post.clone());
    }

    Ok(format!(
        "user stat:\nposts: {}\nrating: {}",
        format_count(posts),
        format_count(rating)
    ))
}

/// Remember a new post and count it towards its author.
///
/// Returns stats of the author as they were before this post.
pub async fn register_post<S: LikeStore>(
    store: &S,
    post: PostRef,
    author: UserId,
    messages: &Messages,
) -> Result<String, Error> {
    store.add_post(post, author).await?;
    let stat = user_stat(store, post.chat, author, messages).await?;
    store.add_user_post(post.chat, author).await?;
    Ok(stat)
}

/// Flip the like of `presser` on this post, and move the rating of the
/// post's author along with it.
pub async fn press_like<S: LikeStore>(
    store: &S,
    post: PostRef,
    presser: UserId,
) -> Result<PressOutcome, Error> {
    let Some(author) = store.post_author(post).await? else {
        return Ok(PressOutcome::UnknownPost);
    };

    let toggle = store.toggle_rated_like(post, presser, author).await?;

    let likes = store.like_count(post).await?;
    log::debug!("{post} now has {likes} likes");

    Ok(PressOutcome::Toggled { toggle, likes })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use teloxide::types::MessageId;

    use super::*;
    use crate::storage::MemoryStore;

    const CHAT: ChatId = ChatId(-100500);
    const AUTHOR: UserId = UserId(1);
    const FAN: UserId = UserId(2);

    fn post(id: i32) -> PostRef {
        PostRef::new(CHAT, MessageId(id))
    }

    #[tokio::test]
    async fn first_post_is_first_blood() {
        let store = MemoryStore::default();
        let messages = Messages::default();

        let stat = register_post(&store, post(1), AUTHOR, &messages)
            .await
            .unwrap();
        assert_eq!(stat, "First blood!");

        let stat = register_post(&store, post(2), AUTHOR, &messages)
            .await
            .unwrap();
        assert_eq!(stat, "user stat:\nposts: 1\nrating: 0");
        assert_eq!(store.user_posts(CHAT, AUTHOR).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn first_post_text_is_configurable() {
        let store = MemoryStore::default();
        let messages = Messages {
            first_post: "hi newbie".to_string(),
            ..Messages::default()
        };
        let stat = register_post(&store, post(1), AUTHOR, &messages)
            .await
            .unwrap();
        assert_eq!(stat, "hi newbie");
    }

    #[tokio::test]
    async fn like_goes_to_the_author() {
        let store = MemoryStore::default();
        register_post(&store, post(1), AUTHOR, &Messages::default())
            .await
            .unwrap();

        let outcome = press_like(&store, post(1), FAN).await.unwrap();
        assert_eq!(
            outcome,
            PressOutcome::Toggled {
                toggle: Toggle::Liked,
                likes: 1
            }
        );
        assert_eq!(store.user_rating(CHAT, AUTHOR).await.unwrap(), 1);
        assert_eq!(store.user_rating(CHAT, FAN).await.unwrap(), 0);
        assert!(store.has_like(post(1), FAN).await.unwrap());

        let outcome = press_like(&store, post(1), FAN).await.unwrap();
        assert_eq!(
            outcome,
            PressOutcome::Toggled {
                toggle: Toggle::Unliked,
                likes: 0
            }
        );
        assert_eq!(store.user_rating(CHAT, AUTHOR).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn likes_from_many_users_add_up() {
        let store = MemoryStore::default();
        let messages = Messages::default();
        register_post(&store, post(1), AUTHOR, &messages)
            .await
            .unwrap();
        register_post(&store, post(2), AUTHOR, &messages)
            .await
            .unwrap();

        for fan in 10..15 {
            press_like(&store, post(1), UserId(fan)).await.unwrap();
        }
        let outcome = press_like(&store, post(2), FAN).await.unwrap();
        assert_eq!(
            outcome,
            PressOutcome::Toggled {
                toggle: Toggle::Liked,
                likes: 1
            }
        );

        assert_eq!(store.like_count(post(1)).await.unwrap(), 5);
        assert_eq!(
            user_stat(&store, CHAT, AUTHOR, &messages).await.unwrap(),
            "user stat:\nposts: 2\nrating: 6"
        );
    }

    #[tokio::test]
    async fn unknown_post_changes_nothing() {
        let store = MemoryStore::default();
        let outcome = press_like(&store, post(404), FAN).await.unwrap();
        assert_eq!(outcome, PressOutcome::UnknownPost);
        assert_eq!(store.like_count(post(404)).await.unwrap(), 0);
        assert!(!store.has_post(post(404)).await.unwrap());
    }

    #[tokio::test]
    async fn stats_are_shortened() {
        let store = MemoryStore::default();
        for _ in 0..1500 {
            store.add_user_post(CHAT, AUTHOR).await.unwrap();
        }
        for _ in 0..2000 {
            store.add_rating(CHAT, AUTHOR).await.unwrap();
        }
        assert_eq!(
            user_stat(&store, CHAT, AUTHOR, &Messages::default())
                .await
                .unwrap(),
            "user stat:\nposts: 1.5k\nrating: 2.0k"
        );
    }
}
