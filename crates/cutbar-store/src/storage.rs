//! The store boundary handed to request handlers.
//!
//! [`Storage`] is implemented by the SQLite-backed [`Database`] and by the
//! in-process [`MemoryStorage`](crate::MemoryStorage). Point lookups that
//! find nothing return [`StoreError::NotFound`](crate::StoreError::NotFound).
//!
//! Writes do not check that `user_id` / `post_id` resolve; that is the
//! caller's job. Reads left-join the author, so a dangling `user_id` shows up
//! as `author: None` instead of an error.

use crate::database::Database;
use crate::error::Result;
use crate::models::{
    Comment, CommentWithAuthor, Message, MessageWithAuthor, NewComment, NewMessage, NewPost,
    NewUser, Post, PostWithAuthor, User,
};

pub trait Storage: Send + Sync {
    fn get_user(&self, id: i64) -> Result<User>;

    fn get_user_by_username(&self, username: &str) -> Result<User>;

    /// Fails with `UsernameTaken` when the username exists.
    fn create_user(&self, user: &NewUser) -> Result<User>;

    /// Most recent `limit` messages, returned oldest first.
    fn get_messages(&self, limit: u32) -> Result<Vec<MessageWithAuthor>>;

    fn create_message(&self, message: &NewMessage) -> Result<Message>;

    /// Most recent `limit` posts, returned newest first.
    fn get_posts(&self, limit: u32) -> Result<Vec<PostWithAuthor>>;

    fn create_post(&self, post: &NewPost) -> Result<Post>;

    fn get_post_by_id(&self, id: i64) -> Result<PostWithAuthor>;

    /// Comments on a post, newest first. Empty for an unknown post.
    fn get_comments_by_post_id(&self, post_id: i64) -> Result<Vec<CommentWithAuthor>>;

    fn create_comment(&self, comment: &NewComment) -> Result<Comment>;

    fn count_comments(&self, post_id: i64) -> Result<i64>;

    /// Atomically add one like; returns the new total.
    fn like_post(&self, post_id: i64) -> Result<i64>;

    /// Cheap liveness probe.
    fn health_check(&self) -> Result<()>;
}

impl Storage for Database {
    fn get_user(&self, id: i64) -> Result<User> {
        Database::get_user(self, id)
    }

    fn get_user_by_username(&self, username: &str) -> Result<User> {
        Database::get_user_by_username(self, username)
    }

    fn create_user(&self, user: &NewUser) -> Result<User> {
        Database::create_user(self, user)
    }

    fn get_messages(&self, limit: u32) -> Result<Vec<MessageWithAuthor>> {
        Database::get_messages(self, limit)
    }

    fn create_message(&self, message: &NewMessage) -> Result<Message> {
        Database::create_message(self, message)
    }

    fn get_posts(&self, limit: u32) -> Result<Vec<PostWithAuthor>> {
        Database::get_posts(self, limit)
    }

    fn create_post(&self, post: &NewPost) -> Result<Post> {
        Database::create_post(self, post)
    }

    fn get_post_by_id(&self, id: i64) -> Result<PostWithAuthor> {
        Database::get_post_by_id(self, id)
    }

    fn get_comments_by_post_id(&self, post_id: i64) -> Result<Vec<CommentWithAuthor>> {
        Database::get_comments_by_post_id(self, post_id)
    }

    fn create_comment(&self, comment: &NewComment) -> Result<Comment> {
        Database::create_comment(self, comment)
    }

    fn count_comments(&self, post_id: i64) -> Result<i64> {
        Database::count_comments(self, post_id)
    }

    fn like_post(&self, post_id: i64) -> Result<i64> {
        Database::like_post(self, post_id)
    }

    fn health_check(&self) -> Result<()> {
        self.conn()?.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Behaviour shared by every backend
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::StoreError;
    use crate::memory::MemoryStorage;

    fn backends() -> Vec<(&'static str, Arc<dyn Storage>)> {
        vec![
            ("sqlite", Arc::new(Database::open_in_memory().unwrap())),
            ("memory", Arc::new(MemoryStorage::new())),
        ]
    }

    fn user(store: &dyn Storage, name: &str) -> User {
        store.create_user(&NewUser::new(name, "pw")).unwrap()
    }

    fn message(store: &dyn Storage, user_id: i64, content: &str) -> Message {
        store
            .create_message(&NewMessage {
                content: content.to_string(),
                user_id,
            })
            .unwrap()
    }

    fn post(store: &dyn Storage, user_id: i64, title: &str) -> Post {
        store
            .create_post(&NewPost {
                title: title.to_string(),
                content: format!("{title} body"),
                user_id,
            })
            .unwrap()
    }

    fn comment(store: &dyn Storage, post_id: i64, user_id: i64, content: &str) -> Comment {
        store
            .create_comment(&NewComment {
                content: content.to_string(),
                post_id,
                user_id,
            })
            .unwrap()
    }

    #[test]
    fn users_lookup_by_id_and_name() {
        for (name, store) in backends() {
            let created = store
                .create_user(&NewUser::new("ana", "pw").with_avatar("A"))
                .unwrap();
            assert_eq!(created.avatar, "A", "{name}");
            assert_eq!(created.color, "from-indigo-500 to-purple-600", "{name}");

            assert_eq!(store.get_user(created.id).unwrap(), created, "{name}");
            assert_eq!(store.get_user_by_username("ana").unwrap(), created, "{name}");

            assert!(matches!(store.get_user(created.id + 100), Err(StoreError::NotFound)), "{name}");
            assert!(matches!(store.get_user_by_username("bob"), Err(StoreError::NotFound)), "{name}");
        }
    }

    #[test]
    fn duplicate_username_is_rejected() {
        for (name, store) in backends() {
            user(store.as_ref(), "ana");
            let err = store.create_user(&NewUser::new("ana", "other")).unwrap_err();
            assert!(matches!(err, StoreError::UsernameTaken(ref u) if u == "ana"), "{name}: {err}");
        }
    }

    #[test]
    fn created_message_is_listed_once_with_author() {
        for (name, store) in backends() {
            let ana = user(store.as_ref(), "ana");
            let msg = message(store.as_ref(), ana.id, "gm");

            let listed = store.get_messages(50).unwrap();
            let hits: Vec<_> = listed.iter().filter(|m| m.message.id == msg.id).collect();
            assert_eq!(hits.len(), 1, "{name}");
            assert_eq!(hits[0].message, msg, "{name}");
            assert_eq!(hits[0].author.as_ref().unwrap().username, "ana", "{name}");
        }
    }

    #[test]
    fn messages_are_listed_oldest_first() {
        for (name, store) in backends() {
            let ana = user(store.as_ref(), "ana");
            let ids: Vec<i64> = (0..5)
                .map(|i| message(store.as_ref(), ana.id, &format!("m{i}")).id)
                .collect();

            let listed = store.get_messages(3).unwrap();
            let listed_ids: Vec<i64> = listed.iter().map(|m| m.message.id).collect();
            // The three most recent, in chronological order.
            assert_eq!(listed_ids, ids[2..].to_vec(), "{name}");
            assert!(
                listed.windows(2).all(|w| w[0].message.timestamp <= w[1].message.timestamp),
                "{name}"
            );
        }
    }

    #[test]
    fn posts_are_listed_newest_first() {
        for (name, store) in backends() {
            let ana = user(store.as_ref(), "ana");
            let ids: Vec<i64> = (0..4)
                .map(|i| post(store.as_ref(), ana.id, &format!("p{i}")).id)
                .collect();

            let listed = store.get_posts(3).unwrap();
            let listed_ids: Vec<i64> = listed.iter().map(|p| p.post.id).collect();
            assert_eq!(listed_ids, vec![ids[3], ids[2], ids[1]], "{name}");
            assert!(
                listed.windows(2).all(|w| w[0].post.timestamp >= w[1].post.timestamp),
                "{name}"
            );
        }
    }

    #[test]
    fn comment_count_matches_between_listing_and_detail() {
        for (name, store) in backends() {
            let ana = user(store.as_ref(), "ana");
            let busy = post(store.as_ref(), ana.id, "busy");
            let quiet = post(store.as_ref(), ana.id, "quiet");
            comment(store.as_ref(), busy.id, ana.id, "one");
            comment(store.as_ref(), busy.id, ana.id, "two");

            let listed = store.get_posts(20).unwrap();
            let count_of = |id: i64| {
                listed
                    .iter()
                    .find(|p| p.post.id == id)
                    .map(|p| p.comment_count)
                    .unwrap()
            };
            assert_eq!(count_of(busy.id), 2, "{name}");
            assert_eq!(count_of(quiet.id), 0, "{name}");

            assert_eq!(store.get_post_by_id(busy.id).unwrap().comment_count, 2, "{name}");
            assert_eq!(store.count_comments(busy.id).unwrap(), 2, "{name}");
            assert_eq!(store.count_comments(quiet.id).unwrap(), 0, "{name}");
            assert!(matches!(store.count_comments(999), Err(StoreError::NotFound)), "{name}");
        }
    }

    #[test]
    fn comments_are_newest_first_with_authors() {
        for (name, store) in backends() {
            let ana = user(store.as_ref(), "ana");
            let bob = store
                .create_user(
                    &NewUser::new("bob", "pw")
                        .with_avatar("B")
                        .with_color("from-emerald-500 to-teal-600"),
                )
                .unwrap();
            let p = post(store.as_ref(), ana.id, "thread");
            let first = comment(store.as_ref(), p.id, ana.id, "first");
            let second = comment(store.as_ref(), p.id, bob.id, "second");

            let comments = store.get_comments_by_post_id(p.id).unwrap();
            assert_eq!(comments.len(), 2, "{name}");
            assert_eq!(comments[0].comment, second, "{name}");
            assert_eq!(comments[1].comment, first, "{name}");

            let author = comments[0].author.as_ref().unwrap();
            assert_eq!(author.avatar, "B", "{name}");
            assert_eq!(author.color, "from-emerald-500 to-teal-600", "{name}");

            assert!(store.get_comments_by_post_id(p.id + 1).unwrap().is_empty(), "{name}");
        }
    }

    #[test]
    fn new_post_starts_with_zero_likes() {
        for (name, store) in backends() {
            let ana = user(store.as_ref(), "ana");
            let p = post(store.as_ref(), ana.id, "fresh");
            assert_eq!(p.likes, 0, "{name}");

            let fetched = store.get_post_by_id(p.id).unwrap();
            assert_eq!(fetched.post, p, "{name}");
            assert_eq!(fetched.author.unwrap().username, "ana", "{name}");
            assert!(matches!(store.get_post_by_id(p.id + 1), Err(StoreError::NotFound)), "{name}");
        }
    }

    #[test]
    fn sequential_likes_add_exactly_one_each() {
        for (name, store) in backends() {
            let ana = user(store.as_ref(), "ana");
            let p = post(store.as_ref(), ana.id, "liked");

            for expected in 1..=5 {
                assert_eq!(store.like_post(p.id).unwrap(), expected, "{name}");
            }
            assert_eq!(store.get_post_by_id(p.id).unwrap().post.likes, 5, "{name}");
        }
    }

    #[test]
    fn liking_a_missing_post_changes_nothing() {
        for (name, store) in backends() {
            assert!(matches!(store.like_post(42), Err(StoreError::NotFound)), "{name}");
            assert!(store.get_posts(20).unwrap().is_empty(), "{name}");
        }
    }

    #[test]
    fn concurrent_likes_are_not_lost() {
        const THREADS: i64 = 8;
        const PER_THREAD: i64 = 25;

        for (name, store) in backends() {
            let ana = user(store.as_ref(), "ana");
            let p = post(store.as_ref(), ana.id, "hot");

            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    let store = Arc::clone(&store);
                    std::thread::spawn(move || {
                        for _ in 0..PER_THREAD {
                            store.like_post(p.id).unwrap();
                        }
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }

            assert_eq!(
                store.get_post_by_id(p.id).unwrap().post.likes,
                THREADS * PER_THREAD,
                "{name}"
            );
        }
    }

    #[test]
    fn dangling_user_reads_as_missing_author() {
        for (name, store) in backends() {
            let msg = message(store.as_ref(), 404, "orphan");
            let p = post(store.as_ref(), 404, "orphan post");

            let listed = store.get_messages(50).unwrap();
            assert_eq!(listed.len(), 1, "{name}");
            assert_eq!(listed[0].message, msg, "{name}");
            assert!(listed[0].author.is_none(), "{name}");

            assert!(store.get_post_by_id(p.id).unwrap().author.is_none(), "{name}");
        }
    }

    #[test]
    fn health_check_succeeds() {
        for (name, store) in backends() {
            store.health_check().unwrap_or_else(|e| panic!("{name}: {e}"));
        }
    }
}
