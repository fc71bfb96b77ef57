//! In-process [`Storage`] backend.
//!
//! Mirrors the SQLite semantics (unique usernames, left-joined authors,
//! listing order, atomic likes) without touching disk. Used by tests and by
//! the server when no database file is wanted.

use std::sync::{Mutex, MutexGuard};

use crate::database::now;
use crate::error::{Result, StoreError};
use crate::models::{
    Comment, CommentWithAuthor, Message, MessageWithAuthor, NewComment, NewMessage, NewPost,
    NewUser, Post, PostWithAuthor, User,
};
use crate::storage::Storage;

/// Rows are never deleted, so each table's next id is its length plus one.
/// Every `Vec` is kept in insertion order.
#[derive(Default)]
struct Tables {
    users: Vec<User>,
    messages: Vec<Message>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
}

impl Tables {
    fn author(&self, user_id: i64) -> Option<User> {
        self.users.iter().find(|u| u.id == user_id).cloned()
    }

    fn comment_count(&self, post_id: i64) -> i64 {
        self.comments.iter().filter(|c| c.post_id == post_id).count() as i64
    }

    fn with_author(&self, post: &Post) -> PostWithAuthor {
        PostWithAuthor {
            post: post.clone(),
            author: self.author(post.user_id),
            comment_count: self.comment_count(post.id),
        }
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    tables: Mutex<Tables>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>> {
        self.tables.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

impl Storage for MemoryStorage {
    fn get_user(&self, id: i64) -> Result<User> {
        self.tables()?.author(id).ok_or(StoreError::NotFound)
    }

    fn get_user_by_username(&self, username: &str) -> Result<User> {
        self.tables()?
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn create_user(&self, user: &NewUser) -> Result<User> {
        let mut tables = self.tables()?;
        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::UsernameTaken(user.username.clone()));
        }

        let user = User {
            id: tables.users.len() as i64 + 1,
            username: user.username.clone(),
            password: user.password.clone(),
            avatar: user.avatar.clone(),
            color: user.color.clone(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    fn get_messages(&self, limit: u32) -> Result<Vec<MessageWithAuthor>> {
        let tables = self.tables()?;
        let skip = tables.messages.len().saturating_sub(limit as usize);

        Ok(tables.messages[skip..]
            .iter()
            .map(|m| MessageWithAuthor {
                message: m.clone(),
                author: tables.author(m.user_id),
            })
            .collect())
    }

    fn create_message(&self, message: &NewMessage) -> Result<Message> {
        let mut tables = self.tables()?;
        let message = Message {
            id: tables.messages.len() as i64 + 1,
            content: message.content.clone(),
            user_id: message.user_id,
            timestamp: now(),
        };
        tables.messages.push(message.clone());
        Ok(message)
    }

    fn get_posts(&self, limit: u32) -> Result<Vec<PostWithAuthor>> {
        let tables = self.tables()?;
        Ok(tables
            .posts
            .iter()
            .rev()
            .take(limit as usize)
            .map(|p| tables.with_author(p))
            .collect())
    }

    fn create_post(&self, post: &NewPost) -> Result<Post> {
        let mut tables = self.tables()?;
        let post = Post {
            id: tables.posts.len() as i64 + 1,
            title: post.title.clone(),
            content: post.content.clone(),
            user_id: post.user_id,
            timestamp: now(),
            likes: 0,
        };
        tables.posts.push(post.clone());
        Ok(post)
    }

    fn get_post_by_id(&self, id: i64) -> Result<PostWithAuthor> {
        let tables = self.tables()?;
        tables
            .posts
            .iter()
            .find(|p| p.id == id)
            .map(|p| tables.with_author(p))
            .ok_or(StoreError::NotFound)
    }

    fn get_comments_by_post_id(&self, post_id: i64) -> Result<Vec<CommentWithAuthor>> {
        let tables = self.tables()?;
        Ok(tables
            .comments
            .iter()
            .rev()
            .filter(|c| c.post_id == post_id)
            .map(|c| CommentWithAuthor {
                comment: c.clone(),
                author: tables.author(c.user_id),
            })
            .collect())
    }

    fn create_comment(&self, comment: &NewComment) -> Result<Comment> {
        let mut tables = self.tables()?;
        let comment = Comment {
            id: tables.comments.len() as i64 + 1,
            content: comment.content.clone(),
            post_id: comment.post_id,
            user_id: comment.user_id,
            timestamp: now(),
        };
        tables.comments.push(comment.clone());
        Ok(comment)
    }

    fn count_comments(&self, post_id: i64) -> Result<i64> {
        let tables = self.tables()?;
        if !tables.posts.iter().any(|p| p.id == post_id) {
            return Err(StoreError::NotFound);
        }
        Ok(tables.comment_count(post_id))
    }

    fn like_post(&self, post_id: i64) -> Result<i64> {
        let mut tables = self.tables()?;
        let post = tables
            .posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or(StoreError::NotFound)?;
        post.likes += 1;
        Ok(post.likes)
    }

    fn health_check(&self) -> Result<()> {
        self.tables().map(|_| ())
    }
}
