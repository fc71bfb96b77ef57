//! Domain model structs persisted in the SQLite database.
//!
//! Ids are SQLite `INTEGER PRIMARY KEY` values assigned on insert; timestamps
//! are assigned by the store, never by the caller. The `New*` structs carry
//! only the caller-supplied fields of an insert.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cutbar_shared::constants::{DEFAULT_AVATAR, DEFAULT_COLOR};

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A registered community member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    /// Unique, non-empty login / display name.
    pub username: String,
    /// Opaque credential. Stored as given.
    pub password: String,
    /// Short display label shown in the avatar bubble.
    pub avatar: String,
    /// Display gradient identifier, e.g. `from-indigo-500 to-purple-600`.
    pub color: String,
}

/// Fields for [`Storage::create_user`](crate::Storage::create_user).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub avatar: String,
    pub color: String,
}

impl NewUser {
    /// A new user with the default avatar and colour.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            avatar: DEFAULT_AVATAR.to_string(),
            color: DEFAULT_COLOR.to_string(),
        }
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = avatar.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// A chat stream message. Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub id: i64,
    pub content: String,
    pub user_id: i64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub content: String,
    pub user_id: i64,
}

// ---------------------------------------------------------------------------
// Post
// ---------------------------------------------------------------------------

/// A board post. `likes` only ever grows, one per like.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub user_id: i64,
    pub timestamp: DateTime<Utc>,
    pub likes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub user_id: i64,
}

// ---------------------------------------------------------------------------
// Comment
// ---------------------------------------------------------------------------

/// A comment on a board post. Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub post_id: i64,
    pub user_id: i64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub content: String,
    pub post_id: i64,
    pub user_id: i64,
}

// ---------------------------------------------------------------------------
// Joined rows
// ---------------------------------------------------------------------------

/// A message left-joined with its author. `author` is `None` when
/// `message.user_id` does not resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageWithAuthor {
    pub message: Message,
    pub author: Option<User>,
}

/// A post left-joined with its author, plus the number of comments on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostWithAuthor {
    pub post: Post,
    pub author: Option<User>,
    pub comment_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentWithAuthor {
    pub comment: Comment,
    pub author: Option<User>,
}
