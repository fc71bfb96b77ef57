//! Shaping store rows into API views.
//!
//! Every view goes through [`format_timestamp`] so messages, posts and
//! comments render "time ago" identically.

use cutbar_shared::format_timestamp;
use cutbar_shared::views::{CommentView, MessageView, PostDetailView, PostView, UserView};
use cutbar_store::{CommentWithAuthor, MessageWithAuthor, PostWithAuthor, User};

struct AuthorFields {
    author: Option<String>,
    avatar: Option<String>,
    color: Option<String>,
}

impl From<Option<User>> for AuthorFields {
    fn from(user: Option<User>) -> Self {
        match user {
            Some(u) => Self {
                author: Some(u.username),
                avatar: Some(u.avatar),
                color: Some(u.color),
            },
            None => Self {
                author: None,
                avatar: None,
                color: None,
            },
        }
    }
}

pub fn message_view(row: MessageWithAuthor) -> MessageView {
    let AuthorFields { author, avatar, color } = AuthorFields::from(row.author);
    MessageView {
        id: row.message.id.to_string(),
        content: row.message.content,
        timestamp: format_timestamp(row.message.timestamp),
        author,
        avatar,
        color,
    }
}

pub fn post_view(row: PostWithAuthor) -> PostView {
    let AuthorFields { author, avatar, color } = AuthorFields::from(row.author);
    PostView {
        id: row.post.id.to_string(),
        title: row.post.title,
        content: row.post.content,
        timestamp: format_timestamp(row.post.timestamp),
        author,
        avatar,
        color,
        likes: row.post.likes,
        comment_count: row.comment_count,
    }
}

pub fn comment_view(row: CommentWithAuthor) -> CommentView {
    let AuthorFields { author, avatar, color } = AuthorFields::from(row.author);
    CommentView {
        id: row.comment.id.to_string(),
        content: row.comment.content,
        timestamp: format_timestamp(row.comment.timestamp),
        author,
        avatar,
        color,
    }
}

pub fn post_detail_view(post: PostWithAuthor, comments: Vec<CommentWithAuthor>) -> PostDetailView {
    PostDetailView {
        post: post_view(post),
        comments: comments.into_iter().map(comment_view).collect(),
    }
}

pub fn user_view(user: User) -> UserView {
    UserView {
        id: user.id.to_string(),
        username: user.username,
        avatar: user.avatar,
        color: user.color,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use cutbar_store::Message;

    use super::*;

    fn ana() -> User {
        User {
            id: 3,
            username: "ana".into(),
            password: "pw".into(),
            avatar: "A".into(),
            color: "from-pink-500 to-rose-500".into(),
        }
    }

    #[test]
    fn message_view_denormalizes_author() {
        let view = message_view(MessageWithAuthor {
            message: Message {
                id: 12,
                content: "gm".into(),
                user_id: 3,
                timestamp: Utc::now() - Duration::minutes(5),
            },
            author: Some(ana()),
        });

        assert_eq!(view.id, "12");
        assert_eq!(view.timestamp, "5 minutes ago");
        assert_eq!(view.author.as_deref(), Some("ana"));
        assert_eq!(view.avatar.as_deref(), Some("A"));
        assert_eq!(view.color.as_deref(), Some("from-pink-500 to-rose-500"));
    }

    #[test]
    fn user_view_drops_password() {
        let json = serde_json::to_value(user_view(ana())).unwrap();
        assert_eq!(json["id"], "3");
        assert!(json.get("password").is_none());
    }
}
