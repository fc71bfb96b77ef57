//! JSON view records returned by the REST API.
//!
//! A view is a stored entity with its owner's display fields denormalized in
//! and its timestamp already rendered as a relative string. Ids are sent as
//! strings. When the owning user row is missing, `author`, `avatar` and
//! `color` are `null`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    pub id: String,
    pub content: String,
    pub timestamp: String,
    pub author: Option<String>,
    pub avatar: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub id: String,
    pub title: String,
    pub content: String,
    pub timestamp: String,
    pub author: Option<String>,
    pub avatar: Option<String>,
    pub color: Option<String>,
    pub likes: i64,
    pub comment_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: String,
    pub content: String,
    pub timestamp: String,
    pub author: Option<String>,
    pub avatar: Option<String>,
    pub color: Option<String>,
}

/// A post together with its comments, newest comment first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailView {
    #[serde(flatten)]
    pub post: PostView,
    pub comments: Vec<CommentView>,
}

/// Public projection of a user. The credential never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub username: String,
    pub avatar: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LikeResponse {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_detail_flattens_post_fields() {
        let detail = PostDetailView {
            post: PostView {
                id: "7".into(),
                title: "Q3 numbers".into(),
                content: "up and to the right".into(),
                timestamp: "Just now".into(),
                author: Some("ana".into()),
                avatar: Some("A".into()),
                color: Some("from-pink-500 to-rose-500".into()),
                likes: 2,
                comment_count: 0,
            },
            comments: vec![],
        };

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["id"], "7");
        assert_eq!(json["commentCount"], 0);
        assert_eq!(json["likes"], 2);
        assert!(json["comments"].as_array().unwrap().is_empty());
        assert!(json.get("post").is_none());
    }

    #[test]
    fn missing_author_serializes_as_null() {
        let view = MessageView {
            id: "1".into(),
            content: "hi".into(),
            timestamp: "Just now".into(),
            author: None,
            avatar: None,
            color: None,
        };

        let json = serde_json::to_value(&view).unwrap();
        assert!(json["author"].is_null());
        assert!(json["avatar"].is_null());
        assert!(json["color"].is_null());
    }
}
