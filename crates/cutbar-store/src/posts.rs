//! CRUD operations for [`Post`] records, including the like counter and the
//! derived comment count.

use rusqlite::params;

use crate::database::{not_found, now, timestamp_from_sql, timestamp_to_sql, Database};
use crate::error::Result;
use crate::models::{NewPost, Post, PostWithAuthor};
use crate::users::{joined_user, USER_COLUMNS};

/// Number of comments on post `p`. The one definition of the derived
/// counter; every read path that reports `comment_count` selects this.
const COMMENT_COUNT_SQL: &str = "(SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id)";

impl Database {
    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Insert a post with zero likes, stamped with the current time.
    pub fn create_post(&self, post: &NewPost) -> Result<Post> {
        let conn = self.conn()?;
        let timestamp = now();
        conn.execute(
            "INSERT INTO posts (title, content, user_id, timestamp, likes)
             VALUES (?1, ?2, ?3, ?4, 0)",
            params![post.title, post.content, post.user_id, timestamp_to_sql(&timestamp)],
        )?;

        Ok(Post {
            id: conn.last_insert_rowid(),
            title: post.title.clone(),
            content: post.content.clone(),
            user_id: post.user_id,
            timestamp,
            likes: 0,
        })
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// The most recent `limit` posts with authors and comment counts,
    /// newest first.
    pub fn get_posts(&self, limit: u32) -> Result<Vec<PostWithAuthor>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&select_posts(
            "ORDER BY p.timestamp DESC, p.id DESC LIMIT ?1",
        ))?;

        let rows = stmt.query_map(params![limit], row_to_post_with_author)?;

        let mut posts = Vec::new();
        for row in rows {
            posts.push(row?);
        }
        Ok(posts)
    }

    pub fn get_post_by_id(&self, id: i64) -> Result<PostWithAuthor> {
        self.conn()?
            .query_row(
                &select_posts("WHERE p.id = ?1"),
                params![id],
                row_to_post_with_author,
            )
            .map_err(not_found)
    }

    /// Comment count for one post. [`StoreError::NotFound`] if the post
    /// does not exist.
    ///
    /// [`StoreError::NotFound`]: crate::StoreError::NotFound
    pub fn count_comments(&self, post_id: i64) -> Result<i64> {
        self.conn()?
            .query_row(
                &format!("SELECT {COMMENT_COUNT_SQL} FROM posts p WHERE p.id = ?1"),
                params![post_id],
                |row| row.get(0),
            )
            .map_err(not_found)
    }

    // ------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------

    /// Add one like and return the new total.
    ///
    /// A single `UPDATE ... RETURNING` statement, so concurrent likes never
    /// lose an increment.
    pub fn like_post(&self, post_id: i64) -> Result<i64> {
        let likes = self
            .conn()?
            .query_row(
                "UPDATE posts SET likes = likes + 1 WHERE id = ?1 RETURNING likes",
                params![post_id],
                |row| row.get(0),
            )
            .map_err(not_found)?;

        tracing::debug!(post_id, likes, "post liked");
        Ok(likes)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn select_posts(tail: &str) -> String {
    format!(
        "SELECT p.id, p.title, p.content, p.user_id, p.timestamp, p.likes,
                {COMMENT_COUNT_SQL}, {USER_COLUMNS}
         FROM posts p
         LEFT JOIN users u ON u.id = p.user_id
         {tail}"
    )
}

fn row_to_post_with_author(row: &rusqlite::Row<'_>) -> rusqlite::Result<PostWithAuthor> {
    let ts_str: String = row.get(4)?;

    let post = Post {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        user_id: row.get(3)?,
        timestamp: timestamp_from_sql(4, &ts_str)?,
        likes: row.get(5)?,
    };

    Ok(PostWithAuthor {
        post,
        comment_count: row.get(6)?,
        author: joined_user(row, 7)?,
    })
}
