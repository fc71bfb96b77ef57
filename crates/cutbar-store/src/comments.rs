use rusqlite::params;

use crate::database::{now, timestamp_from_sql, timestamp_to_sql, Database};
use crate::error::Result;
use crate::models::{Comment, CommentWithAuthor, NewComment};
use crate::users::{joined_user, USER_COLUMNS};

impl Database {
    /// Comments on `post_id` with their authors, newest first.
    pub fn get_comments_by_post_id(&self, post_id: i64) -> Result<Vec<CommentWithAuthor>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT c.id, c.content, c.post_id, c.user_id, c.timestamp, {USER_COLUMNS}
             FROM comments c
             LEFT JOIN users u ON u.id = c.user_id
             WHERE c.post_id = ?1
             ORDER BY c.timestamp DESC, c.id DESC"
        ))?;

        let rows = stmt.query_map(params![post_id], |row| {
            Ok(CommentWithAuthor {
                comment: row_to_comment(row)?,
                author: joined_user(row, 5)?,
            })
        })?;

        let mut comments = Vec::new();
        for row in rows {
            comments.push(row?);
        }
        Ok(comments)
    }

    /// Insert a comment stamped with the current time. Neither `post_id` nor
    /// `user_id` is checked here.
    pub fn create_comment(&self, comment: &NewComment) -> Result<Comment> {
        let conn = self.conn()?;
        let timestamp = now();
        conn.execute(
            "INSERT INTO comments (content, post_id, user_id, timestamp) VALUES (?1, ?2, ?3, ?4)",
            params![
                comment.content,
                comment.post_id,
                comment.user_id,
                timestamp_to_sql(&timestamp),
            ],
        )?;

        Ok(Comment {
            id: conn.last_insert_rowid(),
            content: comment.content.clone(),
            post_id: comment.post_id,
            user_id: comment.user_id,
            timestamp,
        })
    }
}

fn row_to_comment(row: &rusqlite::Row<'_>) -> rusqlite::Result<Comment> {
    let ts_str: String = row.get(4)?;

    Ok(Comment {
        id: row.get(0)?,
        content: row.get(1)?,
        post_id: row.get(2)?,
        user_id: row.get(3)?,
        timestamp: timestamp_from_sql(4, &ts_str)?,
    })
}
