use rusqlite::params;

use crate::database::{now, timestamp_from_sql, timestamp_to_sql, Database};
use crate::error::Result;
use crate::models::{Message, MessageWithAuthor, NewMessage};
use crate::users::{joined_user, USER_COLUMNS};

impl Database {
    /// The most recent `limit` messages with their authors, oldest first.
    ///
    /// The window is selected newest-first and then reversed, so the caller
    /// can render it top to bottom in chronological order.
    pub fn get_messages(&self, limit: u32) -> Result<Vec<MessageWithAuthor>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT m.id, m.content, m.user_id, m.timestamp, {USER_COLUMNS}
             FROM messages m
             LEFT JOIN users u ON u.id = m.user_id
             ORDER BY m.timestamp DESC, m.id DESC
             LIMIT ?1"
        ))?;

        let rows = stmt.query_map(params![limit], |row| {
            Ok(MessageWithAuthor {
                message: row_to_message(row)?,
                author: joined_user(row, 4)?,
            })
        })?;

        let mut messages = Vec::new();
        for row in rows {
            messages.push(row?);
        }
        messages.reverse();
        Ok(messages)
    }

    /// Insert a message stamped with the current time.
    ///
    /// `user_id` is not checked here; callers resolve the user first.
    pub fn create_message(&self, message: &NewMessage) -> Result<Message> {
        let conn = self.conn()?;
        // Stamped under the lock so timestamps follow insertion order.
        let timestamp = now();
        conn.execute(
            "INSERT INTO messages (content, user_id, timestamp) VALUES (?1, ?2, ?3)",
            params![message.content, message.user_id, timestamp_to_sql(&timestamp)],
        )?;

        Ok(Message {
            id: conn.last_insert_rowid(),
            content: message.content.clone(),
            user_id: message.user_id,
            timestamp,
        })
    }
}

fn row_to_message(row: &rusqlite::Row<'_>) -> rusqlite::Result<Message> {
    let ts_str: String = row.get(3)?;

    Ok(Message {
        id: row.get(0)?,
        content: row.get(1)?,
        user_id: row.get(2)?,
        timestamp: timestamp_from_sql(3, &ts_str)?,
    })
}
