//! v001 -- Initial schema creation.
//!
//! Creates the chat tables: `users` and `messages`.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
///
/// `messages.user_id` carries no FOREIGN KEY clause: callers check the user
/// before inserting and reads use a LEFT JOIN.
const UP_SQL: &str = r#"
-- ----------------------------------------------------------------
-- Users
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS users (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,
    avatar   TEXT NOT NULL DEFAULT 'U',
    color    TEXT NOT NULL DEFAULT 'from-indigo-500 to-purple-600'
);

-- ----------------------------------------------------------------
-- Messages
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS messages (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    content   TEXT NOT NULL,
    user_id   INTEGER NOT NULL,               -- -> users(id)
    timestamp TEXT NOT NULL                   -- RFC-3339, UTC, microseconds
);

CREATE INDEX IF NOT EXISTS idx_messages_ts ON messages(timestamp DESC, id DESC);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
