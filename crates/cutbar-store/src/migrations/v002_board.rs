//! v002 -- Discussion board: `posts` and `comments`.

use rusqlite::Connection;

const UP_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS posts (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    title     TEXT NOT NULL,
    content   TEXT NOT NULL,
    user_id   INTEGER NOT NULL,               -- -> users(id)
    timestamp TEXT NOT NULL,
    likes     INTEGER NOT NULL DEFAULT 0 CHECK (likes >= 0)
);

CREATE INDEX IF NOT EXISTS idx_posts_ts ON posts(timestamp DESC, id DESC);

CREATE TABLE IF NOT EXISTS comments (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    content   TEXT NOT NULL,
    post_id   INTEGER NOT NULL,               -- -> posts(id)
    user_id   INTEGER NOT NULL,               -- -> users(id)
    timestamp TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_comments_post_ts ON comments(post_id, timestamp DESC, id DESC);
"#;

pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
