//! CRUD operations for [`User`] records.

use rusqlite::{ffi, params};

use crate::database::{not_found, Database};
use crate::error::{Result, StoreError};
use crate::models::{NewUser, User};

/// Column list matching [`row_to_user`] / [`joined_user`].
pub(crate) const USER_COLUMNS: &str = "u.id, u.username, u.password, u.avatar, u.color";

impl Database {
    pub fn get_user(&self, id: i64) -> Result<User> {
        self.conn()?
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users u WHERE u.id = ?1"),
                params![id],
                |row| row_to_user(row, 0),
            )
            .map_err(not_found)
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<User> {
        self.conn()?
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users u WHERE u.username = ?1"),
                params![username],
                |row| row_to_user(row, 0),
            )
            .map_err(not_found)
    }

    /// Insert a new user. Fails with [`StoreError::UsernameTaken`] when the
    /// username already exists.
    pub fn create_user(&self, user: &NewUser) -> Result<User> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO users (username, password, avatar, color) VALUES (?1, ?2, ?3, ?4)",
            params![user.username, user.password, user.avatar, user.color],
        )
        .map_err(|e| match e {
            rusqlite::Error::SqliteFailure(ref err, _)
                if err.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                StoreError::UsernameTaken(user.username.clone())
            }
            other => StoreError::Sqlite(other),
        })?;

        let id = conn.last_insert_rowid();
        tracing::debug!(id, username = %user.username, "user created");

        Ok(User {
            id,
            username: user.username.clone(),
            password: user.password.clone(),
            avatar: user.avatar.clone(),
            color: user.color.clone(),
        })
    }
}

/// Map five user columns starting at `start`.
pub(crate) fn row_to_user(row: &rusqlite::Row<'_>, start: usize) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(start)?,
        username: row.get(start + 1)?,
        password: row.get(start + 2)?,
        avatar: row.get(start + 3)?,
        color: row.get(start + 4)?,
    })
}

/// Map the LEFT JOINed user columns starting at `start`; a NULL id means the
/// owning user row does not exist.
pub(crate) fn joined_user(row: &rusqlite::Row<'_>, start: usize) -> rusqlite::Result<Option<User>> {
    let id: Option<i64> = row.get(start)?;
    match id {
        Some(_) => row_to_user(row, start).map(Some),
        None => Ok(None),
    }
}
