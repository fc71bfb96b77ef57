//! # cutbar-store
//!
//! Persistence and data access for the CUTBAR FINANCE chat and board.
//!
//! The crate exposes a [`Database`] handle that wraps a SQLite
//! `rusqlite::Connection` and provides typed CRUD helpers for every domain
//! model, plus the join and counting rules the API relies on: authors are
//! left-joined onto every read, messages list oldest first, posts and
//! comments newest first, and like counts are incremented atomically.
//!
//! Request handlers depend on the [`Storage`] trait rather than on
//! [`Database`] directly; [`MemoryStorage`] is a drop-in in-process backend.

pub mod comments;
pub mod database;
pub mod memory;
pub mod messages;
pub mod migrations;
pub mod models;
pub mod posts;
pub mod storage;
pub mod users;

mod error;

pub use database::Database;
pub use error::{Result, StoreError};
pub use memory::MemoryStorage;
pub use models::*;
pub use storage::Storage;
