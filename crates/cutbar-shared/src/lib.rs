//! # cutbar-shared
//!
//! Types and helpers shared between the store and the HTTP server: the JSON
//! view records sent to the chat / board front end, and the relative
//! timestamp formatter every view uses.

pub mod constants;
pub mod time;
pub mod views;

pub use time::{format_timestamp, format_timestamp_at};
