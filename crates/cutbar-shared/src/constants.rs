/// Application name
pub const APP_NAME: &str = "CUTBAR FINANCE";

/// Number of chat messages returned by the message listing
pub const DEFAULT_MESSAGE_LIMIT: u32 = 50;

/// Number of posts returned by the board listing
pub const DEFAULT_POST_LIMIT: u32 = 20;

/// Avatar label given to users created without one
pub const DEFAULT_AVATAR: &str = "U";

/// Display gradient given to users created without one
pub const DEFAULT_COLOR: &str = "from-indigo-500 to-purple-600";

/// Default HTTP API port
pub const DEFAULT_HTTP_PORT: u16 = 5000;
