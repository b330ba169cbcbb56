pub mod auth;
pub mod error;
pub mod friends;
pub mod images;
pub mod messages;
pub mod middleware;
pub mod posts;
pub mod profile;
pub mod router;

/// Sentinel author name used when a joined account record is missing.
pub const UNKNOWN_USER: &str = "unknown user";
