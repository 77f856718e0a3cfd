/// The fetch seam every upstream feed goes through.
pub mod api;

/// Environment-derived run configuration, read once at start-up.
pub mod config;

/// Digest rendering; pure text assembly.
pub mod digest;

/// Upstream feeds (quotes, news) and their deserialized shapes.
pub mod schema;

/// Delivery to the Telegram Bot API.
pub mod telegram;
