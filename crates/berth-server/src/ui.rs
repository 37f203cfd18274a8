//! Embedded browser UI.
//!
//! A single static page, no build step and no CDN dependencies; all data
//! flows through the JSON API.

/// The page served at `/`.
pub const INDEX_HTML: &str = include_str!("../assets/index.html");
