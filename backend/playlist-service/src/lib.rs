//! Playlist Service
//!
//! Aggregation gateway in front of the cloud VOD API: fans out to the
//! upstream playlist, image, and video operations, mints per-video playback
//! credentials, and merges the results into client-facing playlist
//! responses.

pub mod cache;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

// Public re-exports
pub use config::Config;
pub use error::{AppError, Result};
