/// Pulse Service Library
///
/// A social backend: ephemeral 24-hour stories with per-viewer tracking,
/// short posts with likes/comments/one-level reposts, and hashtag search
/// with a trending ranking, all over PostgreSQL.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `services`: Business logic layer
/// - `db`: Database access layer and repositories
/// - `models`: Row and view types
/// - `auth`: Bearer-token extraction
/// - `jobs`: Periodic story expiry sweep
/// - `error`: Error types and handling
/// - `config`: Configuration management
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod jobs;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
