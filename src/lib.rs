//! Clowder - a terminal console for the Spy Cat Agency API.
//!
//! This library provides the building blocks for the `clowder` binary:
//! the HTTP API client, the wire-level data model, and the TUI itself
//! (local store, form drafts, event loop, and views).

pub mod api;
pub mod cli;
pub mod models;
pub mod tui;

/// Library-level error type for clowder operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Api(#[from] api::ApiError),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for clowder operations.
pub type Result<T> = std::result::Result<T, Error>;
