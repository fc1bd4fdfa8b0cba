//! Error types for API calls

use crate::state::FieldIssue;
use thiserror::Error;

/// Errors returned by the API client
#[derive(Debug, Error)]
pub enum ApiError {
    /// A GET answered with a non-success status
    #[error("Failed to fetch data... (status {status})")]
    FetchFailed { status: u16 },

    /// The server rejected individual fields of the request body
    #[error("request rejected with {} field error(s)", .0.len())]
    Rejected(Vec<FieldIssue>),

    /// A write answered with a non-success status
    #[error("server responded with status {status}")]
    Status { status: u16 },

    /// Connection, timeout or decoding failure
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}
