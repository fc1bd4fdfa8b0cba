//! Messages delivered from background tasks to the event loop

use crate::api::ApiError;
use crate::state::{QueryKey, SubmissionResult, User};

/// Completion of work the event loop spawned
#[derive(Debug)]
pub enum AppEvent {
    /// The user list fetch finished
    UsersLoaded(Result<Vec<User>, ApiError>),
    /// A form mutation finished
    Submitted(SubmissionResult),
    /// Cached data went stale and should be fetched again
    Invalidated(QueryKey),
}
