//! Trait abstraction for the API client to enable mocking in tests

use super::client::CreatePostDto;
use super::error::ApiError;
use crate::state::User;
use async_trait::async_trait;

/// Remote operations the application depends on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiClientTrait: Send + Sync {
    /// Fetch the user list
    async fn fetch_users(&self) -> Result<Vec<User>, ApiError>;

    /// Create a new post
    async fn create_post(&self, post: &CreatePostDto) -> Result<(), ApiError>;
}
