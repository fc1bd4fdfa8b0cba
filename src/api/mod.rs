//! API client module for HTTP communication

mod client;
mod error;
mod traits;

pub use client::{ApiClient, CreatePostDto, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::ApiError;
pub use traits::ApiClientTrait;

#[cfg(test)]
pub use traits::MockApiClientTrait;
