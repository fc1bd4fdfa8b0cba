//! HTTP client for the JSON placeholder API
//!
//! Reads go through [`ApiClient::fetch_data`], writes through
//! [`ApiClient::post_json`]. Both map non-success statuses onto
//! [`ApiError`] so callers never look at raw responses.

use super::error::ApiError;
use super::traits::ApiClientTrait;
use crate::state::{FieldIssue, User};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default API address
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const USERS_PATH: &str = "users";
const POSTS_PATH: &str = "posts";

/// Body of a create-post request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePostDto {
    pub title: String,
    pub body: String,
}

/// Field-level rejection body: `{"errors":[{"path":[..],"message":..}]}`
#[derive(Debug, Deserialize)]
struct RejectionBody {
    errors: Vec<FieldIssue>,
}

/// Client for the remote API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET a JSON resource
    pub async fn fetch_data<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, %status, "fetch failed");
            return Err(ApiError::FetchFailed {
                status: status.as_u16(),
            });
        }

        Ok(response.json::<T>().await?)
    }

    /// POST a JSON body, discarding the response body on success
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");

        // `json` sets `Content-Type: application/json`
        let response = self.http.post(&url).json(body).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        if matches!(
            status,
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY
        ) {
            if let Ok(rejection) = response.json::<RejectionBody>().await {
                if !rejection.errors.is_empty() {
                    return Err(ApiError::Rejected(rejection.errors));
                }
            }
        }

        tracing::warn!(%url, %status, "write failed");
        Err(ApiError::Status {
            status: status.as_u16(),
        })
    }
}

#[async_trait]
impl ApiClientTrait for ApiClient {
    async fn fetch_users(&self) -> Result<Vec<User>, ApiError> {
        self.fetch_data(USERS_PATH).await
    }

    async fn create_post(&self, post: &CreatePostDto) -> Result<(), ApiError> {
        self.post_json(POSTS_PATH, post).await
    }
}
