//! Query keys, fetch state and cache invalidation

use crate::events::AppEvent;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::mpsc::UnboundedSender;

/// Identifies a piece of fetched data that can be invalidated
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QueryKey(String);

impl QueryKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key of the user list
pub fn users_key() -> QueryKey {
    QueryKey::new("users")
}

/// Load state of one query
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QueryState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> QueryState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }
}

/// Marks cached data stale so it gets fetched again
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheInvalidator: Send + Sync {
    async fn invalidate(&self, keys: &[QueryKey]) -> Result<()>;
}

/// Invalidator that hands stale keys to the event loop, which refetches them
#[derive(Debug, Clone)]
pub struct QueryClient {
    events: UnboundedSender<AppEvent>,
}

impl QueryClient {
    pub fn new(events: UnboundedSender<AppEvent>) -> Self {
        Self { events }
    }
}

#[async_trait]
impl CacheInvalidator for QueryClient {
    async fn invalidate(&self, keys: &[QueryKey]) -> Result<()> {
        for key in keys {
            tracing::debug!(%key, "invalidating query");
            self.events
                .send(AppEvent::Invalidated(key.clone()))
                .map_err(|_| anyhow!("event loop has shut down, cannot invalidate {key}"))?;
        }
        Ok(())
    }
}
