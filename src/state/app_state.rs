//! Application state definitions

use super::query::QueryState;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a toast stays on screen
pub const TOAST_TTL: Duration = Duration::from_secs(3);

/// User record returned by the users endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
}

/// Which pane receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Form,
    UserList,
}

impl Focus {
    pub fn toggle(&mut self) {
        *self = match self {
            Self::Form => Self::UserList,
            Self::UserList => Self::Form,
        }
    }
}

/// Short-lived notification
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub shown_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            shown_at: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.shown_at.elapsed() >= TOAST_TTL
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Data
    pub users: QueryState<Vec<User>>,

    // Selection
    pub focus: Focus,
    pub selected_user: usize,

    // Feedback
    pub toast: Option<Toast>,
    pub errors: VecDeque<String>,
}

impl AppState {
    /// Move user selection down
    pub fn move_selection_down(&mut self) {
        let count = self.user_count();
        if count > 0 && self.selected_user < count - 1 {
            self.selected_user += 1;
        }
    }

    /// Move user selection up
    pub fn move_selection_up(&mut self) {
        self.selected_user = self.selected_user.saturating_sub(1);
    }

    pub fn user_count(&self) -> usize {
        self.users.data().map_or(0, Vec::len)
    }

    /// Store fetched users, keeping the selection in range
    pub fn set_users(&mut self, users: Vec<User>) {
        self.selected_user = self.selected_user.min(users.len().saturating_sub(1));
        self.users = QueryState::Ready(users);
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    /// Drop the toast once it has been visible long enough
    pub fn expire_toast(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push_back(message.into());
    }

    /// Error currently shown in the dialog
    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }
}
