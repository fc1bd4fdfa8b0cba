//! Application state and core logic

use crate::api::{ApiClient, ApiClientTrait};
use crate::config::TuiConfig;
use crate::events::AppEvent;
use crate::layout::{default_page, load_page, ComponentRegistry, LayoutResolver, RenderTree};
use crate::platform::{is_quit_key, is_submit_key};
use crate::state::{
    post_form, users_key, AppState, CacheInvalidator, Completion, Focus, FormRenderer, PostDraft,
    QueryClient, QueryState, SubmissionStatus, SubmitStep,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// The "Add a post" form
    pub post_form: FormRenderer<PostDraft>,
    /// Resolved page layout
    pub page: RenderTree,
    api: Arc<dyn ApiClientTrait>,
    /// Background tasks report back through this channel
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
    /// A users request is in flight
    fetching_users: bool,
    /// Users were invalidated while a request was in flight
    refetch_users: bool,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance from configuration
    pub fn new(config: &TuiConfig) -> Result<Self> {
        let api = ApiClient::new(config.api_base_url(), config.request_timeout())?;
        tracing::info!(base_url = api.base_url(), "using API");
        let page = Self::build_page(config)?;
        Ok(Self::with_parts(Arc::new(api), page))
    }

    /// Create an App around an existing API client and page
    pub fn with_parts(api: Arc<dyn ApiClientTrait>, page: RenderTree) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let invalidator: Arc<dyn CacheInvalidator> = Arc::new(QueryClient::new(events_tx.clone()));

        Self {
            state: AppState::default(),
            post_form: post_form(Arc::clone(&api), invalidator),
            page,
            api,
            events_tx,
            events_rx,
            fetching_users: false,
            refetch_users: false,
            quit: false,
        }
    }

    /// Resolve the configured page, or the built-in one
    fn build_page(config: &TuiConfig) -> Result<RenderTree> {
        let nodes = match &config.page_file {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading page layout");
                load_page(path)?
            }
            None => default_page(),
        };

        let tree = LayoutResolver::new(ComponentRegistry::global())
            .strict(config.strict_layout())
            .resolve_page(&nodes)?;
        for skipped in &tree.skipped {
            tracing::warn!(node = %skipped, "layout node has no renderer");
        }
        Ok(tree)
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn is_fetching_users(&self) -> bool {
        self.fetching_users
    }

    /// Fetch the user list in the background
    ///
    /// Data already on screen stays visible until the response arrives.
    pub fn fetch_users(&mut self) {
        if self.fetching_users {
            return;
        }
        self.start_users_request();
    }

    /// Mark users stale; a request already in flight may predate the change
    fn invalidate_users(&mut self) {
        if self.fetching_users {
            tracing::debug!("users invalidated during fetch, refetch queued");
            self.refetch_users = true;
        } else {
            self.start_users_request();
        }
    }

    fn start_users_request(&mut self) {
        self.fetching_users = true;
        if self.state.users.data().is_none() {
            self.state.users = QueryState::Loading;
        }

        let api = Arc::clone(&self.api);
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api.fetch_users().await;
            if events.send(AppEvent::UsersLoaded(result)).is_err() {
                tracing::debug!("event loop gone, dropping users response");
            }
        });
    }

    /// Start submitting the post form
    pub fn submit_post(&mut self) {
        match self.post_form.begin_submit() {
            SubmitStep::Blocked(_) | SubmitStep::Rejected => {}
            SubmitStep::Dispatched(pending) => {
                let events = self.events_tx.clone();
                tokio::spawn(async move {
                    let outcome = pending.run().await;
                    if events.send(AppEvent::Submitted(outcome)).is_err() {
                        tracing::debug!("event loop gone, dropping submission outcome");
                    }
                });
            }
        }
    }

    /// Drain events reported by background tasks
    pub fn poll_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::UsersLoaded(result) => {
                self.fetching_users = false;
                match result {
                    Ok(users) => {
                        tracing::debug!(count = users.len(), "users loaded");
                        self.state.set_users(users);
                    }
                    Err(error) => {
                        tracing::warn!("failed to fetch users: {error}");
                        self.state.push_error(format!("Could not load users: {error}"));
                        self.state.users = QueryState::Failed(error.to_string());
                    }
                }
                if std::mem::take(&mut self.refetch_users) {
                    self.start_users_request();
                }
            }
            AppEvent::Submitted(outcome) => match self.post_form.complete(outcome) {
                Completion::Succeeded => {
                    if let Some(message) = self.post_form.take_notification() {
                        self.state.show_toast(message);
                    }
                }
                Completion::Rejected | Completion::Failed | Completion::Ignored => {}
            },
            AppEvent::Invalidated(key) => {
                if key == users_key() {
                    self.invalidate_users();
                } else {
                    tracing::debug!(%key, "no query registered for invalidated key");
                }
            }
        }
    }

    /// Periodic housekeeping between frames
    pub fn tick(&mut self) {
        self.state.expire_toast();
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Handle error dialog dismissal first (modal)
        if self.state.current_error().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return;
        }

        if is_quit_key(&key) {
            self.quit = true;
            return;
        }

        if is_submit_key(&key) {
            self.submit_post();
            return;
        }

        match key.code {
            KeyCode::F(5) => {
                self.fetch_users();
                return;
            }
            KeyCode::Esc => {
                self.state.focus.toggle();
                return;
            }
            _ => {}
        }

        match self.state.focus {
            Focus::Form => self.handle_form_key(key),
            Focus::UserList => self.handle_user_list_key(key),
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        // The failure panel replaces the form until reset
        if self.post_form.status() == SubmissionStatus::Failed {
            if matches!(key.code, KeyCode::Char('r') | KeyCode::Enter) {
                self.post_form.reset();
            }
            return;
        }

        match key.code {
            KeyCode::Tab => self.post_form.next_field(),
            KeyCode::BackTab => self.post_form.prev_field(),
            KeyCode::Enter if self.post_form.is_submit_focused() => self.submit_post(),
            KeyCode::Enter if self.post_form.is_active_field_multiline() => {
                self.post_form.input_char('\n');
            }
            KeyCode::Enter => self.post_form.next_field(),
            KeyCode::Backspace => self.post_form.backspace(),
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.post_form.input_char(c);
            }
            _ => {}
        }
    }

    fn handle_user_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.state.move_selection_down(),
            KeyCode::Up | KeyCode::Char('k') => self.state.move_selection_up(),
            KeyCode::Tab | KeyCode::BackTab => self.state.focus.toggle(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, MockApiClientTrait};
    use crate::state::{FieldIssue, User};
    use pretty_assertions::assert_eq;

    fn user(id: u64) -> User {
        User {
            id,
            name: format!("User {id}"),
            username: format!("user{id}"),
            email: format!("user{id}@example.com"),
            phone: "010-692-6593".to_string(),
        }
    }

    fn app_with(api: MockApiClientTrait) -> App {
        App::with_parts(Arc::new(api), RenderTree::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    /// Wait for the next background event and apply it
    async fn pump(app: &mut App) {
        let event = app.events_rx.recv().await.unwrap();
        app.handle_event(event);
    }

    fn fill_valid_post(app: &mut App) {
        type_text(app, "Hello");
        app.handle_key(key(KeyCode::Tab));
        type_text(app, "World");
    }

    mod app_basic_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_should_quit_initially_false() {
            let app = app_with(MockApiClientTrait::new());
            assert!(!app.should_quit());
        }

        #[test]
        fn test_ctrl_c_quits() {
            let mut app = app_with(MockApiClientTrait::new());
            app.handle_key(ctrl('c'));
            assert!(app.should_quit());
        }

        #[test]
        fn test_error_dialog_is_modal() {
            let mut app = app_with(MockApiClientTrait::new());
            app.state.push_error("boom");

            app.handle_key(key(KeyCode::Char('x')));
            assert_eq!(app.post_form.values().title, "");
            assert_eq!(app.state.current_error(), Some("boom"));

            app.handle_key(key(KeyCode::Esc));
            assert_eq!(app.state.current_error(), None);
        }

        #[test]
        fn test_build_page_uses_default_layout() {
            let tree = App::build_page(&TuiConfig::default()).unwrap();
            assert_eq!(
                tree.kinds(),
                vec!["layoutSidebar", "layoutSection", "componentTrustBar"]
            );
        }

        #[test]
        fn test_build_page_strict_rejects_unknown_kinds() {
            let path = std::env::temp_dir()
                .join(format!("pagegen-app-page-{}.json", uuid::Uuid::new_v4()));
            std::fs::write(&path, r#"[{"type": "header"}, {"type": "landing"}]"#).unwrap();

            let lenient = TuiConfig {
                page_file: Some(path.clone()),
                ..Default::default()
            };
            let strict = TuiConfig {
                strict_layout: Some(true),
                ..lenient.clone()
            };

            let tree = App::build_page(&lenient).unwrap();
            let err = App::build_page(&strict).unwrap_err();
            std::fs::remove_file(&path).unwrap();

            assert_eq!(tree.kinds(), vec!["header"]);
            assert!(err.to_string().contains("landing"));
        }
    }

    mod form_key_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_typing_edits_active_field() {
            let mut app = app_with(MockApiClientTrait::new());
            type_text(&mut app, "Hi!");
            app.handle_key(key(KeyCode::Backspace));
            assert_eq!(app.post_form.values().title, "Hi");
        }

        #[test]
        fn test_enter_in_body_inserts_newline() {
            let mut app = app_with(MockApiClientTrait::new());
            app.handle_key(key(KeyCode::Tab));
            type_text(&mut app, "a");
            app.handle_key(key(KeyCode::Enter));
            type_text(&mut app, "b");
            assert_eq!(app.post_form.values().body, "a\nb");
        }

        #[test]
        fn test_enter_in_title_moves_to_body() {
            let mut app = app_with(MockApiClientTrait::new());
            app.handle_key(key(KeyCode::Enter));
            type_text(&mut app, "x");
            assert_eq!(app.post_form.values().body, "x");
        }

        #[test]
        fn test_invalid_submit_shows_field_errors_without_api_call() {
            let mut api = MockApiClientTrait::new();
            api.expect_create_post().never();
            let mut app = app_with(api);

            type_text(&mut app, "a");
            app.handle_key(ctrl('s'));

            assert_eq!(app.post_form.status(), SubmissionStatus::Idle);
            assert_eq!(
                app.post_form.field_errors().get("title").map(String::as_str),
                Some("Needs to be at least 2 characters long.")
            );
        }

        #[test]
        fn test_esc_moves_focus_to_user_list() {
            let mut app = app_with(MockApiClientTrait::new());
            app.state.set_users(vec![user(1), user(2)]);

            app.handle_key(key(KeyCode::Esc));
            app.handle_key(key(KeyCode::Char('j')));

            assert_eq!(app.state.focus, Focus::UserList);
            assert_eq!(app.state.selected_user, 1);
            assert_eq!(app.post_form.values().title, "");
        }
    }

    mod submit_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_successful_submit_toasts_and_refetches_users() {
            let mut api = MockApiClientTrait::new();
            api.expect_create_post()
                .withf(|post| post.title == "Hello" && post.body == "World")
                .times(1)
                .returning(|_| Ok(()));
            api.expect_fetch_users()
                .times(1)
                .returning(|| Ok(vec![user(1)]));
            let mut app = app_with(api);

            fill_valid_post(&mut app);
            app.handle_key(ctrl('s'));
            assert_eq!(app.post_form.status(), SubmissionStatus::Pending);
            assert_eq!(app.post_form.submit_label(), "Submitting...");

            // A second submit while pending is inert
            app.handle_key(ctrl('s'));

            pump(&mut app).await; // Submitted
            assert_eq!(app.post_form.status(), SubmissionStatus::Succeeded);
            assert_eq!(app.post_form.values(), &PostDraft::default());
            assert_eq!(
                app.state.toast.as_ref().map(|t| t.message.as_str()),
                Some("Post Added!")
            );

            pump(&mut app).await; // Invalidated(users)
            assert!(app.is_fetching_users());
            pump(&mut app).await; // UsersLoaded
            assert_eq!(app.state.users, QueryState::Ready(vec![user(1)]));
        }

        #[tokio::test]
        async fn test_failed_submit_shows_failure_until_reset() {
            let mut api = MockApiClientTrait::new();
            api.expect_create_post()
                .times(1)
                .returning(|_| Err(ApiError::Status { status: 500 }));
            let mut app = app_with(api);

            fill_valid_post(&mut app);
            app.handle_key(ctrl('s'));
            pump(&mut app).await;

            assert_eq!(app.post_form.status(), SubmissionStatus::Failed);
            assert!(app.state.toast.is_none());

            // Typing is swallowed by the failure panel
            type_text(&mut app, "zz");
            assert_eq!(app.post_form.values().body, "World");

            app.handle_key(key(KeyCode::Char('r')));
            assert_eq!(app.post_form.status(), SubmissionStatus::Idle);
            assert_eq!(app.post_form.values().title, "Hello");
        }

        #[tokio::test]
        async fn test_rejected_submit_maps_server_errors() {
            let mut api = MockApiClientTrait::new();
            api.expect_create_post().times(1).returning(|_| {
                Err(ApiError::Rejected(vec![FieldIssue::new(
                    "title",
                    "Title already taken.",
                )]))
            });
            let mut app = app_with(api);

            fill_valid_post(&mut app);
            app.handle_key(ctrl('s'));
            pump(&mut app).await;

            assert_eq!(app.post_form.status(), SubmissionStatus::Idle);
            assert_eq!(
                app.post_form.field_errors().get("title").map(String::as_str),
                Some("Title already taken.")
            );
        }
    }

    mod fetch_tests {
        use super::*;
        use pretty_assertions::assert_eq;
        use std::sync::atomic::{AtomicUsize, Ordering};

        #[tokio::test]
        async fn test_fetch_users_loads_list() {
            let mut api = MockApiClientTrait::new();
            api.expect_fetch_users()
                .times(1)
                .returning(|| Ok(vec![user(1), user(2)]));
            let mut app = app_with(api);

            app.fetch_users();
            assert!(app.state.users.is_loading());
            // Deduplicated while in flight
            app.fetch_users();

            pump(&mut app).await;
            assert_eq!(app.state.user_count(), 2);
            assert!(!app.is_fetching_users());
        }

        #[tokio::test]
        async fn test_fetch_failure_is_reported() {
            let mut api = MockApiClientTrait::new();
            api.expect_fetch_users()
                .times(1)
                .returning(|| Err(ApiError::FetchFailed { status: 503 }));
            let mut app = app_with(api);

            app.handle_key(key(KeyCode::F(5)));
            pump(&mut app).await;

            assert!(matches!(app.state.users, QueryState::Failed(_)));
            assert!(app
                .state
                .current_error()
                .is_some_and(|message| message.starts_with("Could not load users")));

            // The error dialog is dismissed before keys reach the page again
            app.handle_key(key(KeyCode::Enter));
            assert_eq!(app.state.current_error(), None);
        }

        #[tokio::test]
        async fn test_invalidation_during_fetch_refetches_after_response() {
            let calls = Arc::new(AtomicUsize::new(0));
            let counter = Arc::clone(&calls);
            let mut api = MockApiClientTrait::new();
            api.expect_fetch_users().times(2).returning(move || {
                let id = counter.fetch_add(1, Ordering::SeqCst) as u64 + 1;
                Ok(vec![user(id)])
            });
            let mut app = app_with(api);

            app.fetch_users();
            app.handle_event(AppEvent::Invalidated(users_key()));

            pump(&mut app).await;
            assert_eq!(app.state.users, QueryState::Ready(vec![user(1)]));
            assert!(app.is_fetching_users());

            pump(&mut app).await;
            assert_eq!(app.state.users, QueryState::Ready(vec![user(2)]));
            assert!(!app.is_fetching_users());
            assert_eq!(calls.load(Ordering::SeqCst), 2);
        }

        #[tokio::test]
        async fn test_manual_refresh_during_fetch_is_not_queued() {
            let mut api = MockApiClientTrait::new();
            api.expect_fetch_users()
                .times(1)
                .returning(|| Ok(vec![user(1)]));
            let mut app = app_with(api);

            app.fetch_users();
            app.handle_key(key(KeyCode::F(5)));
            pump(&mut app).await;

            assert!(!app.is_fetching_users());
        }

        #[tokio::test]
        async fn test_refetch_keeps_previous_data_visible() {
            let mut api = MockApiClientTrait::new();
            api.expect_fetch_users()
                .times(1)
                .returning(|| Ok(vec![user(3)]));
            let mut app = app_with(api);
            app.state.set_users(vec![user(1)]);

            app.fetch_users();
            assert_eq!(app.state.user_count(), 1);

            pump(&mut app).await;
            assert_eq!(app.state.users, QueryState::Ready(vec![user(3)]));
        }

        #[tokio::test]
        async fn test_poll_events_drains_channel() {
            let mut app = app_with(MockApiClientTrait::new());
            app.events_tx
                .send(AppEvent::UsersLoaded(Ok(vec![user(1)])))
                .unwrap();
            app.events_tx
                .send(AppEvent::Invalidated(crate::state::QueryKey::new("posts")))
                .unwrap();

            app.poll_events();

            assert_eq!(app.state.user_count(), 1);
            assert!(!app.is_fetching_users());
        }
    }
}
