//! The "Add a post" form: record, schema and mutation

use super::field::{FieldSpec, FormValues};
use super::form_state::{FormDescriptor, FormRenderer, Mutation, MutationError};
use super::validation::ValidateSchema;
use crate::api::{ApiClientTrait, ApiError, CreatePostDto};
use crate::state::query::{users_key, CacheInvalidator};
use async_trait::async_trait;
use std::sync::Arc;
use validator::Validate;

/// Values of the post form
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct PostDraft {
    #[validate(length(min = 2, message = "Needs to be at least 2 characters long."))]
    pub title: String,
    #[validate(length(min = 2, message = "Needs to be at least 2 characters long."))]
    pub body: String,
}

impl FormValues for PostDraft {
    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::text("title", "Title"),
            FieldSpec::multiline("body", "Body"),
        ];
        FIELDS
    }

    fn value(&self, name: &str) -> Option<&str> {
        match name {
            "title" => Some(&self.title),
            "body" => Some(&self.body),
            _ => None,
        }
    }

    fn set_value(&mut self, name: &str, value: String) -> bool {
        match name {
            "title" => self.title = value,
            "body" => self.body = value,
            _ => return false,
        }
        true
    }
}

impl From<PostDraft> for CreatePostDto {
    fn from(draft: PostDraft) -> Self {
        Self {
            title: draft.title,
            body: draft.body,
        }
    }
}

/// Creates a post through the API
pub struct CreatePostMutation {
    api: Arc<dyn ApiClientTrait>,
}

impl CreatePostMutation {
    pub fn new(api: Arc<dyn ApiClientTrait>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Mutation<PostDraft> for CreatePostMutation {
    async fn submit(&self, values: PostDraft) -> Result<(), MutationError> {
        let dto = CreatePostDto::from(values);
        match self.api.create_post(&dto).await {
            Ok(()) => Ok(()),
            Err(ApiError::Rejected(issues)) => Err(MutationError::Validation(issues)),
            Err(error) => Err(MutationError::Failed(error.into())),
        }
    }
}

/// Build the post form, refreshing the user list after every new post
pub fn post_form(
    api: Arc<dyn ApiClientTrait>,
    invalidator: Arc<dyn CacheInvalidator>,
) -> FormRenderer<PostDraft> {
    FormRenderer::new(
        FormDescriptor::new(
            "Add a post",
            PostDraft::default(),
            ValidateSchema,
            CreatePostMutation::new(api),
        )
        .invalidate_on_success(vec![users_key()], invalidator)
        .success_message("Post Added!"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockApiClientTrait;
    use crate::state::forms::{flatten_errors, Completion, FieldIssue, SubmissionStatus};
    use crate::state::query::MockCacheInvalidator;
    use pretty_assertions::assert_eq;

    const MIN_LENGTH_MESSAGE: &str = "Needs to be at least 2 characters long.";

    fn draft(title: &str, body: &str) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            body: body.to_string(),
        }
    }

    fn quiet_invalidator() -> Arc<dyn CacheInvalidator> {
        let mut invalidator = MockCacheInvalidator::new();
        invalidator.expect_invalidate().returning(|_| Ok(()));
        Arc::new(invalidator)
    }

    fn fill(form: &mut FormRenderer<PostDraft>, values: &PostDraft) {
        form.set_field("title", values.title.clone());
        form.set_field("body", values.body.clone());
    }

    #[test]
    fn test_schema_message_for_short_title() {
        let errors = draft("a", "valid text").validate().unwrap_err();
        let issues = flatten_errors(&errors);
        assert_eq!(issues, vec![FieldIssue::new("title", MIN_LENGTH_MESSAGE)]);
    }

    #[test]
    fn test_schema_accepts_two_characters() {
        assert!(draft("ok", "ok").validate().is_ok());
    }

    #[tokio::test]
    async fn test_invalid_draft_never_reaches_api() {
        let mut api = MockApiClientTrait::new();
        api.expect_create_post().times(0);
        let mut form = post_form(Arc::new(api), quiet_invalidator());
        fill(&mut form, &draft("a", "valid text"));

        assert_eq!(form.submit().await, Completion::Rejected);
        assert_eq!(
            form.field_errors().get("title").map(String::as_str),
            Some(MIN_LENGTH_MESSAGE)
        );
    }

    #[tokio::test]
    async fn test_valid_draft_posts_once() {
        let mut api = MockApiClientTrait::new();
        api.expect_create_post()
            .withf(|dto| dto.title == "ok title" && dto.body == "ok body")
            .times(1)
            .returning(|_| Ok(()));
        let mut form = post_form(Arc::new(api), quiet_invalidator());
        fill(&mut form, &draft("ok title", "ok body"));

        assert_eq!(form.submit().await, Completion::Succeeded);
        assert!(form.field_errors().is_empty());
        assert_eq!(form.status(), SubmissionStatus::Succeeded);
        assert_eq!(form.take_notification().as_deref(), Some("Post Added!"));
        assert_eq!(form.take_notification(), None);
    }

    #[tokio::test]
    async fn test_rejected_post_maps_field_errors() {
        let mut api = MockApiClientTrait::new();
        api.expect_create_post().returning(|_| {
            Err(ApiError::Rejected(vec![FieldIssue::new(
                "body",
                "Body is not allowed.",
            )]))
        });
        let mut form = post_form(Arc::new(api), quiet_invalidator());
        fill(&mut form, &draft("ok title", "ok body"));

        assert_eq!(form.submit().await, Completion::Rejected);
        assert_eq!(form.status(), SubmissionStatus::Idle);
        assert_eq!(
            form.field_errors().get("body").map(String::as_str),
            Some("Body is not allowed.")
        );
    }

    #[tokio::test]
    async fn test_server_error_fails_form() {
        let mut api = MockApiClientTrait::new();
        api.expect_create_post()
            .returning(|_| Err(ApiError::Status { status: 500 }));
        let mut form = post_form(Arc::new(api), quiet_invalidator());
        let values = draft("ok title", "ok body");
        fill(&mut form, &values);

        assert_eq!(form.submit().await, Completion::Failed);
        form.reset();
        assert_eq!(form.status(), SubmissionStatus::Idle);
        assert_eq!(form.values(), &values);
    }
}
