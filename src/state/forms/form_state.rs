//! Generic form state: values, field errors and the submission lifecycle
//!
//! A submit goes through three steps so the event loop never blocks on the
//! network:
//!
//! 1. [`FormRenderer::begin_submit`] validates. Failures are mapped onto
//!    field errors and nothing else happens. On success the form turns
//!    `Pending` and hands back a [`PendingSubmission`].
//! 2. [`PendingSubmission::run`] awaits the mutation. This is the only
//!    suspension point and it does not borrow the form.
//! 3. [`FormRenderer::complete`] applies the outcome.
//!
//! [`FormRenderer::submit`] chains the three for callers that can await.

use super::field::{pop_char, push_char, FieldBinding, FieldSpec, FormValues};
use super::validation::{map_validation_errors, FieldErrors, FieldIssue, Schema, ValidationResult};
use crate::state::query::{CacheInvalidator, QueryKey};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Default notification after a successful submit
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Form Submitted!";

/// Identity of one form instance, used to route async completions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormId(Uuid);

impl FormId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FormId {
    fn default() -> Self {
        Self::new()
    }
}

/// Where a form is in its submit lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// Failure reported by a mutation
#[derive(Debug, Error)]
pub enum MutationError {
    /// The remote side rejected individual fields
    #[error("submission rejected with {} field error(s)", .0.len())]
    Validation(Vec<FieldIssue>),
    /// Anything else: transport, server error, ...
    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

/// The side effect a form performs with valid values
#[async_trait]
pub trait Mutation<T>: Send + Sync {
    async fn submit(&self, values: T) -> Result<(), MutationError>;
}

/// Configuration of one form instance
pub struct FormDescriptor<T> {
    pub title: String,
    pub defaults: T,
    pub schema: Arc<dyn Schema<T>>,
    pub mutation: Arc<dyn Mutation<T>>,
    /// Queries to invalidate after a successful submit
    pub invalidates: Vec<QueryKey>,
    pub invalidator: Option<Arc<dyn CacheInvalidator>>,
    pub success_message: String,
}

impl<T: FormValues> FormDescriptor<T> {
    pub fn new(
        title: impl Into<String>,
        defaults: T,
        schema: impl Schema<T> + 'static,
        mutation: impl Mutation<T> + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            defaults,
            schema: Arc::new(schema),
            mutation: Arc::new(mutation),
            invalidates: Vec::new(),
            invalidator: None,
            success_message: DEFAULT_SUCCESS_MESSAGE.to_string(),
        }
    }

    /// Invalidate `keys` through `invalidator` after every successful submit
    pub fn invalidate_on_success(
        mut self,
        keys: Vec<QueryKey>,
        invalidator: Arc<dyn CacheInvalidator>,
    ) -> Self {
        self.invalidates = keys;
        self.invalidator = Some(invalidator);
        self
    }

    pub fn success_message(mut self, message: impl Into<String>) -> Self {
        self.success_message = message.into();
        self
    }
}

/// Result of asking a form to submit
pub enum SubmitStep<T> {
    /// Submitting is not possible in the current status
    Blocked(SubmissionStatus),
    /// Validation failed; field errors were updated
    Rejected,
    /// Validation passed; the mutation is ready to run
    Dispatched(PendingSubmission<T>),
}

/// A validated submission waiting for its mutation to run
pub struct PendingSubmission<T> {
    form_id: FormId,
    values: T,
    mutation: Arc<dyn Mutation<T>>,
}

impl<T: Send + 'static> PendingSubmission<T> {
    pub fn form_id(&self) -> FormId {
        self.form_id
    }

    /// Await the mutation
    pub async fn run(self) -> SubmissionResult {
        let result = self.mutation.submit(self.values).await;
        SubmissionResult {
            form_id: self.form_id,
            result,
        }
    }
}

/// Outcome of a mutation, addressed to the form that started it
#[derive(Debug)]
pub struct SubmissionResult {
    pub form_id: FormId,
    pub result: Result<(), MutationError>,
}

/// What applying a submission outcome did to the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Succeeded,
    /// Validation failed, locally or echoed back by the mutation
    Rejected,
    Failed,
    /// The outcome did not apply to this form (stale or foreign)
    Ignored,
}

/// State of one generic form
pub struct FormRenderer<T: FormValues> {
    id: FormId,
    descriptor: FormDescriptor<T>,
    values: T,
    field_errors: FieldErrors,
    status: SubmissionStatus,
    /// Index into `T::fields()`; one past the end is the submit button
    active_field: usize,
    notification: Option<String>,
}

impl<T: FormValues> FormRenderer<T> {
    pub fn new(descriptor: FormDescriptor<T>) -> Self {
        Self {
            id: FormId::new(),
            values: descriptor.defaults.clone(),
            descriptor,
            field_errors: FieldErrors::new(),
            status: SubmissionStatus::Idle,
            active_field: 0,
            notification: None,
        }
    }

    pub fn id(&self) -> FormId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.descriptor.title
    }

    pub fn values(&self) -> &T {
        &self.values
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        T::fields()
    }

    /// Bind a field by name for display and editing
    pub fn bind(&self, name: &str) -> Option<FieldBinding<'_>> {
        let (index, spec) = T::fields()
            .iter()
            .enumerate()
            .find(|(_, spec)| spec.name == name)?;
        Some(FieldBinding {
            name: spec.name,
            label: spec.label,
            value: self.values.value(spec.name).unwrap_or_default(),
            error: self.field_errors.get(spec.name).map(String::as_str),
            is_active: index == self.active_field,
            is_multiline: spec.is_multiline,
        })
    }

    /// Bindings for all fields in display order
    pub fn bindings(&self) -> Vec<FieldBinding<'_>> {
        T::fields()
            .iter()
            .filter_map(|spec| self.bind(spec.name))
            .collect()
    }

    /// Change handler: replace a field's text
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> bool {
        self.values.set_value(name, value.into())
    }

    // Keyboard editing

    pub fn active_field(&self) -> usize {
        self.active_field
    }

    /// Whether focus sits on the submit button rather than a field
    pub fn is_submit_focused(&self) -> bool {
        self.active_field == T::fields().len()
    }

    pub fn is_active_field_multiline(&self) -> bool {
        T::fields()
            .get(self.active_field)
            .is_some_and(|spec| spec.is_multiline)
    }

    pub fn next_field(&mut self) {
        self.active_field = (self.active_field + 1) % self.focus_stops();
    }

    pub fn prev_field(&mut self) {
        if self.active_field == 0 {
            self.active_field = self.focus_stops() - 1;
        } else {
            self.active_field -= 1;
        }
    }

    /// Type a character into the active field
    pub fn input_char(&mut self, c: char) {
        self.edit_active(|value| push_char(value, c));
    }

    /// Delete the last character of the active field
    pub fn backspace(&mut self) {
        self.edit_active(pop_char);
    }

    fn edit_active(&mut self, edit: impl FnOnce(&str) -> String) {
        let Some(spec) = T::fields().get(self.active_field) else {
            return;
        };
        let next = edit(self.values.value(spec.name).unwrap_or_default());
        self.values.set_value(spec.name, next);
    }

    fn focus_stops(&self) -> usize {
        T::fields().len() + 1
    }

    // Submission

    /// False while a submission is in flight or a failure awaits reset
    pub fn can_submit(&self) -> bool {
        !matches!(
            self.status,
            SubmissionStatus::Pending | SubmissionStatus::Failed
        )
    }

    pub fn submit_label(&self) -> &'static str {
        if self.status == SubmissionStatus::Pending {
            "Submitting..."
        } else {
            "Submit"
        }
    }

    /// Validate and, if valid, move to `Pending`
    pub fn begin_submit(&mut self) -> SubmitStep<T> {
        if !self.can_submit() {
            tracing::debug!(status = ?self.status, "submit ignored");
            return SubmitStep::Blocked(self.status);
        }

        // Status describes the latest attempt
        self.status = SubmissionStatus::Idle;
        match self.descriptor.schema.validate(&self.values) {
            ValidationResult::Invalid(issues) => {
                tracing::debug!(count = issues.len(), "form failed validation");
                map_validation_errors(&issues, &mut self.field_errors);
                SubmitStep::Rejected
            }
            ValidationResult::Valid => {
                self.status = SubmissionStatus::Pending;
                SubmitStep::Dispatched(PendingSubmission {
                    form_id: self.id,
                    values: self.values.clone(),
                    mutation: Arc::clone(&self.descriptor.mutation),
                })
            }
        }
    }

    /// Apply a mutation outcome delivered by the event loop
    pub fn complete(&mut self, outcome: SubmissionResult) -> Completion {
        if outcome.form_id != self.id {
            tracing::debug!("dropping completion addressed to another form");
            return Completion::Ignored;
        }
        self.complete_submit(outcome.result)
    }

    fn complete_submit(&mut self, result: Result<(), MutationError>) -> Completion {
        if self.status != SubmissionStatus::Pending {
            tracing::debug!(
                status = ?self.status,
                "dropping completion for a form that is not pending"
            );
            return Completion::Ignored;
        }

        match result {
            Ok(()) => {
                tracing::info!(form = %self.descriptor.title, "form submitted");
                self.field_errors.clear();
                self.values = self.descriptor.defaults.clone();
                self.active_field = 0;
                self.status = SubmissionStatus::Succeeded;
                self.notification = Some(self.descriptor.success_message.clone());
                self.spawn_invalidation();
                Completion::Succeeded
            }
            Err(MutationError::Validation(issues)) => {
                tracing::debug!(count = issues.len(), "mutation echoed field errors");
                map_validation_errors(&issues, &mut self.field_errors);
                self.status = SubmissionStatus::Idle;
                Completion::Rejected
            }
            Err(MutationError::Failed(error)) => {
                tracing::warn!(form = %self.descriptor.title, "submission failed: {error:#}");
                self.status = SubmissionStatus::Failed;
                Completion::Failed
            }
        }
    }

    /// Validate, run the mutation and apply its outcome
    pub async fn submit(&mut self) -> Completion {
        match self.begin_submit() {
            SubmitStep::Blocked(_) => Completion::Ignored,
            SubmitStep::Rejected => Completion::Rejected,
            SubmitStep::Dispatched(pending) => {
                let outcome = pending.run().await;
                self.complete(outcome)
            }
        }
    }

    /// Recovery after a failed submission. Values are kept.
    pub fn reset(&mut self) {
        if self.status == SubmissionStatus::Failed {
            self.status = SubmissionStatus::Idle;
        }
    }

    /// Take the pending success notification, if any
    pub fn take_notification(&mut self) -> Option<String> {
        self.notification.take()
    }

    fn spawn_invalidation(&self) {
        let Some(invalidator) = self.descriptor.invalidator.clone() else {
            return;
        };
        if self.descriptor.invalidates.is_empty() {
            return;
        }
        let keys = self.descriptor.invalidates.clone();

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(error) = invalidator.invalidate(&keys).await {
                        tracing::warn!("cache invalidation failed: {error:#}");
                    }
                });
            }
            Err(_) => tracing::warn!("no async runtime, skipping cache invalidation"),
        }
    }
}
