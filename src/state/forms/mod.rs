//! Form domain layer
//!
//! A generic form engine plus the concrete post form built on it.

mod field;
mod form_state;
mod post_form;
mod validation;

pub use field::{FieldBinding, FieldSpec, FormValues};
pub use form_state::{
    Completion, FormDescriptor, FormId, FormRenderer, Mutation, MutationError, PendingSubmission,
    SubmissionResult, SubmissionStatus, SubmitStep, DEFAULT_SUCCESS_MESSAGE,
};
pub use post_form::{post_form, CreatePostMutation, PostDraft};
pub use validation::{
    flatten_errors, map_validation_errors, FieldErrors, FieldIssue, Schema, ValidateSchema,
    ValidationResult,
};
