//! Validation results and mapping of failures onto per-field errors
//!
//! Forms only ever see a [`ValidationResult`]. Where it comes from is up to
//! the [`Schema`] a form was built with: a closure, a hand-written type, or
//! any `validator::Validate` model through [`ValidateSchema`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// Field errors keyed by dot-joined field path
pub type FieldErrors = BTreeMap<String, String>;

/// A single failed check, addressed by the path of the offending field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    /// Field-name segments, outermost first (`["address", "city"]`)
    pub path: Vec<String>,
    pub message: String,
}

impl FieldIssue {
    /// Build an issue from a dotted path such as `"address.city"`
    pub fn new(path: &str, message: impl Into<String>) -> Self {
        Self {
            path: path.split('.').map(str::to_string).collect(),
            message: message.into(),
        }
    }

    /// Path segments joined with `.`, the key used in [`FieldErrors`]
    pub fn joined_path(&self) -> String {
        self.path.join(".")
    }
}

/// Outcome of running a schema over a form's values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(Vec<FieldIssue>),
}

impl ValidationResult {
    /// `Valid` for an empty issue list, `Invalid` otherwise
    pub fn from_issues(issues: Vec<FieldIssue>) -> Self {
        if issues.is_empty() {
            Self::Valid
        } else {
            Self::Invalid(issues)
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Validation engine a form delegates to
pub trait Schema<T>: Send + Sync {
    fn validate(&self, value: &T) -> ValidationResult;
}

impl<T, F> Schema<T> for F
where
    F: Fn(&T) -> ValidationResult + Send + Sync,
{
    fn validate(&self, value: &T) -> ValidationResult {
        (self)(value)
    }
}

/// Schema for models deriving `validator::Validate`
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateSchema;

impl<T: Validate> Schema<T> for ValidateSchema {
    fn validate(&self, value: &T) -> ValidationResult {
        match value.validate() {
            Ok(()) => ValidationResult::Valid,
            Err(errors) => ValidationResult::from_issues(flatten_errors(&errors)),
        }
    }
}

/// Write every issue into `errors` under its joined path.
///
/// Entries are overwritten, never merged, so a path reported twice keeps the
/// last message. Fields not mentioned in `issues` keep whatever they had.
pub fn map_validation_errors(issues: &[FieldIssue], errors: &mut FieldErrors) {
    for issue in issues {
        errors.insert(issue.joined_path(), issue.message.clone());
    }
}

/// Flatten nested `validator` errors into path-addressed issues.
///
/// Struct errors extend the path with the field name, list errors with the
/// element index. Output is sorted by path; messages for one field keep
/// their declaration order.
pub fn flatten_errors(errors: &ValidationErrors) -> Vec<FieldIssue> {
    let mut issues = Vec::new();
    collect_issues(errors, &mut Vec::new(), &mut issues);
    issues.sort_by(|a, b| a.path.cmp(&b.path));
    issues
}

fn collect_issues(errors: &ValidationErrors, prefix: &mut Vec<String>, out: &mut Vec<FieldIssue>) {
    for (field, kind) in errors.errors() {
        prefix.push(field.to_string());
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string());
                    out.push(FieldIssue {
                        path: prefix.clone(),
                        message,
                    });
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_issues(nested, prefix, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    prefix.push(index.to_string());
                    collect_issues(nested, prefix, out);
                    prefix.pop();
                }
            }
        }
        prefix.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Validate)]
    struct Address {
        #[validate(length(min = 1, message = "City is required."))]
        city: String,
    }

    #[derive(Debug, Validate)]
    struct Profile {
        #[validate(length(min = 2, message = "Needs to be at least 2 characters long."))]
        name: String,
        #[validate(nested)]
        address: Address,
    }

    mod mapping_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_issue_path_from_dotted_string() {
            let issue = FieldIssue::new("address.city", "bad");
            assert_eq!(issue.path, vec!["address".to_string(), "city".to_string()]);
            assert_eq!(issue.joined_path(), "address.city");
        }

        #[test]
        fn test_every_issue_becomes_an_entry() {
            let mut errors = FieldErrors::new();
            map_validation_errors(
                &[
                    FieldIssue::new("title", "too short"),
                    FieldIssue::new("address.city", "missing"),
                ],
                &mut errors,
            );

            assert_eq!(errors.len(), 2);
            assert_eq!(errors["title"], "too short");
            assert_eq!(errors["address.city"], "missing");
        }

        #[test]
        fn test_duplicate_paths_last_write_wins() {
            let mut errors = FieldErrors::new();
            map_validation_errors(
                &[
                    FieldIssue::new("title", "first"),
                    FieldIssue::new("title", "second"),
                ],
                &mut errors,
            );
            assert_eq!(errors.len(), 1);
            assert_eq!(errors["title"], "second");
        }

        #[test]
        fn test_unmentioned_fields_are_left_alone() {
            let mut errors = FieldErrors::new();
            errors.insert("body".to_string(), "old".to_string());
            errors.insert("title".to_string(), "old".to_string());

            map_validation_errors(&[FieldIssue::new("title", "new")], &mut errors);

            assert_eq!(errors["title"], "new");
            assert_eq!(errors["body"], "old");
        }
    }

    mod schema_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_from_issues_empty_is_valid() {
            assert!(ValidationResult::from_issues(Vec::new()).is_valid());
            assert!(!ValidationResult::from_issues(vec![FieldIssue::new("a", "b")]).is_valid());
        }

        #[test]
        fn test_closure_schema() {
            let schema = |value: &String| {
                if value.is_empty() {
                    ValidationResult::Invalid(vec![FieldIssue::new("value", "empty")])
                } else {
                    ValidationResult::Valid
                }
            };
            assert!(schema.validate(&"x".to_string()).is_valid());
            assert!(!Schema::validate(&schema, &String::new()).is_valid());
        }

        #[test]
        fn test_validate_schema_valid_model() {
            let profile = Profile {
                name: "Ada".to_string(),
                address: Address {
                    city: "London".to_string(),
                },
            };
            assert_eq!(ValidateSchema.validate(&profile), ValidationResult::Valid);
        }

        #[test]
        fn test_validate_schema_flattens_nested_paths() {
            let profile = Profile {
                name: "A".to_string(),
                address: Address {
                    city: String::new(),
                },
            };

            let ValidationResult::Invalid(issues) = ValidateSchema.validate(&profile) else {
                panic!("expected invalid result");
            };

            assert_eq!(
                issues,
                vec![
                    FieldIssue::new("address.city", "City is required."),
                    FieldIssue::new("name", "Needs to be at least 2 characters long."),
                ]
            );
        }
    }
}
