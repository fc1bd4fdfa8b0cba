//! Form field value objects

/// Static description of one editable field of a form record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub is_multiline: bool,
}

impl FieldSpec {
    /// A single-line text field
    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            is_multiline: false,
        }
    }

    /// A multi-line text field
    pub const fn multiline(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            is_multiline: true,
        }
    }
}

/// Record type a form edits.
///
/// The form engine never looks inside a record beyond this: it lists the
/// fields, reads a field's text by name and writes it back by name.
pub trait FormValues: Clone + Send + Sync + 'static {
    /// Fields in display order
    fn fields() -> &'static [FieldSpec];

    /// Current text of a field, `None` for unknown names
    fn value(&self, name: &str) -> Option<&str>;

    /// Replace the text of a field. Returns false for unknown names.
    fn set_value(&mut self, name: &str, value: String) -> bool;
}

/// Everything a field layout needs to draw and edit one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBinding<'a> {
    pub name: &'static str,
    pub label: &'static str,
    pub value: &'a str,
    pub error: Option<&'a str>,
    pub is_active: bool,
    pub is_multiline: bool,
}

impl FieldBinding<'_> {
    /// Get the display value for rendering
    pub fn display_value(&self) -> &str {
        if self.value.is_empty() && !self.is_active {
            "(empty)"
        } else {
            self.value
        }
    }
}

/// Push a character onto a field's text
pub(super) fn push_char(value: &str, c: char) -> String {
    let mut next = String::with_capacity(value.len() + c.len_utf8());
    next.push_str(value);
    next.push(c);
    next
}

/// Remove the last character of a field's text
pub(super) fn pop_char(value: &str) -> String {
    let mut next = value.to_string();
    next.pop();
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_constructors() {
        assert!(!FieldSpec::text("title", "Title").is_multiline);
        assert!(FieldSpec::multiline("body", "Body").is_multiline);
    }

    #[test]
    fn test_display_value_placeholder_only_when_inactive() {
        let mut binding = FieldBinding {
            name: "title",
            label: "Title",
            value: "",
            error: None,
            is_active: false,
            is_multiline: false,
        };
        assert_eq!(binding.display_value(), "(empty)");

        binding.is_active = true;
        assert_eq!(binding.display_value(), "");
    }

    #[test]
    fn test_push_and_pop_char() {
        assert_eq!(push_char("ab", 'c'), "abc");
        assert_eq!(pop_char("abc"), "ab");
        assert_eq!(pop_char(""), "");
        assert_eq!(pop_char("né"), "n");
    }
}
