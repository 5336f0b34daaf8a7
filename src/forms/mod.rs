//! Form models and validators.
//!
//! Both forms in the plugin (job posting and job application) are edited through
//! the same [`FormModel`] interface, so the handler and the form renderer work on
//! either one. Validation collects every violated rule into a
//! [`ValidationErrors`] value instead of stopping at the first one, and always
//! runs before any request is built.
//!
//! # Modules
//!
//! - [`job_posting`]: Employer job submission
//! - [`application`]: Applicant submission

pub mod application;
pub mod job_posting;

pub use application::{ApplicationField, ApplicationForm, ValidApplication};
pub use job_posting::{JobPostingField, JobPostingForm, ValidJobPosting};

use std::fmt;

/// A single violated rule, attached to the field that broke it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Stable field key, matching [`FieldSpec::key`].
    pub field: &'static str,
    /// Message shown to the user.
    pub message: String,
}

/// All violations found in one validation pass, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Records a violation for `field`.
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Returns the first message recorded for `field`.
    #[must_use]
    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Returns every message, in the order they were recorded.
    #[must_use]
    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.message.as_str()).collect()
    }

    /// Turns an empty error set into `Ok(value)`.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one violation was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// How a field is edited and rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line free text.
    Text,
    /// Long free text, rendered wrapped.
    Multiline,
    /// One value out of a fixed set, changed with left/right.
    Choice,
    /// Boolean switch, flipped with space.
    Toggle,
    /// Path to a local file that is uploaded on submit.
    Path,
}

/// Static description of one form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

/// A form that the generic editor can drive.
///
/// Text-like fields expose their buffer through [`FormModel::text_mut`]; choice
/// and toggle fields implement [`FormModel::cycle`] and [`FormModel::toggle`].
pub trait FormModel {
    /// Field layout, in display and tab order.
    fn fields(&self) -> &'static [FieldSpec];

    /// Display value of the field at `index`.
    fn value(&self, index: usize) -> String;

    /// Mutable text buffer of a text-like field, `None` for other kinds.
    fn text_mut(&mut self, index: usize) -> Option<&mut String>;

    /// Moves a choice field to the next or previous option.
    fn cycle(&mut self, _index: usize, _forward: bool) {}

    /// Flips a toggle field.
    fn toggle(&mut self, _index: usize) {}

    /// Applies a typed character to the field at `index`.
    fn input_char(&mut self, index: usize, c: char) {
        let Some(spec) = self.fields().get(index).copied() else {
            return;
        };
        match spec.kind {
            FieldKind::Toggle if c == ' ' => self.toggle(index),
            FieldKind::Choice if c == ' ' => self.cycle(index, true),
            FieldKind::Text | FieldKind::Multiline | FieldKind::Path => {
                if let Some(buffer) = self.text_mut(index) {
                    buffer.push(c);
                }
            }
            FieldKind::Toggle | FieldKind::Choice => {}
        }
    }

    /// Deletes the last character of a text-like field.
    fn backspace(&mut self, index: usize) {
        if let Some(buffer) = self.text_mut(index) {
            buffer.pop();
        }
    }
}

/// Focused field of a form being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormCursor {
    pub index: usize,
}

impl FormCursor {
    /// Moves to the next field, wrapping to the first.
    pub fn next(&mut self, field_count: usize) {
        if field_count == 0 {
            return;
        }
        self.index = (self.index + 1) % field_count;
    }

    /// Moves to the previous field, wrapping to the last.
    pub fn prev(&mut self, field_count: usize) {
        if field_count == 0 {
            return;
        }
        self.index = if self.index == 0 {
            field_count - 1
        } else {
            self.index - 1
        };
    }
}

/// Counts characters, not bytes, so "Zürich" has length 6.
pub(crate) fn char_len(value: &str) -> usize {
    value.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_wraps_both_ways() {
        let mut cursor = FormCursor::default();
        cursor.prev(3);
        assert_eq!(cursor.index, 2);
        cursor.next(3);
        assert_eq!(cursor.index, 0);
        cursor.next(0);
        assert_eq!(cursor.index, 0);
    }

    #[test]
    fn errors_keep_insertion_order() {
        let mut errors = ValidationErrors::new();
        errors.push("name", "first");
        errors.push("location", "second");
        assert_eq!(errors.to_string(), "first; second");
        assert_eq!(errors.for_field("location"), Some("second"));
        assert!(errors.into_result(()).is_err());
    }

    #[test]
    fn char_len_counts_scalar_values() {
        assert_eq!(char_len("Zürich"), 6);
    }
}
