//! Required-field checks applied to a post form before it is submitted.

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::posts::{PostDraft, PostField};

/// Field name to message, one entry per field that failed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<PostField, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: PostField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: PostField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn clear(&mut self, field: PostField) {
        self.0.remove(&field);
    }

    pub fn iter(&self) -> impl Iterator<Item = (PostField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn insert(&mut self, field: PostField, message: String) {
        self.0.insert(field, message);
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

pub fn required_message(field: PostField) -> String {
    format!("{} is required", field.label())
}

/// Flags every field whose trimmed value is empty.
pub fn validate_post_fields(title: &str, content: &str, author: &str) -> FieldErrors {
    let mut errors = FieldErrors::default();
    for (field, value) in [
        (PostField::Title, title),
        (PostField::Content, content),
        (PostField::Author, author),
    ] {
        if value.trim().is_empty() {
            errors.insert(field, required_message(field));
        }
    }
    errors
}

pub fn validate_draft(draft: &PostDraft) -> FieldErrors {
    validate_post_fields(&draft.title, &draft.content, &draft.author)
}
