use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Field-scoped validation failures keyed by field path.
///
/// Paths follow the form addressing used by the booking screens:
/// `origin`, `returnDate`, `passengers[0].firstName`, `payment.cvv`.
/// A path can carry several messages; the first one is what a form shows
/// inline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(path.into())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.fields.contains_key(path)
    }

    pub fn messages(&self, path: &str) -> &[String] {
        self.fields.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn first(&self, path: &str) -> Option<&str> {
        self.messages(path).first().map(String::as_str)
    }

    /// Fold errors of a nested record in under `prefix`.
    pub fn merge_nested(&mut self, prefix: &str, nested: FieldErrors) {
        for (path, messages) in nested.fields {
            let full = format!("{}.{}", prefix, path);
            self.fields.entry(full).or_default().extend(messages);
        }
    }

    /// `Ok(value())` when nothing was recorded.
    pub fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (path, messages) in &self.fields {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", path, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Path of an element in a list field, e.g. `passengers[2]`.
pub fn indexed(field: &str, index: usize) -> String {
    format!("{}[{}]", field, index)
}

/// Converts an editable draft into its checked, typed counterpart.
pub trait Validate {
    type Output;

    fn validate(&self) -> Result<Self::Output, FieldErrors>;
}

pub(crate) fn char_len(value: &str) -> usize {
    value.chars().count()
}

pub(crate) fn require_min_len(
    errors: &mut FieldErrors,
    path: &str,
    value: &str,
    min: usize,
    message: &str,
) {
    if char_len(value) < min {
        errors.add(path, message);
    }
}
