use crate::types::error_formatter::ErrorFormatConfig;
use crate::types::ErrorVec;
use core::fmt::{self, Display};
use maud::html;
use serde::{Serialize, Serializer};

/// Rendering tag of an [`ErrorList`].
///
/// Lists holding whole-record or whole-container errors carry an extra CSS
/// modifier so templates can style them apart from field errors. A formset's
/// set-level list is tagged [`NonForm`](Self::NonForm).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorClass {
    #[default]
    Field,
    NonField,
    NonForm,
}

impl ErrorClass {
    /// The CSS modifier appended to the base list class, if any.
    #[inline]
    pub fn modifier(self) -> Option<&'static str> {
        match self {
            Self::Field => None,
            Self::NonField => Some("nonfield"),
            Self::NonForm => Some("nonform"),
        }
    }
}

/// Ordered error messages for one field, one record, or the whole container.
///
/// Messages are appended in the order they are reported and are never
/// de-duplicated. Equality only looks at the messages, not at the
/// [`ErrorClass`].
///
/// # Examples
///
/// ```
/// use form_rail::types::{ErrorClass, ErrorList};
///
/// let mut list = ErrorList::with_class(ErrorClass::NonField);
/// list.push("Passwords do not match.");
/// list.push("Passwords do not match.");
///
/// assert_eq!(list.len(), 2);
/// assert_eq!(list.class(), ErrorClass::NonField);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ErrorList {
    items: ErrorVec<String>,
    class: ErrorClass,
}

impl ErrorList {
    /// Creates a new empty list tagged as field errors.
    #[inline]
    pub fn new() -> Self {
        Self { items: ErrorVec::new(), class: ErrorClass::Field }
    }

    /// Creates a new empty list with the given rendering tag.
    #[inline]
    pub fn with_class(class: ErrorClass) -> Self {
        Self { items: ErrorVec::new(), class }
    }

    #[inline]
    pub fn class(&self) -> ErrorClass {
        self.class
    }

    /// Appends a single message.
    #[inline]
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(message.into());
    }

    /// Appends every message of the iterator, preserving order.
    #[inline]
    pub fn extend<I, S>(&mut self, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items.extend(messages.into_iter().map(Into::into));
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn first(&self) -> Option<&str> {
        self.items.first().map(String::as_str)
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, String> {
        self.items.iter()
    }

    #[inline]
    pub fn messages(&self) -> &[String] {
        &self.items
    }

    /// Renders the list as `<ul class="errorlist ...">`, or an empty string
    /// when there is nothing to show.
    pub fn as_ul(&self, format: &ErrorFormatConfig) -> String {
        if self.is_empty() {
            return String::new();
        }

        html! {
            ul class=(format.class_attr(self.class)) {
                @for message in &self.items {
                    li { (message) }
                }
            }
        }
        .into_string()
    }

    /// Renders one bulleted line per message.
    pub fn as_text(&self, format: &ErrorFormatConfig) -> String {
        let mut lines = Vec::with_capacity(self.len());
        self.write_text(format, 0, &mut lines);
        lines.join("\n")
    }

    pub(crate) fn write_text(&self, format: &ErrorFormatConfig, depth: usize, lines: &mut Vec<String>) {
        let prefix = format.line_prefix(depth);
        lines.extend(self.items.iter().map(|message| format!("{prefix}{message}")));
    }
}

impl PartialEq for ErrorList {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Eq for ErrorList {}

impl<S: AsRef<str>, const N: usize> PartialEq<[S; N]> for ErrorList {
    fn eq(&self, other: &[S; N]) -> bool {
        self.items.len() == N && self.items.iter().zip(other).all(|(a, b)| a == b.as_ref())
    }
}

impl<S: AsRef<str>> PartialEq<Vec<S>> for ErrorList {
    fn eq(&self, other: &Vec<S>) -> bool {
        self.items.len() == other.len()
            && self.items.iter().zip(other).all(|(a, b)| a == b.as_ref())
    }
}

impl Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_ul(&ErrorFormatConfig::default()))
    }
}

impl Serialize for ErrorList {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.collect_seq(self.items.iter())
    }
}

impl<S: Into<String>> FromIterator<S> for ErrorList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self { items: iter.into_iter().map(Into::into).collect(), class: ErrorClass::Field }
    }
}

impl IntoIterator for ErrorList {
    type Item = String;
    type IntoIter = smallvec::IntoIter<[String; 1]>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorList {
    type Item = &'a String;
    type IntoIter = core::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
