use crate::types::error_dict::ErrorDict;
use crate::types::error_list::ErrorList;
use crate::types::ErrorVec;
use core::fmt::{self, Display};
use indexmap::IndexMap;

/// An error to inject into a container, in any of its accepted shapes.
///
/// Plain strings, lists of strings and field-keyed maps all convert into a
/// `ValidationError`, so [`add_error`](crate::container::FormContainer::add_error)
/// accepts each of them directly. The [`field_errors!`](crate::field_errors)
/// macro builds the field-keyed shape.
///
/// # Examples
///
/// ```
/// use form_rail::field_errors;
/// use form_rail::types::ValidationError;
///
/// let single = ValidationError::from("error!");
/// assert!(!single.has_fields());
///
/// let many = field_errors! {
///     "first_name" => ["Too short."],
///     "last_name" => ["Too short.", "Not a name."],
/// };
/// assert!(many.has_fields());
/// assert_eq!(many.messages().count(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Message(String),
    List(Vec<String>),
    Fields(IndexMap<String, Vec<String>>),
}

impl ValidationError {
    #[inline]
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self::Message(message.into())
    }

    /// Builds a list error from any iterator of messages.
    pub fn list<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(messages.into_iter().map(Into::into).collect())
    }

    /// Builds a field-keyed error from `(field, messages)` pairs.
    pub fn fields<I, K, M, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, M)>,
        K: Into<String>,
        M: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Fields(
            fields
                .into_iter()
                .map(|(field, messages)| {
                    (field.into(), messages.into_iter().map(Into::into).collect())
                })
                .collect(),
        )
    }

    /// Returns `true` when the error names its own fields.
    #[inline]
    pub fn has_fields(&self) -> bool {
        matches!(self, Self::Fields(_))
    }

    /// Every message, in order; field-keyed errors are flattened field by field.
    pub fn messages(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            Self::Message(message) => Box::new(core::iter::once(message.as_str())),
            Self::List(messages) => Box::new(messages.iter().map(String::as_str)),
            Self::Fields(fields) => {
                Box::new(fields.values().flat_map(|messages| messages.iter().map(String::as_str)))
            },
        }
    }

    /// Consumes the error into its flattened messages.
    pub fn into_messages(self) -> Vec<String> {
        match self {
            Self::Message(message) => vec![message],
            Self::List(messages) => messages,
            Self::Fields(fields) => fields.into_values().flatten().collect(),
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fields(fields) => {
                let rendered: Vec<String> = fields
                    .iter()
                    .map(|(field, messages)| format!("{}: {}", field, messages.join(" ")))
                    .collect();
                f.write_str(&rendered.join("; "))
            },
            _ => f.write_str(&self.messages().collect::<Vec<_>>().join(" ")),
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<&str> for ValidationError {
    fn from(message: &str) -> Self {
        Self::Message(message.to_owned())
    }
}

impl From<String> for ValidationError {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

impl<S: Into<String>> From<Vec<S>> for ValidationError {
    fn from(messages: Vec<S>) -> Self {
        Self::list(messages)
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for ValidationError {
    fn from(messages: [S; N]) -> Self {
        Self::list(messages)
    }
}

impl From<ErrorVec<String>> for ValidationError {
    fn from(messages: ErrorVec<String>) -> Self {
        Self::List(messages.into_vec())
    }
}

impl From<ErrorList> for ValidationError {
    fn from(errors: ErrorList) -> Self {
        Self::list(errors)
    }
}

impl<K: Into<String>, S: Into<String>> From<IndexMap<K, Vec<S>>> for ValidationError {
    fn from(fields: IndexMap<K, Vec<S>>) -> Self {
        Self::fields(fields)
    }
}

impl From<ErrorDict> for ValidationError {
    fn from(dict: ErrorDict) -> Self {
        Self::fields(dict)
    }
}
