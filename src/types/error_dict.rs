use crate::types::error_formatter::ErrorFormatConfig;
use crate::types::error_list::{ErrorClass, ErrorList};
use crate::types::NON_FIELD_ERRORS;
use core::fmt::{self, Display};
use indexmap::map::Iter;
use indexmap::IndexMap;
use maud::{html, PreEscaped};
use serde::Serialize;

/// Errors of a single record, keyed by field name.
///
/// The reserved key [`NON_FIELD_ERRORS`] holds errors that concern the record
/// as a whole. Keys keep the order in which their first error arrived.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ErrorDict {
    fields: IndexMap<String, ErrorList>,
}

impl ErrorDict {
    #[inline]
    pub fn new() -> Self {
        Self { fields: IndexMap::new() }
    }

    #[inline]
    pub fn get(&self, field: &str) -> Option<&ErrorList> {
        self.fields.get(field)
    }

    #[inline]
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Errors stored under [`NON_FIELD_ERRORS`].
    #[inline]
    pub fn non_field_errors(&self) -> Option<&ErrorList> {
        self.fields.get(NON_FIELD_ERRORS)
    }

    /// Appends messages to `field`, creating its list on first use.
    ///
    /// The list for [`NON_FIELD_ERRORS`] is tagged [`ErrorClass::NonField`].
    pub fn extend_field<I, S>(&mut self, field: &str, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields
            .entry(field.to_owned())
            .or_insert_with(|| {
                if field == NON_FIELD_ERRORS {
                    ErrorList::with_class(ErrorClass::NonField)
                } else {
                    ErrorList::new()
                }
            })
            .extend(messages);
    }

    /// Inserts a prepared list, replacing any existing one for `field`.
    #[inline]
    pub fn insert<S: Into<String>>(&mut self, field: S, errors: ErrorList) -> Option<ErrorList> {
        self.fields.insert(field.into(), errors)
    }

    /// Removes a field's errors, keeping the order of the remaining keys.
    #[inline]
    pub fn remove(&mut self, field: &str) -> Option<ErrorList> {
        self.fields.shift_remove(field)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, String, ErrorList> {
        self.fields.iter()
    }

    /// Renders `<ul class="errorlist"><li>field<ul>...</ul></li></ul>`.
    pub fn as_ul(&self, format: &ErrorFormatConfig) -> String {
        if self.is_empty() {
            return String::new();
        }

        html! {
            ul class=(format.css_class) {
                @for (field, errors) in &self.fields {
                    li { (field) (PreEscaped(errors.as_ul(format))) }
                }
            }
        }
        .into_string()
    }

    /// Renders a bulleted outline: each field, then its messages one level deeper.
    pub fn as_text(&self, format: &ErrorFormatConfig) -> String {
        let mut lines = Vec::new();
        self.write_text(format, 0, &mut lines);
        lines.join("\n")
    }

    pub(crate) fn write_text(&self, format: &ErrorFormatConfig, depth: usize, lines: &mut Vec<String>) {
        for (field, errors) in &self.fields {
            lines.push(format!("{}{}", format.line_prefix(depth), field));
            errors.write_text(format, depth + 1, lines);
        }
    }
}

impl Display for ErrorDict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_ul(&ErrorFormatConfig::default()))
    }
}

impl<K: Into<String>> FromIterator<(K, ErrorList)> for ErrorDict {
    fn from_iter<I: IntoIterator<Item = (K, ErrorList)>>(iter: I) -> Self {
        Self { fields: iter.into_iter().map(|(field, errors)| (field.into(), errors)).collect() }
    }
}

impl IntoIterator for ErrorDict {
    type Item = (String, ErrorList);
    type IntoIter = indexmap::map::IntoIter<String, ErrorList>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorDict {
    type Item = (&'a String, &'a ErrorList);
    type IntoIter = Iter<'a, String, ErrorList>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
