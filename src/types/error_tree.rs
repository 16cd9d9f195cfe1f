//! The merged error structure of a form container.
//!
//! An [`ErrorTree`] is keyed first by sub-form name, with one reserved key
//! ([`NON_FORM_ERRORS`]) for container-wide errors. Each key maps to an
//! [`ErrorBranch`] whose shape depends on what produced it:
//!
//! - a form contributes a field-keyed [`ErrorDict`],
//! - a formset contributes its per-record dicts exactly as it reported them,
//! - the container contributes a flat [`ErrorList`].
//!
//! The in-memory shapes differ, but serialization is uniform: every error
//! list becomes an array of strings, so a form branch is an object of
//! arrays, a formset branch an array of such objects, and the container
//! branch an array of strings.
//!
//! # Examples
//!
//! ```
//! use form_rail::types::ErrorTree;
//!
//! let tree = ErrorTree::new();
//! assert!(tree.is_empty());
//! assert!(!tree.has_errors());
//! assert_eq!(tree.as_json().unwrap(), "{}");
//! ```
use crate::types::error_dict::ErrorDict;
use crate::types::error_formatter::ErrorFormatConfig;
use crate::types::error_list::{ErrorClass, ErrorList};
use crate::types::NON_FORM_ERRORS;
use core::fmt::{self, Display};
use indexmap::map::Iter;
use indexmap::IndexMap;
use maud::{html, PreEscaped};
use serde::Serialize;

/// Errors contributed under one top-level key of an [`ErrorTree`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ErrorBranch {
    /// Field errors of a single form.
    Form(ErrorDict),
    /// Per-record errors of a formset, one dict per record.
    FormSet(Vec<ErrorDict>),
    /// Container-wide errors.
    NonForm(ErrorList),
}

impl ErrorBranch {
    /// Returns `true` when the branch carries no message at all.
    ///
    /// A formset branch is empty when every record dict is empty, including
    /// the case of a formset with no records.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Form(dict) => dict.is_empty(),
            Self::FormSet(records) => records.iter().all(ErrorDict::is_empty),
            Self::NonForm(list) => list.is_empty(),
        }
    }

    #[inline]
    pub fn as_form(&self) -> Option<&ErrorDict> {
        match self {
            Self::Form(dict) => Some(dict),
            _ => None,
        }
    }

    #[inline]
    pub fn as_formset(&self) -> Option<&[ErrorDict]> {
        match self {
            Self::FormSet(records) => Some(records),
            _ => None,
        }
    }

    #[inline]
    pub fn as_non_form(&self) -> Option<&ErrorList> {
        match self {
            Self::NonForm(list) => Some(list),
            _ => None,
        }
    }

    fn as_ul(&self, format: &ErrorFormatConfig) -> String {
        match self {
            Self::Form(dict) => dict.as_ul(format),
            Self::NonForm(list) => list.as_ul(format),
            Self::FormSet(records) => html! {
                ul class=(format.css_class) {
                    @for (index, record) in records.iter().enumerate() {
                        @if !record.is_empty() {
                            li { (index) (PreEscaped(record.as_ul(format))) }
                        }
                    }
                }
            }
            .into_string(),
        }
    }

    fn write_text(&self, format: &ErrorFormatConfig, depth: usize, lines: &mut Vec<String>) {
        match self {
            Self::Form(dict) => dict.write_text(format, depth, lines),
            Self::NonForm(list) => list.write_text(format, depth, lines),
            Self::FormSet(records) => {
                for (index, record) in records.iter().enumerate().filter(|(_, r)| !r.is_empty()) {
                    lines.push(format!("{}{}", format.line_prefix(depth), index));
                    record.write_text(format, depth + 1, lines);
                }
            },
        }
    }
}

/// Ordered, per-sub-form error structure built by a container's validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ErrorTree {
    branches: IndexMap<String, ErrorBranch>,
}

impl ErrorTree {
    #[inline]
    pub fn new() -> Self {
        Self { branches: IndexMap::new() }
    }

    /// Returns `true` when no key is present at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    /// Returns `true` when at least one branch carries a message.
    ///
    /// Formset branches whose records are all clean do not count.
    pub fn has_errors(&self) -> bool {
        self.branches.values().any(|branch| !branch.is_empty())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.branches.len()
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.branches.contains_key(key)
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&ErrorBranch> {
        self.branches.get(key)
    }

    /// Field errors recorded for the form named `name`.
    #[inline]
    pub fn form(&self, name: &str) -> Option<&ErrorDict> {
        self.get(name).and_then(ErrorBranch::as_form)
    }

    /// Per-record errors recorded for the formset named `name`.
    #[inline]
    pub fn formset(&self, name: &str) -> Option<&[ErrorDict]> {
        self.get(name).and_then(ErrorBranch::as_formset)
    }

    /// Container-wide errors, if any were added.
    #[inline]
    pub fn non_form_errors(&self) -> Option<&ErrorList> {
        self.get(NON_FORM_ERRORS).and_then(ErrorBranch::as_non_form)
    }

    #[inline]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.branches.keys().map(String::as_str)
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, String, ErrorBranch> {
        self.branches.iter()
    }

    /// Serializes the tree as a JSON string.
    pub fn as_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serializes the tree as a JSON value.
    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    /// Renders the whole tree as nested `<ul>` lists.
    pub fn as_ul(&self, format: &ErrorFormatConfig) -> String {
        if self.is_empty() {
            return String::new();
        }

        html! {
            ul class=(format.css_class) {
                @for (key, branch) in &self.branches {
                    li { (key) (PreEscaped(branch.as_ul(format))) }
                }
            }
        }
        .into_string()
    }

    /// Renders the whole tree as a bulleted outline.
    pub fn as_text(&self, format: &ErrorFormatConfig) -> String {
        let mut lines = Vec::new();
        for (key, branch) in &self.branches {
            lines.push(format!("{}{}", format.line_prefix(0), key));
            branch.write_text(format, 1, &mut lines);
        }
        lines.join("\n")
    }

    /// Appends messages to `field` of the form branch `form`, creating both lazily.
    pub(crate) fn extend_form<I, S>(&mut self, form: &str, field: &str, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let branch = self
            .branches
            .entry(form.to_owned())
            .or_insert_with(|| ErrorBranch::Form(ErrorDict::new()));
        if let ErrorBranch::Form(dict) = branch {
            dict.extend_field(field, messages);
        }
    }

    /// Stores a formset's native per-record errors under `form`.
    pub(crate) fn set_formset(&mut self, form: &str, records: Vec<ErrorDict>) {
        self.branches.insert(form.to_owned(), ErrorBranch::FormSet(records));
    }

    /// Appends container-wide messages, creating the reserved branch lazily.
    pub(crate) fn extend_non_form<I, S>(&mut self, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let branch = self.branches.entry(NON_FORM_ERRORS.to_owned()).or_insert_with(|| {
            ErrorBranch::NonForm(ErrorList::with_class(ErrorClass::NonField))
        });
        if let ErrorBranch::NonForm(list) = branch {
            list.extend(messages);
        }
    }
}

impl Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_ul(&ErrorFormatConfig::default()))
    }
}

impl<'a> IntoIterator for &'a ErrorTree {
    type Item = (&'a String, &'a ErrorBranch);
    type IntoIter = Iter<'a, String, ErrorBranch>;

    fn into_iter(self) -> Self::IntoIter {
        self.branches.iter()
    }
}
