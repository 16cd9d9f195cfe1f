//! Error list rendering configuration.

use crate::types::error_list::ErrorClass;

/// How error lists render as HTML and as text.
///
/// Every engine of a container receives the same configuration, so one
/// setting restyles the errors of all sub-forms at once.
///
/// # Examples
///
/// ```
/// use form_rail::types::{ErrorClass, ErrorFormatConfig};
///
/// let config = ErrorFormatConfig::default();
/// assert_eq!(config.class_attr(ErrorClass::Field), "errorlist");
/// assert_eq!(config.class_attr(ErrorClass::NonField), "errorlist nonfield");
///
/// let custom = ErrorFormatConfig::default().with_css_class("invalid-feedback");
/// assert_eq!(custom.class_attr(ErrorClass::NonForm), "invalid-feedback nonform");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorFormatConfig {
    pub css_class: String,
    pub bullet: String,
    pub indent: String,
}

impl Default for ErrorFormatConfig {
    fn default() -> Self {
        Self { css_class: "errorlist".into(), bullet: "* ".into(), indent: "  ".into() }
    }
}

impl ErrorFormatConfig {
    /// Dash bullets, as used by Markdown lists.
    #[inline]
    pub fn markdown() -> Self {
        Self { bullet: "- ".into(), ..Default::default() }
    }

    #[inline]
    pub fn with_css_class<S: Into<String>>(mut self, css_class: S) -> Self {
        self.css_class = css_class.into();
        self
    }

    #[inline]
    pub fn with_bullet<S: Into<String>>(mut self, bullet: S) -> Self {
        self.bullet = bullet.into();
        self
    }

    #[inline]
    pub fn with_indent<S: Into<String>>(mut self, indent: S) -> Self {
        self.indent = indent.into();
        self
    }

    /// Full `class` attribute value for a list of the given class.
    pub fn class_attr(&self, class: ErrorClass) -> String {
        match class.modifier() {
            Some(modifier) => format!("{} {}", self.css_class, modifier),
            None => self.css_class.clone(),
        }
    }

    /// Prefix for a text line at the given nesting depth.
    pub(crate) fn line_prefix(&self, depth: usize) -> String {
        let mut prefix = self.indent.repeat(depth);
        prefix.push_str(&self.bullet);
        prefix
    }
}
