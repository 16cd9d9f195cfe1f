use crate::validation::Validation;
use serde_json::Value;

pub const REQUIRED_MESSAGE: &str = "This field is required.";

/// A text field: optional whitespace stripping, a required flag and length limits.
///
/// # Examples
///
/// ```
/// use form_rail::forms::CharField;
///
/// let field = CharField::new("phone_number").min_length(2);
///
/// assert!(field.clean(Some("12345")).is_valid());
///
/// let errors = field.clean(Some("2")).into_errors().unwrap();
/// assert_eq!(errors[0], "Ensure this value has at least 2 characters (it has 1).");
///
/// let errors = field.clean(None).into_errors().unwrap();
/// assert_eq!(errors[0], "This field is required.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharField {
    name: String,
    label: Option<String>,
    required: bool,
    strip: bool,
    min_length: Option<usize>,
    max_length: Option<usize>,
}

impl CharField {
    /// A required, stripped field with no length limits.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            label: None,
            required: true,
            strip: true,
            min_length: None,
            max_length: None,
        }
    }

    #[inline]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    #[inline]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[inline]
    pub fn strip(mut self, strip: bool) -> Self {
        self.strip = strip;
        self
    }

    #[inline]
    pub fn min_length(mut self, limit: usize) -> Self {
        self.min_length = Some(limit);
        self
    }

    #[inline]
    pub fn max_length(mut self, limit: usize) -> Self {
        self.max_length = Some(limit);
        self
    }

    #[inline]
    pub fn label<S: Into<String>>(mut self, label: S) -> Self {
        self.label = Some(label.into());
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn is_required(&self) -> bool {
        self.required
    }

    #[inline]
    pub fn min_length_limit(&self) -> Option<usize> {
        self.min_length
    }

    #[inline]
    pub fn max_length_limit(&self) -> Option<usize> {
        self.max_length
    }

    /// The explicit label, or the field name with underscores turned into
    /// spaces and the first letter capitalised.
    pub fn label_text(&self) -> String {
        if let Some(label) = &self.label {
            return label.clone();
        }

        let spaced = self.name.replace('_', " ");
        let mut chars = spaced.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Normalises a submitted value: missing becomes empty, whitespace is stripped.
    pub fn to_text(&self, raw: Option<&str>) -> String {
        let raw = raw.unwrap_or_default();
        if self.strip {
            raw.trim().to_owned()
        } else {
            raw.to_owned()
        }
    }

    /// Cleans a submitted value, reporting every broken length rule at once.
    ///
    /// A missing required value stops at the required message; an empty
    /// optional value is accepted without running the length rules.
    pub fn clean(&self, raw: Option<&str>) -> Validation<String, Value> {
        let value = self.to_text(raw);

        if value.is_empty() {
            return if self.required {
                Validation::invalid(REQUIRED_MESSAGE.to_owned())
            } else {
                Validation::valid(Value::String(value))
            };
        }

        let length = value.chars().count();
        let checks = [
            self.min_length.filter(|&limit| length < limit).map(|limit| {
                format!("Ensure this value has at least {limit} characters (it has {length}).")
            }),
            self.max_length.filter(|&limit| length > limit).map(|limit| {
                format!("Ensure this value has at most {limit} characters (it has {length}).")
            }),
        ];

        let broken: Vec<String> = checks.into_iter().flatten().collect();
        let checked = if broken.is_empty() {
            Validation::valid(value)
        } else {
            Validation::invalid_many(broken)
        };
        checked.map(Value::String)
    }

    /// `true` when the submitted value differs from the initial one.
    pub fn has_changed(&self, initial: Option<&Value>, raw: Option<&str>) -> bool {
        initial_text(initial) != self.to_text(raw)
    }
}

/// Text form of an initial value; `null` and absent values are empty.
pub(crate) fn initial_text(initial: Option<&Value>) -> String {
    match initial {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
