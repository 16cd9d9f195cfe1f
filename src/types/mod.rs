//! Error containers, cleaned values and payload types.
//!
//! Everything the container pipeline produces lives here:
//!
//! - [`ErrorList`] - ordered messages for one field, one record or the whole container
//! - [`ErrorDict`] - `field -> ErrorList` for a single form
//! - [`ErrorTree`] - the merged, per-sub-form error structure of a container
//! - [`CleanedData`] - the merged cleaned values of a container
//! - [`ValidationError`] - the accepted shapes of an injected error
//! - [`UsageError`] - contract violations reported to the caller
//!
//! # Examples
//!
//! ```
//! use form_rail::types::{ErrorDict, ErrorList, NON_FIELD_ERRORS};
//!
//! let mut dict = ErrorDict::new();
//! dict.extend_field("first_name", ["This field is required."]);
//! dict.extend_field(NON_FIELD_ERRORS, ["Names do not match."]);
//!
//! assert_eq!(dict.get("first_name").unwrap(), &["This field is required."]);
//! assert!(dict.non_field_errors().is_some());
//! ```
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::sync::Arc;

pub mod cleaned;
pub mod error_dict;
pub mod error_formatter;
pub mod error_list;
pub mod error_tree;
pub mod usage_error;
pub mod validation_error;

pub use cleaned::*;
pub use error_dict::*;
pub use error_formatter::*;
pub use error_list::*;
pub use error_tree::*;
pub use usage_error::*;
pub use validation_error::*;

/// Reserved field key for errors that concern a whole record.
pub const NON_FIELD_ERRORS: &str = "__all__";

/// Reserved top-level key for errors that concern the whole container.
pub const NON_FORM_ERRORS: &str = "__all__";

/// SmallVec-backed collection used for accumulating error messages.
///
/// Uses inline storage for one element; most fields fail with a single message.
pub type ErrorVec<E> = SmallVec<[E; 1]>;

/// Flat request payload, keyed by prefixed field name (`person-first_name`).
pub type FormData = IndexMap<String, String>;

/// Uploaded files, keyed the same way as [`FormData`].
pub type Files = IndexMap<String, UploadedFile>;

/// Per-sub-form initial values, keyed by sub-form name.
///
/// A form expects a JSON object, a formset a JSON array of objects.
pub type Initial = IndexMap<String, serde_json::Value>;

/// Shared, immutable payload handed to every engine of a container.
pub type SharedData = Arc<FormData>;

/// Shared, immutable files handed to every engine of a container.
pub type SharedFiles = Arc<Files>;

/// A file submitted alongside the form payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    pub content_type: Option<String>,
    pub content: Vec<u8>,
}

impl UploadedFile {
    #[inline]
    pub fn new<S: Into<String>>(name: S, content: Vec<u8>) -> Self {
        Self { name: name.into(), content_type: None, content }
    }

    #[inline]
    pub fn with_content_type<S: Into<String>>(mut self, content_type: S) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.content.len()
    }
}
