//! Ergonomic macros for building payloads and injected errors.
//!
//! - [`macro@crate::form_data`] - Builds a [`FormData`](crate::types::FormData) payload from
//!   `key => value` pairs.
//! - [`macro@crate::field_errors`] - Builds a field-keyed
//!   [`ValidationError`](crate::types::ValidationError) for
//!   [`add_error`](crate::container::FormContainer::add_error).
//!
//! # Examples
//!
//! ```
//! use form_rail::{field_errors, form_data};
//!
//! let data = form_data! {
//!     "person-first_name" => "John",
//!     "person-last_name" => "Smith",
//! };
//! assert_eq!(data["person-first_name"], "John");
//!
//! let error = field_errors! { "first_name" => ["Unknown person."] };
//! assert!(error.has_fields());
//! ```

/// Builds a [`FormData`](crate::types::FormData) payload.
///
/// Keys and values accept anything implementing `ToString`, so numbers can
/// be used for management counts directly.
///
/// # Examples
///
/// ```
/// use form_rail::form_data;
///
/// let data = form_data! {
///     "phones-TOTAL_FORMS" => 2,
///     "phones-INITIAL_FORMS" => 0,
/// };
/// assert_eq!(data["phones-TOTAL_FORMS"], "2");
///
/// let empty = form_data! {};
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! form_data {
    () => {
        $crate::types::FormData::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut data = $crate::types::FormData::new();
        $(
            data.insert(
                ::std::string::ToString::to_string(&$key),
                ::std::string::ToString::to_string(&$value),
            );
        )+
        data
    }};
}

/// Builds a field-keyed [`ValidationError`](crate::types::ValidationError).
///
/// # Examples
///
/// ```
/// use form_rail::field_errors;
///
/// let error = field_errors! {
///     "first_name" => ["Too short."],
///     "__all__" => ["Unknown person.", "Try again."],
/// };
/// assert_eq!(error.messages().count(), 3);
/// ```
#[macro_export]
macro_rules! field_errors {
    ($($field:expr => [$($message:expr),* $(,)?]),* $(,)?) => {
        $crate::types::ValidationError::fields(::std::vec![
            $( ($field, ::std::vec![$($message),*]) ),*
        ])
    };
}

#[cfg(feature = "tracing")]
macro_rules! debug_event {
    ($($arg:tt)*) => {
        ::tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug_event {
    ($($arg:tt)*) => {
        ()
    };
}

#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($($arg:tt)*) => {
        ::tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($($arg:tt)*) => {
        ()
    };
}
