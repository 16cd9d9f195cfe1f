//! Reference engines: text fields, flat forms and formsets.
//!
//! [`FormSpec`] and [`FormSetSpec`] are declarations; registering them in a
//! [`ContainerSchema`](crate::container::ContainerSchema) makes the container
//! bind a fresh [`Form`] or [`FormSet`] per instance.
//!
//! Data keys follow the usual prefix scheme:
//!
//! - form fields live under `<prefix>-<field>`,
//! - formset records live under `<prefix>-<index>-<field>`,
//! - formset counts live under `<prefix>-TOTAL_FORMS` and friends.
pub mod field;
pub mod form;
pub mod formset;

pub use field::{CharField, REQUIRED_MESSAGE};
pub use form::{Form, FormSpec};
pub use formset::{
    FormSet, FormSetSpec, ABSOLUTE_MAX_CEILING, DEFAULT_MAX_NUM, INITIAL_FORM_COUNT,
    MANAGEMENT_FORM_MESSAGE, MAX_NUM_FORM_COUNT, MIN_NUM_FORM_COUNT, TOTAL_FORM_COUNT,
};
