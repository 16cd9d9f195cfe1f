//! Form containers: bind several forms and formsets to one payload and
//! validate them as a single unit.
//!
//! A container declares named sub-forms, binds every one of them to the
//! same request data (each under its own prefix), merges their errors into
//! one [`ErrorTree`] and reports one valid/invalid outcome. Cross-form rules
//! live in [`ContainerHooks`], and errors can be injected afterwards through
//! [`FormContainer::add_error`].
//!
//! # Examples
//!
//! ## Validating a person and their phone numbers
//!
//! ```
//! use form_rail::prelude::*;
//! use serde_json::json;
//!
//! let schema = ContainerSchema::builder()
//!     .form("person", FormSpec::new("PersonForm", [
//!         CharField::new("first_name"),
//!         CharField::new("last_name"),
//!     ]))
//!     .formset("phones", FormSetSpec::new(FormSpec::new("PhoneNumberForm", [
//!         CharField::new("phone_number").min_length(2),
//!     ])))
//!     .build()
//!     .unwrap();
//!
//! let mut container = FormContainer::new(&schema, form_data! {
//!     "person-first_name" => "John",
//!     "person-last_name" => "Smith",
//!     "phones-TOTAL_FORMS" => 2,
//!     "phones-INITIAL_FORMS" => 1,
//!     "phones-0-phone_number" => "12345",
//!     "phones-1-phone_number" => "23456",
//! });
//!
//! assert!(container.is_valid());
//! assert_eq!(
//!     container.cleaned_data().unwrap().to_value().unwrap(),
//!     json!({
//!         "person": { "first_name": "John", "last_name": "Smith" },
//!         "phones": [{ "phone_number": "12345" }, { "phone_number": "23456" }],
//!     })
//! );
//! ```
//!
//! ## Injecting errors after validation
//!
//! ```
//! use form_rail::prelude::*;
//! use serde_json::json;
//!
//! let schema = ContainerSchema::builder()
//!     .form("person", FormSpec::new("PersonForm", [
//!         CharField::new("first_name"),
//!         CharField::new("last_name"),
//!     ]))
//!     .build()
//!     .unwrap();
//!
//! let mut container = FormContainer::new(&schema, form_data! {
//!     "person-first_name" => "John",
//!     "person-last_name" => "Smith",
//! });
//!
//! container.add_error(None, None, "error!").unwrap();
//! container
//!     .add_error(Some("person"), None, field_errors! { "last_name" => ["Unknown family."] })
//!     .unwrap();
//!
//! assert_eq!(
//!     container.errors().to_value().unwrap(),
//!     json!({
//!         "__all__": ["error!"],
//!         "person": { "last_name": ["Unknown family."] },
//!     })
//! );
//! ```
//!
//! # Features
//!
//! - `tracing`: emits `debug`/`trace` events from schema building, the
//!   validation pipeline and `add_error`.
#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
pub mod macros;

/// Container schema, hooks and the bound container
pub mod container;
/// Traits between the container and the engines it aggregates
pub mod engine;
/// Reference form and formset engines
pub mod forms;
/// Convenience re-exports for quick starts
pub mod prelude;
/// Error structures, cleaned data and payload types
pub mod types;
/// Validation type for error accumulation
pub mod validation;

pub use container::{ContainerHooks, ContainerSchema, FormContainer};
pub use types::{
    CleanedData, ErrorDict, ErrorFormatConfig, ErrorList, ErrorTree, ErrorVec, FormData,
    UsageError, ValidationError,
};
pub use validation::Validation;
