//! Convenience re-exports for common usage patterns.
//!
//! ```
//! use form_rail::prelude::*;
//! ```
//!
//! # What's Included
//!
//! - **Macros**: [`form_data!`], [`field_errors!`]
//! - **Container**: [`ContainerSchema`], [`FormContainer`], [`ContainerHooks`]
//! - **Engines**: [`FormSpec`], [`FormSetSpec`], [`CharField`], [`FormEngine`], [`FormSetEngine`]
//! - **Types**: [`ErrorTree`], [`ErrorDict`], [`ErrorList`], [`CleanedData`], [`Validation`]
//!
//! # Examples
//!
//! ```
//! use form_rail::prelude::*;
//!
//! struct NoSmiths;
//!
//! impl ContainerHooks for NoSmiths {
//!     fn clean(&self, cleaned: &CleanedData) -> Validation<String, Option<CleanedData>> {
//!         let last_name = cleaned
//!             .record("person")
//!             .and_then(|person| person.get("last_name"))
//!             .and_then(|value| value.as_str());
//!         match last_name {
//!             Some("Smith") => Validation::invalid("No Smiths allowed.".to_owned()),
//!             _ => Validation::valid(None),
//!         }
//!     }
//! }
//!
//! let schema = ContainerSchema::builder()
//!     .form("person", FormSpec::new("PersonForm", [CharField::new("last_name")]))
//!     .hooks(NoSmiths)
//!     .build()
//!     .unwrap();
//!
//! let mut container = FormContainer::new(&schema, form_data! { "person-last_name" => "Smith" });
//! assert!(!container.is_valid());
//! assert_eq!(container.non_form_errors(), ["No Smiths allowed."]);
//! ```

// Macros
pub use crate::{field_errors, form_data};

// Container
pub use crate::container::{ContainerHooks, ContainerSchema, DefaultHooks, FormContainer};

// Engines
pub use crate::engine::{FormEngine, FormSetEngine, RenderStyle, SubForm};
pub use crate::forms::{CharField, FormSetSpec, FormSpec};

// Types
pub use crate::types::{
    CleanedData, CleanedRecord, ErrorDict, ErrorFormatConfig, ErrorList, ErrorTree, FormData,
    UsageError, ValidationError,
};
pub use crate::validation::Validation;
