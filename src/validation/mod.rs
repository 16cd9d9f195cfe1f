//! Validation type for accumulating errors.
//!
//! [`Validation`] either holds a value or every error found while producing
//! it. Fields use it to report all broken rules at once, and container
//! `clean` hooks return it to signal container-wide failures.
//!
//! # Examples
//!
//! ```
//! use form_rail::validation::Validation;
//!
//! let valid: Validation<String, i32> = Validation::Valid(42);
//! assert!(valid.is_valid());
//!
//! let invalid: Validation<&str, i32> = Validation::invalid_many(["err1", "err2"]);
//! assert_eq!(invalid.iter_errors().count(), 2);
//! ```
pub mod core;
pub mod iter;

pub use self::core::*;
