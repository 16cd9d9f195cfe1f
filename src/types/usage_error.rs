use core::fmt::{self, Display};

/// A contract violation by the calling code.
///
/// Usage errors are never produced by end-user input and are never folded
/// into an [`ErrorTree`](crate::types::ErrorTree); they are returned straight
/// to the caller of [`FormContainer::add_error`](crate::container::FormContainer::add_error)
/// or [`ContainerSchemaBuilder::build`](crate::container::ContainerSchemaBuilder::build).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UsageError {
    /// The container declares no sub-form with this name.
    UnknownForm { form: String },
    /// Field errors were targeted at a formset; formsets only accept errors
    /// through their own records.
    NotASingleForm { form: String },
    /// The targeted form does not declare this field.
    UnknownField { form_type: String, field: String },
    /// A field name was given together with an error that already names its fields.
    FieldWithMultipleErrors { field: String },
    /// A sub-form was registered under a reserved key.
    ReservedName { name: String },
    /// A sub-form was registered under an empty name.
    EmptyName,
}

impl Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownForm { form } => {
                write!(f, "The form container has no form named '{}'.", form)
            },
            Self::NotASingleForm { form } => {
                write!(f, "'{}' is a formset; errors cannot be added to it by field.", form)
            },
            Self::UnknownField { form_type, field } => {
                write!(f, "'{}' has no field named '{}'.", form_type, field)
            },
            Self::FieldWithMultipleErrors { field } => write!(
                f,
                "The argument `field` must be `None` when the `error` argument contains errors \
                 for multiple fields (got field '{}').",
                field
            ),
            Self::ReservedName { name } => {
                write!(f, "'{}' is reserved and cannot name a form.", name)
            },
            Self::EmptyName => f.write_str("Form names must not be empty."),
        }
    }
}

impl std::error::Error for UsageError {}
