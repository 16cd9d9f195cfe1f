//! Seams between the container and the engines it aggregates.
//!
//! A container never validates a field itself. It binds one engine per
//! sub-form and talks to it through one of two traits:
//!
//! - [`FormEngine`] validates a single flat record,
//! - [`FormSetEngine`] validates an ordered sequence of records.
//!
//! Engines are built from a [`FormFactory`] or [`FormSetFactory`] registered
//! in a [`ContainerSchema`](crate::container::ContainerSchema); closures
//! taking [`BindArgs`] implement both factory traits.
//!
//! The reference engines in [`crate::forms`] implement these traits, but any
//! validator that can report `field -> messages` can take part.
use crate::types::{
    CleanedRecord, CleanedValue, ErrorDict, ErrorFormatConfig, ErrorList, SharedData,
    SharedFiles,
};
use core::fmt;
use std::sync::Arc;

/// Output style of the rendering helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RenderStyle {
    /// Table rows (`<tr>`), one per field.
    #[default]
    Table,
    /// Paragraphs (`<p>`), one per field.
    Paragraph,
    /// List items (`<li>`), one per field.
    List,
}

/// Everything an engine receives when a container binds it.
///
/// `data` and `files` are the container's whole payload; the engine reads
/// only the keys under its own `prefix`.
#[derive(Debug, Clone, Copy)]
pub struct BindArgs<'a> {
    pub data: Option<&'a SharedData>,
    pub files: Option<&'a SharedFiles>,
    pub prefix: &'a str,
    pub initial: Option<&'a serde_json::Value>,
    pub auto_id: &'a str,
    pub error_format: &'a Arc<ErrorFormatConfig>,
}

impl BindArgs<'_> {
    /// `true` when the container was given a payload, even an empty one.
    #[inline]
    pub fn is_bound(&self) -> bool {
        self.data.is_some()
    }
}

/// A bound validator for one flat record.
pub trait FormEngine {
    /// Name used in usage errors, e.g. `PersonForm`.
    fn type_name(&self) -> &str;

    fn prefix(&self) -> Option<&str>;

    /// Declared field names, in declaration order.
    fn field_names(&self) -> Vec<&str>;

    fn has_field(&self, field: &str) -> bool {
        self.field_names().contains(&field)
    }

    /// Field errors; validates on first call and caches the result.
    fn errors(&self) -> &ErrorDict;

    /// Cleaned values, or `None` when the record is unbound or invalid.
    fn cleaned_data(&self) -> Option<CleanedRecord>;

    /// `true` when the bound data differs from the initial values.
    fn has_changed(&self) -> bool;

    fn render(&self, style: RenderStyle) -> String;
}

/// A bound validator for an ordered sequence of records.
pub trait FormSetEngine {
    fn type_name(&self) -> &str;

    fn prefix(&self) -> Option<&str>;

    /// Per-record errors, one dict per record; validates on first call.
    fn errors(&self) -> &[ErrorDict];

    /// Errors about the set as a whole (record counts, management data).
    fn non_form_errors(&self) -> &ErrorList;

    /// Cleaned records, or `None` when the set is unbound or invalid.
    fn cleaned_data(&self) -> Option<Vec<CleanedRecord>>;

    fn has_changed(&self) -> bool;

    fn total_form_count(&self) -> usize;

    fn render(&self, style: RenderStyle) -> String;
}

/// Builds a [`FormEngine`] for one container instance.
pub trait FormFactory: Send + Sync {
    fn bind(&self, args: BindArgs<'_>) -> Box<dyn FormEngine>;
}

/// Builds a [`FormSetEngine`] for one container instance.
pub trait FormSetFactory: Send + Sync {
    fn bind(&self, args: BindArgs<'_>) -> Box<dyn FormSetEngine>;
}

impl<F> FormFactory for F
where
    F: Fn(BindArgs<'_>) -> Box<dyn FormEngine> + Send + Sync,
{
    fn bind(&self, args: BindArgs<'_>) -> Box<dyn FormEngine> {
        self(args)
    }
}

impl<F> FormSetFactory for F
where
    F: Fn(BindArgs<'_>) -> Box<dyn FormSetEngine> + Send + Sync,
{
    fn bind(&self, args: BindArgs<'_>) -> Box<dyn FormSetEngine> {
        self(args)
    }
}

/// Blueprint entry of a schema: which kind of engine a name binds to.
#[derive(Clone)]
pub enum EngineKind {
    Form(Arc<dyn FormFactory>),
    FormSet(Arc<dyn FormSetFactory>),
}

impl EngineKind {
    /// Instantiates a fresh engine for one container.
    pub fn bind(&self, args: BindArgs<'_>) -> SubForm {
        match self {
            Self::Form(factory) => SubForm::Form(factory.bind(args)),
            Self::FormSet(factory) => SubForm::FormSet(factory.bind(args)),
        }
    }

    #[inline]
    pub fn is_form(&self) -> bool {
        matches!(self, Self::Form(_))
    }

    #[inline]
    pub fn is_formset(&self) -> bool {
        matches!(self, Self::FormSet(_))
    }
}

impl fmt::Debug for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Form(_) => f.write_str("EngineKind::Form"),
            Self::FormSet(_) => f.write_str("EngineKind::FormSet"),
        }
    }
}

/// Native error shape of one sub-form, before it is merged into a tree.
#[derive(Debug, Clone, Copy)]
pub enum NativeErrors<'a> {
    Form(&'a ErrorDict),
    FormSet(&'a [ErrorDict]),
}

/// A bound engine owned by a container.
pub enum SubForm {
    Form(Box<dyn FormEngine>),
    FormSet(Box<dyn FormSetEngine>),
}

impl SubForm {
    pub fn native_errors(&self) -> NativeErrors<'_> {
        match self {
            Self::Form(form) => NativeErrors::Form(form.errors()),
            Self::FormSet(formset) => NativeErrors::FormSet(formset.errors()),
        }
    }

    pub fn cleaned_value(&self) -> Option<CleanedValue> {
        match self {
            Self::Form(form) => form.cleaned_data().map(CleanedValue::Record),
            Self::FormSet(formset) => formset.cleaned_data().map(CleanedValue::Records),
        }
    }

    pub fn has_changed(&self) -> bool {
        match self {
            Self::Form(form) => form.has_changed(),
            Self::FormSet(formset) => formset.has_changed(),
        }
    }

    pub fn render(&self, style: RenderStyle) -> String {
        match self {
            Self::Form(form) => form.render(style),
            Self::FormSet(formset) => formset.render(style),
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            Self::Form(form) => form.type_name(),
            Self::FormSet(formset) => formset.type_name(),
        }
    }

    #[inline]
    pub fn as_form(&self) -> Option<&dyn FormEngine> {
        match self {
            Self::Form(form) => Some(form.as_ref()),
            Self::FormSet(_) => None,
        }
    }

    #[inline]
    pub fn as_formset(&self) -> Option<&dyn FormSetEngine> {
        match self {
            Self::FormSet(formset) => Some(formset.as_ref()),
            Self::Form(_) => None,
        }
    }
}

impl fmt::Debug for SubForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Form(form) => f.debug_tuple("SubForm::Form").field(&form.type_name()).finish(),
            Self::FormSet(formset) => {
                f.debug_tuple("SubForm::FormSet").field(&formset.type_name()).finish()
            },
        }
    }
}
