//! Form containers: several sub-forms validated as one unit.
//!
//! A [`ContainerSchema`] declares named sub-forms once; a [`FormContainer`]
//! binds one payload to it, runs every sub-form, merges their errors into a
//! single [`ErrorTree`] and exposes one valid/invalid outcome.
//!
//! The validation pipeline runs on first access to [`FormContainer::errors`],
//! [`FormContainer::is_valid`], [`FormContainer::cleaned_data`] or
//! [`FormContainer::add_error`], exactly once per container:
//!
//! 1. every sub-form is cleaned in declaration order and its errors merged,
//! 2. [`ContainerHooks::clean`] checks the cleaned values across sub-forms,
//! 3. [`ContainerHooks::post_clean`] may inject further errors.
//!
//! # Examples
//!
//! ```
//! use form_rail::container::{ContainerSchema, FormContainer};
//! use form_rail::form_data;
//! use form_rail::forms::{CharField, FormSetSpec, FormSpec};
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
//!     "phones-TOTAL_FORMS" => 1,
//!     "phones-INITIAL_FORMS" => 0,
//!     "phones-0-phone_number" => "2",
//! });
//!
//! assert!(!container.is_valid());
//! let phones = container.errors().formset("phones").unwrap();
//! assert_eq!(
//!     phones[0].get("phone_number").unwrap(),
//!     &["Ensure this value has at least 2 characters (it has 1)."]
//! );
//! ```
pub mod schema;

pub use schema::{ContainerHooks, ContainerSchema, ContainerSchemaBuilder, DefaultHooks};

use crate::engine::{BindArgs, NativeErrors, RenderStyle, SubForm};
use crate::types::{
    CleanedData, ErrorClass, ErrorFormatConfig, ErrorList, ErrorTree, Files, FormData, Initial,
    SharedData, SharedFiles, UsageError, ValidationError, NON_FIELD_ERRORS,
};
use crate::validation::Validation;
use core::fmt::{self, Display};
use indexmap::IndexMap;
use std::sync::Arc;

/// Default template for HTML ids; `%s` is replaced by the prefixed field name.
pub const DEFAULT_AUTO_ID: &str = "id_%s";

/// One payload bound to a [`ContainerSchema`].
#[derive(Debug)]
pub struct FormContainer {
    schema: Arc<ContainerSchema>,
    data: Option<SharedData>,
    files: Option<SharedFiles>,
    initial: Initial,
    error_format: Arc<ErrorFormatConfig>,
    subforms: IndexMap<String, SubForm>,
    errors: Option<ErrorTree>,
    cleaned_data: Option<CleanedData>,
}

impl FormContainer {
    /// Binds `data` with default options.
    pub fn new(schema: &Arc<ContainerSchema>, data: FormData) -> Self {
        Self::builder(schema).data(data).build()
    }

    /// A container with no submitted data; it is never valid.
    pub fn unbound(schema: &Arc<ContainerSchema>) -> Self {
        Self::builder(schema).build()
    }

    #[inline]
    pub fn builder(schema: &Arc<ContainerSchema>) -> FormContainerBuilder {
        FormContainerBuilder::new(Arc::clone(schema))
    }

    /// `true` when a payload was supplied, even an empty one.
    #[inline]
    pub fn is_bound(&self) -> bool {
        self.data.is_some()
    }

    #[inline]
    pub fn schema(&self) -> &Arc<ContainerSchema> {
        &self.schema
    }

    #[inline]
    pub fn data(&self) -> Option<&FormData> {
        self.data.as_deref()
    }

    #[inline]
    pub fn files(&self) -> Option<&Files> {
        self.files.as_deref()
    }

    #[inline]
    pub fn initial(&self) -> &Initial {
        &self.initial
    }

    #[inline]
    pub fn error_format(&self) -> &ErrorFormatConfig {
        &self.error_format
    }

    /// The bound engine registered under `name`.
    #[inline]
    pub fn subform(&self, name: &str) -> Option<&SubForm> {
        self.subforms.get(name)
    }

    /// Every bound engine, in declaration order.
    pub fn subforms(&self) -> impl Iterator<Item = (&str, &SubForm)> {
        self.subforms.iter().map(|(name, subform)| (name.as_str(), subform))
    }

    /// The merged error tree; validates on first call.
    ///
    /// Unbound containers report an empty tree.
    pub fn errors(&mut self) -> &ErrorTree {
        self.ensure_clean();
        self.errors.get_or_insert_with(ErrorTree::new)
    }

    /// `true` when bound and no branch of the tree carries a message.
    pub fn is_valid(&mut self) -> bool {
        self.is_bound() && !self.errors().has_errors()
    }

    /// Cleaned values of every sub-form that produced them.
    ///
    /// `None` for unbound containers.
    pub fn cleaned_data(&mut self) -> Option<&CleanedData> {
        self.ensure_clean();
        self.cleaned_data.as_ref()
    }

    /// Container-wide errors; empty when there are none.
    pub fn non_form_errors(&mut self) -> ErrorList {
        self.errors()
            .non_form_errors()
            .cloned()
            .unwrap_or_else(|| ErrorList::with_class(ErrorClass::NonField))
    }

    /// `true` when any sub-form's data differs from its initial values.
    pub fn has_changed(&self) -> bool {
        self.subforms.values().any(SubForm::has_changed)
    }

    /// Adds errors after (or during) validation.
    ///
    /// - `form = None`: every message becomes a container-wide error and
    ///   `field` is ignored.
    /// - `form = Some(name)`: messages go to `field` of that single-record
    ///   sub-form, or to its whole-record errors when `field` is `None`. A
    ///   field-keyed error distributes its messages by field instead.
    ///
    /// Fields that receive errors are dropped from the cleaned data. All
    /// arguments are checked before anything changes, so a failed call
    /// leaves the container untouched.
    ///
    /// # Errors
    ///
    /// - [`UsageError::UnknownForm`] when no sub-form is named `form`,
    /// - [`UsageError::NotASingleForm`] when `form` names a formset,
    /// - [`UsageError::FieldWithMultipleErrors`] when `field` is given with
    ///   a field-keyed error,
    /// - [`UsageError::UnknownField`] when a target field is not declared.
    ///
    /// # Examples
    ///
    /// ```
    /// use form_rail::container::{ContainerSchema, FormContainer};
    /// use form_rail::form_data;
    /// use form_rail::forms::{CharField, FormSpec};
    ///
    /// let schema = ContainerSchema::builder()
    ///     .form("person", FormSpec::new("PersonForm", [CharField::new("first_name")]))
    ///     .build()
    ///     .unwrap();
    /// let mut container = FormContainer::new(&schema, form_data! { "person-first_name" => "John" });
    ///
    /// container.add_error(Some("person"), Some("first_name"), "Already registered.").unwrap();
    /// assert!(!container.is_valid());
    ///
    /// let err = container.add_error(Some("person"), Some("age"), "Too young.").unwrap_err();
    /// assert_eq!(err.to_string(), "'PersonForm' has no field named 'age'.");
    /// ```
    pub fn add_error<E>(
        &mut self,
        form: Option<&str>,
        field: Option<&str>,
        error: E,
    ) -> Result<(), UsageError>
    where
        E: Into<ValidationError>,
    {
        let error = error.into();
        self.ensure_clean();

        let Some(form) = form else {
            debug_event!(messages = error.messages().count(), "container-wide error added");
            self.tree_mut().extend_non_form(error.into_messages());
            return Ok(());
        };

        let entries = self.resolve_targets(form, field, error)?;
        debug_event!(form = %form, fields = entries.len(), "form error added");

        let tree = self.errors.get_or_insert_with(ErrorTree::new);
        for (field, messages) in entries {
            if messages.is_empty() {
                continue;
            }
            tree.extend_form(form, &field, messages);
            if let Some(cleaned) = self.cleaned_data.as_mut().and_then(|data| data.get_mut(form)) {
                cleaned.remove_field(&field);
            }
        }
        Ok(())
    }

    /// Checks every target of an `add_error` call and pairs fields with messages.
    fn resolve_targets(
        &self,
        form: &str,
        field: Option<&str>,
        error: ValidationError,
    ) -> Result<Vec<(String, Vec<String>)>, UsageError> {
        let subform = self
            .subforms
            .get(form)
            .ok_or_else(|| UsageError::UnknownForm { form: form.to_owned() })?;
        let engine =
            subform.as_form().ok_or_else(|| UsageError::NotASingleForm { form: form.to_owned() })?;

        let entries: Vec<(String, Vec<String>)> = match (error, field) {
            (ValidationError::Fields(_), Some(field)) => {
                return Err(UsageError::FieldWithMultipleErrors { field: field.to_owned() });
            },
            (ValidationError::Fields(fields), None) => fields.into_iter().collect(),
            (error, field) => {
                vec![(field.unwrap_or(NON_FIELD_ERRORS).to_owned(), error.into_messages())]
            },
        };

        let unknown = entries
            .iter()
            .find(|(field, _)| field != NON_FIELD_ERRORS && !engine.has_field(field));
        if let Some((field, _)) = unknown {
            return Err(UsageError::UnknownField {
                form_type: engine.type_name().to_owned(),
                field: field.clone(),
            });
        }
        Ok(entries)
    }

    /// Renders every sub-form in the given style, in declaration order.
    pub fn render(&self, style: RenderStyle) -> String {
        self.subforms
            .values()
            .map(|subform| subform.render(style))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[inline]
    pub fn as_table(&self) -> String {
        self.render(RenderStyle::Table)
    }

    #[inline]
    pub fn as_p(&self) -> String {
        self.render(RenderStyle::Paragraph)
    }

    #[inline]
    pub fn as_ul(&self) -> String {
        self.render(RenderStyle::List)
    }

    fn tree_mut(&mut self) -> &mut ErrorTree {
        self.errors.get_or_insert_with(ErrorTree::new)
    }

    fn ensure_clean(&mut self) {
        if self.errors.is_none() {
            self.full_clean();
        }
    }

    fn full_clean(&mut self) {
        let mut tree = ErrorTree::new();
        if !self.is_bound() {
            trace_event!("container unbound, nothing to clean");
            self.errors = Some(tree);
            return;
        }

        let mut cleaned = CleanedData::new();
        for (name, subform) in &self.subforms {
            match subform.native_errors() {
                NativeErrors::Form(dict) => {
                    for (field, list) in dict.iter().filter(|(_, list)| !list.is_empty()) {
                        tree.extend_form(name, field, list.iter().cloned());
                    }
                },
                NativeErrors::FormSet(records) => tree.set_formset(name, records.to_vec()),
            }
            if let Some(value) = subform.cleaned_value() {
                cleaned.insert(name.clone(), value);
            }
            trace_event!(subform = %name, kind = subform.type_name(), "sub-form cleaned");
        }

        let hooks = self.schema.hooks();
        match hooks.clean(&cleaned) {
            Validation::Valid(Some(replacement)) => cleaned = replacement,
            Validation::Valid(None) => {},
            Validation::Invalid(messages) => tree.extend_non_form(messages),
        }

        self.errors = Some(tree);
        self.cleaned_data = Some(cleaned);
        hooks.post_clean(self);

        debug_event!(
            forms = self.subforms.len(),
            valid = !self.errors.as_ref().is_some_and(ErrorTree::has_errors),
            "container cleaned"
        );
    }
}

impl Display for FormContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_table())
    }
}

/// Builder for [`FormContainer`].
///
/// # Examples
///
/// ```
/// use form_rail::container::{ContainerSchema, FormContainer};
/// use form_rail::forms::{CharField, FormSpec};
/// use form_rail::types::ErrorFormatConfig;
/// use serde_json::json;
///
/// let schema = ContainerSchema::builder()
///     .form("person", FormSpec::new("PersonForm", [CharField::new("first_name")]))
///     .build()
///     .unwrap();
///
/// let container = FormContainer::builder(&schema)
///     .initial_for("person", json!({ "first_name": "John" }))
///     .auto_id("field_%s")
///     .error_format(ErrorFormatConfig::default().with_css_class("invalid"))
///     .build();
///
/// assert!(!container.is_bound());
/// assert!(container.as_p().contains(r#"id="field_person-first_name" value="John""#));
/// ```
#[derive(Debug)]
pub struct FormContainerBuilder {
    schema: Arc<ContainerSchema>,
    data: Option<SharedData>,
    files: Option<SharedFiles>,
    initial: Initial,
    auto_id: String,
    error_format: ErrorFormatConfig,
}

impl FormContainerBuilder {
    fn new(schema: Arc<ContainerSchema>) -> Self {
        Self {
            schema,
            data: None,
            files: None,
            initial: Initial::new(),
            auto_id: DEFAULT_AUTO_ID.to_owned(),
            error_format: ErrorFormatConfig::default(),
        }
    }

    #[inline]
    pub fn data(self, data: FormData) -> Self {
        self.shared_data(Arc::new(data))
    }

    /// Binds a payload that is already shared elsewhere.
    #[inline]
    pub fn shared_data(mut self, data: SharedData) -> Self {
        self.data = Some(data);
        self
    }

    #[inline]
    pub fn files(mut self, files: Files) -> Self {
        self.files = Some(Arc::new(files));
        self
    }

    /// Initial values keyed by sub-form name.
    #[inline]
    pub fn initial(mut self, initial: Initial) -> Self {
        self.initial = initial;
        self
    }

    #[inline]
    pub fn initial_for<S: Into<String>>(mut self, name: S, value: serde_json::Value) -> Self {
        self.initial.insert(name.into(), value);
        self
    }

    /// Id template; `%s` is replaced by the prefixed field name, an empty
    /// template disables ids.
    #[inline]
    pub fn auto_id<S: Into<String>>(mut self, auto_id: S) -> Self {
        self.auto_id = auto_id.into();
        self
    }

    #[inline]
    pub fn error_format(mut self, error_format: ErrorFormatConfig) -> Self {
        self.error_format = error_format;
        self
    }

    /// Binds one engine per sub-form; no validation runs yet.
    pub fn build(self) -> FormContainer {
        let error_format = Arc::new(self.error_format);
        let subforms = self
            .schema
            .iter()
            .map(|(name, kind)| {
                let args = BindArgs {
                    data: self.data.as_ref(),
                    files: self.files.as_ref(),
                    prefix: name,
                    initial: self.initial.get(name),
                    auto_id: &self.auto_id,
                    error_format: &error_format,
                };
                (name.clone(), kind.bind(args))
            })
            .collect();

        trace_event!(bound = self.data.is_some(), "form container built");
        FormContainer {
            schema: self.schema,
            data: self.data,
            files: self.files,
            initial: self.initial,
            error_format,
            subforms,
            errors: None,
            cleaned_data: None,
        }
    }
}
