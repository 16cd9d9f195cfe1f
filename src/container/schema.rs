use crate::container::FormContainer;
use crate::engine::{BindArgs, EngineKind, FormEngine, FormFactory, FormSetEngine, FormSetFactory};
use crate::types::{CleanedData, UsageError, NON_FORM_ERRORS};
use crate::validation::Validation;
use core::fmt;
use indexmap::IndexMap;
use std::sync::Arc;

/// Container-level validation steps that run after every sub-form is clean.
///
/// Both methods have defaults, so an empty `impl` gives the identity
/// pipeline.
///
/// # Examples
///
/// ```
/// use form_rail::container::ContainerHooks;
/// use form_rail::types::CleanedData;
/// use form_rail::validation::Validation;
///
/// struct RequirePhones;
///
/// impl ContainerHooks for RequirePhones {
///     fn clean(&self, cleaned: &CleanedData) -> Validation<String, Option<CleanedData>> {
///         match cleaned.records("phones") {
///             Some(records) if records.iter().any(|record| !record.is_empty()) => {
///                 Validation::valid(None)
///             },
///             _ => Validation::invalid("Give at least one phone number.".to_owned()),
///         }
///     }
/// }
/// ```
pub trait ContainerHooks: Send + Sync {
    /// Cross-form validation over the cleaned values of every valid sub-form.
    ///
    /// `Invalid` messages become container-wide errors; `Valid(Some(_))`
    /// replaces the cleaned data; `Valid(None)` keeps it.
    fn clean(&self, cleaned: &CleanedData) -> Validation<String, Option<CleanedData>> {
        let _ = cleaned;
        Validation::valid(None)
    }

    /// Runs last; may inject errors through [`FormContainer::add_error`].
    fn post_clean(&self, container: &mut FormContainer) {
        let _ = container;
    }
}

/// Hooks with the default behaviour.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHooks;

impl ContainerHooks for DefaultHooks {}

/// Immutable blueprint of a container type: named engine factories in
/// declaration order, plus the container hooks.
///
/// A schema is built once and shared by every container bound from it.
///
/// # Examples
///
/// ```
/// use form_rail::container::ContainerSchema;
/// use form_rail::forms::{CharField, FormSetSpec, FormSpec};
///
/// let person = FormSpec::new("PersonForm", [CharField::new("first_name")]);
/// let phones = FormSetSpec::new(FormSpec::new("PhoneNumberForm", [
///     CharField::new("phone_number"),
/// ]));
///
/// let schema = ContainerSchema::builder()
///     .form("person", person)
///     .formset("phones", phones)
///     .build()
///     .unwrap();
///
/// assert_eq!(schema.names().collect::<Vec<_>>(), ["person", "phones"]);
/// ```
pub struct ContainerSchema {
    engines: IndexMap<String, EngineKind>,
    hooks: Option<Arc<dyn ContainerHooks>>,
}

impl ContainerSchema {
    #[inline]
    pub fn builder() -> ContainerSchemaBuilder {
        ContainerSchemaBuilder::default()
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&EngineKind> {
        self.engines.get(name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.engines.contains_key(name)
    }

    /// Sub-form names in declaration order.
    #[inline]
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.engines.keys().map(String::as_str)
    }

    #[inline]
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, EngineKind> {
        self.engines.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.engines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    /// `true` when the schema, or one of its parents, set custom hooks.
    #[inline]
    pub fn has_custom_hooks(&self) -> bool {
        self.hooks.is_some()
    }

    /// The effective hooks: custom ones if any, otherwise [`DefaultHooks`].
    pub fn hooks(&self) -> Arc<dyn ContainerHooks> {
        match &self.hooks {
            Some(hooks) => Arc::clone(hooks),
            None => Arc::new(DefaultHooks),
        }
    }
}

impl fmt::Debug for ContainerSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerSchema")
            .field("engines", &self.engines)
            .field("custom_hooks", &self.hooks.is_some())
            .finish()
    }
}

/// Builder for [`ContainerSchema`].
///
/// Parents passed to [`inherit`](Self::inherit) contribute their entries
/// first, in the order given; the builder's own registrations follow. A name
/// registered again replaces the earlier factory but keeps its position.
///
/// # Examples
///
/// ```
/// use form_rail::container::ContainerSchema;
/// use form_rail::forms::{CharField, FormSpec};
///
/// let base = ContainerSchema::builder()
///     .form("person", FormSpec::new("PersonForm", [CharField::new("first_name")]))
///     .form("address", FormSpec::new("AddressForm", [CharField::new("street")]))
///     .build()
///     .unwrap();
///
/// let derived = ContainerSchema::builder()
///     .inherit(&base)
///     .form("notes", FormSpec::new("NotesForm", [CharField::new("text")]))
///     .form("person", FormSpec::new("StrictPersonForm", [CharField::new("first_name")]))
///     .build()
///     .unwrap();
///
/// assert_eq!(derived.names().collect::<Vec<_>>(), ["person", "address", "notes"]);
/// ```
#[derive(Default)]
pub struct ContainerSchemaBuilder {
    inherited: IndexMap<String, EngineKind>,
    own: IndexMap<String, EngineKind>,
    own_hooks: Option<Arc<dyn ContainerHooks>>,
    inherited_hooks: Option<Arc<dyn ContainerHooks>>,
    rejected: Option<UsageError>,
}

impl ContainerSchemaBuilder {
    /// Adds every entry of `parent` to the inherited entries.
    ///
    /// A later parent overrides an earlier one of the same name; the
    /// builder's own registrations override both, whatever the call order.
    pub fn inherit(mut self, parent: &ContainerSchema) -> Self {
        for (name, kind) in parent.iter() {
            self.inherited.insert(name.clone(), kind.clone());
        }
        if self.inherited_hooks.is_none() {
            self.inherited_hooks = parent.hooks.clone();
        }
        self
    }

    /// Registers a single-record sub-form.
    pub fn form<S, F>(self, name: S, factory: F) -> Self
    where
        S: Into<String>,
        F: FormFactory + 'static,
    {
        self.register(name.into(), EngineKind::Form(Arc::new(factory)))
    }

    /// Registers a single-record sub-form from a closure.
    pub fn form_with<S, F>(self, name: S, factory: F) -> Self
    where
        S: Into<String>,
        F: Fn(BindArgs<'_>) -> Box<dyn FormEngine> + Send + Sync + 'static,
    {
        self.form(name, factory)
    }

    /// Registers a record-set sub-form.
    pub fn formset<S, F>(self, name: S, factory: F) -> Self
    where
        S: Into<String>,
        F: FormSetFactory + 'static,
    {
        self.register(name.into(), EngineKind::FormSet(Arc::new(factory)))
    }

    /// Registers a record-set sub-form from a closure.
    pub fn formset_with<S, F>(self, name: S, factory: F) -> Self
    where
        S: Into<String>,
        F: Fn(BindArgs<'_>) -> Box<dyn FormSetEngine> + Send + Sync + 'static,
    {
        self.formset(name, factory)
    }

    /// Sets the container hooks, overriding any inherited ones.
    pub fn hooks<H: ContainerHooks + 'static>(mut self, hooks: H) -> Self {
        self.own_hooks = Some(Arc::new(hooks));
        self
    }

    /// Finishes the schema; fails on the first reserved or empty name.
    pub fn build(self) -> Result<Arc<ContainerSchema>, UsageError> {
        if let Some(error) = self.rejected {
            return Err(error);
        }

        let mut engines = self.inherited;
        for (name, kind) in self.own {
            engines.insert(name, kind);
        }

        let hooks = self.own_hooks.or(self.inherited_hooks);
        debug_event!(
            forms = engines.len(),
            custom_hooks = hooks.is_some(),
            "container schema built"
        );
        Ok(Arc::new(ContainerSchema { engines, hooks }))
    }

    fn register(mut self, name: String, kind: EngineKind) -> Self {
        if self.rejected.is_some() {
            return self;
        }

        if name.is_empty() {
            self.rejected = Some(UsageError::EmptyName);
        } else if name == NON_FORM_ERRORS {
            self.rejected = Some(UsageError::ReservedName { name });
        } else {
            self.own.insert(name, kind);
        }
        self
    }
}

impl fmt::Debug for ContainerSchemaBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerSchemaBuilder")
            .field("inherited", &self.inherited)
            .field("own", &self.own)
            .field("rejected", &self.rejected)
            .finish_non_exhaustive()
    }
}
