use crate::engine::{BindArgs, FormEngine, FormFactory, RenderStyle};
use crate::forms::field::{initial_text, CharField};
use crate::types::{CleanedRecord, ErrorDict, ErrorFormatConfig, ErrorList, FormData, SharedData};
use crate::validation::Validation;
use maud::{html, Markup, PreEscaped};
use serde_json::Value;
use std::cell::OnceCell;
use std::sync::Arc;

/// Declaration of a form: a type name and its ordered fields.
///
/// A `FormSpec` is cheap to clone and can be registered in any number of
/// container schemas; each container binds its own [`Form`] from it.
///
/// # Examples
///
/// ```
/// use form_rail::form_data;
/// use form_rail::engine::FormEngine;
/// use form_rail::forms::{CharField, FormSpec};
///
/// let spec = FormSpec::new("PersonForm", [
///     CharField::new("first_name"),
///     CharField::new("last_name"),
/// ]);
///
/// let form = spec.bound(form_data! { "first_name" => "John" });
/// assert_eq!(form.errors().get("last_name").unwrap(), &["This field is required."]);
/// ```
#[derive(Debug, Clone)]
pub struct FormSpec {
    name: Arc<str>,
    fields: Arc<[CharField]>,
}

impl FormSpec {
    pub fn new<S, I>(name: S, fields: I) -> Self
    where
        S: AsRef<str>,
        I: IntoIterator<Item = CharField>,
    {
        Self { name: Arc::from(name.as_ref()), fields: fields.into_iter().collect() }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn fields(&self) -> &[CharField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&CharField> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Binds a standalone form to `data`, without prefix or initial values.
    pub fn bound(&self, data: FormData) -> Form {
        Form::new(self.clone(), FormOptions { data: Some(Arc::new(data)), ..FormOptions::default() })
    }

    /// A standalone form with no submitted data.
    pub fn unbound(&self) -> Form {
        Form::new(self.clone(), FormOptions::default())
    }

    /// Binds a form from container-supplied arguments.
    pub fn instantiate(&self, args: BindArgs<'_>) -> Form {
        Form::new(self.clone(), FormOptions::from_args(&args))
    }
}

impl FormFactory for FormSpec {
    fn bind(&self, args: BindArgs<'_>) -> Box<dyn FormEngine> {
        Box::new(self.instantiate(args))
    }
}

/// Binding options of a single [`Form`].
#[derive(Debug, Clone)]
pub(crate) struct FormOptions {
    pub data: Option<SharedData>,
    pub prefix: Option<String>,
    pub initial: Option<Value>,
    pub auto_id: String,
    pub error_format: Arc<ErrorFormatConfig>,
    pub empty_permitted: bool,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            data: None,
            prefix: None,
            initial: None,
            auto_id: "id_%s".to_owned(),
            error_format: Arc::default(),
            empty_permitted: false,
        }
    }
}

impl FormOptions {
    pub fn from_args(args: &BindArgs<'_>) -> Self {
        Self {
            data: args.data.cloned(),
            prefix: (!args.prefix.is_empty()).then(|| args.prefix.to_owned()),
            initial: args.initial.cloned(),
            auto_id: args.auto_id.to_owned(),
            error_format: Arc::clone(args.error_format),
            empty_permitted: false,
        }
    }
}

#[derive(Debug, Default)]
struct FormOutcome {
    errors: ErrorDict,
    cleaned: Option<CleanedRecord>,
}

/// A bound instance of a [`FormSpec`].
///
/// Validation runs on the first call to [`errors`](FormEngine::errors) or
/// [`cleaned_data`](FormEngine::cleaned_data) and is cached afterwards.
#[derive(Debug)]
pub struct Form {
    spec: FormSpec,
    options: FormOptions,
    outcome: OnceCell<FormOutcome>,
}

impl Form {
    pub(crate) fn new(spec: FormSpec, options: FormOptions) -> Self {
        Self { spec, options, outcome: OnceCell::new() }
    }

    #[inline]
    pub fn spec(&self) -> &FormSpec {
        &self.spec
    }

    #[inline]
    pub fn is_bound(&self) -> bool {
        self.options.data.is_some()
    }

    /// `true` when bound and every field cleaned without errors.
    pub fn is_valid(&self) -> bool {
        self.is_bound() && self.errors().is_empty()
    }

    /// Data key of `field`: `prefix-field`, or the bare name without prefix.
    pub fn add_prefix(&self, field: &str) -> String {
        match &self.options.prefix {
            Some(prefix) => format!("{prefix}-{field}"),
            None => field.to_owned(),
        }
    }

    /// HTML id of `field`, or `None` when ids are disabled.
    pub fn auto_id_for(&self, field: &str) -> Option<String> {
        let auto_id = &self.options.auto_id;
        if auto_id.contains("%s") {
            Some(auto_id.replace("%s", &self.add_prefix(field)))
        } else if auto_id.is_empty() {
            None
        } else {
            Some(self.add_prefix(field))
        }
    }

    /// Errors of the record as a whole.
    pub fn non_field_errors(&self) -> Option<&ErrorList> {
        self.errors().non_field_errors()
    }

    fn raw_value(&self, field: &str) -> Option<&str> {
        let data = self.options.data.as_ref()?;
        data.get(&self.add_prefix(field)).map(String::as_str)
    }

    fn initial_for(&self, field: &str) -> Option<&Value> {
        self.options.initial.as_ref().and_then(|initial| initial.get(field))
    }

    fn outcome(&self) -> &FormOutcome {
        self.outcome.get_or_init(|| self.full_clean())
    }

    fn full_clean(&self) -> FormOutcome {
        if !self.is_bound() {
            return FormOutcome::default();
        }

        if self.options.empty_permitted && !self.has_changed() {
            trace_event!(form = %self.spec.name(), "skipping untouched optional record");
            return FormOutcome { errors: ErrorDict::new(), cleaned: Some(CleanedRecord::new()) };
        }

        let mut errors = ErrorDict::new();
        let mut cleaned = CleanedRecord::new();
        for field in self.spec.fields() {
            match field.clean(self.raw_value(field.name())) {
                Validation::Valid(value) => {
                    cleaned.insert(field.name().to_owned(), value);
                },
                Validation::Invalid(messages) => errors.extend_field(field.name(), messages),
            }
        }

        trace_event!(form = %self.spec.name(), errors = errors.len(), "form cleaned");
        let cleaned = errors.is_empty().then_some(cleaned);
        FormOutcome { errors, cleaned }
    }

    fn display_value(&self, field: &CharField) -> Option<String> {
        let value = if self.is_bound() {
            self.raw_value(field.name()).unwrap_or_default().to_owned()
        } else {
            initial_text(self.initial_for(field.name()))
        };
        (!value.is_empty()).then_some(value)
    }

    fn render_field(&self, field: &CharField, style: RenderStyle) -> Markup {
        let format = &self.options.error_format;
        let id = self.auto_id_for(field.name());
        let errors = if self.is_bound() {
            self.errors().get(field.name()).map(|list| list.as_ul(format)).unwrap_or_default()
        } else {
            String::new()
        };
        let errors = PreEscaped(errors);

        let label = html! {
            @if let Some(id) = &id {
                label for=(id) { (field.label_text()) ":" }
            } @else {
                (field.label_text()) ":"
            }
        };
        let input = html! {
            input type="text"
                name=(self.add_prefix(field.name()))
                id=[id.as_deref()]
                value=[self.display_value(field)]
                minlength=[field.min_length_limit()]
                maxlength=[field.max_length_limit()];
        };

        match style {
            RenderStyle::Table => html! { tr { th { (label) } td { (errors) (input) } } },
            RenderStyle::Paragraph => html! { (errors) p { (label) " " (input) } },
            RenderStyle::List => html! { li { (errors) (label) " " (input) } },
        }
    }

    fn render_non_field(&self, style: RenderStyle) -> Option<Markup> {
        if !self.is_bound() {
            return None;
        }
        let list = self.non_field_errors().filter(|list| !list.is_empty())?;
        let errors = PreEscaped(list.as_ul(&self.options.error_format));
        Some(match style {
            RenderStyle::Table => html! { tr { td colspan="2" { (errors) } } },
            RenderStyle::Paragraph => html! { (errors) },
            RenderStyle::List => html! { li { (errors) } },
        })
    }
}

impl FormEngine for Form {
    fn type_name(&self) -> &str {
        self.spec.name()
    }

    fn prefix(&self) -> Option<&str> {
        self.options.prefix.as_deref()
    }

    fn field_names(&self) -> Vec<&str> {
        self.spec.fields().iter().map(CharField::name).collect()
    }

    fn has_field(&self, field: &str) -> bool {
        self.spec.field(field).is_some()
    }

    fn errors(&self) -> &ErrorDict {
        &self.outcome().errors
    }

    fn cleaned_data(&self) -> Option<CleanedRecord> {
        self.outcome().cleaned.clone()
    }

    /// Unbound forms never report a change.
    fn has_changed(&self) -> bool {
        self.is_bound()
            && self.spec.fields().iter().any(|field| {
                field.has_changed(self.initial_for(field.name()), self.raw_value(field.name()))
            })
    }

    fn render(&self, style: RenderStyle) -> String {
        let rows = self
            .render_non_field(style)
            .into_iter()
            .chain(self.spec.fields().iter().map(|field| self.render_field(field, style)))
            .map(Markup::into_string)
            .collect::<Vec<_>>();
        rows.join("\n")
    }
}
