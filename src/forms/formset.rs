use crate::engine::{BindArgs, FormEngine, FormSetEngine, FormSetFactory, RenderStyle};
use crate::forms::form::{Form, FormOptions, FormSpec};
use crate::types::{CleanedRecord, ErrorClass, ErrorDict, ErrorList, FormData};
use maud::html;
use serde_json::Value;
use std::cell::OnceCell;
use std::sync::Arc;

pub const TOTAL_FORM_COUNT: &str = "TOTAL_FORMS";
pub const INITIAL_FORM_COUNT: &str = "INITIAL_FORMS";
pub const MIN_NUM_FORM_COUNT: &str = "MIN_NUM_FORMS";
pub const MAX_NUM_FORM_COUNT: &str = "MAX_NUM_FORMS";

const MANAGEMENT_KEYS: [&str; 4] =
    [TOTAL_FORM_COUNT, INITIAL_FORM_COUNT, MIN_NUM_FORM_COUNT, MAX_NUM_FORM_COUNT];

/// Default upper bound on the number of records.
pub const DEFAULT_MAX_NUM: usize = 1000;

/// Ceiling of [`FormSetSpec::absolute_max`], however large `max_num` is.
pub const ABSOLUTE_MAX_CEILING: usize = 100_000;

pub const MANAGEMENT_FORM_MESSAGE: &str =
    "ManagementForm data is missing or has been tampered with.";

/// Declaration of a formset: the record form plus count rules.
///
/// # Examples
///
/// ```
/// use form_rail::form_data;
/// use form_rail::engine::FormSetEngine;
/// use form_rail::forms::{CharField, FormSetSpec, FormSpec};
///
/// let phones = FormSetSpec::new(FormSpec::new("PhoneNumberForm", [
///     CharField::new("phone_number").min_length(2),
/// ]));
///
/// let formset = phones.bound(form_data! {
///     "form-TOTAL_FORMS" => 2,
///     "form-INITIAL_FORMS" => 1,
///     "form-0-phone_number" => "12345",
/// });
///
/// assert_eq!(formset.total_form_count(), 2);
/// assert!(formset.errors().iter().all(|record| record.is_empty()));
/// ```
#[derive(Debug, Clone)]
pub struct FormSetSpec {
    name: Arc<str>,
    form: FormSpec,
    extra: usize,
    min_num: usize,
    max_num: usize,
    validate_min: bool,
    validate_max: bool,
}

impl FormSetSpec {
    /// One extra record, no minimum, at most [`DEFAULT_MAX_NUM`] records.
    pub fn new(form: FormSpec) -> Self {
        Self {
            name: Arc::from(format!("{}FormSet", form.name())),
            form,
            extra: 1,
            min_num: 0,
            max_num: DEFAULT_MAX_NUM,
            validate_min: false,
            validate_max: false,
        }
    }

    #[inline]
    pub fn named<S: AsRef<str>>(mut self, name: S) -> Self {
        self.name = Arc::from(name.as_ref());
        self
    }

    #[inline]
    pub fn extra(mut self, extra: usize) -> Self {
        self.extra = extra;
        self
    }

    #[inline]
    pub fn min_num(mut self, min_num: usize) -> Self {
        self.min_num = min_num;
        self
    }

    #[inline]
    pub fn max_num(mut self, max_num: usize) -> Self {
        self.max_num = max_num;
        self
    }

    /// Reports a set-level error when fewer than `min_num` records arrive.
    #[inline]
    pub fn validate_min(mut self) -> Self {
        self.validate_min = true;
        self
    }

    /// Reports a set-level error when more than `max_num` records arrive.
    #[inline]
    pub fn validate_max(mut self) -> Self {
        self.validate_max = true;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn form(&self) -> &FormSpec {
        &self.form
    }

    /// Hard cap on bound records, whatever the management data claims.
    ///
    /// Never exceeds [`ABSOLUTE_MAX_CEILING`].
    #[inline]
    pub fn absolute_max(&self) -> usize {
        self.max_num.saturating_add(DEFAULT_MAX_NUM).min(ABSOLUTE_MAX_CEILING)
    }

    /// Binds a standalone formset under the default `form` prefix.
    pub fn bound(&self, data: FormData) -> FormSet {
        FormSet::new(self.clone(), FormOptions {
            data: Some(Arc::new(data)),
            prefix: Some("form".to_owned()),
            ..FormOptions::default()
        })
    }

    /// A standalone formset with no submitted data.
    pub fn unbound(&self) -> FormSet {
        FormSet::new(self.clone(), FormOptions {
            prefix: Some("form".to_owned()),
            ..FormOptions::default()
        })
    }

    /// Binds a formset from container-supplied arguments.
    pub fn instantiate(&self, args: BindArgs<'_>) -> FormSet {
        let mut options = FormOptions::from_args(&args);
        options.prefix.get_or_insert_with(|| "form".to_owned());
        FormSet::new(self.clone(), options)
    }
}

impl FormSetFactory for FormSetSpec {
    fn bind(&self, args: BindArgs<'_>) -> Box<dyn FormSetEngine> {
        Box::new(self.instantiate(args))
    }
}

/// Counts read from the hidden management inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Management {
    total: usize,
    initial: usize,
}

impl Management {
    fn read(data: &FormData, prefix: &str) -> Option<Self> {
        let count = |key: &str| -> Option<usize> {
            data.get(&format!("{prefix}-{key}"))?.trim().parse().ok()
        };
        Some(Self { total: count(TOTAL_FORM_COUNT)?, initial: count(INITIAL_FORM_COUNT)? })
    }
}

#[derive(Debug, Default)]
struct FormSetOutcome {
    errors: Vec<ErrorDict>,
    non_form_errors: ErrorList,
}

/// A bound instance of a [`FormSetSpec`].
///
/// Records are bound eagerly under `prefix-<index>`; validation runs on
/// first access and is cached.
#[derive(Debug)]
pub struct FormSet {
    spec: FormSetSpec,
    options: FormOptions,
    management: Option<Management>,
    forms: Vec<Form>,
    outcome: OnceCell<FormSetOutcome>,
}

impl FormSet {
    fn new(spec: FormSetSpec, options: FormOptions) -> Self {
        let prefix = options.prefix.clone().unwrap_or_default();
        let management =
            options.data.as_deref().and_then(|data| Management::read(data, &prefix));
        let initial: &[Value] = match &options.initial {
            Some(Value::Array(records)) => records,
            _ => &[],
        };

        let (total, initial_count) = match (&options.data, management) {
            (Some(_), Some(counts)) => (counts.total.min(spec.absolute_max()), counts.initial),
            (Some(_), None) => (0, 0),
            (None, _) => {
                let initial_count = initial.len();
                let wanted = initial_count.max(spec.min_num).saturating_add(spec.extra);
                let total = if initial_count > spec.max_num {
                    initial_count
                } else {
                    wanted.min(spec.max_num).min(spec.absolute_max())
                };
                (total, initial_count)
            },
        };

        let forms = (0..total)
            .map(|index| {
                let record = FormOptions {
                    data: options.data.clone(),
                    prefix: Some(format!("{prefix}-{index}")),
                    initial: initial.get(index).cloned(),
                    auto_id: options.auto_id.clone(),
                    error_format: Arc::clone(&options.error_format),
                    empty_permitted: index >= initial_count && index >= spec.min_num,
                };
                Form::new(spec.form.clone(), record)
            })
            .collect();

        Self { spec, options, management, forms, outcome: OnceCell::new() }
    }

    #[inline]
    pub fn is_bound(&self) -> bool {
        self.options.data.is_some()
    }

    /// The bound records, in order.
    #[inline]
    pub fn forms(&self) -> &[Form] {
        &self.forms
    }

    pub fn initial_form_count(&self) -> usize {
        match (&self.options.data, self.management) {
            (Some(_), Some(counts)) => counts.initial,
            (Some(_), None) => 0,
            (None, _) => match &self.options.initial {
                Some(Value::Array(records)) => records.len(),
                _ => 0,
            },
        }
    }

    /// `true` when bound, every record is valid and the set itself has no errors.
    pub fn is_valid(&self) -> bool {
        self.is_bound()
            && self.errors().iter().all(ErrorDict::is_empty)
            && self.non_form_errors().is_empty()
    }

    fn outcome(&self) -> &FormSetOutcome {
        self.outcome.get_or_init(|| self.full_clean())
    }

    fn full_clean(&self) -> FormSetOutcome {
        let mut outcome = FormSetOutcome {
            errors: Vec::new(),
            non_form_errors: ErrorList::with_class(ErrorClass::NonForm),
        };
        let Some(data) = self.options.data.as_deref() else {
            return outcome;
        };

        if self.management.is_none() {
            debug_event!(formset = %self.spec.name(), "management data missing");
            outcome.non_form_errors.push(MANAGEMENT_FORM_MESSAGE);
            return outcome;
        }

        outcome.errors = self.forms.iter().map(|form| form.errors().clone()).collect();

        let submitted = self.total_form_count();
        let too_many =
            submitted > self.spec.max_num || self.claimed_total(data) > self.spec.absolute_max();
        if self.spec.validate_max && too_many {
            let message = format!("Please submit {} or fewer forms.", self.spec.max_num);
            outcome.non_form_errors.push(message);
        }
        if self.spec.validate_min && submitted < self.spec.min_num {
            let message = format!("Please submit {} or more forms.", self.spec.min_num);
            outcome.non_form_errors.push(message);
        }

        trace_event!(
            formset = %self.spec.name(),
            records = submitted,
            set_errors = outcome.non_form_errors.len(),
            "formset cleaned"
        );
        outcome
    }

    fn claimed_total(&self, data: &FormData) -> usize {
        let prefix = self.options.prefix.as_deref().unwrap_or_default();
        data.get(&format!("{prefix}-{TOTAL_FORM_COUNT}"))
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or_default()
    }

    fn management_value(&self, key: &str) -> Option<String> {
        if let Some(data) = &self.options.data {
            return data.get(&self.management_key(key)).cloned();
        }

        let count = match key {
            TOTAL_FORM_COUNT => self.total_form_count(),
            INITIAL_FORM_COUNT => self.initial_form_count(),
            MIN_NUM_FORM_COUNT => self.spec.min_num,
            _ => self.spec.max_num,
        };
        Some(count.to_string())
    }

    fn management_key(&self, key: &str) -> String {
        match &self.options.prefix {
            Some(prefix) => format!("{prefix}-{key}"),
            None => key.to_owned(),
        }
    }

    fn management_id(&self, key: &str) -> Option<String> {
        let auto_id = &self.options.auto_id;
        let key = self.management_key(key);
        if auto_id.contains("%s") {
            Some(auto_id.replace("%s", &key))
        } else if auto_id.is_empty() {
            None
        } else {
            Some(key)
        }
    }

    /// The hidden inputs carrying the record counts.
    pub fn management_form(&self) -> String {
        html! {
            @for key in MANAGEMENT_KEYS {
                input type="hidden"
                    name=(self.management_key(key))
                    id=[self.management_id(key)]
                    value=[self.management_value(key)];
            }
        }
        .into_string()
    }
}

impl FormSetEngine for FormSet {
    fn type_name(&self) -> &str {
        self.spec.name()
    }

    fn prefix(&self) -> Option<&str> {
        self.options.prefix.as_deref()
    }

    fn errors(&self) -> &[ErrorDict] {
        &self.outcome().errors
    }

    fn non_form_errors(&self) -> &ErrorList {
        &self.outcome().non_form_errors
    }

    fn cleaned_data(&self) -> Option<Vec<CleanedRecord>> {
        if !self.is_valid() {
            return None;
        }
        Some(self.forms.iter().map(|form| form.cleaned_data().unwrap_or_default()).collect())
    }

    fn has_changed(&self) -> bool {
        self.forms.iter().any(FormEngine::has_changed)
    }

    fn total_form_count(&self) -> usize {
        self.forms.len()
    }

    fn render(&self, style: RenderStyle) -> String {
        let mut parts = vec![self.management_form()];
        parts.extend(self.forms.iter().map(|form| form.render(style)));
        parts.join("\n")
    }
}
