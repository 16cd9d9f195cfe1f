use indexmap::map::Iter;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Cleaned values of one record, keyed by field name.
pub type CleanedRecord = IndexMap<String, Value>;

/// Cleaned output of one sub-form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CleanedValue {
    /// Output of a single form.
    Record(CleanedRecord),
    /// Output of a formset, one record per submitted form.
    Records(Vec<CleanedRecord>),
}

impl CleanedValue {
    #[inline]
    pub fn as_record(&self) -> Option<&CleanedRecord> {
        match self {
            Self::Record(record) => Some(record),
            Self::Records(_) => None,
        }
    }

    #[inline]
    pub fn as_records(&self) -> Option<&[CleanedRecord]> {
        match self {
            Self::Records(records) => Some(records),
            Self::Record(_) => None,
        }
    }

    /// Drops a field from a single-form record; formset output is left as is.
    pub(crate) fn remove_field(&mut self, field: &str) -> Option<Value> {
        match self {
            Self::Record(record) => record.shift_remove(field),
            Self::Records(_) => None,
        }
    }
}

impl From<CleanedRecord> for CleanedValue {
    fn from(record: CleanedRecord) -> Self {
        Self::Record(record)
    }
}

impl From<Vec<CleanedRecord>> for CleanedValue {
    fn from(records: Vec<CleanedRecord>) -> Self {
        Self::Records(records)
    }
}

/// Cleaned output of a whole container, keyed by sub-form name.
///
/// A sub-form that failed validation has no entry at all.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct CleanedData {
    values: IndexMap<String, CleanedValue>,
}

impl CleanedData {
    #[inline]
    pub fn new() -> Self {
        Self { values: IndexMap::new() }
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&CleanedValue> {
        self.values.get(name)
    }

    #[inline]
    pub fn get_mut(&mut self, name: &str) -> Option<&mut CleanedValue> {
        self.values.get_mut(name)
    }

    /// The cleaned record of the form named `name`.
    #[inline]
    pub fn record(&self, name: &str) -> Option<&CleanedRecord> {
        self.get(name).and_then(CleanedValue::as_record)
    }

    /// The cleaned records of the formset named `name`.
    #[inline]
    pub fn records(&self, name: &str) -> Option<&[CleanedRecord]> {
        self.get(name).and_then(CleanedValue::as_records)
    }

    #[inline]
    pub fn insert<S, V>(&mut self, name: S, value: V) -> Option<CleanedValue>
    where
        S: Into<String>,
        V: Into<CleanedValue>,
    {
        self.values.insert(name.into(), value.into())
    }

    #[inline]
    pub fn remove(&mut self, name: &str) -> Option<CleanedValue> {
        self.values.shift_remove(name)
    }

    #[inline]
    pub fn contains_key(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, String, CleanedValue> {
        self.values.iter()
    }

    /// Serializes the cleaned data as a JSON value.
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

impl<K: Into<String>, V: Into<CleanedValue>> FromIterator<(K, V)> for CleanedData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { values: iter.into_iter().map(|(name, value)| (name.into(), value.into())).collect() }
    }
}

impl<'a> IntoIterator for &'a CleanedData {
    type Item = (&'a String, &'a CleanedValue);
    type IntoIter = Iter<'a, String, CleanedValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
