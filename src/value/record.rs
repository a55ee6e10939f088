//! Immutable records with shared field storage.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::Value;

/// An immutable mapping from field names to values.
///
/// Field storage sits behind an [`Arc`]: cloning a record is a pointer copy,
/// and [`Record::insert`] copies only the top-level table while reusing every
/// untouched field value by reference.
///
/// A record never holds [`Value::Absent`]: inserting an absent value removes
/// the field instead.
///
/// # Examples
///
/// ```rust
/// use focal::value::{Record, Value};
///
/// let record: Record = [("a", 1), ("b", 2)].into_iter().collect();
/// let updated = record.insert("a", Value::from(10));
///
/// assert_eq!(record.get("a"), Some(&Value::from(1)));
/// assert_eq!(updated.get("a"), Some(&Value::from(10)));
///
/// let removed = updated.insert("b", Value::Absent);
/// assert!(!removed.contains_key("b"));
/// ```
#[derive(Clone, Default, PartialEq)]
pub struct Record {
    fields: Arc<BTreeMap<Arc<str>, Value>>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the value of an own field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Returns `true` if the record owns a field named `name`.
    pub fn contains_key(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Returns a new record with `name` bound to `value`.
    ///
    /// Inserting [`Value::Absent`] is the same as [`Record::remove`].
    #[must_use]
    pub fn insert(&self, name: impl Into<Arc<str>>, value: Value) -> Self {
        let name = name.into();
        if value.is_absent() {
            return self.remove(&name);
        }
        let mut fields = BTreeMap::clone(&self.fields);
        fields.insert(name, value);
        Self {
            fields: Arc::new(fields),
        }
    }

    /// Returns a new record without `name`.
    ///
    /// When the field is not present the result shares storage with `self`.
    #[must_use]
    pub fn remove(&self, name: &str) -> Self {
        if !self.contains_key(name) {
            return self.clone();
        }
        let mut fields = BTreeMap::clone(&self.fields);
        fields.remove(name);
        Self {
            fields: Arc::new(fields),
        }
    }

    /// Returns an iterator over fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&Arc<str>, &Value)> {
        self.fields.iter()
    }

    /// Returns an iterator over field names in order.
    pub fn keys(&self) -> impl Iterator<Item = &Arc<str>> {
        self.fields.keys()
    }

    /// Returns `true` if both records share the same field storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.fields, &other.fields)
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<Arc<str>>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let fields = iter
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .filter(|(_, value): &(Arc<str>, Value)| !value.is_absent())
            .collect();
        Self {
            fields: Arc::new(fields),
        }
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.fields.iter()).finish()
    }
}
