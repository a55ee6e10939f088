//! Nested, read-mostly values that path lenses walk and rebuild.
//!
//! [`Value`] is the structure type of the library: a record/array/scalar tree
//! whose containers are shared through [`Arc`]. Cloning a value never
//! deep-copies, and every write performed by a lens produces a new top-level
//! value that reuses all untouched branches by reference.
//!
//! # Examples
//!
//! ```rust
//! use focal::record;
//! use focal::value::Value;
//!
//! let value = record! {
//!     "name" => "Alice",
//!     "address" => record! { "city" => "Tokyo" },
//!     "tags" => Value::array(["admin", "ops"]),
//! };
//!
//! assert_eq!(value.kind(), "record");
//! assert_eq!(value.get(&"name".into()), Some(&Value::from("Alice")));
//! ```

mod key;
mod record;
#[cfg(feature = "serde")]
mod serialization;

use std::sync::Arc;

pub use key::Key;
pub use key::Path;
pub use record::Record;

/// A nested immutable value.
///
/// `Absent` is the focus seen through a path that does not resolve. It is
/// distinct from `Null`, which is a present value. Records never store
/// `Absent` entries.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// No value at all.
    #[default]
    Absent,
    /// An explicit null.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// An immutable string.
    String(Arc<str>),
    /// An immutable, shared array.
    Array(Arc<Vec<Value>>),
    /// An immutable, shared record.
    Record(Record),
}

impl Value {
    /// Builds an array value.
    pub fn array<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Self>,
    {
        Self::Array(Arc::new(items.into_iter().map(Into::into).collect()))
    }

    /// Builds a record value.
    pub fn record<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Arc<str>>,
        V: Into<Self>,
    {
        Self::Record(fields.into_iter().collect())
    }

    /// Returns `true` for [`Value::Absent`].
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns `true` for records and arrays.
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::Record(_) | Self::Array(_))
    }

    /// Returns a short name for the variant, used in error messages.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Record(_) => "record",
        }
    }

    /// Returns the child owned at `key`, if any.
    ///
    /// Records answer field keys (and index keys by their decimal name);
    /// arrays answer integer-like keys within bounds. Every other value owns
    /// nothing.
    pub fn get(&self, key: &Key) -> Option<&Self> {
        match self {
            Self::Record(record) => record.get(&key.field_name()),
            Self::Array(items) => key.as_index().and_then(|index| items.get(index)),
            _ => None,
        }
    }

    /// Returns the record, if this is one.
    pub const fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Returns the array items, if this is an array.
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Returns the integer, if this is one.
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(number) => Some(*number),
            _ => None,
        }
    }

    /// Returns the number as a float, for both integers and floats.
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(number) => Some(*number as f64),
            Self::Float(number) => Some(*number),
            _ => None,
        }
    }

    /// Returns the boolean, if this is one.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Returns the string slice, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(&**text),
            _ => None,
        }
    }

    /// Reference identity.
    ///
    /// Containers are identical when they share storage. Scalars have no
    /// identity of their own and compare by value.
    pub fn same_ref(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Record(left), Self::Record(right)) => left.ptr_eq(right),
            (Self::Array(left), Self::Array(right)) => Arc::ptr_eq(left, right),
            (Self::Record(_) | Self::Array(_), _) | (_, Self::Record(_) | Self::Array(_)) => false,
            (left, right) => left == right,
        }
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<i32> for Value {
    fn from(number: i32) -> Self {
        Self::Int(i64::from(number))
    }
}

impl From<i64> for Value {
    fn from(number: i64) -> Self {
        Self::Int(number)
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Self::Float(number)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::String(Arc::from(text))
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::String(Arc::from(text))
    }
}

impl From<Arc<str>> for Value {
    fn from(text: Arc<str>) -> Self {
        Self::String(text)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Self::Record(record)
    }
}

impl From<Vec<Self>> for Value {
    fn from(items: Vec<Self>) -> Self {
        Self::Array(Arc::new(items))
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// Builds a record [`Value`] from `name => value` pairs.
///
/// Values go through `Into<Value>`, so literals and nested `record!` calls
/// mix freely.
///
/// # Examples
///
/// ```rust
/// use focal::record;
/// use focal::value::Value;
///
/// let value = record! { "a" => record! { "b" => 1 }, "c" => true };
/// assert_eq!(
///     value,
///     Value::record([
///         ("a", Value::record([("b", 1)])),
///         ("c", Value::from(true)),
///     ])
/// );
///
/// assert_eq!(record! {}, Value::Record(Default::default()));
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::value::Value::Record($crate::value::Record::new())
    };
    ($($name:expr => $value:expr),+ $(,)?) => {
        $crate::value::Value::Record(
            [$(($name, $crate::value::Value::from($value))),+]
                .into_iter()
                .collect::<$crate::value::Record>(),
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;
    use rstest::rstest;

    #[rstest]
    fn test_same_ref_for_shared_containers() {
        let value = record! { "a" => 1 };
        let copy = value.clone();
        let rebuilt = record! { "a" => 1 };

        assert!(value.same_ref(&copy));
        assert!(!value.same_ref(&rebuilt));
        assert_eq!(value, rebuilt);
    }

    #[rstest]
    #[case(Value::from(1), Value::from(1), true)]
    #[case(Value::from("x"), Value::from("x"), true)]
    #[case(Value::from(1), Value::from(2), false)]
    #[case(Value::Absent, Value::Absent, true)]
    #[case(Value::Null, Value::Absent, false)]
    fn test_same_ref_for_scalars(#[case] left: Value, #[case] right: Value, #[case] expected: bool) {
        assert_eq!(left.same_ref(&right), expected);
    }

    #[rstest]
    fn test_get_resolves_integer_like_keys() {
        let array = Value::array([10, 20, 30]);
        assert_eq!(array.get(&Key::from("1")), Some(&Value::from(20)));
        assert_eq!(array.get(&Key::Index(3)), None);

        let record = record! { "0" => "zero" };
        assert_eq!(record.get(&Key::Index(0)), Some(&Value::from("zero")));
    }

    #[rstest]
    fn test_scalars_own_nothing() {
        assert_eq!(Value::from(5).get(&Key::from("a")), None);
        assert_eq!(Value::Absent.get(&Key::from("a")), None);
    }

    #[rstest]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<i32>), Value::Absent);
        assert_eq!(Value::from(Some(3)), Value::from(3));
    }
}
