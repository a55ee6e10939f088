//! Keys and paths addressing locations inside a [`Value`](super::Value).

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// One step of a [`Path`]: a record field name or an array index.
///
/// Keys are "integer-like" in both directions: a `Field` whose name is the
/// canonical decimal form of an integer addresses an array element, and an
/// `Index` addresses the record field named by its decimal form.
///
/// # Examples
///
/// ```rust
/// use focal::value::Key;
///
/// assert_eq!(Key::from("3").as_index(), Some(3));
/// assert_eq!(Key::from(3).field_name(), "3");
/// assert_eq!(Key::from("03").as_index(), None);
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Key {
    /// A named field.
    Field(Arc<str>),
    /// A positional index.
    Index(usize),
}

impl Key {
    /// Returns the record field name this key addresses.
    pub fn field_name(&self) -> Cow<'_, str> {
        match self {
            Self::Field(name) => Cow::Borrowed(name.as_ref()),
            Self::Index(index) => Cow::Owned(index.to_string()),
        }
    }

    /// Returns the array index this key addresses, if it is integer-like.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(index) => Some(*index),
            Self::Field(name) => name
                .parse::<usize>()
                .ok()
                .filter(|index| index.to_string() == **name),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => formatter.write_str(name),
            Self::Index(index) => write!(formatter, "{index}"),
        }
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => write!(formatter, "{name:?}"),
            Self::Index(index) => write!(formatter, "{index}"),
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Self::Field(Arc::from(name))
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Self::Field(Arc::from(name))
    }
}

impl From<Arc<str>> for Key {
    fn from(name: Arc<str>) -> Self {
        Self::Field(name)
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// An ordered, immutable sequence of keys.
///
/// A path is captured by the lens built from it and shared by every clone of
/// that lens.
///
/// # Examples
///
/// ```rust
/// use focal::path;
/// use focal::value::{Key, Path};
///
/// let path = path!["users", 0, "name"];
/// assert_eq!(path.len(), 3);
/// assert_eq!(path.keys()[1], Key::Index(0));
/// assert_eq!(path.to_string(), "users.0.name");
///
/// assert_eq!(path, Path::new(["users"]).child(0).child("name"));
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Path {
    keys: Arc<[Key]>,
}

impl Path {
    /// Creates a path from a sequence of keys.
    pub fn new<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        keys.into_iter().map(Into::into).collect()
    }

    /// The empty path, addressing the whole structure.
    pub fn root() -> Self {
        Self {
            keys: Arc::from([]),
        }
    }

    /// Returns the keys in order from the root inward.
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` for the root path.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns a new path extended by one key. `self` is left unchanged.
    #[must_use]
    pub fn child(&self, key: impl Into<Key>) -> Self {
        self.keys
            .iter()
            .cloned()
            .chain(std::iter::once(key.into()))
            .collect()
    }

    /// Returns an iterator over the keys.
    pub fn iter(&self) -> std::slice::Iter<'_, Key> {
        self.keys.iter()
    }
}

impl Default for Path {
    fn default() -> Self {
        Self::root()
    }
}

impl<K: Into<Key>> FromIterator<K> for Path {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<K: Into<Key>, const N: usize> From<[K; N]> for Path {
    fn from(keys: [K; N]) -> Self {
        Self::new(keys)
    }
}

impl<K: Into<Key>> From<Vec<K>> for Path {
    fn from(keys: Vec<K>) -> Self {
        Self::new(keys)
    }
}

impl From<&Self> for Path {
    fn from(path: &Self) -> Self {
        path.clone()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Key;
    type IntoIter = std::slice::Iter<'a, Key>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, key) in self.keys.iter().enumerate() {
            if position > 0 {
                formatter.write_str(".")?;
            }
            write!(formatter, "{key}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.keys.iter()).finish()
    }
}

/// Builds a [`Path`] from a list of keys of mixed kinds.
///
/// String literals become field keys, integer literals become index keys.
///
/// # Examples
///
/// ```rust
/// use focal::path;
/// use focal::value::Key;
///
/// let path = path!["matrix", 1, 2];
/// assert_eq!(path.keys(), &[Key::from("matrix"), Key::Index(1), Key::Index(2)]);
///
/// assert!(path![].is_empty());
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::value::Path::root()
    };
    ($($key:expr),+ $(,)?) => {
        $crate::value::Path::new([$($crate::value::Key::from($key)),+])
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0", Some(0))]
    #[case("42", Some(42))]
    #[case("042", None)]
    #[case("+1", None)]
    #[case("-1", None)]
    #[case("name", None)]
    fn test_field_as_index(#[case] name: &str, #[case] expected: Option<usize>) {
        assert_eq!(Key::from(name).as_index(), expected);
    }

    #[rstest]
    fn test_index_field_name() {
        assert_eq!(Key::Index(7).field_name(), "7");
        assert_eq!(Key::from("seven").field_name(), "seven");
    }

    #[rstest]
    fn test_child_does_not_modify_parent() {
        let parent = Path::new(["a"]);
        let child = parent.child("b");

        assert_eq!(parent.len(), 1);
        assert_eq!(child, Path::new(["a", "b"]));
    }

    #[rstest]
    fn test_display_and_debug() {
        let path = crate::path!["a", 0];
        assert_eq!(path.to_string(), "a.0");
        assert_eq!(format!("{path:?}"), "[\"a\", 0]");
        assert_eq!(Path::root().to_string(), "");
    }
}
