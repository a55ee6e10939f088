//! Nested persistent maps addressed by paths.
//!
//! [`Nested`] is the persistent counterpart of a record-shaped
//! [`Value`]: every level is a shared, ordered table keyed by [`Key`], and a
//! write copies only the tables on its path. It exposes [`Nested::get_in`]
//! and [`Nested::set_in`] and plugs into the same path lens algorithm as
//! [`Value`] through [`PathNode`].
//!
//! Arrays are not expanded: they are stored as leaves.
//!
//! # Examples
//!
//! ```rust
//! use focal::optics::Lens;
//! use focal::persistent::{Nested, from_path_persistent};
//! use focal::{path, record};
//! use focal::value::Value;
//!
//! let state = Nested::from(record! { "user" => record! { "name" => "Alice" } });
//!
//! assert_eq!(state.get_in(&path!["user", "name"]), Nested::from(Value::from("Alice")));
//!
//! let lens = from_path_persistent(["user", "name"]);
//! let renamed = lens.set(state, Nested::from(Value::from("Bob"))).unwrap();
//! assert_eq!(
//!     renamed.to_value(),
//!     record! { "user" => record! { "name" => "Bob" } }
//! );
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::optics::{PathLens, PathNode, SameRef};
use crate::value::{Key, Path, Value};

/// A nested persistent map.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Nested {
    /// No value at all.
    #[default]
    Absent,
    /// A value that is not a record.
    Leaf(Value),
    /// A shared table of nested values. Never holds absent entries.
    Map(Arc<BTreeMap<Key, Nested>>),
}

/// Integer-like field keys and index keys address the same entry.
fn canonical(key: &Key) -> Key {
    key.as_index().map_or_else(|| key.clone(), Key::Index)
}

impl Nested {
    /// Creates an empty map.
    #[must_use]
    pub fn map() -> Self {
        Self::Map(Arc::default())
    }

    /// Returns the number of entries of a map, and zero otherwise.
    pub fn len(&self) -> usize {
        match self {
            Self::Map(entries) => entries.len(),
            Self::Absent | Self::Leaf(_) => 0,
        }
    }

    /// Returns `true` unless this is a map with at least one entry.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads the node at `path`, or [`Nested::Absent`].
    pub fn get_in(&self, path: &Path) -> Self {
        PathNode::get_in(self, path)
    }

    /// Writes `focus` at `path`, creating missing levels and replacing
    /// leaves found on the way.
    #[must_use]
    pub fn set_in(&self, path: &Path, focus: Self) -> Self {
        PathNode::set_in(self, path, focus)
    }

    /// Converts back into a [`Value`]; maps become records.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Absent => Value::Absent,
            Self::Leaf(value) => value.clone(),
            Self::Map(entries) => Value::record(
                entries
                    .iter()
                    .map(|(key, nested)| (key.to_string(), nested.to_value())),
            ),
        }
    }
}

impl From<Value> for Nested {
    fn from(value: Value) -> Self {
        match value {
            Value::Absent => Self::Absent,
            Value::Record(record) => Self::Map(Arc::new(
                record
                    .iter()
                    .map(|(name, field)| (canonical(&Key::from(Arc::clone(name))), Self::from(field.clone())))
                    .collect(),
            )),
            other => Self::Leaf(other),
        }
    }
}

impl From<Nested> for Value {
    fn from(nested: Nested) -> Self {
        nested.to_value()
    }
}

impl PathNode for Nested {
    fn absent() -> Self {
        Self::Absent
    }

    fn is_absent(&self) -> bool {
        matches!(self, Self::Absent | Self::Leaf(Value::Absent))
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Leaf(value) => value.kind(),
            Self::Map(_) => "map",
        }
    }

    fn child(&self, key: &Key) -> Option<&Self> {
        match self {
            Self::Map(entries) => entries.get(&canonical(key)),
            Self::Absent | Self::Leaf(_) => None,
        }
    }

    fn is_container(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    fn empty_container() -> Self {
        Self::map()
    }

    fn with_child(&self, key: &Key, child: Self) -> Self {
        if PathNode::is_absent(&child) {
            return self.without_child(key);
        }
        let mut entries = match self {
            Self::Map(entries) => BTreeMap::clone(entries),
            Self::Absent | Self::Leaf(_) => BTreeMap::new(),
        };
        entries.insert(canonical(key), child);
        Self::Map(Arc::new(entries))
    }

    fn without_child(&self, key: &Key) -> Self {
        let key = canonical(key);
        match self {
            Self::Map(entries) if entries.contains_key(&key) => {
                let mut entries = BTreeMap::clone(entries);
                entries.remove(&key);
                Self::Map(Arc::new(entries))
            }
            Self::Absent | Self::Leaf(_) | Self::Map(_) => self.clone(),
        }
    }
}

impl SameRef for Nested {
    fn same_ref(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Map(left), Self::Map(right)) => Arc::ptr_eq(left, right),
            (Self::Leaf(left), Self::Leaf(right)) => left.same_ref(right),
            (Self::Absent, Self::Absent) => true,
            _ => false,
        }
    }
}

/// Creates a lens which looks into a [`Nested`] persistent map.
///
/// It is [`from_path`](crate::optics::from_path) for persistent maps: the
/// same keys, the same read and write rules.
pub fn from_path_persistent(path: impl Into<Path>) -> PathLens<Nested> {
    PathLens::new(path)
}

static_assertions::assert_impl_all!(Nested: Send, Sync, Clone);
