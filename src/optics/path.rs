//! Lenses that look into a nested structure along a [`Path`].
//!
//! The walk and rebuild algorithm is written once, over the [`PathNode`]
//! capability trait. [`Value`] implements it here; the persistent nested map
//! implements it in [`crate::persistent`].
//!
//! # Reading
//!
//! A read walks the keys from the root. As soon as the current node is
//! absent, is not a container, or does not own the next key, the read yields
//! the absent node. Reads never fail.
//!
//! # Writing
//!
//! A write rebuilds every container on the path, from the leaf outwards.
//! Every rebuilt level is a new container; every sibling is shared with the
//! input by reference. Absent intermediates become empty containers.
//!
//! Writing the absent node removes the leaf key. When the path does not
//! resolve, such a write returns the input unchanged, so reading a missing
//! path and writing the result back is a no-op.
//!
//! # Examples
//!
//! ```
//! use focal::optics::{Lens, from_path};
//! use focal::record;
//! use focal::value::Value;
//!
//! let ab_lens = from_path(["a", "b"]);
//!
//! assert_eq!(ab_lens.peek(&record! { "a" => record! { "b" => 3 } }), Value::from(3));
//! assert_eq!(ab_lens.peek(&record! { "c" => 1 }), Value::Absent);
//!
//! let written = ab_lens.set(record! {}, Value::from(4)).unwrap();
//! assert_eq!(written, record! { "a" => record! { "b" => 4 } });
//! ```

use std::convert::Infallible;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::LensError;
use crate::optics::Lens;
use crate::value::{Key, Path, Record, Value};

// =============================================================================
// PathNode
// =============================================================================

/// The operations a nested structure provides so that path lenses can walk
/// and rebuild it.
///
/// Implementations must treat every method as pure: `with_child` and
/// `without_child` return new nodes and leave `self` untouched.
pub trait PathNode: Clone {
    /// The node seen through a path that does not resolve.
    fn absent() -> Self;

    /// Returns `true` for the absent node.
    fn is_absent(&self) -> bool;

    /// A short description of the node, used in error messages.
    fn kind(&self) -> &'static str;

    /// Returns the child owned at `key`.
    fn child(&self, key: &Key) -> Option<&Self>;

    /// Returns `true` if the node can own children.
    fn is_container(&self) -> bool;

    /// The container created for absent (or, permissively, scalar)
    /// intermediates.
    fn empty_container() -> Self;

    /// Returns a new node with `key` bound to `child`.
    #[must_use]
    fn with_child(&self, key: &Key, child: Self) -> Self;

    /// Returns a new node without the child at `key`.
    #[must_use]
    fn without_child(&self, key: &Key) -> Self;

    /// Reads the node at `path`, or the absent node.
    fn get_in(&self, path: &Path) -> Self {
        peek_path(self, path.keys())
    }

    /// Writes `focus` at `path`, replacing scalar intermediates.
    #[must_use]
    fn set_in(&self, path: &Path, focus: Self) -> Self {
        match write_path::<Self, Infallible>(self, path.keys(), focus, |_, _, _| {
            Ok(Self::empty_container())
        }) {
            Ok(written) => written,
            Err(never) => match never {},
        }
    }
}

fn peek_path<N: PathNode>(root: &N, keys: &[Key]) -> N {
    let mut current = root;
    for key in keys {
        match current.child(key) {
            Some(next) => current = next,
            None => return N::absent(),
        }
    }
    current.clone()
}

/// Writes `focus` at `keys` inside `root`.
///
/// `replace_scalar` decides what happens to a present, non-container node
/// found on the way down: it receives the depth, the key about to be
/// followed and the offending node.
fn write_path<N, E>(
    root: &N,
    keys: &[Key],
    focus: N,
    replace_scalar: impl FnMut(usize, &Key, &N) -> Result<N, E>,
) -> Result<N, E>
where
    N: PathNode,
{
    if keys.is_empty() {
        return Ok(focus);
    }
    if focus.is_absent() {
        return Ok(remove_path(root, keys));
    }

    let spine = descend(root, keys, replace_scalar)?;

    let mut rebuilt = focus;
    for (container, key) in spine.iter().zip(keys).rev() {
        rebuilt = container.with_child(key, rebuilt);
    }
    Ok(rebuilt)
}

/// Collects the container that receives each key, from the root inwards.
fn descend<N, E>(
    root: &N,
    keys: &[Key],
    mut replace_scalar: impl FnMut(usize, &Key, &N) -> Result<N, E>,
) -> Result<Vec<N>, E>
where
    N: PathNode,
{
    let mut spine = Vec::with_capacity(keys.len());
    let mut current = root.clone();
    for (depth, key) in keys.iter().enumerate() {
        let container = if current.is_container() {
            current
        } else if current.is_absent() {
            N::empty_container()
        } else {
            replace_scalar(depth, key, &current)?
        };
        current = container.child(key).cloned().unwrap_or_else(N::absent);
        spine.push(container);
    }
    Ok(spine)
}

fn remove_path<N: PathNode>(root: &N, keys: &[Key]) -> N {
    let Some((leaf_key, parent_keys)) = keys.split_last() else {
        return N::absent();
    };

    let mut spine = Vec::with_capacity(keys.len());
    let mut current = root;
    for key in keys {
        let Some(next) = current.child(key) else {
            return root.clone();
        };
        spine.push(current);
        current = next;
    }

    let Some((leaf_container, parents)) = spine.split_last() else {
        return root.clone();
    };
    let mut rebuilt = leaf_container.without_child(leaf_key);
    for (container, key) in parents.iter().zip(parent_keys).rev() {
        rebuilt = container.with_child(key, rebuilt);
    }
    rebuilt
}

// =============================================================================
// PathNode for Value
// =============================================================================

fn field_name(key: &Key) -> Arc<str> {
    match key {
        Key::Field(name) => Arc::clone(name),
        Key::Index(index) => Arc::from(index.to_string()),
    }
}

fn indexed_record(items: &[Value]) -> Record {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| (index.to_string(), item.clone()))
        .collect()
}

impl PathNode for Value {
    fn absent() -> Self {
        Self::Absent
    }

    fn is_absent(&self) -> bool {
        Self::is_absent(self)
    }

    fn kind(&self) -> &'static str {
        Self::kind(self)
    }

    fn child(&self, key: &Key) -> Option<&Self> {
        self.get(key)
    }

    fn is_container(&self) -> bool {
        Self::is_container(self)
    }

    fn empty_container() -> Self {
        Self::Record(Record::new())
    }

    fn with_child(&self, key: &Key, child: Self) -> Self {
        match (self, key.as_index()) {
            (Self::Record(record), _) => Self::Record(record.insert(field_name(key), child)),
            (Self::Array(items), Some(index)) if index <= items.len() => {
                // Arrays are dense: an absent element is stored as null.
                let child = if child.is_absent() { Self::Null } else { child };
                let mut items = Vec::clone(items);
                if index < items.len() {
                    items[index] = child;
                } else {
                    items.push(child);
                }
                Self::Array(Arc::new(items))
            }
            // Past the end, or a field name: becomes a record keyed by index.
            (Self::Array(items), _) => {
                Self::Record(indexed_record(items).insert(field_name(key), child))
            }
            _ => Self::Record(Record::new().insert(field_name(key), child)),
        }
    }

    fn without_child(&self, key: &Key) -> Self {
        match (self, key.as_index()) {
            (Self::Record(record), _) => Self::Record(record.remove(&key.field_name())),
            (Self::Array(items), Some(index)) if index < items.len() => {
                let mut items = Vec::clone(items);
                items[index] = Self::Null;
                Self::Array(Arc::new(items))
            }
            _ => self.clone(),
        }
    }
}

// =============================================================================
// PathLens
// =============================================================================

/// How a path write treats a present, non-container intermediate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WritePolicy {
    /// Replace the intermediate with an empty container.
    #[default]
    Permissive,
    /// Fail with [`LensError::NotAContainer`].
    Strict,
}

/// A lens focused on the node at a fixed [`Path`].
///
/// # Type Parameters
///
/// - `N`: The node type walked by the lens
///
/// # Example
///
/// ```
/// use focal::error::LensError;
/// use focal::optics::{Lens, from_path};
/// use focal::record;
/// use focal::value::Value;
///
/// let lens = from_path(["a", "b"]).strict();
/// let source = record! { "a" => 5 };
///
/// assert!(matches!(
///     lens.set(source, Value::from(1)),
///     Err(LensError::NotAContainer { depth: 1, .. })
/// ));
/// ```
pub struct PathLens<N = Value> {
    path: Path,
    policy: WritePolicy,
    _marker: PhantomData<fn(&N) -> N>,
}

impl<N: PathNode> PathLens<N> {
    /// Creates a permissive lens focused on `path`.
    #[must_use]
    pub fn new(path: impl Into<Path>) -> Self {
        Self {
            path: path.into(),
            policy: WritePolicy::Permissive,
            _marker: PhantomData,
        }
    }

    /// Returns the path the lens is focused on.
    pub const fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the write policy.
    pub const fn policy(&self) -> WritePolicy {
        self.policy
    }

    /// Returns the same lens with a different write policy.
    #[must_use]
    pub fn with_policy(self, policy: WritePolicy) -> Self {
        Self { policy, ..self }
    }

    /// Returns the same lens with [`WritePolicy::Strict`].
    #[must_use]
    pub fn strict(self) -> Self {
        self.with_policy(WritePolicy::Strict)
    }
}

impl<N: PathNode> Lens<N, N> for PathLens<N> {
    fn peek(&self, source: &N) -> N {
        source.get_in(&self.path)
    }

    fn set(&self, source: N, focus: N) -> Result<N, LensError> {
        match self.policy {
            WritePolicy::Permissive => Ok(source.set_in(&self.path, focus)),
            WritePolicy::Strict => {
                write_path(&source, self.path.keys(), focus, |depth, key, node| {
                    tracing::debug!(path = %self.path, depth, found = node.kind(), "strict path write rejected");
                    Err(LensError::NotAContainer {
                        key: key.clone(),
                        depth,
                        found: node.kind(),
                    })
                })
            }
        }
    }
}

impl<N> Clone for PathLens<N> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            policy: self.policy,
            _marker: PhantomData,
        }
    }
}

impl<N> fmt::Debug for PathLens<N> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("PathLens")
            .field("path", &self.path)
            .field("policy", &self.policy)
            .finish()
    }
}

/// Creates a lens which looks into a deeply nested [`Value`].
///
/// Keys go in property access order: `from_path(["a", "b"])` reads like
/// `x.a.b`, which is the reverse of function application order used by
/// [`compose`](crate::optics::compose).
pub fn from_path(path: impl Into<Path>) -> PathLens<Value> {
    PathLens::new(path)
}

static_assertions::assert_impl_all!(PathLens<Value>: Send, Sync, Clone);
