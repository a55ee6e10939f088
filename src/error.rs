//! Error types for lens operations.
//!
//! Reads never fail: a path that does not resolve yields
//! [`Value::Absent`](crate::value::Value::Absent). Writes fail only when the
//! caller breaks a lens contract, and every such case is a [`LensError`].

use crate::value::Key;

/// Errors raised by lens writes and lens constructors.
///
/// # Examples
///
/// ```rust
/// use focal::error::LensError;
/// use focal::optics::{Lens, read_only};
/// use focal::value::Value;
///
/// let kind = read_only(|value: &Value| Value::from(value.kind()));
/// let error = kind.set(Value::from("abc"), Value::from("int")).unwrap_err();
///
/// assert_eq!(error, LensError::ReadOnly);
/// assert_eq!(error.to_string(), "cannot write through a read-only lens");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum LensError {
    /// The write call shape was used on a lens built without a setter.
    #[error("cannot write through a read-only lens")]
    ReadOnly,

    /// `compose` was given no lenses to compose.
    #[error("cannot compose an empty sequence of lenses")]
    EmptyComposition,

    /// A strict path write met a scalar where a container was expected.
    #[error("cannot write key `{key}` at depth {depth}: found {found}, expected a container")]
    NotAContainer {
        /// The key that could not be written.
        key: Key,
        /// Position of `key` within the path.
        depth: usize,
        /// Kind of the value found in place of a container.
        found: &'static str,
    },

    /// A combined lens was written with a focus that is not a record.
    #[error("combined lens expects a record focus, found {found}")]
    FocusNotRecord {
        /// Kind of the focus that was supplied.
        found: &'static str,
    },
}
