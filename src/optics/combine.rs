//! A lens that gathers several lenses into one record-shaped focus.
//!
//! The focus of a [`CombinedLens`] is a record with one field per named
//! lens. Writing a record back writes every field through its lens, in the
//! order the lenses were given.
//!
//! The lenses should not overlap. Overlap is not checked: when two lenses
//! touch the same location, the later one wins.
//!
//! # Examples
//!
//! ```
//! use focal::optics::{Lens, combine_lenses, from_path};
//! use focal::record;
//!
//! let lens = combine_lenses([
//!     ("a", from_path(["hello"]).shared()),
//!     ("b", from_path(["goodbye", "farewell"]).shared()),
//! ]);
//!
//! let source = record! { "hello" => 1, "goodbye" => record! { "farewell" => 2 } };
//! assert_eq!(lens.peek(&source), record! { "a" => 1, "b" => 2 });
//!
//! let written = lens.set(source, record! { "a" => 3, "b" => 4 }).unwrap();
//! assert_eq!(written, record! { "hello" => 3, "goodbye" => record! { "farewell" => 4 } });
//! ```

use std::fmt;
use std::sync::Arc;

use crate::error::LensError;
use crate::optics::{DynLens, Lens};
use crate::value::Value;

/// A lens whose focus is a record built from named lenses.
pub struct CombinedLens<S> {
    fields: Vec<(Arc<str>, DynLens<S, Value>)>,
}

impl<S> CombinedLens<S> {
    /// Creates a combined lens without fields. Its focus is the empty record.
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Adds a named lens.
    ///
    /// A name that is already present keeps its position and takes the new
    /// lens.
    #[must_use]
    pub fn field<L>(self, name: impl Into<Arc<str>>, lens: L) -> Self
    where
        L: Lens<S, Value> + Send + Sync + 'static,
    {
        self.with_field(name.into(), Arc::new(lens))
    }

    fn with_field(mut self, name: Arc<str>, lens: DynLens<S, Value>) -> Self {
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = lens,
            None => self.fields.push((name, lens)),
        }
        self
    }

    /// Returns the field names in write order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| &**name)
    }
}

impl<S> Lens<S, Value> for CombinedLens<S> {
    fn peek(&self, source: &S) -> Value {
        Value::Record(
            self.fields
                .iter()
                .map(|(name, lens)| (Arc::clone(name), lens.peek(source)))
                .collect(),
        )
    }

    fn set(&self, source: S, focus: Value) -> Result<S, LensError> {
        let Some(record) = focus.as_record() else {
            return Err(LensError::FocusNotRecord {
                found: focus.kind(),
            });
        };
        self.fields.iter().try_fold(source, |structure, (name, lens)| {
            let field = record.get(name).cloned().unwrap_or_default();
            lens.set(structure, field)
        })
    }

    fn is_read_only(&self) -> bool {
        self.fields.iter().any(|(_, lens)| lens.is_read_only())
    }
}

impl<S> Default for CombinedLens<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for CombinedLens<S> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
        }
    }
}

impl<S> fmt::Debug for CombinedLens<S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("CombinedLens")
            .field("fields", &self.field_names().collect::<Vec<_>>())
            .finish()
    }
}

/// Combines named lenses into a lens whose focus is a record.
pub fn combine_lenses<S, I, K>(lenses: I) -> CombinedLens<S>
where
    I: IntoIterator<Item = (K, DynLens<S, Value>)>,
    K: Into<Arc<str>>,
{
    lenses
        .into_iter()
        .fold(CombinedLens::new(), |combined, (name, lens)| {
            combined.with_field(name.into(), lens)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optics::{from_path, read_only};
    use crate::record;
    use rstest::rstest;

    #[rstest]
    fn test_duplicate_name_keeps_position_and_last_lens() {
        let lens = CombinedLens::new()
            .field("x", from_path(["a"]))
            .field("y", from_path(["b"]))
            .field("x", from_path(["c"]));

        assert_eq!(lens.field_names().collect::<Vec<_>>(), ["x", "y"]);
        assert_eq!(
            lens.peek(&record! { "a" => 1, "b" => 2, "c" => 3 }),
            record! { "x" => 3, "y" => 2 }
        );
    }

    #[rstest]
    fn test_missing_focus_field_is_written_as_absent() {
        let lens = CombinedLens::new()
            .field("x", from_path(["a"]))
            .field("y", from_path(["b"]));

        let written = lens
            .set(record! { "a" => 1, "b" => 2 }, record! { "x" => 5 })
            .unwrap();
        assert_eq!(written, record! { "a" => 5 });
    }

    #[rstest]
    #[case(Value::from(1), "int")]
    #[case(Value::Absent, "absent")]
    #[case(Value::array([1]), "array")]
    fn test_non_record_focus_is_rejected(#[case] focus: Value, #[case] found: &'static str) {
        let lens = CombinedLens::new().field("x", from_path(["a"]));
        assert_eq!(
            lens.set(record! {}, focus),
            Err(LensError::FocusNotRecord { found })
        );
    }

    #[rstest]
    fn test_empty_combination() {
        let lens = CombinedLens::<Value>::new();
        let source = record! { "a" => 1 };

        assert_eq!(lens.peek(&source), record! {});
        assert_eq!(lens.set(source.clone(), record! {}), Ok(source));
    }

    #[rstest]
    fn test_read_only_member() {
        let lens = CombinedLens::new().field("x", read_only(|value: &Value| value.clone()));
        assert!(lens.is_read_only());
    }
}
