//! Composition of many lenses.
//!
//! Two flavours exist:
//!
//! - [`compose`] takes a runtime sequence of [`DynLens<S, S>`] and folds over
//!   it with explicit loops.
//! - [`compose_lenses!`](crate::compose_lenses) chains statically typed
//!   lenses with [`Lens::then`], so focus types may change at every step.
//!
//! Both read right to left, like function composition: `compose([b, a])`
//! first looks through `a`, then through `b`, and is equivalent to
//! `from_path(["a", "b"])` when `a` and `b` are single-key path lenses.
//!
//! # Laws
//!
//! - **Associativity**: `compose([compose([a, b]), c]) == compose([a, compose([b, c])])`
//! - **Identity**: `compose([a]) == a`

use std::fmt;
use std::sync::Arc;

use crate::error::LensError;
use crate::optics::{DynLens, Lens};

/// A lens made of a non-empty chain of lenses, in application order.
pub struct ComposedChain<S> {
    outermost: DynLens<S, S>,
    inner: Vec<DynLens<S, S>>,
}

impl<S> ComposedChain<S> {
    /// Returns the number of lenses in the chain.
    pub fn len(&self) -> usize {
        self.inner.len() + 1
    }

    /// Always `false`: a chain holds at least one lens.
    pub const fn is_empty(&self) -> bool {
        false
    }
}

impl<S> Lens<S, S> for ComposedChain<S> {
    fn peek(&self, source: &S) -> S {
        let mut focus = self.outermost.peek(source);
        for lens in &self.inner {
            focus = lens.peek(&focus);
        }
        focus
    }

    fn set(&self, source: S, focus: S) -> Result<S, LensError> {
        let mut visited = Vec::with_capacity(self.inner.len());
        let mut current = source;
        let mut innermost = &self.outermost;
        for lens in &self.inner {
            let next = innermost.peek(&current);
            visited.push((innermost, current));
            current = next;
            innermost = lens;
        }

        let mut updated = innermost.set(current, focus)?;
        for (lens, structure) in visited.into_iter().rev() {
            updated = lens.set(structure, updated)?;
        }
        Ok(updated)
    }

    fn is_read_only(&self) -> bool {
        self.outermost.is_read_only() || self.inner.iter().any(|lens| lens.is_read_only())
    }
}

impl<S> Clone for ComposedChain<S> {
    fn clone(&self) -> Self {
        Self {
            outermost: Arc::clone(&self.outermost),
            inner: self.inner.clone(),
        }
    }
}

impl<S> fmt::Debug for ComposedChain<S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ComposedChain")
            .field("len", &self.len())
            .finish()
    }
}

/// Composes a sequence of lenses, from right to left.
///
/// The last lens is applied to the structure first.
///
/// # Errors
///
/// Returns [`LensError::EmptyComposition`] when `lenses` is empty.
///
/// # Example
///
/// ```
/// use focal::optics::{Lens, compose, from_path};
/// use focal::record;
/// use focal::value::Value;
///
/// let a_lens = from_path(["a"]).shared();
/// let b_lens = from_path(["b"]).shared();
/// let ab_lens = compose([b_lens, a_lens]).unwrap();
///
/// let source = record! { "a" => record! { "b" => 1 } };
/// assert_eq!(ab_lens.peek(&source), Value::from(1));
/// assert_eq!(
///     ab_lens.set(source, Value::from(2)).unwrap(),
///     record! { "a" => record! { "b" => 2 } }
/// );
/// ```
pub fn compose<S, I>(lenses: I) -> Result<ComposedChain<S>, LensError>
where
    I: IntoIterator<Item = DynLens<S, S>>,
{
    let lenses: Vec<_> = lenses.into_iter().collect();
    let mut application_order = lenses.into_iter().rev();
    let Some(outermost) = application_order.next() else {
        tracing::debug!("compose called without lenses");
        return Err(LensError::EmptyComposition);
    };
    Ok(ComposedChain {
        outermost,
        inner: application_order.collect(),
    })
}

/// Composes statically typed lenses, from right to left.
///
/// `compose_lenses!(c, b, a)` is `a.then(b).then(c)`: the rightmost lens is
/// applied to the structure first. Focus types may differ at every step.
///
/// # Syntax
///
/// - `compose_lenses!(l)` - Returns `l` unchanged
/// - `compose_lenses!(l1, l2, ...)` - Composes any number of lenses
///
/// # Example
///
/// ```
/// use focal::optics::Lens;
/// use focal::{compose_lenses, lens};
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Street { name: String }
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Address { street: Street }
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Person { address: Address }
///
/// let street_name = compose_lenses!(lens!(Street, name), lens!(Address, street), lens!(Person, address));
///
/// let person = Person {
///     address: Address { street: Street { name: "Main St".to_string() } },
/// };
/// assert_eq!(street_name.peek(&person), "Main St");
/// ```
#[macro_export]
macro_rules! compose_lenses {
    ($lens:expr $(,)?) => {
        $lens
    };

    ($outer_lens:expr, $($remaining_lenses:expr),+ $(,)?) => {
        $crate::optics::Lens::then($crate::compose_lenses!($($remaining_lenses),+), $outer_lens)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optics::{from_path, read_only};
    use crate::record;
    use crate::value::Value;
    use rstest::rstest;

    fn key_lens(key: &str) -> DynLens<Value, Value> {
        from_path([key]).shared()
    }

    #[rstest]
    fn test_empty_composition_is_an_error() {
        let result = compose(Vec::<DynLens<Value, Value>>::new());
        assert!(matches!(result, Err(LensError::EmptyComposition)));
    }

    #[rstest]
    fn test_single_lens_is_identity_case() {
        let chain = compose([key_lens("a")]).unwrap();
        let source = record! { "a" => 1 };

        assert_eq!(chain.len(), 1);
        assert_eq!(chain.peek(&source), Value::from(1));
        assert_eq!(chain.set(source, Value::from(2)), Ok(record! { "a" => 2 }));
    }

    #[rstest]
    fn test_applies_rightmost_lens_first() {
        let chain = compose([key_lens("c"), key_lens("b"), key_lens("a")]).unwrap();
        let source = record! { "a" => record! { "b" => record! { "c" => 1 } } };

        assert_eq!(chain.peek(&source), Value::from(1));
        assert_eq!(
            chain.set(source, Value::from(3)),
            Ok(record! { "a" => record! { "b" => record! { "c" => 3 } } })
        );
    }

    #[rstest]
    fn test_read_only_member_makes_chain_read_only() {
        let chain = compose([
            read_only(|value: &Value| value.clone()).shared(),
            key_lens("a"),
        ])
        .unwrap();

        assert!(chain.is_read_only());
        assert_eq!(chain.set(record! {}, Value::Null), Err(LensError::ReadOnly));
    }
}
