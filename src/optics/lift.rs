//! Lifting focus functions into structure functions.
//!
//! If `lens` focuses on an `A` inside an `S`, then `lift(lens, f)` with
//! `f: A -> A` is a function `S -> S` that rewrites only the focus.
//!
//! # Examples
//!
//! ```
//! use focal::optics::{from_path, lift, over};
//! use focal::record;
//! use focal::value::Value;
//!
//! let square = |value: Value| Value::from(value.as_i64().unwrap_or(0).pow(2));
//!
//! let square_a = lift(from_path(["a"]), square);
//! assert_eq!(square_a(record! { "a" => 2 }).unwrap(), record! { "a" => 4 });
//!
//! assert_eq!(over(&from_path(["a"]), square, record! { "a" => 3 }).unwrap(), record! { "a" => 9 });
//! ```

use crate::error::LensError;
use crate::optics::Lens;

/// Lifts `function` into the world of `lens`.
///
/// The returned function reads the focus, applies `function` and writes the
/// result back.
///
/// # Errors
///
/// The returned function propagates the error of [`Lens::set`].
pub fn lift<S, A, L, F>(lens: L, function: F) -> impl Fn(S) -> Result<S, LensError>
where
    L: Lens<S, A>,
    F: Fn(A) -> A,
{
    move |source| {
        let focus = function(lens.peek(&source));
        lens.set(source, focus)
    }
}

/// Lifts a two-argument `function` into the world of `lens`.
///
/// The extra argument is passed through to `function` untouched, which is
/// how a focus-level reducer `(A, E) -> A` becomes a structure-level one.
///
/// # Example
///
/// ```
/// use focal::optics::{from_path, lift_with};
/// use focal::record;
/// use focal::value::Value;
///
/// struct Increment { by: i64 }
///
/// let increment = lift_with(from_path(["a"]), |count: Value, action: &Increment| {
///     Value::from(count.as_i64().unwrap_or(0) + action.by)
/// });
///
/// assert_eq!(
///     increment(record! { "a" => 1 }, &Increment { by: 2 }).unwrap(),
///     record! { "a" => 3 }
/// );
/// ```
///
/// # Errors
///
/// The returned function propagates the error of [`Lens::set`].
pub fn lift_with<S, A, E, L, F>(lens: L, function: F) -> impl Fn(S, E) -> Result<S, LensError>
where
    L: Lens<S, A>,
    F: Fn(A, E) -> A,
{
    move |source, extra| {
        let focus = function(lens.peek(&source), extra);
        lens.set(source, focus)
    }
}

/// Applies `function` to the focus of `lens` inside `source`.
///
/// `over(&lens, f, s)` is equivalent to `lift(&lens, f)(s)`.
///
/// # Errors
///
/// Propagates the error of [`Lens::set`].
pub fn over<S, A, L, F>(lens: &L, function: F, source: S) -> Result<S, LensError>
where
    L: Lens<S, A> + ?Sized,
    F: FnOnce(A) -> A,
{
    let focus = function(lens.peek(&source));
    lens.set(source, focus)
}

/// Alias of [`over`].
///
/// # Errors
///
/// Propagates the error of [`Lens::set`].
pub fn map<S, A, L, F>(lens: &L, function: F, source: S) -> Result<S, LensError>
where
    L: Lens<S, A> + ?Sized,
    F: FnOnce(A) -> A,
{
    over(lens, function, source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optics::{from_path, read_only};
    use crate::record;
    use crate::value::Value;
    use rstest::rstest;

    fn constant_two(_: Value) -> Value {
        Value::from(2)
    }

    #[rstest]
    fn test_lift_rewrites_focus() {
        let lifted = lift(from_path(["a"]), constant_two);
        assert_eq!(lifted(record! { "a" => 1 }), Ok(record! { "a" => 2 }));
    }

    #[rstest]
    fn test_map_matches_over() {
        let lens = from_path(["a", "b"]);
        let source = record! { "a" => record! { "b" => 1 } };

        assert_eq!(
            map(&lens, constant_two, source.clone()),
            over(&lens, constant_two, source)
        );
    }

    #[rstest]
    fn test_lift_through_read_only_lens_fails() {
        let lifted = lift(read_only(|value: &Value| value.clone()), |value| value);
        assert_eq!(lifted(Value::Null), Err(LensError::ReadOnly));
    }
}
