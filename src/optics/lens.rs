//! The lens primitive.
//!
//! A Lens pairs a read function (`peek`) with an immutable update function
//! (`set`). Both call shapes live on the [`Lens`] trait, and
//! [`Lens::invoke`] offers them through a single dual-mode entry point.
//!
//! # Laws
//!
//! Every well-behaved Lens satisfies three laws:
//!
//! 1. **GetPut Law**: Setting back what you read is a no-op.
//!    ```text
//!    lens.set(source.clone(), lens.peek(&source)) == Ok(source)
//!    ```
//!
//! 2. **PutGet Law**: Reading after a write yields the written focus.
//!    ```text
//!    lens.peek(&lens.set(source, focus.clone())?) == focus
//!    ```
//!
//! 3. **PutPut Law**: A later write overwrites an earlier one.
//!    ```text
//!    lens.set(lens.set(source.clone(), first)?, second) == lens.set(source, second)
//!    ```
//!
//! The library's own lenses satisfy these laws; lenses built from hand-written
//! functions with [`create_lens`] must uphold them by contract.
//!
//! # Examples
//!
//! ```
//! use focal::optics::{Lens, create_lens};
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Point { x: i32, y: i32 }
//!
//! let x_lens = create_lens(
//!     |point: &Point| point.x,
//!     |point: Point, x: i32| Point { x, ..point },
//! );
//!
//! let point = Point { x: 10, y: 20 };
//! assert_eq!(x_lens.peek(&point), 10);
//!
//! let updated = x_lens.set(point, 100).unwrap();
//! assert_eq!(updated, Point { x: 100, y: 20 });
//! ```

use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::LensError;

/// A lens focuses on one value `A` inside a larger structure `S`.
///
/// # Type Parameters
///
/// - `S`: The structure type (the whole)
/// - `A`: The focus type (the part)
///
/// # Laws
///
/// 1. **GetPut Law**: `lens.set(source.clone(), lens.peek(&source)) == Ok(source)`
/// 2. **PutGet Law**: `lens.peek(&lens.set(source, focus.clone())?) == focus`
/// 3. **PutPut Law**: `lens.set(lens.set(s.clone(), a)?, b) == lens.set(s, b)`
pub trait Lens<S, A> {
    /// Reads the focus out of `source`.
    ///
    /// This is the one-argument call shape of a lens. It never fails.
    fn peek(&self, source: &S) -> A;

    /// Writes `focus` into `source`, returning the updated structure.
    ///
    /// This is the two-argument call shape of a lens. The input is consumed
    /// and never mutated in place: the result is a new structure.
    ///
    /// # Errors
    ///
    /// Returns [`LensError::ReadOnly`] if the lens has no setter, or any error
    /// specific to the lens (for example a strict path lens meeting a scalar).
    fn set(&self, source: S, focus: A) -> Result<S, LensError>;

    /// Returns `true` if [`Lens::set`] is known to fail with
    /// [`LensError::ReadOnly`].
    fn is_read_only(&self) -> bool {
        false
    }

    /// Dual-mode entry point.
    ///
    /// Dispatch is by call shape, not by inspecting the focus:
    /// `Invocation::Set(focus)` writes `focus` even when it is an "absent"
    /// value, so reading and writing an absent focus stay distinguishable.
    ///
    /// # Errors
    ///
    /// Propagates the error of [`Lens::set`] for `Invocation::Set`.
    ///
    /// # Example
    ///
    /// ```
    /// use focal::optics::{Invocation, Lens, Outcome, from_path};
    /// use focal::record;
    /// use focal::value::Value;
    ///
    /// let lens = from_path(["a"]);
    /// let source = record! { "a" => 1 };
    ///
    /// let read = lens.invoke(source.clone(), Invocation::Peek).unwrap();
    /// assert_eq!(read, Outcome::Peeked(Value::from(1)));
    ///
    /// let cleared = lens.invoke(source, Invocation::Set(Value::Absent)).unwrap();
    /// assert_eq!(cleared, Outcome::Updated(record! {}));
    /// ```
    fn invoke(&self, source: S, invocation: Invocation<A>) -> Result<Outcome<S, A>, LensError> {
        match invocation {
            Invocation::Peek => Ok(Outcome::Peeked(self.peek(&source))),
            Invocation::Set(focus) => self.set(source, focus).map(Outcome::Updated),
        }
    }

    /// Reads the focus, applies `function` and writes the result back.
    ///
    /// # Errors
    ///
    /// Propagates the error of [`Lens::set`].
    ///
    /// # Example
    ///
    /// ```
    /// use focal::optics::Lens;
    /// use focal::lens;
    ///
    /// #[derive(Clone, PartialEq, Debug)]
    /// struct Point { x: i32, y: i32 }
    ///
    /// let x_lens = lens!(Point, x);
    /// let doubled = x_lens.modify(Point { x: 10, y: 20 }, |x: i32| x * 2).unwrap();
    /// assert_eq!(doubled.x, 20);
    /// ```
    fn modify<F>(&self, source: S, function: F) -> Result<S, LensError>
    where
        Self: Sized,
        F: FnOnce(A) -> A,
    {
        let focus = function(self.peek(&source));
        self.set(source, focus)
    }

    /// Chains `inner` after this lens.
    ///
    /// The result looks through `self` first and then through `inner`, like
    /// the field access `source.outer.inner`.
    ///
    /// # Type Parameters
    ///
    /// - `B`: The focus type of the inner lens
    /// - `L`: The type of the inner lens
    ///
    /// # Example
    ///
    /// ```
    /// use focal::optics::Lens;
    /// use focal::lens;
    ///
    /// #[derive(Clone, PartialEq, Debug)]
    /// struct Address { street: String, city: String }
    ///
    /// #[derive(Clone, PartialEq, Debug)]
    /// struct Person { name: String, address: Address }
    ///
    /// let person_street = lens!(Person, address).then(lens!(Address, street));
    ///
    /// let person = Person {
    ///     name: "Alice".to_string(),
    ///     address: Address {
    ///         street: "Main St".to_string(),
    ///         city: "Tokyo".to_string(),
    ///     },
    /// };
    ///
    /// assert_eq!(person_street.peek(&person), "Main St");
    /// ```
    fn then<B, L>(self, inner: L) -> ComposedLens<Self, L, A>
    where
        Self: Sized,
        L: Lens<A, B>,
    {
        ComposedLens::new(self, inner)
    }

    /// Erases the lens type into a shareable [`DynLens`].
    fn shared(self) -> DynLens<S, A>
    where
        Self: Sized + Send + Sync + 'static,
    {
        Arc::new(self)
    }

    /// Erases the lens type into an owned trait object.
    fn boxed(self) -> Box<dyn Lens<S, A> + Send + Sync>
    where
        Self: Sized + Send + Sync + 'static,
    {
        Box::new(self)
    }
}

/// A type-erased, cheaply clonable lens.
pub type DynLens<S, A> = Arc<dyn Lens<S, A> + Send + Sync>;

impl<S, A, L> Lens<S, A> for &L
where
    L: Lens<S, A> + ?Sized,
{
    fn peek(&self, source: &S) -> A {
        (**self).peek(source)
    }

    fn set(&self, source: S, focus: A) -> Result<S, LensError> {
        (**self).set(source, focus)
    }

    fn is_read_only(&self) -> bool {
        (**self).is_read_only()
    }
}

impl<S, A, L> Lens<S, A> for Box<L>
where
    L: Lens<S, A> + ?Sized,
{
    fn peek(&self, source: &S) -> A {
        (**self).peek(source)
    }

    fn set(&self, source: S, focus: A) -> Result<S, LensError> {
        (**self).set(source, focus)
    }

    fn is_read_only(&self) -> bool {
        (**self).is_read_only()
    }
}

impl<S, A, L> Lens<S, A> for Arc<L>
where
    L: Lens<S, A> + ?Sized,
{
    fn peek(&self, source: &S) -> A {
        (**self).peek(source)
    }

    fn set(&self, source: S, focus: A) -> Result<S, LensError> {
        (**self).set(source, focus)
    }

    fn is_read_only(&self) -> bool {
        (**self).is_read_only()
    }
}

/// The call shape passed to [`Lens::invoke`].
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation<A> {
    /// Read the focus.
    Peek,
    /// Write the given focus.
    Set(A),
}

/// The result of [`Lens::invoke`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<S, A> {
    /// The focus that was read.
    Peeked(A),
    /// The structure produced by a write.
    Updated(S),
}

impl<S, A> Outcome<S, A> {
    /// Returns the peeked focus, if this is a read outcome.
    pub fn peeked(self) -> Option<A> {
        match self {
            Self::Peeked(focus) => Some(focus),
            Self::Updated(_) => None,
        }
    }

    /// Returns the updated structure, if this is a write outcome.
    pub fn updated(self) -> Option<S> {
        match self {
            Self::Updated(structure) => Some(structure),
            Self::Peeked(_) => None,
        }
    }
}

/// The setter type of a [`FunctionLens`] built without one.
pub type NoSetter<S, A> = fn(S, A) -> S;

/// A lens built from a peek function and an optional set function.
///
/// # Type Parameters
///
/// - `S`: The structure type
/// - `A`: The focus type
/// - `P`: The peek function type
/// - `St`: The set function type
pub struct FunctionLens<S, A, P, St> {
    peek: P,
    setter: Option<St>,
    _marker: PhantomData<fn(&S) -> A>,
}

impl<S, A, P, St> FunctionLens<S, A, P, St>
where
    P: Fn(&S) -> A,
    St: Fn(S, A) -> S,
{
    /// Creates a lens from a peek function and a set function.
    ///
    /// # Arguments
    ///
    /// * `peek` - Extracts the focus from the structure
    /// * `setter` - Builds a new structure with the focus replaced
    #[must_use]
    pub const fn new(peek: P, setter: St) -> Self {
        Self {
            peek,
            setter: Some(setter),
            _marker: PhantomData,
        }
    }
}

impl<S, A, P> FunctionLens<S, A, P, NoSetter<S, A>>
where
    P: Fn(&S) -> A,
{
    /// Creates a lens that can only be read.
    #[must_use]
    pub const fn read_only(peek: P) -> Self {
        Self {
            peek,
            setter: None,
            _marker: PhantomData,
        }
    }
}

impl<S, A, P, St> Lens<S, A> for FunctionLens<S, A, P, St>
where
    P: Fn(&S) -> A,
    St: Fn(S, A) -> S,
{
    fn peek(&self, source: &S) -> A {
        (self.peek)(source)
    }

    fn set(&self, source: S, focus: A) -> Result<S, LensError> {
        match &self.setter {
            Some(setter) => Ok(setter(source, focus)),
            None => {
                tracing::debug!("write attempted through a read-only lens");
                Err(LensError::ReadOnly)
            }
        }
    }

    fn is_read_only(&self) -> bool {
        self.setter.is_none()
    }
}

impl<S, A, P: Clone, St: Clone> Clone for FunctionLens<S, A, P, St> {
    fn clone(&self) -> Self {
        Self {
            peek: self.peek.clone(),
            setter: self.setter.clone(),
            _marker: PhantomData,
        }
    }
}

impl<S, A, P, St> std::fmt::Debug for FunctionLens<S, A, P, St> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("FunctionLens")
            .field("read_only", &self.setter.is_none())
            .finish_non_exhaustive()
    }
}

/// Creates a lens from a peek function and a set function.
///
/// # Example
///
/// ```
/// use focal::optics::{Lens, create_lens};
/// use focal::record;
/// use focal::value::Value;
///
/// let a_lens = create_lens(
///     |value: &Value| value.get(&"a".into()).cloned().unwrap_or_default(),
///     |value: Value, a: Value| match value {
///         Value::Record(record) => Value::Record(record.insert("a", a)),
///         _ => record! { "a" => a },
///     },
/// );
///
/// assert_eq!(a_lens.peek(&record! { "a" => 1 }), Value::from(1));
/// assert_eq!(a_lens.set(record! { "a" => 1 }, Value::from(2)).unwrap(), record! { "a" => 2 });
/// ```
pub const fn create_lens<S, A, P, St>(peek: P, setter: St) -> FunctionLens<S, A, P, St>
where
    P: Fn(&S) -> A,
    St: Fn(S, A) -> S,
{
    FunctionLens::new(peek, setter)
}

/// Creates a lens without a setter. Writing through it fails with
/// [`LensError::ReadOnly`].
pub const fn read_only<S, A, P>(peek: P) -> FunctionLens<S, A, P, NoSetter<S, A>>
where
    P: Fn(&S) -> A,
{
    FunctionLens::read_only(peek)
}

/// A lens composed of two lenses.
///
/// # Type Parameters
///
/// - `L1`: The outer lens, applied to the structure
/// - `L2`: The inner lens, applied to the outer lens's focus
/// - `A`: The intermediate type (focus of `L1`, structure of `L2`)
///
/// # Example
///
/// ```
/// use focal::optics::Lens;
/// use focal::lens;
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Inner { value: i32 }
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Outer { inner: Inner }
///
/// let outer_value = lens!(Outer, inner).then(lens!(Inner, value));
///
/// let data = Outer { inner: Inner { value: 42 } };
/// assert_eq!(outer_value.peek(&data), 42);
/// ```
pub struct ComposedLens<L1, L2, A> {
    first: L1,
    second: L2,
    _marker: PhantomData<fn() -> A>,
}

impl<L1, L2, A> ComposedLens<L1, L2, A> {
    /// Creates a new composed lens.
    ///
    /// # Arguments
    ///
    /// * `first` - The outer lens (focuses on the intermediate structure)
    /// * `second` - The inner lens (focuses on the final value)
    #[must_use]
    pub const fn new(first: L1, second: L2) -> Self {
        Self {
            first,
            second,
            _marker: PhantomData,
        }
    }
}

impl<S, A, B, L1, L2> Lens<S, B> for ComposedLens<L1, L2, A>
where
    L1: Lens<S, A>,
    L2: Lens<A, B>,
{
    fn peek(&self, source: &S) -> B {
        self.second.peek(&self.first.peek(source))
    }

    fn set(&self, source: S, focus: B) -> Result<S, LensError> {
        let intermediate = self.first.peek(&source);
        let updated = self.second.set(intermediate, focus)?;
        self.first.set(source, updated)
    }

    fn is_read_only(&self) -> bool {
        self.first.is_read_only() || self.second.is_read_only()
    }
}

impl<L1: Clone, L2: Clone, A> Clone for ComposedLens<L1, L2, A> {
    fn clone(&self) -> Self {
        Self {
            first: self.first.clone(),
            second: self.second.clone(),
            _marker: PhantomData,
        }
    }
}

impl<L1: std::fmt::Debug, L2: std::fmt::Debug, A> std::fmt::Debug for ComposedLens<L1, L2, A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ComposedLens")
            .field("first", &self.first)
            .field("second", &self.second)
            .finish()
    }
}

/// Creates a lens for a struct field.
///
/// The generated lens clones the field on `peek` and replaces it on `set`.
///
/// # Syntax
///
/// ```text
/// lens!(StructType, field_name)
/// ```
///
/// # Example
///
/// ```
/// use focal::optics::Lens;
/// use focal::lens;
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let x_lens = lens!(Point, x);
///
/// let point = Point { x: 10, y: 20 };
/// assert_eq!(x_lens.peek(&point), 10);
///
/// let updated = x_lens.set(point, 100).unwrap();
/// assert_eq!(updated, Point { x: 100, y: 20 });
/// ```
#[macro_export]
macro_rules! lens {
    ($struct_type:ident, $field:ident) => {
        $crate::optics::FunctionLens::new(
            |source: &$struct_type| ::std::clone::Clone::clone(&source.$field),
            |mut source: $struct_type, value| {
                source.$field = value;
                source
            },
        )
    };
    ($struct_type:ident < $($generic:tt),+ >, $field:ident) => {
        $crate::optics::FunctionLens::new(
            |source: &$struct_type<$($generic),+>| ::std::clone::Clone::clone(&source.$field),
            |mut source: $struct_type<$($generic),+>, value| {
                source.$field = value;
                source
            },
        )
    };
    ($struct_type:path, $field:ident) => {
        $crate::optics::FunctionLens::new(
            |source: &$struct_type| ::std::clone::Clone::clone(&source.$field),
            |mut source: $struct_type, value| {
                source.$field = value;
                source
            },
        )
    };
}
