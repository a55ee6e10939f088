//! Reducers built from lenses.
//!
//! A reducer turns a state and an event into the next state. This module
//! adapts lenses to that shape: [`lift_reducer`] reads one part of the state,
//! computes a new value for another part and writes it back, and
//! [`compose_lens_reducers`] runs several such reducers one after the other.
//!
//! # Initialization events
//!
//! State containers commonly dispatch a framework-level initialization event
//! before any state exists. A [`LensReducer`] can be told how to recognise
//! such events with [`LensReducer::with_initialization`]; for them the read
//! lens is skipped and the update function receives `None`, so it can supply
//! its own initial value.
//!
//! # Examples
//!
//! ```
//! use focal::optics::from_path;
//! use focal::reducer::{Reducer, lift_reducer};
//! use focal::record;
//! use focal::value::Value;
//!
//! enum Event { Init, Add(i64) }
//!
//! let total = lift_reducer(
//!     from_path(["items"]),
//!     from_path(["total"]),
//!     |items: Option<Value>, total: Value, event: &Event| match (items, event) {
//!         (_, Event::Init) => Value::from(0),
//!         (_, Event::Add(amount)) => Value::from(total.as_i64().unwrap_or(0) + amount),
//!     },
//! )
//! .with_initialization(|event: &Event| matches!(event, Event::Init));
//!
//! let state = total.reduce(record! {}, &Event::Init).unwrap();
//! let state = total.reduce(state, &Event::Add(5)).unwrap();
//! assert_eq!(state, record! { "total" => 5 });
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::LensError;
use crate::optics::Lens;

/// A state transition driven by events.
pub trait Reducer<S, E> {
    /// Computes the state that follows `state` after `event`.
    ///
    /// # Errors
    ///
    /// Returns the error of any lens write performed on the way.
    fn reduce(&self, state: S, event: &E) -> Result<S, LensError>;

    /// Erases the reducer type into a shareable [`DynReducer`].
    fn shared(self) -> DynReducer<S, E>
    where
        Self: Sized + Send + Sync + 'static,
    {
        Arc::new(self)
    }
}

/// A type-erased, cheaply clonable reducer.
pub type DynReducer<S, E> = Arc<dyn Reducer<S, E> + Send + Sync>;

impl<S, E, R> Reducer<S, E> for &R
where
    R: Reducer<S, E> + ?Sized,
{
    fn reduce(&self, state: S, event: &E) -> Result<S, LensError> {
        (**self).reduce(state, event)
    }
}

impl<S, E, R> Reducer<S, E> for Box<R>
where
    R: Reducer<S, E> + ?Sized,
{
    fn reduce(&self, state: S, event: &E) -> Result<S, LensError> {
        (**self).reduce(state, event)
    }
}

impl<S, E, R> Reducer<S, E> for Arc<R>
where
    R: Reducer<S, E> + ?Sized,
{
    fn reduce(&self, state: S, event: &E) -> Result<S, LensError> {
        (**self).reduce(state, event)
    }
}

/// A reducer backed by a closure.
#[derive(Clone, Copy)]
pub struct FnReducer<F>(F);

impl<S, E, F> Reducer<S, E> for FnReducer<F>
where
    F: Fn(S, &E) -> Result<S, LensError>,
{
    fn reduce(&self, state: S, event: &E) -> Result<S, LensError> {
        (self.0)(state, event)
    }
}

impl<F> fmt::Debug for FnReducer<F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("FnReducer")
    }
}

/// Wraps a closure `(state, &event) -> Result<state, LensError>` as a
/// [`Reducer`].
pub const fn reducer_fn<S, E, F>(function: F) -> FnReducer<F>
where
    F: Fn(S, &E) -> Result<S, LensError>,
{
    FnReducer(function)
}

/// The initialization predicate installed by [`lift_reducer`]: it matches no
/// event.
pub type NoInitialization<E> = fn(&E) -> bool;

const fn never<E>(_: &E) -> bool {
    false
}

/// A reducer that writes through one lens a value computed from another.
///
/// See [`lift_reducer`].
pub struct LensReducer<R, W, U, P, A, B> {
    read: R,
    write: W,
    update: U,
    is_initialization: P,
    _marker: PhantomData<fn() -> (A, B)>,
}

impl<R, W, U, P, A, B> LensReducer<R, W, U, P, A, B> {
    /// Replaces the initialization predicate.
    ///
    /// Events matching `predicate` bypass the read lens: the update function
    /// receives `None` instead of a read value.
    #[must_use]
    pub fn with_initialization<Q>(self, predicate: Q) -> LensReducer<R, W, U, Q, A, B> {
        LensReducer {
            read: self.read,
            write: self.write,
            update: self.update,
            is_initialization: predicate,
            _marker: PhantomData,
        }
    }
}

impl<S, E, R, W, U, P, A, B> Reducer<S, E> for LensReducer<R, W, U, P, A, B>
where
    R: Lens<S, A>,
    W: Lens<S, B>,
    U: Fn(Option<A>, B, &E) -> B,
    P: Fn(&E) -> bool,
{
    fn reduce(&self, state: S, event: &E) -> Result<S, LensError> {
        let read = if (self.is_initialization)(event) {
            tracing::debug!("initialization event, read lens skipped");
            None
        } else {
            Some(self.read.peek(&state))
        };
        let current = self.write.peek(&state);
        let next = (self.update)(read, current, event);
        self.write.set(state, next)
    }
}

impl<R: Clone, W: Clone, U: Clone, P: Clone, A, B> Clone for LensReducer<R, W, U, P, A, B> {
    fn clone(&self) -> Self {
        Self {
            read: self.read.clone(),
            write: self.write.clone(),
            update: self.update.clone(),
            is_initialization: self.is_initialization.clone(),
            _marker: PhantomData,
        }
    }
}

impl<R, W, U, P, A, B> fmt::Debug for LensReducer<R, W, U, P, A, B> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("LensReducer").finish_non_exhaustive()
    }
}

/// Builds a reducer from a read lens, a write lens and an update function.
///
/// On every event the reducer computes
/// `update(Some(read.peek(&state)), write.peek(&state), event)` and writes
/// the result through `write`.
///
/// No event is treated as an initialization event until
/// [`LensReducer::with_initialization`] installs a predicate.
pub fn lift_reducer<S, E, R, W, U, A, B>(
    read: R,
    write: W,
    update: U,
) -> LensReducer<R, W, U, NoInitialization<E>, A, B>
where
    R: Lens<S, A>,
    W: Lens<S, B>,
    U: Fn(Option<A>, B, &E) -> B,
{
    LensReducer {
        read,
        write,
        update,
        is_initialization: never::<E>,
        _marker: PhantomData,
    }
}

/// Reducers applied one after the other.
///
/// See [`compose_lens_reducers`].
pub struct ReducerChain<S, E> {
    reducers: Vec<DynReducer<S, E>>,
}

impl<S, E> ReducerChain<S, E> {
    /// Returns the number of reducers in the chain.
    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    /// Returns `true` for the identity chain.
    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }
}

impl<S, E> Reducer<S, E> for ReducerChain<S, E> {
    fn reduce(&self, state: S, event: &E) -> Result<S, LensError> {
        self.reducers
            .iter()
            .try_fold(state, |state, reducer| reducer.reduce(state, event))
    }
}

impl<S, E> Clone for ReducerChain<S, E> {
    fn clone(&self) -> Self {
        Self {
            reducers: self.reducers.clone(),
        }
    }
}

impl<S, E> fmt::Debug for ReducerChain<S, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ReducerChain")
            .field("len", &self.len())
            .finish()
    }
}

/// Chains reducers, from right to left.
///
/// The last reducer sees the incoming state first; every other reducer sees
/// the state produced by the one after it. Without reducers the chain
/// returns its input.
///
/// This is sequential chaining of state updates, not lens composition.
pub fn compose_lens_reducers<S, E, I>(reducers: I) -> ReducerChain<S, E>
where
    I: IntoIterator<Item = DynReducer<S, E>>,
{
    let mut reducers: Vec<_> = reducers.into_iter().collect();
    reducers.reverse();
    ReducerChain { reducers }
}
