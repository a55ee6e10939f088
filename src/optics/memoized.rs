//! A lens that caches its last read.
//!
//! [`MemoizedLens`] remembers exactly one `(input, output)` pair. A read with
//! an input that is the *same reference* as the cached one returns the cached
//! output without calling the peek function; any other input recomputes and
//! overwrites the slot. The cache is never cleared automatically.
//!
//! Memoizing only pays off when the peek function is expensive and the same
//! structure is read repeatedly.
//!
//! # Examples
//!
//! ```
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! use focal::optics::{Lens, create_lens_memoized};
//! use focal::record;
//! use focal::value::Value;
//!
//! let calls = AtomicUsize::new(0);
//! let lens = create_lens_memoized(
//!     |value: &Value| {
//!         calls.fetch_add(1, Ordering::SeqCst);
//!         value.get(&"a".into()).cloned().unwrap_or_default()
//!     },
//!     |value: Value, _a: Value| value,
//! );
//!
//! let source = record! { "a" => 2 };
//! assert_eq!(lens.peek(&source), Value::from(2));
//! assert_eq!(lens.peek(&source), Value::from(2));
//! assert_eq!(calls.load(Ordering::SeqCst), 1);
//! ```

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::LensError;
use crate::optics::{Lens, NoSetter};
use crate::value::Value;

/// Reference identity.
///
/// Two values are the same reference when a read of one is guaranteed to be
/// a read of the other.
pub trait SameRef {
    /// Returns `true` if `self` and `other` are the same reference.
    fn same_ref(&self, other: &Self) -> bool;
}

impl SameRef for Value {
    fn same_ref(&self, other: &Self) -> bool {
        Self::same_ref(self, other)
    }
}

impl<T: ?Sized> SameRef for Arc<T> {
    fn same_ref(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other)
    }
}

/// A single-slot cache keyed by reference identity.
///
/// The slot sits behind a mutex. The lock is never held while the value is
/// computed, so a slow computation does not block other readers; the slot is
/// simply overwritten by whichever computation finishes last.
pub struct MemoCache<S, A> {
    slot: Mutex<Option<(S, A)>>,
}

impl<S, A> MemoCache<S, A> {
    /// Creates an empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Forgets the cached pair.
    pub fn clear(&self) {
        *self.slot.lock() = None;
    }

    /// Returns `true` if the slot holds the result for `input`.
    pub fn is_cached_for(&self, input: &S) -> bool
    where
        S: SameRef,
    {
        self.slot
            .lock()
            .as_ref()
            .is_some_and(|(cached, _)| cached.same_ref(input))
    }

    /// Returns the cached output for `input`, or computes, stores and returns
    /// a fresh one.
    pub fn get_or_compute<F>(&self, input: &S, compute: F) -> A
    where
        S: SameRef + Clone,
        A: Clone,
        F: FnOnce(&S) -> A,
    {
        if let Some((cached_input, cached_output)) = self.slot.lock().as_ref()
            && cached_input.same_ref(input)
        {
            tracing::trace!("memo cache hit");
            return cached_output.clone();
        }

        tracing::trace!("memo cache miss");
        let output = compute(input);
        *self.slot.lock() = Some((input.clone(), output.clone()));
        output
    }
}

impl<S, A> Default for MemoCache<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A> fmt::Debug for MemoCache<S, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("MemoCache")
            .field("occupied", &self.slot.lock().is_some())
            .finish()
    }
}

/// A lens whose peek function is memoized by a [`MemoCache`].
///
/// The set function, when there is one, is passed through untouched.
pub struct MemoizedLens<S, A, P, St> {
    peek: P,
    setter: Option<St>,
    cache: MemoCache<S, A>,
}

impl<S, A, P, St> MemoizedLens<S, A, P, St>
where
    P: Fn(&S) -> A,
    St: Fn(S, A) -> S,
{
    /// Creates a memoized lens with an empty cache.
    #[must_use]
    pub const fn new(peek: P, setter: St) -> Self {
        Self {
            peek,
            setter: Some(setter),
            cache: MemoCache::new(),
        }
    }
}

impl<S, A, P> MemoizedLens<S, A, P, NoSetter<S, A>>
where
    P: Fn(&S) -> A,
{
    /// Creates a memoized lens that can only be read.
    #[must_use]
    pub const fn read_only(peek: P) -> Self {
        Self {
            peek,
            setter: None,
            cache: MemoCache::new(),
        }
    }
}

impl<S, A, P, St> MemoizedLens<S, A, P, St> {
    /// Returns the cache backing the peek function.
    pub const fn cache(&self) -> &MemoCache<S, A> {
        &self.cache
    }
}

impl<S, A, P, St> Lens<S, A> for MemoizedLens<S, A, P, St>
where
    S: SameRef + Clone,
    A: Clone,
    P: Fn(&S) -> A,
    St: Fn(S, A) -> S,
{
    fn peek(&self, source: &S) -> A {
        self.cache.get_or_compute(source, &self.peek)
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

impl<S, A, P, St> fmt::Debug for MemoizedLens<S, A, P, St> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("MemoizedLens")
            .field("read_only", &self.setter.is_none())
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

/// Same as [`create_lens`](crate::optics::create_lens), but the lens caches
/// its most recent read.
///
/// Only use it when the structures read through the lens are not mutated
/// behind its back; [`Value`] cannot be.
pub const fn create_lens_memoized<S, A, P, St>(peek: P, setter: St) -> MemoizedLens<S, A, P, St>
where
    P: Fn(&S) -> A,
    St: Fn(S, A) -> S,
{
    MemoizedLens::new(peek, setter)
}

/// Same as [`read_only`](crate::optics::read_only), but the lens caches its
/// most recent read.
pub const fn read_only_memoized<S, A, P>(peek: P) -> MemoizedLens<S, A, P, NoSetter<S, A>>
where
    P: Fn(&S) -> A,
{
    MemoizedLens::read_only(peek)
}

// The slot is guarded, so a memoized lens may be shared between threads.
static_assertions::assert_impl_all!(MemoCache<Value, Value>: Send, Sync);
