//! Lenses for immutable data manipulation.
//!
//! A lens is a composable accessor/updater pair: it reads ("peeks") a value
//! nested inside a larger structure, or produces a new structure with that
//! value replaced ("sets"), without mutating the input and without deep
//! copies.
//!
//! # Available Building Blocks
//!
//! - [`Lens`]: The lens trait, with [`create_lens`] and [`read_only`] for
//!   lenses built from plain functions
//! - [`from_path`]: A lens into a nested [`Value`](crate::value::Value)
//! - [`create_lens_memoized`] and [`read_only_memoized`]: Lenses that cache
//!   their last read
//! - [`lift`], [`lift_with`], [`over`], [`map`]: Focus functions as
//!   structure functions
//! - [`compose`] and [`compose_lenses!`](crate::compose_lenses): Chains of
//!   lenses, applied right to left
//! - [`combine_lenses`]: Several lenses viewed as one record
//!
//! # Example
//!
//! ```
//! use focal::optics::{Lens, compose, from_path, over};
//! use focal::record;
//! use focal::value::Value;
//!
//! let state = record! {
//!     "user" => record! { "name" => "Alice", "visits" => 1 },
//!     "settings" => record! { "theme" => "dark" },
//! };
//!
//! let visits = compose([from_path(["visits"]).shared(), from_path(["user"]).shared()]).unwrap();
//! assert_eq!(visits.peek(&state), Value::from(1));
//!
//! let updated = over(&visits, |count: Value| Value::from(count.as_i64().unwrap_or(0) + 1), state.clone()).unwrap();
//! assert_eq!(from_path(["user", "visits"]).peek(&updated), Value::from(2));
//!
//! // Untouched branches are shared, not copied.
//! let settings = from_path(["settings"]);
//! assert!(settings.peek(&state).same_ref(&settings.peek(&updated)));
//! ```
//!
//! # Lens Laws
//!
//! Every Lens must satisfy three laws:
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
//! Path lenses keep all three, with two exceptions. Arrays are dense, so
//! writing the absent value to an array element stores null. Removing a key
//! leaves its parents in place, so writing the absent value after a write
//! that created intermediate records keeps those (now empty) records.
//!
//! All three laws are stated with `==`, and [`Value`](crate::value::Value)
//! equality follows `f64` for floats. A focus holding `NaN` is never equal
//! to itself, so the laws cannot be observed through `==` for it even though
//! the written structure is the expected one. Compare such foci by their
//! bit patterns (`f64::to_bits`) instead.

mod combine;
mod compose;
mod lens;
mod lift;
mod memoized;
mod path;

pub use lens::ComposedLens;
pub use lens::DynLens;
pub use lens::FunctionLens;
pub use lens::Invocation;
pub use lens::Lens;
pub use lens::NoSetter;
pub use lens::Outcome;
pub use lens::create_lens;
pub use lens::read_only;

pub use path::PathLens;
pub use path::PathNode;
pub use path::WritePolicy;
pub use path::from_path;

pub use memoized::MemoCache;
pub use memoized::MemoizedLens;
pub use memoized::SameRef;
pub use memoized::create_lens_memoized;
pub use memoized::read_only_memoized;

pub use lift::lift;
pub use lift::lift_with;
pub use lift::map;
pub use lift::over;

pub use compose::ComposedChain;
pub use compose::compose;

pub use combine::CombinedLens;
pub use combine::combine_lenses;
