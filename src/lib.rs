//! # focal
//!
//! Composable lenses over nested immutable values.
//!
//! ## Overview
//!
//! A lens pairs a read of one location inside a larger structure with an
//! immutable write of that location. Lenses compose, so deeply nested fields
//! can be read and updated without manual deep copies. Every write returns a
//! new structure that shares all untouched branches with the input.
//!
//! - **Values**: [`value::Value`], a record/array/scalar tree with
//!   [`Arc`](std::sync::Arc)-shared containers, addressed by [`value::Path`]s
//! - **Lenses**: [`optics::Lens`], path lenses, memoized lenses, lifting,
//!   composition and record-shaped combination
//! - **Reducers**: [`reducer`], lenses adapted to `(state, event) -> state`
//! - **Persistent Maps**: [`persistent`], a nested map of shared tables usable
//!   with the same path lenses
//!
//! ## Feature Flags
//!
//! - `persistent` (default): Nested persistent maps
//! - `serde`: `Serialize`/`Deserialize` for values, keys and paths
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use focal::prelude::*;
//! use focal::record;
//!
//! let state = record! { "a" => record! { "b" => 3 } };
//! let ab_lens = from_path(["a", "b"]);
//!
//! assert_eq!(ab_lens.peek(&state), Value::from(3));
//! assert_eq!(
//!     ab_lens.set(state, Value::from(4)).unwrap(),
//!     record! { "a" => record! { "b" => 4 } }
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use focal::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::LensError;

    pub use crate::optics::*;

    pub use crate::reducer::*;

    pub use crate::value::{Key, Path, Record, Value};

    #[cfg(feature = "persistent")]
    pub use crate::persistent::*;
}

pub mod error;

pub mod value;

pub mod optics;

pub mod reducer;

#[cfg(feature = "persistent")]
pub mod persistent;
