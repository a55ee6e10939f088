//! Persistent (immutable) nested maps.
//!
//! - [`Nested`]: Nested maps with path access, readable and writable through
//!   [`from_path_persistent`] lenses
//!
//! # Structural Sharing
//!
//! Every update returns a new version and leaves the original untouched.
//! Only the levels on the path to the change are copied; everything else is
//! shared between versions.
//!
//! # Examples
//!
//! ```rust
//! use focal::optics::SameRef;
//! use focal::persistent::Nested;
//! use focal::{path, record};
//! use focal::value::Value;
//!
//! let state = Nested::from(record! { "one" => 1, "two" => record! { "three" => 3 } });
//! let updated = state.set_in(&path!["one"], Nested::Leaf(Value::from(100)));
//!
//! assert_eq!(state.get_in(&path!["one"]), Nested::Leaf(Value::from(1)));
//! assert_eq!(updated.get_in(&path!["one"]), Nested::Leaf(Value::from(100)));
//! assert!(state.get_in(&path!["two"]).same_ref(&updated.get_in(&path!["two"])));
//! ```

mod nested;

pub use nested::Nested;
pub use nested::from_path_persistent;
