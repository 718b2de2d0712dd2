//! # `ixarray`
//! Dynamic arrays with a pluggable index type, over owned or borrowed storage.
//!
//! 1. [Summary](#summary)
//! 1. [Examples](#examples)
//! 1. [Storage states](#storage-states)
//! 1. [Errors](#errors)
//! 1. [Feature flags](#feature-flags)
//!
//! # Summary
//!
//! [`Array<T, X>`][Array] is a contiguous, growable sequence of `T`, much like `Vec<T>`,
//! with two differences:
//!
//! * its length, capacity and positions are stored as values of an index type `X`
//!   (any primitive integer, or a newtype implementing [`Ordinal`]). A narrow index
//!   type shrinks every array header and caps the length at `X::MAX_SIZE`.
//! * it can either own a heap buffer or act as a *view* of storage borrowed from
//!   elsewhere: a slice, a `Vec`, a sub-range of another array, or an arena.
//!
//! # Examples
//!
//! An array indexed by `u8` holds at most 255 elements and says so, instead of wrapping:
//!
//! ```
//! use ixarray::{Array, Error};
//!
//! let mut a: Array<u64, u8> = (0..255).collect();
//! assert_eq!(a.len(), 255);
//! assert!(matches!(a.try_push(0), Err(Error::CapacityExceeded { max: 255, .. })));
//! ```
//!
//! Views write through to the storage they borrow, and cannot change its length:
//!
//! ```
//! use ixarray::Array;
//!
//! let mut owner = vec![1, 2, 3, 4, 5];
//! {
//!     let mut middle: Array<i32, u16> = Array::share(&mut owner[1..4]).unwrap();
//!     for x in middle.iter_mut() {
//!         *x = -*x;
//!     }
//!     assert!(middle.try_push(6).is_err());
//! }
//! assert_eq!(owner, [1, -2, -3, -4, 5]);
//! ```
//!
//! # Storage states
//!
//! Every array is in one of three [`Storage`] states:
//!
//! * **null**: no storage. This is what [`Array::new`] returns, and what assigning an empty
//!   sequence produces. No allocation happens until the first element arrives.
//! * **owning**: a heap buffer allocated by the array. Elements are dropped (last to first)
//!   and the buffer freed when the array is dropped or [released](Array::release).
//!   Growth doubles the capacity, up to `X::MAX_SIZE`.
//! * **view**: storage borrowed for the array's lifetime `'a`. A view never allocates,
//!   never frees and never drops elements. Its capacity equals its length, and operations
//!   that would change the length fail with [`Error::ViewNotResizable`].
//!
//! Cloning always produces an owning array. See the [`assign`] module for how assignment
//! behaves for each combination of states.
//!
//! # Errors
//!
//! Fallible operations return [`Result<_, Error>`][Error] and leave the array unchanged on
//! failure. The exception is [`Array::try_extend`] over an iterator whose length is not known
//! up front: elements appended before the failure stay. A few conveniences (`push`, `insert`, `collect`, `extend`, `clone`) panic
//! instead, with the same message the error would display.
//!
//! # Feature flags
//!
//! * `macro`. Enables `#[derive(Ordinal)]` for index newtypes. Adds a dependency on
//!   `ixarray_macro`, `syn` and `quote`.
//! * `bumpalo`. Enables [`Array::alloc_view_in`], creating views over storage in a
//!   `bumpalo::Bump` arena. Adds a dependency on `bumpalo`.
//! * `doc`. Renders the diagrams in this documentation as SVG. Adds a dependency on `svgbobdoc`.
//!

#![no_std]
extern crate alloc;

#[cfg(any(test, doc))]
extern crate std;


pub mod array;
pub mod assign;
pub mod cmp;
pub mod error;
pub mod fill;
pub mod iter;
pub mod ordinal;
pub mod prelude;
pub mod view;

mod doc_macro;

pub use array::{Array, RawSlot, Storage};
pub use error::Error;
pub use iter::Indices;
#[cfg(feature = "macro")]
pub use ixarray_macro::Ordinal;
pub use ordinal::Ordinal;
