#![warn(missing_docs)]

//! The index type of an [`Array`](crate::Array).
//!
//! An [`Array<T, X>`](crate::Array) stores its length and capacity as values of its
//! index type `X`, and refuses to grow past `X::MAX_SIZE` elements. Choosing a small
//! index type shrinks the array header and bounds its length at the same time:
//!
//! ```
//! use ixarray::{Array, Error};
//!
//! let mut a: Array<u32, u8> = Array::new();
//! for i in 0..255 {
//!     a.push(i);
//! }
//! assert!(matches!(a.try_push(255), Err(Error::CapacityExceeded { .. })));
//! assert!(core::mem::size_of::<Array<u32, u8>>() < core::mem::size_of::<Array<u32>>());
//! ```

use core::fmt::Debug;

/// A type usable as the length, capacity and position type of an [`Array`](crate::Array).
///
/// Implemented for all primitive integers. Signed integers expose only their
/// non-negative range. Custom index newtypes are best defined with
/// `#[derive(Ordinal)]` (crate feature `macro`):
///
/// ```
/// # #[cfg(feature = "macro")] {
/// use ixarray::{Array, Ordinal};
///
/// #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Ordinal)]
/// #[ordinal(max = 4)]
/// struct SmallIx(u8);
///
/// assert_eq!(SmallIx::MAX_SIZE, 4);
/// let a: Array<i32, SmallIx> = Array::from_slice(&[1, 2, 3, 4]).unwrap();
/// assert!(a.clone().try_push(5).is_err());
/// # }
/// ```
///
/// # Safety
///
/// [`Array`](crate::Array) trusts this trait to compute memory offsets. Implementors must
/// guarantee:
/// * `from_usize(n)` returns `Some` if and only if `n <= MAX_SIZE`.
/// * `from_usize(n).unwrap().as_usize() == n` for every such `n`.
/// * `ZERO.as_usize() == 0`.
/// * the `Ord` implementation agrees with the order of `as_usize()`.
pub unsafe trait Ordinal: Copy + Ord + Debug {
    /// Position zero; also the length of an empty array.
    const ZERO: Self;

    /// The largest length this type can represent.
    const MAX_SIZE: usize;

    /// Name used in diagnostics, such as [`Error::CapacityExceeded`](crate::Error::CapacityExceeded).
    const NAME: &'static str;

    /// Converts to a `usize`.
    fn as_usize(self) -> usize;

    /// Converts from a `usize`, or `None` if `x > MAX_SIZE`.
    fn from_usize(x: usize) -> Option<Self>;

    /// The next position, or `None` if that would exceed `MAX_SIZE`.
    ///
    /// ```
    /// use ixarray::Ordinal;
    /// assert_eq!(3u8.increment(), Some(4));
    /// assert_eq!(255u8.increment(), None);
    /// assert_eq!(i8::MAX.increment(), None);
    /// ```
    #[inline]
    fn increment(self) -> Option<Self> {
        Self::from_usize(self.as_usize().checked_add(1)?)
    }

    /// The previous position, or `None` below zero.
    ///
    /// ```
    /// use ixarray::Ordinal;
    /// assert_eq!(4u16.decrement(), Some(3));
    /// assert_eq!(0u16.decrement(), None);
    /// ```
    #[inline]
    fn decrement(self) -> Option<Self> {
        Self::from_usize(self.as_usize().checked_sub(1)?)
    }
}

const fn clamp_to_usize(max: u128) -> usize {
    if max > usize::MAX as u128 {
        usize::MAX
    } else {
        max as usize
    }
}

macro_rules! impl_ordinal {
    ($($t:ty),*) => {
        $(
            // Safety: `from_usize` goes through the checked `TryFrom` conversion and
            // is additionally bounded by MAX_SIZE, which never exceeds `<$t>::MAX`.
            unsafe impl Ordinal for $t {
                const ZERO: Self = 0;
                const MAX_SIZE: usize = clamp_to_usize(<$t>::MAX as u128);
                const NAME: &'static str = stringify!($t);

                #[inline(always)]
                fn as_usize(self) -> usize {
                    self as usize
                }

                #[inline(always)]
                fn from_usize(x: usize) -> Option<Self> {
                    if x > Self::MAX_SIZE {
                        return None;
                    }
                    <$t>::try_from(x).ok()
                }
            }
        )*
    };
}

impl_ordinal!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);
