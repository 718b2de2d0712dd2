#![warn(missing_docs)]
#![warn(rustdoc::missing_doc_code_examples)]

//! A [`Fill<T>`] is an object that knows how to construct `T` values into uninitialized slots.
//!
//! Every constructor and bulk insertion of [`Array`](crate::Array) goes through a `Fill`,
//! so each slot is constructed exactly once, directly in place, and no spare
//! default values are ever built.
//!
//! # Examples
//!
//! ```
//! use ixarray::Array;
//! use ixarray::fill::{FillSequentially, FillWithDefault};
//!
//! let a: Array<u16> = Array::from_fill(4, FillSequentially(|i| (i * 2) as u16)).unwrap();
//! assert_eq!(a, [0, 2, 4, 6]);
//!
//! let b: Array<u16, u8> = Array::from_fill(3, FillWithDefault).unwrap();
//! assert_eq!(b, [0, 0, 0]);
//! ```

use core::mem::MaybeUninit;

/// An object that is able to initialize a run of `T` slots.
///
/// # Examples
///
/// A fill that writes powers of 3, from the end backwards:
///
/// ```
/// use ixarray::Array;
/// use ixarray::fill::Fill;
/// use std::mem::MaybeUninit;
///
/// struct WriteBackwardsPowersOf3;
/// unsafe impl Fill<u64> for WriteBackwardsPowersOf3 {
///     fn fill(self, dst: &mut [MaybeUninit<u64>]) -> usize {
///         let mut v = 1;
///         for slot in dst.iter_mut().rev() {
///             slot.write(v);
///             v *= 3;
///         }
///         dst.len()
///     }
/// }
///
/// let a: Array<u64> = Array::from_fill(5, WriteBackwardsPowersOf3).unwrap();
/// assert_eq!(a, [81, 27, 9, 3, 1]);
/// ```
///
/// # Safety
///
/// `fill(dst)` returns some `n <= dst.len()`, and on return the slots `dst[..n]` are
/// initialized. The slots `dst[n..]` are left untouched.
pub unsafe trait Fill<T> {
    /// Initializes a prefix of `dst`, returning its length.
    fn fill(self, dst: &mut [MaybeUninit<T>]) -> usize;
}

/// Fills every slot with `T::default()`.
#[allow(rustdoc::missing_doc_code_examples)]
pub struct FillWithDefault;

unsafe impl<T: Default> Fill<T> for FillWithDefault {
    fn fill(self, dst: &mut [MaybeUninit<T>]) -> usize {
        FillSequentially(|_i| T::default()).fill(dst)
    }
}

/// Fills every slot with a clone of the referenced value.
///
/// ```
/// use ixarray::Array;
/// use ixarray::fill::FillWithClone;
///
/// let a: Array<String> = Array::from_fill(2, FillWithClone(&"woohoo".to_string())).unwrap();
/// assert_eq!(a, ["woohoo", "woohoo"]);
/// ```
pub struct FillWithClone<'a, T>(pub &'a T);

unsafe impl<'a, T: Clone> Fill<T> for FillWithClone<'a, T> {
    fn fill(self, dst: &mut [MaybeUninit<T>]) -> usize {
        for slot in dst.iter_mut() {
            slot.write(self.0.clone());
        }
        dst.len()
    }
}

/// Fills the slots with clones of a source slice, stopping at whichever runs out first.
#[allow(rustdoc::missing_doc_code_examples)]
pub struct CloneFrom<'a, T>(pub &'a [T]);

unsafe impl<'a, T: Clone> Fill<T> for CloneFrom<'a, T> {
    fn fill(self, dst: &mut [MaybeUninit<T>]) -> usize {
        let n = core::cmp::min(self.0.len(), dst.len());
        for (src, slot) in self.0.iter().zip(dst[..n].iter_mut()) {
            slot.write(src.clone());
        }
        n
    }
}

/// Fills the slots by converting each element of a source slice with `T::from`.
///
/// Conversion happens element by element; each slot sees exactly one call to `from`.
///
/// ```
/// use ixarray::Array;
/// use ixarray::fill::ConvertFrom;
///
/// let bytes = [b'f', b'i', b't', b'z'];
/// let a: Array<u32> = Array::from_fill(4, ConvertFrom(&bytes)).unwrap();
/// assert_eq!(a, [102, 105, 116, 122]);
/// ```
pub struct ConvertFrom<'a, U>(pub &'a [U]);

unsafe impl<'a, T: From<U>, U: Clone> Fill<T> for ConvertFrom<'a, U> {
    fn fill(self, dst: &mut [MaybeUninit<T>]) -> usize {
        let n = core::cmp::min(self.0.len(), dst.len());
        for (src, slot) in self.0.iter().zip(dst[..n].iter_mut()) {
            slot.write(T::from(src.clone()));
        }
        n
    }
}

/// Fills the slots by converting each element of a source slice with `T::try_from`,
/// stopping at the first element that does not convert.
///
/// The returned count is then the position of the failed element.
///
/// ```
/// use ixarray::Array;
/// use ixarray::fill::TryConvertFrom;
///
/// let mut a: Array<u8> = Array::with_capacity(4).unwrap();
/// assert_eq!(a.extend_from_fill(4, TryConvertFrom(&[1i32, 2, -3, 4])).unwrap(), 2);
/// assert_eq!(a, [1, 2]);
/// ```
pub struct TryConvertFrom<'a, U>(pub &'a [U]);

unsafe impl<'a, T: TryFrom<U>, U: Clone> Fill<T> for TryConvertFrom<'a, U> {
    fn fill(self, dst: &mut [MaybeUninit<T>]) -> usize {
        let mut n = 0;
        for (src, slot) in self.0.iter().zip(dst.iter_mut()) {
            match T::try_from(src.clone()) {
                Ok(t) => {
                    slot.write(t);
                    n += 1;
                }
                Err(_) => break,
            }
        }
        n
    }
}

/// Fills slot `i` with `f(i)`.
#[allow(rustdoc::missing_doc_code_examples)]
pub struct FillSequentially<Lambda>(pub Lambda);

unsafe impl<T, Lambda: FnMut(usize) -> T> Fill<T> for FillSequentially<Lambda> {
    fn fill(mut self, dst: &mut [MaybeUninit<T>]) -> usize {
        for (i, slot) in dst.iter_mut().enumerate() {
            slot.write(self.0(i));
        }
        dst.len()
    }
}

/// Fills the slots from an iterator until either the slots or the iterator run out.
///
/// ```
/// use ixarray::Array;
/// use ixarray::fill::FromIterPrefix;
///
/// let mut a: Array<u8> = Array::with_capacity(8).unwrap();
/// let mut iter = 1..=3;
/// a.extend_from_fill(8, FromIterPrefix(&mut iter)).unwrap();
/// assert_eq!(a, [1, 2, 3]);
/// ```
pub struct FromIterPrefix<Iter>(pub Iter);

unsafe impl<T, Iter: Iterator<Item = T>> Fill<T> for FromIterPrefix<Iter> {
    fn fill(mut self, dst: &mut [MaybeUninit<T>]) -> usize {
        let mut n = 0;
        for slot in dst.iter_mut() {
            match self.0.next() {
                Some(t) => {
                    slot.write(t);
                    n += 1;
                }
                None => break,
            }
        }
        n
    }
}

/// Moves the elements of an array into the slots.
///
/// Elements that do not fit are dropped.
#[allow(rustdoc::missing_doc_code_examples)]
pub struct MoveFrom<T, const N: usize>(pub [T; N]);

unsafe impl<T, const N: usize> Fill<T> for MoveFrom<T, N> {
    fn fill(self, dst: &mut [MaybeUninit<T>]) -> usize {
        FromIterPrefix(self.0.into_iter()).fill(dst)
    }
}
