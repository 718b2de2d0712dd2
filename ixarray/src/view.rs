//! Non-owning [`Array`]s over borrowed storage.
//!
//! A view is created over a mutable slice, a raw pointer range, a sub-range of another array,
//! or (with the `bumpalo` feature) a fresh arena allocation. It borrows its storage for the
//! array's lifetime `'a`, so it cannot outlive what it views:
//!
//! ```compile_fail
//! use ixarray::Array;
//!
//! let view: Array<i32>;
//! {
//!     let mut backing = vec![1, 2, 3];
//!     view = Array::share(&mut backing[..]).unwrap();
//! }
//! assert_eq!(view.len(), 3);
//! ```
//!
//! The same holds for views of another array, and for views returned out of the scope that
//! owns their storage:
//!
//! ```compile_fail
//! use ixarray::Array;
//!
//! let view;
//! {
//!     let mut parent: Array<i32, u8> = Array::from_slice(&[1, 2, 3]).unwrap();
//!     view = parent.view_mut(0, 2).unwrap();
//! }
//! assert_eq!(view.len(), 2);
//! ```
//!
//! ```compile_fail
//! use ixarray::Array;
//!
//! fn dangling_view() -> Array<'static, i32> {
//!     let mut owner = vec![1, 2, 3];
//!     Array::share(&mut owner[..]).unwrap()
//! }
//! ```

use crate::{Array, Error, Ordinal};

use core::mem;
use core::ptr::NonNull;
use core::slice;

impl<'a, T: 'a, X: Ordinal> Array<'a, T, X> {
    /// Creates a view of `data`. Fails if `data` is longer than `X::MAX_SIZE`.
    ///
    /// ```
    /// use ixarray::Array;
    ///
    /// let mut backing = [1u8, 2, 3];
    /// let mut view: Array<u8, u8> = Array::share(&mut backing).unwrap();
    /// assert!(view.is_view());
    /// view.iter_mut().for_each(|x| *x *= 10);
    /// drop(view);
    /// assert_eq!(backing, [10, 20, 30]);
    /// ```
    pub fn share(data: &'a mut [T]) -> Result<Self, Error> {
        let len = X::from_usize(data.len()).ok_or_else(|| Error::capacity_exceeded::<X>(data.len()))?;
        log::trace!("ixarray: viewing {} elements as `{}`", data.len(), X::NAME);
        Ok(unsafe { Self::from_raw_view(NonNull::from(data).cast(), len) })
    }

    /// Creates a view of the elements in `[begin, end)`.
    ///
    /// Fails with [`Error::InvalidRange`] if `end` precedes `begin`, if either pointer is null,
    /// or if `T` is zero-sized (a pointer range cannot count such elements).
    ///
    /// # Safety
    ///
    /// The range must be valid for reads and writes of initialized `T` values for `'a`,
    /// and nothing else may access it during that time.
    pub unsafe fn share_raw(begin: *mut T, end: *mut T) -> Result<Self, Error> {
        if mem::size_of::<T>() == 0 {
            return Err(Error::InvalidRange {
                reason: "pointer range over a zero-sized type",
            });
        }
        if begin.is_null() || end.is_null() || end < begin {
            return Err(Error::InvalidRange {
                reason: "end of pointer range precedes its beginning",
            });
        }
        let len = end.offset_from(begin) as usize;
        Self::share(slice::from_raw_parts_mut(begin, len))
    }

    /// Rebinds this array as a view of `data`.
    ///
    /// Whatever the array held before is released first: owned elements are dropped and their
    /// buffer freed, and a previous view is detached.
    ///
    /// ```
    /// use ixarray::Array;
    ///
    /// let mut first = [1, 2];
    /// let mut second = [3, 4, 5];
    /// let mut a: Array<i32> = Array::from_slice(&[9]).unwrap();
    /// a.share_data(&mut first).unwrap();
    /// assert_eq!(a, [1, 2]);
    /// a.share_data(&mut second).unwrap();
    /// a[2] = 6;
    /// drop(a);
    /// assert_eq!(second, [3, 4, 6]);
    /// ```
    pub fn share_data(&mut self, data: &'a mut [T]) -> Result<&mut Self, Error> {
        let view = Self::share(data)?;
        *self = view;
        Ok(self)
    }

    fn sub_range_end(&self, start: usize, count: usize) -> Result<usize, Error> {
        let len = self.len();
        match start.checked_add(count) {
            Some(end) if end <= len => Ok(end),
            _ => Err(Error::out_of_range(start, start.saturating_add(count), len)),
        }
    }

    /// Borrows `count` elements starting at `start` as a slice.
    pub fn view(&self, start: usize, count: usize) -> Result<&[T], Error> {
        let end = self.sub_range_end(start, count)?;
        Ok(&self.as_slice()[start..end])
    }

    /// Views `count` elements starting at `start` as a non-owning array.
    ///
    /// Writes through the result, including [`assign`](Self::assign), land in this array.
    ///
    /// ```
    /// use ixarray::Array;
    ///
    /// let mut a: Array<i32, u16> = Array::from_slice(&[1, 2, 3, 4]).unwrap();
    /// a.view_mut(1, 2).unwrap().assign(&[20, 30]).unwrap();
    /// assert_eq!(a, [1, 20, 30, 4]);
    /// assert!(a.view_mut(3, 2).is_err());
    /// ```
    pub fn view_mut(&mut self, start: usize, count: usize) -> Result<Array<'_, T, X>, Error> {
        let end = self.sub_range_end(start, count)?;
        Array::share(&mut self.as_mut_slice()[start..end])
    }

    /// Views all elements as a non-owning array.
    pub fn as_view(&mut self) -> Array<'_, T, X> {
        unsafe { Array::from_raw_view(NonNull::new_unchecked(self.as_mut_ptr()), self.ordinal_len()) }
    }

    /// Moves the elements of `iter` into `bump` and views them.
    ///
    /// The arena owns the elements; they are not dropped when the view is.
    ///
    /// ```
    /// use bumpalo::Bump;
    /// use ixarray::Array;
    ///
    /// let bump = Bump::new();
    /// let view: Array<u32, u8> = Array::alloc_view_in(&bump, 0..5).unwrap();
    /// assert!(view.is_view());
    /// assert_eq!(view, [0, 1, 2, 3, 4]);
    /// ```
    #[cfg(feature = "bumpalo")]
    pub fn alloc_view_in<I>(bump: &'a bumpalo::Bump, iter: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let iter = iter.into_iter();
        if iter.len() > X::MAX_SIZE {
            return Err(Error::capacity_exceeded::<X>(iter.len()));
        }
        Self::share(bump.alloc_slice_fill_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Array, Error, Storage};
    use alloc::string::{String, ToString};
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn view_length_is_fixed() {
        let mut backing = vec![1, 2, 3];
        let mut v: Array<i32, u8> = Array::share(&mut backing[..]).unwrap();
        assert_eq!(v.capacity(), 3);
        let refused = Err(Error::ViewNotResizable { operation: "grow" });
        assert_eq!(v.try_push(4), refused);
        assert_eq!(v.try_insert(0, 4), refused);
        assert_eq!(v.reserve(1), refused);
        assert_eq!(v.reserve(0), Ok(()));
        let shrink = Err(Error::ViewNotResizable { operation: "shrink" });
        assert!(matches!(v.pop(), Err(Error::ViewNotResizable { operation: "shrink" })));
        assert_eq!(v.truncate(1), shrink);
        assert_eq!(v.erase(0..1), shrink);
        assert_eq!(v.clear(), shrink);
        assert_eq!(v, [1, 2, 3]);
        v.shrink_to_fit();
        assert!(v.is_view());
    }

    #[test]
    fn view_does_not_drop_elements() {
        let mut backing: Vec<String> = vec!["a".to_string(), "b".to_string()];
        {
            let mut v: Array<String> = Array::share(&mut backing[..]).unwrap();
            v[1].push('!');
        }
        assert_eq!(backing, ["a", "b!"]);
    }

    #[test]
    fn share_rejects_long_slices() {
        let mut backing = [0u8; 300];
        let r: Result<Array<u8, u8>, _> = Array::share(&mut backing[..]);
        assert!(matches!(r, Err(Error::CapacityExceeded { requested: 300, .. })));
    }

    #[test]
    fn share_raw_checks_the_range() {
        let mut backing = [1u16, 2, 3, 4];
        let range = backing.as_mut_ptr_range();
        unsafe {
            let v: Array<u16> = Array::share_raw(range.start, range.end).unwrap();
            assert_eq!(v, [1, 2, 3, 4]);
            let r: Result<Array<u16>, _> = Array::share_raw(range.end, range.start);
            assert!(matches!(r, Err(Error::InvalidRange { .. })));
            let mut units = [(); 3];
            let r: Result<Array<()>, _> =
                Array::share_raw(units.as_mut_ptr(), units.as_mut_ptr().add(3));
            assert!(matches!(r, Err(Error::InvalidRange { .. })));
        }
    }

    #[test]
    fn share_data_releases_owned_contents() {
        let mut backing = [7, 8];
        let mut a: Array<i32, u8> = Array::from_slice(&[1, 2, 3]).unwrap();
        a.share_data(&mut backing[..]).unwrap();
        assert_eq!(a.storage(), Storage::View);
        assert_eq!(a, [7, 8]);
    }

    #[test]
    fn sub_views() {
        let mut a: Array<i32, u8> = (0..5).collect();
        assert_eq!(a.view(1, 2).unwrap(), [1, 2]);
        assert!(a.view(5, 0).unwrap().is_empty());
        assert_eq!(a.view(4, 2), Err(Error::out_of_range(4, 6, 5)));
        assert_eq!(a.view(usize::MAX, 2), Err(Error::out_of_range(usize::MAX, usize::MAX, 5)));
        {
            let mut whole = a.as_view();
            whole[0] = 10;
            assert!(whole.try_push(1).is_err());
        }
        assert_eq!(a, [10, 1, 2, 3, 4]);
        assert!(a.owns_data());
    }
}
