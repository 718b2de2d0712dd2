#![warn(missing_docs)]

//! The [`Array`] type: a contiguous sequence that either owns its buffer or views borrowed storage.
//!
//! # Examples
//!
//! ```
//! use ixarray::{Array, Storage};
//!
//! let mut a: Array<String, u16> = Array::new();
//! assert_eq!(a.storage(), Storage::Null);
//! a.push("x".to_string());
//! a.insert_n(0, 2, &"y".to_string()).unwrap();
//! assert_eq!(a, ["y", "y", "x"]);
//! assert!(a.owns_data());
//! ```

use crate::fill::{
    CloneFrom, ConvertFrom, Fill, FillSequentially, FillWithClone, FillWithDefault,
    FromIterPrefix, MoveFrom, TryConvertFrom,
};
use crate::{Error, Ordinal};

use alloc::alloc::{self as heap, Layout};
use alloc::vec::Vec;
use core::borrow::{Borrow, BorrowMut};
use core::marker::PhantomData;
use core::mem::{self, MaybeUninit};
use core::ops::{Bound, Deref, DerefMut, RangeBounds};
use core::ptr::{self, NonNull};
use core::slice;

/// Smallest capacity allocated by amortized growth.
const MIN_NON_ZERO_CAP: usize = 4;

/// Who is responsible for the memory an [`Array`] points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Storage {
    /// No storage at all. Length and capacity are zero.
    Null,
    /// A heap buffer allocated by the array, freed when the array is released or dropped.
    Owning,
    /// Borrowed storage. The length is fixed and the elements are never dropped by the array.
    View,
}

#[doc = crate::doc_macro::diagram_doc!(
/// A contiguous sequence of `T` whose length and positions are of index type `X`.
///
/// An `Array` is in one of three [`Storage`] states:
///
/// ```svgbob
///  "Null"              "Owning"                            "View"
/// +-----+---+---+     +-----+---+---+                     +-----+---+---+
/// | ptr | 0 | 0 |     | ptr | 2 | 4 |                     | ptr | 3 | 3 |
/// +-----+---+---+     +-----+---+---+                     +-----+---+---+
///                        |                                   |
///                        v "heap buffer"                     v "someone else's storage"
///                     +-----+-----+-----+-----+           +-----+-----+-----+
///                     | "a" | "b" |     |     |           | "x" | "y" | "z" |
///                     +-----+-----+-----+-----+           +-----+-----+-----+
/// ```
///
/// The header holds a pointer plus a length and capacity of type `X`, so a narrow index type
/// gives a smaller header and a hard bound on the length. Every operation that could push
/// the length past `X::MAX_SIZE` reports [`Error::CapacityExceeded`] instead.
///
/// A view borrows its storage for `'a`. It can read and overwrite elements in place, but any
/// operation that would change its length fails with [`Error::ViewNotResizable`].
///
/// # Examples
///
/// ```
/// use ixarray::Array;
///
/// let mut backing = vec![1, 2, 3, 4];
/// {
///     let mut view: Array<i32, u8> = Array::share(&mut backing[1..]).unwrap();
///     view[0] = 20;
///     assert!(view.try_push(5).is_err());
/// }
/// assert_eq!(backing, [1, 20, 3, 4]);
/// ```
)]
pub struct Array<'a, T, X: Ordinal = usize> {
    ptr: NonNull<T>,
    len: X,
    cap: X,
    storage: Storage,
    marker: PhantomData<(T, fn(T) -> T, &'a mut ())>,
}

// Safety: an owning array behaves like `Vec<T>`, a view like `&'a mut [T]`.
unsafe impl<'a, T: Send, X: Ordinal + Send> Send for Array<'a, T, X> {}
unsafe impl<'a, T: Sync, X: Ordinal + Sync> Sync for Array<'a, T, X> {}

#[inline(never)]
#[cold]
fn fail(e: Error) -> ! {
    panic!("{}", e)
}

#[inline(never)]
#[cold]
fn ordinal_overflow() -> ! {
    panic!("Length does not fit the index type")
}

/// Converts a length already known to be within `X::MAX_SIZE`.
#[inline(always)]
fn to_ordinal<X: Ordinal>(n: usize) -> X {
    X::from_usize(n).unwrap_or_else(|| ordinal_overflow())
}

#[inline]
fn checked_ordinal<X: Ordinal>(n: usize) -> Result<X, Error> {
    X::from_usize(n).ok_or_else(|| Error::capacity_exceeded::<X>(n))
}

unsafe fn raw_alloc<T>(layout: Layout) -> NonNull<T> {
    if layout.size() == 0 {
        return NonNull::dangling();
    }
    match NonNull::new(heap::alloc(layout)) {
        Some(p) => p.cast(),
        None => heap::handle_alloc_error(layout),
    }
}

unsafe fn raw_realloc<T>(ptr: NonNull<T>, old: Layout, new: Layout) -> NonNull<T> {
    if old.size() == 0 {
        return raw_alloc(new);
    }
    match NonNull::new(heap::realloc(ptr.as_ptr().cast(), old, new.size())) {
        Some(p) => p.cast(),
        None => heap::handle_alloc_error(new),
    }
}

unsafe fn raw_dealloc<T>(ptr: NonNull<T>, layout: Layout) {
    if layout.size() != 0 {
        heap::dealloc(ptr.as_ptr().cast(), layout);
    }
}

/// Drops `len` elements starting at `first`, last one first.
unsafe fn drop_reversed<T>(first: *mut T, len: usize) {
    if mem::needs_drop::<T>() {
        for i in (0..len).rev() {
            ptr::drop_in_place(first.add(i));
        }
    }
}

/// A reserved, uninitialized slot at the end of an [`Array`].
///
/// Returned by [`Array::raw_push_back`]. The array's length grows only once the slot is filled;
/// dropping the guard without filling it leaves the array as it was.
///
/// ```
/// use ixarray::Array;
///
/// let mut a: Array<u64, u8> = Array::new();
/// let slot = a.raw_push_back().unwrap();
/// *slot.write(41) += 1;
/// assert_eq!(a, [42]);
///
/// drop(a.raw_push_back().unwrap());
/// assert_eq!(a.len(), 1);
/// ```
pub struct RawSlot<'s, T, X: Ordinal> {
    slot: &'s mut MaybeUninit<T>,
    len: &'s mut X,
}

impl<'s, T, X: Ordinal> RawSlot<'s, T, X> {
    /// Pointer to the uninitialized slot, for constructing the element in place.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.slot.as_mut_ptr()
    }

    /// Moves `value` into the slot and makes it part of the array.
    pub fn write(self, value: T) -> &'s mut T {
        let RawSlot { slot, len } = self;
        *len = len.increment().unwrap_or_else(|| ordinal_overflow());
        MaybeUninit::write(slot, value)
    }

    /// Makes the slot part of the array after it was initialized through [`as_mut_ptr`](Self::as_mut_ptr).
    ///
    /// # Safety
    ///
    /// The slot must hold a fully initialized `T`.
    pub unsafe fn assume_init(self) -> &'s mut T {
        let RawSlot { slot, len } = self;
        *len = len.increment().unwrap_or_else(|| ordinal_overflow());
        MaybeUninit::assume_init_mut(slot)
    }
}

impl<'a, T, X: Ordinal> Array<'a, T, X> {
    /// Creates a null array. Does not allocate.
    ///
    /// ```
    /// use ixarray::Array;
    /// let a: Array<String, u8> = Array::new();
    /// assert!(a.is_null() && a.is_empty());
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Array {
            ptr: NonNull::dangling(),
            len: X::ZERO,
            cap: X::ZERO,
            storage: Storage::Null,
            marker: PhantomData,
        }
    }

    /// Wraps borrowed storage of `len` elements. Callers bound the lifetime.
    pub(crate) unsafe fn from_raw_view(ptr: NonNull<T>, len: X) -> Self {
        Array {
            ptr,
            len,
            cap: len,
            storage: Storage::View,
            marker: PhantomData,
        }
    }

    /// Creates an empty array with room for exactly `capacity` elements.
    ///
    /// A capacity of zero yields a null array.
    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        let mut a = Self::new();
        a.reserve_exact(capacity)?;
        Ok(a)
    }

    /// Creates an array of `len` default values.
    pub fn with_len(len: usize) -> Result<Self, Error>
    where
        T: Default,
    {
        Self::from_fill(len, FillWithDefault)
    }

    /// Creates an array of `len` clones of `value`.
    pub fn from_elem(len: usize, value: &T) -> Result<Self, Error>
    where
        T: Clone,
    {
        Self::from_fill(len, FillWithClone(value))
    }

    /// Creates an owning copy of `src`.
    ///
    /// ```
    /// use ixarray::{Array, Error};
    /// let a: Array<u8, u8> = Array::from_slice(b"abc").unwrap();
    /// assert_eq!(a, *b"abc");
    /// assert!(matches!(
    ///     Array::<u8, u8>::from_slice(&[0; 256]),
    ///     Err(Error::CapacityExceeded { requested: 256, max: 255, .. })
    /// ));
    /// ```
    pub fn from_slice(src: &[T]) -> Result<Self, Error>
    where
        T: Clone,
    {
        Self::from_fill(src.len(), CloneFrom(src))
    }

    /// Creates an array by converting each element of `src` with `T::from`.
    pub fn from_converted<U: Clone>(src: &[U]) -> Result<Self, Error>
    where
        T: From<U>,
    {
        Self::from_fill(src.len(), ConvertFrom(src))
    }

    /// Creates an array by converting each element of another array, whatever its index type.
    ///
    /// ```
    /// use ixarray::Array;
    /// let narrow: Array<u8, u8> = Array::from_slice(&[1, 2]).unwrap();
    /// let wide: Array<u64, u32> = Array::from_array_converted(&narrow).unwrap();
    /// assert_eq!(wide, [1u64, 2]);
    /// ```
    pub fn from_array_converted<U: Clone, Y: Ordinal>(src: &Array<'_, U, Y>) -> Result<Self, Error>
    where
        T: From<U>,
    {
        Self::from_converted(src.as_slice())
    }

    /// Creates an array by converting each element of `src` with `T::try_from`, which may narrow.
    ///
    /// Fails with [`Error::ConversionFailed`] at the first element that does not convert;
    /// the elements converted before it are dropped.
    ///
    /// ```
    /// use ixarray::{Array, Error};
    ///
    /// let a: Array<u8, u8> = Array::try_from_converted(&[5i32, 3, 27]).unwrap();
    /// assert_eq!(a, [5, 3, 27]);
    /// assert_eq!(
    ///     Array::<u8, u8>::try_from_converted(&[5i32, 3, -2]),
    ///     Err(Error::ConversionFailed { position: 2 })
    /// );
    /// ```
    pub fn try_from_converted<U: Clone>(src: &[U]) -> Result<Self, Error>
    where
        T: TryFrom<U>,
    {
        let mut a = Self::with_capacity(src.len())?;
        let converted = a.extend_from_fill(src.len(), TryConvertFrom(src))?;
        if converted < src.len() {
            return Err(Error::ConversionFailed { position: converted });
        }
        Ok(a)
    }

    /// Creates an array by converting each element of another array with `T::try_from`,
    /// whatever its index type.
    pub fn try_from_array_converted<U: Clone, Y: Ordinal>(src: &Array<'_, U, Y>) -> Result<Self, Error>
    where
        T: TryFrom<U>,
    {
        Self::try_from_converted(src.as_slice())
    }

    /// Creates an array of `len` elements where element `i` is `f(i)`.
    pub fn from_fn(len: usize, f: impl FnMut(usize) -> T) -> Result<Self, Error> {
        Self::from_fill(len, FillSequentially(f))
    }

    /// Creates an array of `len` elements constructed by `fill`.
    ///
    /// Fails with [`Error::InvalidRange`] if `fill` stops short of `len`.
    pub fn from_fill(len: usize, fill: impl Fill<T>) -> Result<Self, Error> {
        let mut a = Self::with_capacity(len)?;
        if a.extend_from_fill(len, fill)? < len {
            return Err(Error::InvalidRange {
                reason: "source ended before the requested length",
            });
        }
        Ok(a)
    }

    /// Collects an iterator, reporting overflow of the index type instead of panicking.
    ///
    /// An iterator with an exact size hint is measured once, and its elements are constructed
    /// straight into a buffer of that size.
    ///
    /// ```
    /// use ixarray::Array;
    /// let a: Array<u32, u8> = Array::try_from_iter(0..10).unwrap();
    /// assert_eq!(a.capacity(), 10);
    /// assert!(Array::<u32, u8>::try_from_iter(0..1000).is_err());
    /// ```
    pub fn try_from_iter<I: IntoIterator<Item = T>>(iter: I) -> Result<Self, Error> {
        let mut iter = iter.into_iter();
        let mut a = Self::new();
        match iter.size_hint() {
            (lower, Some(upper)) if lower == upper => {
                a.reserve_exact(lower)?;
                if a.extend_from_fill(lower, FromIterPrefix(iter.by_ref()))? < lower {
                    return Err(Error::InvalidRange {
                        reason: "iterator ended before its exact size hint",
                    });
                }
            }
            (lower, _) => a.reserve(lower)?,
        }
        a.try_extend(iter)?;
        Ok(a)
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len.as_usize()
    }

    /// Number of elements, as the index type.
    #[inline]
    pub fn ordinal_len(&self) -> X {
        self.len
    }

    /// Position of the last element, or `None` if empty.
    #[inline]
    pub fn last_index(&self) -> Option<X> {
        self.len.decrement()
    }

    /// Whether there are no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of elements the current storage can hold without reallocating.
    ///
    /// Always equals [`len`](Self::len) for a view.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap.as_usize()
    }

    /// The largest length the index type allows.
    #[inline]
    pub fn max_size(&self) -> usize {
        X::MAX_SIZE
    }

    /// The current storage state.
    #[inline]
    pub fn storage(&self) -> Storage {
        self.storage
    }

    /// Whether the array owns a heap buffer.
    #[inline]
    pub fn owns_data(&self) -> bool {
        self.storage == Storage::Owning
    }

    /// Whether the array views borrowed storage.
    #[inline]
    pub fn is_view(&self) -> bool {
        self.storage == Storage::View
    }

    /// Whether the array has no storage.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.storage == Storage::Null
    }

    /// The elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len()) }
    }

    /// The elements as a mutable slice. Views can be written through, too.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len()) }
    }

    /// Raw pointer to the first element. Dangling when the array is null.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Mutable raw pointer to the first element. Dangling when the array is null.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// The uninitialized slots between the length and the capacity.
    pub fn spare_capacity_mut(&mut self) -> &mut [MaybeUninit<T>] {
        let len = self.len();
        unsafe {
            slice::from_raw_parts_mut(
                self.ptr.as_ptr().add(len).cast::<MaybeUninit<T>>(),
                self.capacity() - len,
            )
        }
    }

    /// Sets the length without touching the elements.
    ///
    /// # Safety
    ///
    /// `new_len <= capacity()`, and the first `new_len` slots are initialized. For a view,
    /// `new_len` must equal the current length.
    pub unsafe fn set_len(&mut self, new_len: usize) {
        debug_assert!(new_len <= self.capacity());
        self.len = to_ordinal(new_len);
    }

    /// Bounds-checked access by position.
    ///
    /// ```
    /// use ixarray::{Array, Error};
    /// let a: Array<char, u8> = Array::from_slice(&['a', 'b']).unwrap();
    /// assert_eq!(a.at(1), Ok(&'b'));
    /// assert_eq!(a.at(2), Err(Error::OutOfRange { start: 2, end: 3, len: 2 }));
    /// ```
    pub fn at(&self, index: X) -> Result<&T, Error> {
        let i = index.as_usize();
        let len = self.len();
        self.as_slice()
            .get(i)
            .ok_or_else(|| Error::out_of_range(i, i.saturating_add(1), len))
    }

    /// Bounds-checked mutable access by position.
    pub fn at_mut(&mut self, index: X) -> Result<&mut T, Error> {
        let i = index.as_usize();
        let len = self.len();
        self.as_mut_slice()
            .get_mut(i)
            .ok_or_else(|| Error::out_of_range(i, i.saturating_add(1), len))
    }

    /// Access by position without a bounds check.
    ///
    /// # Safety
    ///
    /// `index < ordinal_len()`.
    #[inline]
    pub unsafe fn get_unchecked_at(&self, index: X) -> &T {
        debug_assert!(index < self.len);
        &*self.ptr.as_ptr().add(index.as_usize())
    }

    /// Mutable access by position without a bounds check.
    ///
    /// # Safety
    ///
    /// `index < ordinal_len()`.
    #[inline]
    pub unsafe fn get_unchecked_at_mut(&mut self, index: X) -> &mut T {
        debug_assert!(index < self.len);
        &mut *self.ptr.as_ptr().add(index.as_usize())
    }

    #[inline]
    fn current_layout(&self) -> Layout {
        // Safety: the same layout was validated when the buffer was allocated.
        unsafe {
            Layout::from_size_align_unchecked(
                mem::size_of::<T>() * self.capacity(),
                mem::align_of::<T>(),
            )
        }
    }

    pub(crate) fn ensure_resizable(&self, operation: &'static str) -> Result<(), Error> {
        if self.storage == Storage::View {
            return Err(Error::ViewNotResizable { operation });
        }
        Ok(())
    }

    /// Makes room for at least `additional` more elements, growing geometrically.
    ///
    /// On a view this only succeeds when no growth is needed.
    pub fn reserve(&mut self, additional: usize) -> Result<(), Error> {
        self.grow_for(additional, false)
    }

    /// Makes room for exactly `additional` more elements.
    pub fn reserve_exact(&mut self, additional: usize) -> Result<(), Error> {
        self.grow_for(additional, true)
    }

    fn grow_for(&mut self, additional: usize, exact: bool) -> Result<(), Error> {
        let required = self
            .len()
            .checked_add(additional)
            .ok_or_else(|| Error::capacity_exceeded::<X>(usize::MAX))?;
        if required <= self.capacity() {
            return Ok(());
        }
        self.ensure_resizable("grow")?;
        if required > X::MAX_SIZE {
            return Err(Error::capacity_exceeded::<X>(required));
        }
        let new_cap = if exact {
            required
        } else {
            required
                .max(self.capacity().saturating_mul(2))
                .max(MIN_NON_ZERO_CAP)
                .min(X::MAX_SIZE)
        };
        self.reallocate(new_cap)
    }

    /// Moves the elements into a buffer of `new_cap` slots. Never called on views.
    fn reallocate(&mut self, new_cap: usize) -> Result<(), Error> {
        debug_assert!(new_cap >= self.len() && new_cap > 0);
        let cap = checked_ordinal::<X>(new_cap)?;
        let layout = Layout::array::<T>(new_cap).map_err(|_| Error::capacity_exceeded::<X>(new_cap))?;
        let ptr = unsafe {
            match self.storage {
                Storage::Owning => raw_realloc(self.ptr, self.current_layout(), layout),
                _ => raw_alloc(layout),
            }
        };
        log::trace!(
            "ixarray: buffer of `{}` resized {} -> {} ({} bytes each)",
            X::NAME,
            self.capacity(),
            new_cap,
            mem::size_of::<T>()
        );
        self.ptr = ptr;
        self.cap = cap;
        self.storage = Storage::Owning;
        Ok(())
    }

    /// Shrinks an owning buffer to the current length. An empty owning array becomes null.
    pub fn shrink_to_fit(&mut self) {
        if self.storage != Storage::Owning || self.capacity() == self.len() {
            return;
        }
        if self.is_empty() {
            self.release();
        } else if let Err(e) = self.reallocate(self.len()) {
            fail(e)
        }
    }

    /// Drops owned elements and frees the buffer, or detaches from viewed storage.
    /// Afterwards the array is null.
    ///
    /// ```
    /// use ixarray::Array;
    /// let mut backing = [1, 2];
    /// let mut view: Array<i32> = Array::share(&mut backing[..]).unwrap();
    /// view.release();
    /// assert!(view.is_null());
    /// drop(view);
    /// assert_eq!(backing, [1, 2]);
    /// ```
    pub fn release(&mut self) {
        match self.storage {
            Storage::Null => return,
            Storage::View => log::trace!("ixarray: detached view of {} elements", self.len()),
            Storage::Owning => unsafe {
                let len = self.len();
                let layout = self.current_layout();
                self.len = X::ZERO;
                drop_reversed(self.ptr.as_ptr(), len);
                raw_dealloc(self.ptr, layout);
                log::trace!("ixarray: freed buffer of {} bytes", layout.size());
            },
        }
        self.ptr = NonNull::dangling();
        self.len = X::ZERO;
        self.cap = X::ZERO;
        self.storage = Storage::Null;
    }

    /// Appends an element, panicking if the array cannot grow.
    ///
    /// Use [`try_push`](Self::try_push) to handle views and full index types.
    #[inline]
    pub fn push(&mut self, value: T) {
        if let Err(e) = self.try_push(value) {
            fail(e)
        }
    }

    /// Appends an element.
    #[inline]
    pub fn try_push(&mut self, value: T) -> Result<(), Error> {
        self.raw_push_back()?.write(value);
        Ok(())
    }

    /// Reserves one slot at the end and hands it out uninitialized.
    pub fn raw_push_back(&mut self) -> Result<RawSlot<'_, T, X>, Error> {
        self.grow_for(1, false)?;
        let len = self.len();
        let base = self.ptr;
        Ok(RawSlot {
            slot: unsafe { &mut *base.as_ptr().add(len).cast::<MaybeUninit<T>>() },
            len: &mut self.len,
        })
    }

    /// Removes and returns the last element, or `None` if empty.
    pub fn pop(&mut self) -> Result<Option<T>, Error> {
        if self.is_empty() {
            return Ok(None);
        }
        self.ensure_resizable("shrink")?;
        let last = self.len() - 1;
        self.len = to_ordinal(last);
        Ok(Some(unsafe { ptr::read(self.ptr.as_ptr().add(last)) }))
    }

    /// Inserts an element at `index`, shifting later elements up. Panics on failure.
    pub fn insert(&mut self, index: usize, value: T) {
        if let Err(e) = self.try_insert(index, value) {
            fail(e)
        }
    }

    /// Inserts an element at `index`, shifting later elements up.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), Error> {
        self.insert_fill(index, 1, MoveFrom([value])).map(drop)
    }

    /// Inserts `n` clones of `value` at `index`.
    pub fn insert_n(&mut self, index: usize, n: usize, value: &T) -> Result<(), Error>
    where
        T: Clone,
    {
        self.insert_fill(index, n, FillWithClone(value)).map(drop)
    }

    /// Inserts clones of `src` at `index`.
    ///
    /// ```
    /// use ixarray::Array;
    /// let mut a: Array<i32, u8> = Array::from_slice(&[1, 5]).unwrap();
    /// a.insert_from_slice(1, &[2, 3, 4]).unwrap();
    /// assert_eq!(a, [1, 2, 3, 4, 5]);
    /// assert!(a.insert_from_slice(9, &[0]).is_err());
    /// ```
    pub fn insert_from_slice(&mut self, index: usize, src: &[T]) -> Result<(), Error>
    where
        T: Clone,
    {
        self.insert_fill(index, src.len(), CloneFrom(src)).map(drop)
    }

    /// Appends clones of `src`.
    pub fn extend_from_slice(&mut self, src: &[T]) -> Result<(), Error>
    where
        T: Clone,
    {
        self.insert_from_slice(self.len(), src)
    }

    /// Appends up to `additional` elements constructed by `fill`, returning how many were added.
    pub fn extend_from_fill(&mut self, additional: usize, fill: impl Fill<T>) -> Result<usize, Error> {
        self.insert_fill(self.len(), additional, fill)
    }

    /// Appends every element of `iter`, stopping at the first failure.
    ///
    /// An iterator of exact size that would overflow the index type is refused before
    /// anything is appended. Otherwise elements appended before the failure stay in the array.
    ///
    /// ```
    /// use ixarray::Array;
    /// let mut a: Array<u32, u8> = Array::from_slice(&[1, 2]).unwrap();
    /// assert!(a.try_extend(0..300).is_err());
    /// assert_eq!(a, [1, 2]);
    /// a.try_extend(3..5).unwrap();
    /// assert_eq!(a, [1, 2, 3, 4]);
    /// ```
    pub fn try_extend<I: IntoIterator<Item = T>>(&mut self, iter: I) -> Result<(), Error> {
        let iter = iter.into_iter();
        let (lower, upper) = iter.size_hint();
        if upper == Some(lower) && lower > X::MAX_SIZE - self.len() {
            return Err(Error::capacity_exceeded::<X>(self.len().saturating_add(lower)));
        }
        if lower > 0 {
            self.reserve(lower.min(X::MAX_SIZE - self.len()))?;
        }
        for value in iter {
            self.try_push(value)?;
        }
        Ok(())
    }

    /// Opens a gap of `n` slots at `index` and lets `fill` construct into it.
    ///
    /// Slots `fill` leaves untouched are closed up again. Returns the number constructed.
    pub(crate) fn insert_fill(&mut self, index: usize, n: usize, fill: impl Fill<T>) -> Result<usize, Error> {
        let len = self.len();
        if index > len {
            return Err(Error::out_of_range(index, index, len));
        }
        if n == 0 {
            return Ok(0);
        }
        self.reserve(n)?;
        unsafe {
            let base = self.ptr.as_ptr();
            // While the gap is open, the tail is outside the live range.
            self.len = to_ordinal(index);
            ptr::copy(base.add(index), base.add(index + n), len - index);
            let gap = slice::from_raw_parts_mut(base.add(index).cast::<MaybeUninit<T>>(), n);
            let filled = fill.fill(gap);
            debug_assert!(filled <= n);
            if filled < n {
                ptr::copy(base.add(index + n), base.add(index + filled), len - index);
            }
            self.len = to_ordinal(len + filled);
            Ok(filled)
        }
    }

    /// Removes and returns the element at `index`, shifting later elements down.
    pub fn remove(&mut self, index: usize) -> Result<T, Error> {
        let len = self.len();
        if index >= len {
            return Err(Error::out_of_range(index, index.saturating_add(1), len));
        }
        self.ensure_resizable("shrink")?;
        unsafe {
            let p = self.ptr.as_ptr().add(index);
            let value = ptr::read(p);
            ptr::copy(p.add(1), p, len - index - 1);
            self.len = to_ordinal(len - 1);
            Ok(value)
        }
    }

    /// Removes the elements in `range`, dropping them last to first.
    ///
    /// ```
    /// use ixarray::Array;
    /// let mut a: Array<i32, u8> = (0..6).collect();
    /// a.erase(1..3).unwrap();
    /// assert_eq!(a, [0, 3, 4, 5]);
    /// a.erase(2..).unwrap();
    /// assert_eq!(a, [0, 3]);
    /// assert!(a.erase(1..5).is_err());
    /// ```
    pub fn erase<R: RangeBounds<usize>>(&mut self, range: R) -> Result<(), Error> {
        let (start, end) = self.resolve_range(range)?;
        if start == end {
            return Ok(());
        }
        self.ensure_resizable("shrink")?;
        let len = self.len();
        unsafe {
            let base = self.ptr.as_ptr();
            self.len = to_ordinal(start);
            drop_reversed(base.add(start), end - start);
            ptr::copy(base.add(end), base.add(start), len - end);
            self.len = to_ordinal(len - (end - start));
        }
        Ok(())
    }

    fn resolve_range<R: RangeBounds<usize>>(&self, range: R) -> Result<(usize, usize), Error> {
        let len = self.len();
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => len,
        };
        if start > end || end > len {
            return Err(Error::out_of_range(start, end, len));
        }
        Ok((start, end))
    }

    /// Drops the elements past `len`, last one first. Does nothing if `len >= self.len()`.
    pub fn truncate(&mut self, len: usize) -> Result<(), Error> {
        let old = self.len();
        if len >= old {
            return Ok(());
        }
        self.ensure_resizable("shrink")?;
        unsafe {
            self.len = to_ordinal(len);
            drop_reversed(self.ptr.as_ptr().add(len), old - len);
        }
        Ok(())
    }

    /// Drops all elements, keeping the buffer.
    pub fn clear(&mut self) -> Result<(), Error> {
        self.truncate(0)
    }

    /// Grows with clones of `value` or truncates, so that the length becomes `new_len`.
    pub fn resize(&mut self, new_len: usize, value: T) -> Result<(), Error>
    where
        T: Clone,
    {
        let len = self.len();
        if new_len <= len {
            return self.truncate(new_len);
        }
        self.insert_fill(len, new_len - len, FillWithClone(&value)).map(drop)
    }

    /// Grows with values returned by `f` or truncates, so that the length becomes `new_len`.
    pub fn resize_with(&mut self, new_len: usize, mut f: impl FnMut() -> T) -> Result<(), Error> {
        let len = self.len();
        if new_len <= len {
            return self.truncate(new_len);
        }
        self.insert_fill(len, new_len - len, FillSequentially(|_| f()))
            .map(drop)
    }
}

impl<'a, T, X: Ordinal> Drop for Array<'a, T, X> {
    fn drop(&mut self) {
        self.release()
    }
}

impl<'a, T, X: Ordinal> Default for Array<'a, T, X> {
    fn default() -> Self {
        Self::new()
    }
}

/// Always produces an owning copy, even of a view.
impl<'a, T: Clone, X: Ordinal> Clone for Array<'a, T, X> {
    fn clone(&self) -> Self {
        Self::from_slice(self).unwrap_or_else(|e| fail(e))
    }
}

impl<'a, T, X: Ordinal> Deref for Array<'a, T, X> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<'a, T, X: Ordinal> DerefMut for Array<'a, T, X> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<'a, T, X: Ordinal> AsRef<[T]> for Array<'a, T, X> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<'a, T, X: Ordinal> AsMut<[T]> for Array<'a, T, X> {
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<'a, T, X: Ordinal> Borrow<[T]> for Array<'a, T, X> {
    fn borrow(&self) -> &[T] {
        self
    }
}

impl<'a, T, X: Ordinal> BorrowMut<[T]> for Array<'a, T, X> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<'s, 'a, T, X: Ordinal> IntoIterator for &'s Array<'a, T, X> {
    type Item = &'s T;
    type IntoIter = slice::Iter<'s, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'s, 'a, T, X: Ordinal> IntoIterator for &'s mut Array<'a, T, X> {
    type Item = &'s mut T;
    type IntoIter = slice::IterMut<'s, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Panics if the iterator yields more than `X::MAX_SIZE` elements; see [`Array::try_from_iter`].
impl<'a, T, X: Ordinal> FromIterator<T> for Array<'a, T, X> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::try_from_iter(iter).unwrap_or_else(|e| fail(e))
    }
}

/// Panics if the array cannot grow; see [`Array::try_extend`].
impl<'a, T, X: Ordinal> Extend<T> for Array<'a, T, X> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        if let Err(e) = self.try_extend(iter) {
            fail(e)
        }
    }
}

impl<'a, 'b, T: Copy + 'b, X: Ordinal> Extend<&'b T> for Array<'a, T, X> {
    fn extend<I: IntoIterator<Item = &'b T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

impl<'a, T, X: Ordinal> TryFrom<Vec<T>> for Array<'a, T, X> {
    type Error = Error;

    fn try_from(v: Vec<T>) -> Result<Self, Error> {
        let len = v.len();
        Self::from_fill(len, FromIterPrefix(v.into_iter()))
    }
}

impl<'a, 's, T: Clone, X: Ordinal> TryFrom<&'s [T]> for Array<'a, T, X> {
    type Error = Error;

    fn try_from(src: &'s [T]) -> Result<Self, Error> {
        Self::from_slice(src)
    }
}

impl<'a, T, X: Ordinal, const N: usize> TryFrom<[T; N]> for Array<'a, T, X> {
    type Error = Error;

    fn try_from(src: [T; N]) -> Result<Self, Error> {
        Self::from_fill(N, MoveFrom(src))
    }
}
