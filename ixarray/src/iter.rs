#![warn(missing_docs)]

//! Iteration by position.
//!
//! Slice iterators cover element access; [`Indices`] adds positions typed as the array's
//! index type, so loops over a `Array<T, MyIx>` produce `MyIx` values.
//!
//! ```
//! use ixarray::Array;
//!
//! let a: Array<char, u8> = Array::from_slice(&['a', 'b', 'c']).unwrap();
//! let backwards: String = a.indices().rev().map(|i| *a.at(i).unwrap()).collect();
//! assert_eq!(backwards, "cba");
//! for (i, c) in a.iter_indexed() {
//!     assert_eq!(a.at(i), Ok(c));
//! }
//! ```

use crate::{Array, Ordinal};

use core::iter::{FusedIterator, Zip};
use core::slice;

/// The positions `start..end` of an array, as values of its index type.
#[derive(Clone, Debug)]
pub struct Indices<X: Ordinal> {
    front: X,
    back: X,
}

impl<X: Ordinal> Indices<X> {
    /// All positions below `end`.
    pub fn up_to(end: X) -> Self {
        Indices {
            front: X::ZERO,
            back: end,
        }
    }
}

impl<X: Ordinal> Iterator for Indices<X> {
    type Item = X;

    #[inline]
    fn next(&mut self) -> Option<X> {
        if self.front >= self.back {
            return None;
        }
        let i = self.front;
        self.front = i.increment().unwrap_or(self.back);
        Some(i)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back.as_usize().saturating_sub(self.front.as_usize());
        (n, Some(n))
    }
}

impl<X: Ordinal> DoubleEndedIterator for Indices<X> {
    #[inline]
    fn next_back(&mut self) -> Option<X> {
        if self.front >= self.back {
            return None;
        }
        self.back = self.back.decrement().unwrap_or(self.front);
        Some(self.back)
    }
}

impl<X: Ordinal> ExactSizeIterator for Indices<X> {}

impl<X: Ordinal> FusedIterator for Indices<X> {}

impl<'a, T, X: Ordinal> Array<'a, T, X> {
    /// Iterates over all valid positions, in order.
    pub fn indices(&self) -> Indices<X> {
        Indices::up_to(self.ordinal_len())
    }

    /// Iterates over `(position, &element)` pairs.
    pub fn iter_indexed(&self) -> Zip<Indices<X>, slice::Iter<'_, T>> {
        self.indices().zip(self.iter())
    }

    /// Iterates over `(position, &mut element)` pairs.
    pub fn iter_indexed_mut(&mut self) -> Zip<Indices<X>, slice::IterMut<'_, T>> {
        self.indices().zip(self.iter_mut())
    }
}
