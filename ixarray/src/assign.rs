//! Whole-sequence assignment.
//!
//! What an assignment does depends on the destination's [`Storage`]:
//!
//! | destination | empty source | non-empty source of length `n` |
//! |-------------|--------------|---------------------------------|
//! | null        | stays null   | becomes an owning copy          |
//! | owning      | becomes null | elements overwritten in place, then extended or truncated to `n` |
//! | view        | becomes null (elements untouched) | elements overwritten in place; `n` must equal the view's length |
//!
//! Overwriting reuses existing elements through `clone_from`, so an owning `String` array
//! keeps its string buffers where it can. A view on the right side is read like any other
//! slice; the destination never starts aliasing it.

use crate::fill::{CloneFrom, ConvertFrom, FillWithClone, FromIterPrefix};
use crate::{Array, Error, Ordinal, Storage};

use alloc::vec::Vec;

enum Plan {
    /// Drop or detach everything; the result is null.
    Release,
    /// Build a fresh owning array.
    Adopt,
    /// Overwrite the first `min(len, n)` elements, then grow or shrink to `n`.
    Overwrite,
}

impl<'a, T, X: Ordinal> Array<'a, T, X> {
    /// Decides how to assign `n` elements, failing before anything is modified.
    fn plan_assignment(&mut self, n: usize) -> Result<Plan, Error> {
        if n == 0 {
            return Ok(Plan::Release);
        }
        match self.storage() {
            Storage::Null => Ok(Plan::Adopt),
            Storage::View if n != self.len() => Err(Error::IncompatibleAssignment {
                len: self.len(),
                src_len: n,
            }),
            Storage::View => Ok(Plan::Overwrite),
            Storage::Owning => {
                if n > X::MAX_SIZE {
                    return Err(Error::capacity_exceeded::<X>(n));
                }
                self.reserve_exact(n.saturating_sub(self.len()))?;
                Ok(Plan::Overwrite)
            }
        }
    }

    /// Replaces the contents with clones of `src`.
    ///
    /// ```
    /// use ixarray::Array;
    ///
    /// let mut a: Array<String, u8> = Array::new();
    /// a.assign(&["x".to_string(), "y".to_string()]).unwrap();
    /// assert!(a.owns_data());
    /// a.assign(&[]).unwrap();
    /// assert!(a.is_null());
    /// ```
    pub fn assign(&mut self, src: &[T]) -> Result<(), Error>
    where
        T: Clone,
    {
        match self.plan_assignment(src.len())? {
            Plan::Release => self.release(),
            Plan::Adopt => *self = Self::from_slice(src)?,
            Plan::Overwrite => {
                let len = self.len();
                for (dst, s) in self.iter_mut().zip(src) {
                    dst.clone_from(s);
                }
                if src.len() > len {
                    self.insert_fill(len, src.len() - len, CloneFrom(&src[len..]))?;
                } else {
                    self.truncate(src.len())?;
                }
            }
        }
        Ok(())
    }

    /// Replaces the contents with the contents of another array, whatever its index type.
    pub fn assign_from<Y: Ordinal>(&mut self, src: &Array<'_, T, Y>) -> Result<(), Error>
    where
        T: Clone,
    {
        self.assign(src.as_slice())
    }

    /// Replaces the contents by converting each element of `src` with `T::from`.
    ///
    /// ```
    /// use ixarray::Array;
    ///
    /// let mut a: Array<f64, u8> = Array::from_slice(&[0.5]).unwrap();
    /// a.assign_converted(&[1u8, 2, 3]).unwrap();
    /// assert_eq!(a, [1.0, 2.0, 3.0]);
    /// ```
    pub fn assign_converted<U: Clone>(&mut self, src: &[U]) -> Result<(), Error>
    where
        T: From<U>,
    {
        match self.plan_assignment(src.len())? {
            Plan::Release => self.release(),
            Plan::Adopt => *self = Self::from_converted(src)?,
            Plan::Overwrite => {
                let len = self.len();
                for (dst, s) in self.iter_mut().zip(src) {
                    *dst = T::from(s.clone());
                }
                if src.len() > len {
                    self.insert_fill(len, src.len() - len, ConvertFrom(&src[len..]))?;
                } else {
                    self.truncate(src.len())?;
                }
            }
        }
        Ok(())
    }

    /// Replaces the contents by converting each element of `src` with `T::try_from`.
    ///
    /// Every element is converted before anything is replaced, so a failed conversion
    /// reports [`Error::ConversionFailed`] and leaves the contents as they were.
    ///
    /// ```
    /// use ixarray::{Array, Error};
    ///
    /// let mut a: Array<u16, i8> = Array::from_slice(&[1, 2]).unwrap();
    /// assert_eq!(
    ///     a.try_assign_converted(&[7i32, 77777]),
    ///     Err(Error::ConversionFailed { position: 1 })
    /// );
    /// assert_eq!(a, [1, 2]);
    /// a.try_assign_converted(&[7i32, 77, 777]).unwrap();
    /// assert_eq!(a, [7, 77, 777]);
    /// ```
    pub fn try_assign_converted<U: Clone>(&mut self, src: &[U]) -> Result<(), Error>
    where
        T: TryFrom<U>,
    {
        match self.plan_assignment(src.len())? {
            Plan::Release => self.release(),
            Plan::Adopt => *self = Self::try_from_converted(src)?,
            Plan::Overwrite => {
                let converted = src
                    .iter()
                    .enumerate()
                    .map(|(position, s)| {
                        T::try_from(s.clone()).map_err(|_| Error::ConversionFailed { position })
                    })
                    .collect::<Result<Vec<T>, Error>>()?;
                let len = self.len();
                let mut converted = converted.into_iter();
                for (dst, t) in self.iter_mut().zip(&mut converted) {
                    *dst = t;
                }
                if src.len() > len {
                    self.insert_fill(len, src.len() - len, FromIterPrefix(converted))?;
                } else {
                    self.truncate(src.len())?;
                }
            }
        }
        Ok(())
    }

    /// Replaces the contents with `n` clones of `value`.
    pub fn assign_elem(&mut self, n: usize, value: &T) -> Result<(), Error>
    where
        T: Clone,
    {
        match self.plan_assignment(n)? {
            Plan::Release => self.release(),
            Plan::Adopt => *self = Self::from_elem(n, value)?,
            Plan::Overwrite => {
                let len = self.len();
                for dst in self.iter_mut().take(n) {
                    dst.clone_from(value);
                }
                if n > len {
                    self.insert_fill(len, n - len, FillWithClone(value))?;
                } else {
                    self.truncate(n)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Array, Error, Storage};
    use alloc::string::{String, ToString};
    use alloc::vec;

    fn strings(items: &[&str]) -> alloc::vec::Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn owning_destination_grows_and_shrinks() {
        let mut a: Array<String, u8> = Array::from_slice(&strings(&["a"])).unwrap();
        a.assign(&strings(&["b", "c", "d"])).unwrap();
        assert_eq!(a, ["b", "c", "d"]);
        a.assign(&strings(&["e"])).unwrap();
        assert_eq!(a, ["e"]);
        assert!(a.owns_data());
    }

    #[test]
    fn owning_destination_checks_capacity_first() {
        let mut a: Array<u8, u8> = Array::from_slice(&[1, 2]).unwrap();
        let big = vec![0u8; 256];
        assert!(matches!(a.assign(&big), Err(Error::CapacityExceeded { .. })));
        assert_eq!(a, [1, 2]);
    }

    #[test]
    fn view_destination_overwrites_in_place() {
        let mut backing = [1, 2, 3];
        {
            let mut v: Array<i32, u8> = Array::share(&mut backing[..]).unwrap();
            v.assign(&[4, 5, 6]).unwrap();
            assert_eq!(
                v.assign_elem(2, &0),
                Err(Error::IncompatibleAssignment { len: 3, src_len: 2 })
            );
            assert!(v.is_view());
        }
        assert_eq!(backing, [4, 5, 6]);
    }

    #[test]
    fn empty_source_releases() {
        let mut backing = [1, 2];
        let mut v: Array<i32> = Array::share(&mut backing[..]).unwrap();
        v.assign(&[]).unwrap();
        assert_eq!(v.storage(), Storage::Null);
        drop(v);
        assert_eq!(backing, [1, 2]);

        let mut a: Array<i32> = Array::from_elem(3, &1).unwrap();
        a.assign_elem(0, &9).unwrap();
        assert!(a.is_null());
    }

    #[test]
    fn view_source_is_copied_not_aliased() {
        let mut backing = [1, 2, 3];
        let mut v: Array<i32, u8> = Array::share(&mut backing[..]).unwrap();

        let mut from_null: Array<i32, u16> = Array::new();
        from_null.assign_from(&v).unwrap();
        let mut from_owning: Array<i32> = Array::from_elem(5, &0).unwrap();
        from_owning.assign_from(&v).unwrap();
        assert!(from_null.owns_data() && from_owning.owns_data());
        assert_eq!(from_null, v);
        assert_eq!(from_owning, v);

        v[0] = 100;
        assert_eq!(from_null, [1, 2, 3]);
        assert_eq!(from_owning, [1, 2, 3]);
        assert!(v.is_view());
    }

    #[test]
    fn failed_narrowing_assignment_keeps_contents() {
        let mut backing: [u8; 3] = [1, 2, 3];
        {
            let mut v: Array<u8, u8> = Array::share(&mut backing[..]).unwrap();
            assert_eq!(
                v.try_assign_converted(&[4i32, 5, 256]),
                Err(Error::ConversionFailed { position: 2 })
            );
            assert_eq!(v, [1, 2, 3]);
            v.try_assign_converted(&[4i32, 5, 6]).unwrap();
        }
        assert_eq!(backing, [4, 5, 6]);

        let mut a: Array<u8, u8> = Array::new();
        assert_eq!(
            a.try_assign_converted(&[-1i16]),
            Err(Error::ConversionFailed { position: 0 })
        );
        assert!(a.is_null());
        a.try_assign_converted(&[9i16, 8]).unwrap();
        a.try_assign_converted(&[7i16]).unwrap();
        assert_eq!(a, [7]);
    }

    #[test]
    fn assign_elem_and_converted() {
        let mut a: Array<i64, u16> = Array::new();
        a.assign_elem(3, &7).unwrap();
        assert_eq!(a, [7, 7, 7]);
        a.assign_converted(&[1i32, -1]).unwrap();
        assert_eq!(a, [1, -1]);
        let other: Array<i64, u8> = Array::from_slice(&[5]).unwrap();
        a.assign_from(&other).unwrap();
        assert_eq!(a, other);
    }
}
