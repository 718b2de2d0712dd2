//! Comparison, hashing and formatting for [`Array`].
//!
//! Arrays compare element-wise and lexicographically, like slices. Equality works across
//! index types and across element types that compare with each other, and against slices,
//! fixed-size arrays and `Vec`s. Storage state and capacity never take part.
//!
//! ```
//! use ixarray::Array;
//!
//! let narrow: Array<i32, u8> = Array::from_slice(&[1, 2, 3]).unwrap();
//! let wide: Array<i32> = Array::from_slice(&[1, 2, 4]).unwrap();
//! assert_ne!(narrow, wide);
//! assert!(narrow < wide);
//! assert_eq!(narrow, vec![1, 2, 3]);
//! assert_eq!(format!("{}", narrow), "<1 2 3>");
//! ```

use crate::{Array, Ordinal};

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

impl<'a, 'b, T, U, X: Ordinal, Y: Ordinal> PartialEq<Array<'b, U, Y>> for Array<'a, T, X>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Array<'b, U, Y>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<'a, T: Eq, X: Ordinal> Eq for Array<'a, T, X> {}

impl<'a, T, U, X: Ordinal> PartialEq<[U]> for Array<'a, T, X>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<'a, 's, T, U, X: Ordinal> PartialEq<&'s [U]> for Array<'a, T, X>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &&'s [U]) -> bool {
        self.as_slice() == *other
    }
}

impl<'a, T, U, X: Ordinal, const N: usize> PartialEq<[U; N]> for Array<'a, T, X>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == &other[..]
    }
}

impl<'a, T, U, X: Ordinal> PartialEq<Vec<U>> for Array<'a, T, X>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Vec<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<'a, T, U, X: Ordinal> PartialEq<Array<'a, U, X>> for [T]
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Array<'a, U, X>) -> bool {
        self == other.as_slice()
    }
}

impl<'a, T, U, X: Ordinal, const N: usize> PartialEq<Array<'a, U, X>> for [T; N]
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Array<'a, U, X>) -> bool {
        &self[..] == other.as_slice()
    }
}

impl<'a, T, U, X: Ordinal> PartialEq<Array<'a, U, X>> for Vec<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Array<'a, U, X>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<'a, 'b, T: PartialOrd, X: Ordinal, Y: Ordinal> PartialOrd<Array<'b, T, Y>> for Array<'a, T, X> {
    fn partial_cmp(&self, other: &Array<'b, T, Y>) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<'a, T: Ord, X: Ordinal> Ord for Array<'a, T, X> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<'a, T: Hash, X: Ordinal> Hash for Array<'a, T, X> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state)
    }
}

impl<'a, T: fmt::Debug, X: Ordinal> fmt::Debug for Array<'a, T, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Elements separated by single spaces, in angle brackets: `<1 2 3>`. Empty arrays print `<>`.
impl<'a, T: fmt::Display, X: Ordinal> fmt::Display for Array<'a, T, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<")?;
        for (i, t) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            fmt::Display::fmt(t, f)?;
        }
        f.write_str(">")
    }
}

#[cfg(test)]
mod tests {
    use crate::Array;
    use alloc::format;
    use alloc::string::{String, ToString};
    use alloc::vec;
    use core::hash::{Hash, Hasher};

    #[derive(Default)]
    struct Fnv(u64);

    impl Hasher for Fnv {
        fn finish(&self) -> u64 {
            self.0
        }

        fn write(&mut self, bytes: &[u8]) {
            for b in bytes {
                self.0 = (self.0 ^ u64::from(*b)).wrapping_mul(0x100000001b3);
            }
        }
    }

    fn hash_of<H: Hash + ?Sized>(h: &H) -> u64 {
        let mut s = Fnv(0xcbf29ce484222325);
        h.hash(&mut s);
        s.finish()
    }

    #[test]
    fn equality_ignores_storage_and_index_type() {
        let mut backing = [1u32, 2];
        let view: Array<u32, u8> = Array::share(&mut backing[..]).unwrap();
        let owned: Array<u32, u64> = Array::from_slice(&[1, 2]).unwrap();
        assert_eq!(view, owned);
        assert_eq!(owned, view);
        assert_eq!(hash_of(&owned), hash_of(&[1u32, 2][..]));
    }

    #[test]
    fn equality_across_element_types() {
        let a: Array<String, u8> = Array::from_slice(&["a".to_string()]).unwrap();
        let b: Array<&str, u16> = Array::from_slice(&["a"]).unwrap();
        assert!(a == b);
        assert_eq!(vec!["a".to_string()], a);
        assert_eq!(["a".to_string()], a);
        assert!(a == &["a"][..]);
    }

    #[test]
    fn ordering_is_lexicographic() {
        let short: Array<i32, u8> = Array::from_slice(&[1, 2]).unwrap();
        let long: Array<i32, u16> = Array::from_slice(&[1, 2, 0]).unwrap();
        let null: Array<i32, u8> = Array::new();
        assert!(short < long);
        assert!(null < short);
        assert_eq!(short.clone().max(null), short);
    }

    #[test]
    fn display_and_debug() {
        let a: Array<f32, u8> = Array::from_slice(&[1.5, -2.0]).unwrap();
        assert_eq!(format!("{}", a), "<1.5 -2>");
        assert_eq!(format!("{:?}", a), "[1.5, -2.0]");
        assert_eq!(Array::<u8, u8>::new().to_string(), "<>");
    }
}
