#![allow(dead_code)]
//! Example index types and element types for exercising `ixarray`.

use ixarray::prelude::*;
use std::cell::Cell;
use std::fmt;

/// A tiny index type: arrays indexed by it hold at most 4 elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Ordinal)]
#[ordinal(max = 4)]
pub struct SmallIx(pub u8);

/// An index type that cannot be confused with any other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Ordinal)]
pub struct TestIx(pub u32);

/// How many times each kind of construction and destruction of [`Count`] values happened.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Counts {
    /// `Count::default()`
    pub def: usize,
    /// `Count::from(value)`
    pub init: usize,
    /// `Count::clone()`
    pub copy: usize,
    /// drops
    pub dtor: usize,
}

thread_local! {
    static COUNTS: Cell<Counts> = Cell::new(Counts::default());
}

fn bump(f: impl FnOnce(&mut Counts)) {
    COUNTS.with(|c| {
        let mut counts = c.get();
        f(&mut counts);
        c.set(counts);
    })
}

/// A value that counts its constructions and destructions, per thread.
///
/// `clone_from` reuses the existing value and is not counted as a construction.
#[derive(PartialEq, Eq)]
pub struct Count<T> {
    pub val: T,
}

impl<T> Count<T> {
    /// The counts since the last [`reset`](Self::reset) on this thread.
    pub fn counts() -> Counts {
        COUNTS.with(Cell::get)
    }

    /// Zeroes the counts for this thread.
    pub fn reset() {
        COUNTS.with(|c| c.set(Counts::default()))
    }
}

impl<T: Default> Default for Count<T> {
    fn default() -> Self {
        bump(|c| c.def += 1);
        Count { val: T::default() }
    }
}

impl<T> From<T> for Count<T> {
    fn from(val: T) -> Self {
        bump(|c| c.init += 1);
        Count { val }
    }
}

impl<T: Clone> Clone for Count<T> {
    fn clone(&self) -> Self {
        bump(|c| c.copy += 1);
        Count {
            val: self.val.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.val.clone_from(&source.val);
    }
}

impl<T> Drop for Count<T> {
    fn drop(&mut self) {
        bump(|c| c.dtor += 1);
    }
}

impl<T: fmt::Debug> fmt::Debug for Count<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.val.fmt(f)
    }
}

impl<T: fmt::Display> fmt::Display for Count<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.val.fmt(f)
    }
}

/// Renders the elements last to first, separated by spaces.
pub fn reversed<T: fmt::Display, X: Ordinal>(a: &Array<'_, T, X>) -> String {
    a.iter()
        .rev()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    const DATA: [i32; 5] = [5, 3, -2, 27, 9];
    const UCHAR: [u8; 4] = [b'f', b'i', b't', b'z'];

    #[test]
    fn construction() {
        let nothing: Array<i32> = Array::new();
        let def: Array<i32> = Array::with_len(5).unwrap();
        let int_with_int: Array<i32> = Array::from_slice(&DATA).unwrap();
        let char_with_char: Array<u8> = Array::from_slice(&UCHAR).unwrap();
        let int_with_char: Array<i32> = Array::from_converted(&UCHAR).unwrap();
        assert_eq!(nothing.to_string(), "<>");
        assert_eq!(def.to_string(), "<0 0 0 0 0>");
        assert_eq!(int_with_int.to_string(), "<5 3 -2 27 9>");
        assert_eq!(char_with_char, *b"fitz");
        assert_eq!(int_with_char, [102, 105, 116, 122]);

        assert_eq!(
            Array::<u8>::try_from_converted(&DATA),
            Err(Error::ConversionFailed { position: 2 })
        );
        let char_with_int: Array<u8> = Array::try_from_converted(&DATA[3..]).unwrap();
        assert_eq!(char_with_int.to_string(), "<27 9>");
    }

    #[test]
    fn default_then_resize_equals_sized_construction() {
        let mut a: Array<Count<i32>, u16> = Array::new();
        a.resize_with(4, Count::default).unwrap();
        let b: Array<Count<i32>, u16> = Array::with_len(4).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn construction_counts() {
        Count::<i32>::reset();
        let cint: Array<Count<i32>> = Array::from_converted(&DATA).unwrap();
        assert_eq!(
            Count::<i32>::counts(),
            Counts {
                init: 5,
                ..Counts::default()
            }
        );

        let counts: [Count<i32>; 3] = [3.into(), 4.into(), 5.into()];
        Count::<i32>::reset();
        let ccnt: Array<Count<i32>> = Array::from_slice(&counts).unwrap();
        assert_eq!(
            Count::<i32>::counts(),
            Counts {
                copy: 3,
                ..Counts::default()
            }
        );

        Count::<i32>::reset();
        let mut cint2 = cint.clone();
        assert_eq!(Count::<i32>::counts().copy, 5);
        assert_eq!(cint2, cint);
        assert_ne!(cint2.as_ptr(), cint.as_ptr());

        Count::<i32>::reset();
        cint2.assign(&ccnt).unwrap();
        assert_eq!(
            Count::<i32>::counts(),
            Counts {
                dtor: 2,
                ..Counts::default()
            }
        );
        assert_eq!(cint2.to_string(), "<3 4 5>");

        Count::<i32>::reset();
        drop(cint);
        drop(ccnt);
        assert_eq!(Count::<i32>::counts().dtor, 8);
    }

    #[test]
    fn small_index_type() {
        let ismall0: Array<i32, SmallIx> = Array::new();
        assert_eq!(ismall0.capacity(), 0);
        assert!(ismall0.is_null());

        let mut ismall: Array<i32, SmallIx> = Array::with_len(3).unwrap();
        let imaxsz: Array<i32, SmallIx> = Array::from_slice(&DATA[..4]).unwrap();
        assert_eq!(ismall.to_string(), "<0 0 0>");
        assert_eq!(imaxsz.to_string(), "<5 3 -2 27>");
        assert!(Array::<i32, SmallIx>::from_slice(&DATA).is_err());

        ismall.raw_push_back().unwrap().write(27);
        assert_eq!(ismall.to_string(), "<0 0 0 27>");
        assert_eq!(ismall.capacity(), 4);
        assert_eq!(ismall.last_index(), Some(SmallIx(3)));
        assert_eq!(
            ismall.try_push(1),
            Err(Error::CapacityExceeded {
                requested: 5,
                max: 4,
                index: "SmallIx"
            })
        );
    }

    #[test]
    fn growing_one_push_at_a_time_reaches_max_size() {
        let mut a: Array<u32, SmallIx> = Array::new();
        for i in 0..4 {
            a.try_push(i).unwrap();
        }
        assert_eq!(a.len(), SmallIx::MAX_SIZE);
        assert!(matches!(a.try_push(4), Err(Error::CapacityExceeded { .. })));
        assert!(a.raw_push_back().is_err());
        assert_eq!(a, [0, 1, 2, 3]);
    }

    #[test]
    fn null_assignments() {
        let mut ismall0: Array<i32, SmallIx> = Array::new();
        let mut ismall: Array<i32, SmallIx> = Array::with_len(3).unwrap();
        let imaxsz: Array<i32, SmallIx> = Array::from_slice(&DATA[..4]).unwrap();

        ismall.assign(&ismall0).unwrap();
        assert!(ismall.is_null());

        ismall0.assign(&imaxsz).unwrap();
        assert!(ismall0.owns_data());
        assert_eq!(ismall0, imaxsz);

        ismall.assign(&Array::<i32, SmallIx>::new()).unwrap();
        assert!(ismall.is_null());
        assert_eq!(ismall, Array::<i32, SmallIx>::default());
    }

    #[test]
    fn narrow_index_types_shrink_the_header() {
        assert!(size_of::<Array<i32, i16>>() < size_of::<Array<i32>>());
        assert!(size_of::<Array<i32, SmallIx>>() <= size_of::<Array<i32, u16>>());
    }

    #[test]
    fn inserting_strings_grows_geometrically() {
        let mut strings: Array<String, TestIx> = Array::from_elem(6, &"woohoo".to_string()).unwrap();
        assert_eq!(strings.capacity(), 6);
        strings.push("last".to_string());
        let mut shape = Vec::new();
        for i in 0..5 {
            strings
                .insert_n(strings.len(), 2, &format!("ins{}", i))
                .unwrap();
            shape.push((strings.len(), strings.capacity()));
        }
        assert_eq!(shape, [(9, 12), (11, 12), (13, 24), (15, 24), (17, 24)]);
        assert_eq!(strings.at(TestIx(6)).unwrap(), "last");
        assert_eq!(
            reversed(&strings),
            "ins4 ins4 ins3 ins3 ins2 ins2 ins1 ins1 ins0 ins0 last \
             woohoo woohoo woohoo woohoo woohoo woohoo"
        );
        let last = strings.last_index().unwrap();
        assert_eq!(strings.indices().rev().next(), Some(last));
        assert_eq!(last, TestIx(16));
    }

    #[test]
    fn sharing_a_vector() {
        let mut owner = vec![7, 77, 777, 7777, 77777];
        let unowner: Vec<u32> = owner.iter().map(|&x| x as u32).collect();
        {
            let mut shared: Array<i32> = Array::new();
            shared.share_data(&mut owner[1..4]).unwrap();
            assert_eq!(shared.to_string(), "<77 777 7777>");
            assert_eq!(shared.capacity(), 3);
            shared[2] = 29;
            assert_eq!(shared.to_string(), "<77 777 29>");
            assert_eq!(shared.view(1, 2).unwrap(), [777, 29]);
        }
        assert_eq!(owner, [7, 77, 777, 29, 77777]);

        let mut copy_of_owner: Array<i64> = Array::from_converted(&owner[..]).unwrap();
        assert_eq!(copy_of_owner.to_string(), "<7 77 777 29 77777>");
        assert_eq!(
            Array::<u16, i8>::try_from_converted(&owner[..]),
            Err(Error::ConversionFailed { position: 4 })
        );
        let mut weird_copy: Array<u16, i8> = Array::try_from_converted(&owner[..4]).unwrap();
        assert_eq!(weird_copy.to_string(), "<7 77 777 29>");
        assert_eq!(
            weird_copy.try_assign_converted(&owner[..]),
            Err(Error::ConversionFailed { position: 4 })
        );
        assert_eq!(weird_copy, [7, 77, 777, 29]);
        copy_of_owner.assign_converted(&unowner[..]).unwrap();
        assert_eq!(copy_of_owner.to_string(), "<7 77 777 7777 77777>");
    }

    #[test]
    fn assigning_through_a_sub_view() {
        let mut unowner: Vec<u32> = vec![7, 77, 777, 7777, 77777];
        let mut share_of_unowner: Array<u32> = Array::share(&mut unowner).unwrap();
        let eighty_eights: Array<u32> = Array::from_elem(3, &88).unwrap();
        share_of_unowner
            .view_mut(1, 3)
            .unwrap()
            .assign_from(&eighty_eights)
            .unwrap();
        assert_eq!(share_of_unowner.to_string(), "<7 88 88 88 77777>");
        assert_eq!(
            share_of_unowner.view_mut(1, 3).unwrap().assign(&[1, 2]),
            Err(Error::IncompatibleAssignment { len: 3, src_len: 2 })
        );
        drop(share_of_unowner);
        assert_eq!(unowner, [7, 88, 88, 88, 77777]);
    }

    #[test]
    fn views_never_drop_or_free() {
        let mut backing: Vec<Count<i32>> = (0..3).map(Count::from).collect();
        Count::<i32>::reset();
        {
            let mut v: Array<Count<i32>, SmallIx> = Array::share(&mut backing).unwrap();
            v.assign(&[Count { val: 1 }, Count { val: 2 }, Count { val: 3 }])
                .unwrap();
            v.release();
        }
        // Only the three temporaries in the assigned array literal were dropped.
        assert_eq!(Count::<i32>::counts().dtor, 3);
        assert_eq!(backing.iter().map(|c| c.val).collect::<Vec<_>>(), [1, 2, 3]);
    }

    #[test]
    fn arena_views() {
        let bump = bumpalo::Bump::new();
        let mut v: Array<String, TestIx> =
            Array::alloc_view_in(&bump, ["a", "b"].iter().map(|s| s.to_string())).unwrap();
        assert!(v.is_view());
        v[0].push('!');
        assert_eq!(v, ["a!", "b"]);
        assert!(v.try_push("c".to_string()).is_err());
    }

    mod tracing {
        use super::*;
        use log::{LevelFilter, Log, Metadata, Record};
        use std::cell::RefCell;
        use std::sync::Once;

        thread_local! {
            static LINES: RefCell<Vec<String>> = RefCell::new(Vec::new());
        }

        struct ThreadLogger;

        impl Log for ThreadLogger {
            fn enabled(&self, _: &Metadata) -> bool {
                true
            }

            fn log(&self, record: &Record) {
                LINES.with(|l| l.borrow_mut().push(record.args().to_string()));
            }

            fn flush(&self) {}
        }

        static LOGGER: ThreadLogger = ThreadLogger;
        static INIT: Once = Once::new();

        #[test]
        fn growth_and_release_are_traced() {
            INIT.call_once(|| {
                let _ = log::set_logger(&LOGGER);
                log::set_max_level(LevelFilter::Trace);
            });
            LINES.with(|l| l.borrow_mut().clear());

            let mut a: Array<u8, SmallIx> = Array::new();
            a.push(1);
            drop(a);

            let lines = LINES.with(|l| l.borrow().clone());
            assert!(lines.iter().any(|l| l.contains("`SmallIx` resized 0 -> 4")));
            assert!(lines.iter().any(|l| l.contains("freed buffer")));
        }
    }

    #[cfg(not(miri))]
    #[test]
    fn compile_errors_are_good() {
        let t = trybuild::TestCases::new();
        t.compile_fail("shouldfail/*.rs");
    }
}
