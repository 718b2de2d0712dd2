#![warn(missing_docs)]

//! Errors reported by fallible [`Array`](crate::Array) operations.

/// Why an [`Array`](crate::Array) operation failed.
///
/// Every fallible operation reports its error at the point of the call and, apart from
/// [`try_extend`](crate::Array::try_extend) over an iterator of unknown length, leaves the
/// array unchanged. Nothing is clamped or truncated silently.
///
/// ```
/// use ixarray::{Array, Error};
///
/// let mut backing = [1, 2, 3];
/// let mut view: Array<i32> = Array::share(&mut backing[..]).unwrap();
/// assert_eq!(
///     view.assign(&[4, 5]),
///     Err(Error::IncompatibleAssignment { len: 3, src_len: 2 })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A length or capacity would exceed what the index type can represent.
    #[error("{requested} elements requested but index type `{index}` allows at most {max}")]
    CapacityExceeded {
        /// The length that was asked for.
        requested: usize,
        /// `X::MAX_SIZE` of the index type.
        max: usize,
        /// `X::NAME` of the index type.
        index: &'static str,
    },

    /// A position or sub-range lies outside `0..len`.
    #[error("range {start}..{end} is out of bounds for length {len}")]
    OutOfRange {
        /// First position requested.
        start: usize,
        /// One past the last position requested.
        end: usize,
        /// Length of the array at the time of the request.
        len: usize,
    },

    /// An assignment would change the length of a view.
    #[error("cannot assign {src_len} elements to a view of fixed length {len}")]
    IncompatibleAssignment {
        /// Length of the view.
        len: usize,
        /// Length of the assigned sequence.
        src_len: usize,
    },

    /// A source range was malformed, or ended before the length it promised.
    #[error("invalid source range: {reason}")]
    InvalidRange {
        /// What was wrong with the range.
        reason: &'static str,
    },

    /// An element of the source could not be converted to the destination's element type.
    #[error("source element {position} does not convert to the destination element type")]
    ConversionFailed {
        /// Position of the first element that failed to convert.
        position: usize,
    },

    /// The operation would change the length of a view, which is fixed by its binding.
    #[error("cannot {operation} a non-owning view")]
    ViewNotResizable {
        /// The refused operation, e.g. `"grow"`.
        operation: &'static str,
    },
}

impl Error {
    pub(crate) fn capacity_exceeded<X: crate::Ordinal>(requested: usize) -> Self {
        Error::CapacityExceeded {
            requested,
            max: X::MAX_SIZE,
            index: X::NAME,
        }
    }

    pub(crate) fn out_of_range(start: usize, end: usize, len: usize) -> Self {
        Error::OutOfRange { start, end, len }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn messages_name_the_index_type() {
        let e = Error::capacity_exceeded::<u8>(300);
        assert_eq!(
            e.to_string(),
            "300 elements requested but index type `u8` allows at most 255"
        );
    }

    #[test]
    fn conversion_failure_names_the_position() {
        assert_eq!(
            Error::ConversionFailed { position: 2 }.to_string(),
            "source element 2 does not convert to the destination element type"
        );
    }

    #[test]
    fn out_of_range_message() {
        assert_eq!(
            Error::out_of_range(4, 6, 5).to_string(),
            "range 4..6 is out of bounds for length 5"
        );
    }
}
