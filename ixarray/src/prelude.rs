//! Single module with almost all `ixarray` exports
//!
//! # Examples
//!
//! ```
//! use ixarray::prelude::*;
//!
//! let a: Array<u8, u8> = Array::from_fill(3, FillWithDefault).unwrap();
//! assert_eq!(a.storage(), Storage::Owning);
//! ```

pub use crate::array::{Array, RawSlot, Storage};
pub use crate::error::Error;
pub use crate::fill::{
    CloneFrom, ConvertFrom, Fill, FillSequentially, FillWithClone, FillWithDefault,
    FromIterPrefix, MoveFrom, TryConvertFrom,
};
pub use crate::iter::Indices;
pub use crate::Ordinal;
