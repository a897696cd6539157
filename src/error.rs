use thiserror::Error;

/// Errors returned by the checked operations of this crate.
///
/// All of them describe a caller logic error. No operation mutates anything
/// before returning one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// A single-bit accessor on a fixed bitset was given an index that is
    /// not below the bitset's capacity.
    #[error("bit index {index} out of range, capacity is {capacity}")]
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// Number of bits the bitset holds.
        capacity: usize,
    },

    /// The sparse set holds no value for this key.
    #[error("key {key} is not present in the sparse set")]
    KeyNotPresent {
        /// The missing key.
        key: usize,
    },

    /// Growing the sparse set would exceed its addressable size.
    #[error("sparse set cannot grow to hold {requested} entries")]
    CapacityOverflow {
        /// The length the storage would have needed.
        requested: usize,
    },
}

/// Result type used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
