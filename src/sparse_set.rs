use crate::error::{Error, Result};
use alloc::vec;
use alloc::vec::Vec;
use core::mem;
use core::ops::{Index, IndexMut};
use tracing::trace;

/// Marker stored in the sparse array for keys without a value.
pub const INVALID_INDEX: i32 = -1;

/// Maps sparse `usize` keys to densely packed values.
///
/// `sparse[key]` holds either [`INVALID_INDEX`] or the slot in `dense` where
/// the key's value lives. Both arrays grow to the next power of two when a
/// key or slot falls outside them, and never shrink.
///
/// Removing a key resets its dense slot to `T::default()` but does not
/// release it: [`count`](Self::count) keeps counting it and the slot is not
/// handed out again. Dense indices of live keys therefore never move.
///
/// # Examples
/// ```
/// use light_bitsets::SparseSet;
///
/// let mut set = SparseSet::<u32>::with_capacity(10, 5);
/// set.add(2, 10).unwrap();
/// assert!(set.has(2));
/// assert_eq!(set.get(2), Ok(&10));
/// assert_eq!(set.remove(2), Ok(10));
/// assert!(!set.has(2));
/// assert_eq!(set.count(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct SparseSet<T> {
    sparse: Vec<i32>,
    dense: Vec<T>,
    count: usize,
}

impl<T> SparseSet<T> {
    /// Creates an empty set without any storage.
    #[inline]
    pub const fn new() -> Self {
        Self {
            sparse: Vec::new(),
            dense: Vec::new(),
            count: 0,
        }
    }

    #[inline]
    fn slot(&self, key: usize) -> Option<usize> {
        match self.sparse.get(key) {
            Some(&slot) if slot != INVALID_INDEX => Some(slot as usize),
            _ => None,
        }
    }

    /// Returns `true` if `key` currently maps to a value.
    #[inline]
    pub fn has(&self, key: usize) -> bool {
        self.slot(key).is_some()
    }

    /// Returns the value stored for `key`.
    ///
    /// # Errors
    /// Returns [`Error::KeyNotPresent`] if `key` has no value.
    #[inline]
    pub fn get(&self, key: usize) -> Result<&T> {
        let slot = self.slot(key).ok_or(Error::KeyNotPresent { key })?;
        Ok(&self.dense[slot])
    }

    /// Returns a mutable reference to the value stored for `key`. Writes
    /// through it are seen by later lookups of the same key.
    ///
    /// # Errors
    /// Returns [`Error::KeyNotPresent`] if `key` has no value.
    ///
    /// # Examples
    /// ```
    /// use light_bitsets::SparseSet;
    ///
    /// let mut set = SparseSet::new();
    /// set.add(7, 1u64).unwrap();
    /// *set.get_mut(7).unwrap() += 41;
    /// assert_eq!(set.get(7), Ok(&42));
    /// ```
    #[inline]
    pub fn get_mut(&mut self, key: usize) -> Result<&mut T> {
        let slot = self.slot(key).ok_or(Error::KeyNotPresent { key })?;
        Ok(&mut self.dense[slot])
    }

    /// Number of dense slots handed out so far, including the ones vacated
    /// by [`remove`](Self::remove).
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// The sparse array, indexed by key.
    #[inline]
    pub fn sparse(&self) -> &[i32] {
        &self.sparse
    }

    /// The dense value array, indexed by slot.
    #[inline]
    pub fn dense(&self) -> &[T] {
        &self.dense
    }

    /// The dense value array, mutably.
    #[inline]
    pub fn dense_mut(&mut self) -> &mut [T] {
        &mut self.dense
    }
}

impl<T: Default> SparseSet<T> {
    /// Creates a set whose sparse array holds `sparse_len` unmapped keys and
    /// whose dense array holds `dense_len` default values.
    ///
    /// # Examples
    /// ```
    /// use light_bitsets::{SparseSet, INVALID_INDEX};
    ///
    /// let set = SparseSet::<i32>::with_capacity(10, 5);
    /// assert_eq!(set.count(), 0);
    /// assert_eq!(set.sparse(), [INVALID_INDEX; 10]);
    /// assert_eq!(set.dense(), [0; 5]);
    /// ```
    pub fn with_capacity(sparse_len: usize, dense_len: usize) -> Self {
        let mut dense = Vec::with_capacity(dense_len);
        dense.resize_with(dense_len, T::default);
        Self {
            sparse: vec![INVALID_INDEX; sparse_len],
            dense,
            count: 0,
        }
    }

    /// Stores `value` for `key` and returns a reference to it.
    ///
    /// A new key gets the next dense slot. An existing key keeps its slot and
    /// has its value overwritten, without changing [`count`](Self::count).
    ///
    /// # Errors
    /// Returns [`Error::CapacityOverflow`] if `key` or the new dense slot
    /// cannot be addressed. The set is unchanged in that case.
    ///
    /// # Examples
    /// ```
    /// use light_bitsets::SparseSet;
    ///
    /// let mut set = SparseSet::new();
    /// set.add(100, 'a').unwrap();
    /// set.add(100, 'b').unwrap();
    /// assert_eq!(set.get(100), Ok(&'b'));
    /// assert_eq!(set.count(), 1);
    /// assert_eq!(set.sparse().len(), 128);
    /// ```
    pub fn add(&mut self, key: usize, value: T) -> Result<&mut T> {
        let slot = match self.slot(key) {
            Some(slot) => slot,
            None => self.allocate_slot(key)?,
        };
        self.dense[slot] = value;
        Ok(&mut self.dense[slot])
    }

    fn allocate_slot(&mut self, key: usize) -> Result<usize> {
        let slot = self.count;
        let encoded = i32::try_from(slot).map_err(|_| Error::CapacityOverflow {
            requested: slot.saturating_add(1),
        })?;
        let sparse_len = if key < self.sparse.len() {
            None
        } else {
            Some(grown_len(key)?)
        };
        let dense_len = if slot < self.dense.len() {
            None
        } else {
            Some(grown_len(slot)?)
        };

        if let Some(len) = sparse_len {
            trace!(from = self.sparse.len(), to = len, "growing sparse array");
            self.sparse.resize(len, INVALID_INDEX);
        }
        if let Some(len) = dense_len {
            trace!(from = self.dense.len(), to = len, "growing dense array");
            self.dense.resize_with(len, T::default);
        }

        self.sparse[key] = encoded;
        self.count += 1;
        Ok(slot)
    }

    /// Removes the value stored for `key` and returns it.
    ///
    /// The dense slot is reset to `T::default()` and stays allocated;
    /// [`count`](Self::count) does not change.
    ///
    /// # Errors
    /// Returns [`Error::KeyNotPresent`] if `key` has no value.
    pub fn remove(&mut self, key: usize) -> Result<T> {
        let slot = self.slot(key).ok_or(Error::KeyNotPresent { key })?;
        self.sparse[key] = INVALID_INDEX;
        Ok(mem::take(&mut self.dense[slot]))
    }
}

// Smallest power of two that can hold `index`.
fn grown_len(index: usize) -> Result<usize> {
    index
        .checked_add(1)
        .and_then(usize::checked_next_power_of_two)
        .ok_or(Error::CapacityOverflow {
            requested: index.saturating_add(1),
        })
}

impl<T> Default for SparseSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// # Panics
/// Panics if `key` has no value.
impl<T> Index<usize> for SparseSet<T> {
    type Output = T;

    fn index(&self, key: usize) -> &Self::Output {
        match self.get(key) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

/// # Panics
/// Panics if `key` has no value.
impl<T> IndexMut<usize> for SparseSet<T> {
    fn index_mut(&mut self, key: usize) -> &mut Self::Output {
        match self.get_mut(key) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}
