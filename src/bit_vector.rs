use crate::bitset::{Bitset256, IterOnes};
use alloc::vec::Vec;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::ops::BitOrAssign;
use tracing::trace;

const BLOCK_BITS: usize = Bitset256::CAPACITY;

/// An unbounded bit vector made of [`Bitset256`] blocks.
///
/// Block `i` covers keys `256 * i ..= 256 * i + 255`. Blocks past the end of
/// the sequence are treated as all-zero, so reading any key never fails and
/// never grows the vector. The block sequence only ever grows.
///
/// # Examples
/// ```
/// use light_bitsets::BitVector;
///
/// let mut bits = BitVector::new();
/// bits.set(1000);
/// assert!(bits.get(1000));
/// assert!(!bits.get(999));
/// assert_eq!(bits.block_count(), 4);
/// assert_eq!(bits.iter_ones().collect::<Vec<_>>(), [1000]);
/// ```
#[derive(Clone, Default)]
pub struct BitVector {
    blocks: Vec<Bitset256>,
}

impl BitVector {
    /// Creates an empty vector with no blocks.
    #[inline]
    pub const fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    #[inline]
    fn idxs(key: usize) -> (usize, usize) {
        (key / BLOCK_BITS, key % BLOCK_BITS)
    }

    /// Returns whether `key` is set. Keys past the last block read as unset.
    #[inline]
    pub fn get(&self, key: usize) -> bool {
        let (block_idx, bit_idx) = Self::idxs(key);
        self.blocks
            .get(block_idx)
            .is_some_and(|block| block.get_unchecked(bit_idx))
    }

    /// Sets `key`, appending zeroed blocks up to the one that owns it.
    pub fn set(&mut self, key: usize) {
        let (block_idx, bit_idx) = Self::idxs(key);
        self.grow_to(block_idx + 1);
        self.blocks[block_idx].set_unchecked(bit_idx);
    }

    /// Unsets `key`. Does nothing if its block does not exist yet; the
    /// vector never shrinks.
    pub fn clear(&mut self, key: usize) {
        let (block_idx, bit_idx) = Self::idxs(key);
        if let Some(block) = self.blocks.get_mut(block_idx) {
            block.clear_unchecked(bit_idx);
        }
    }

    fn grow_to(&mut self, block_count: usize) {
        if block_count > self.blocks.len() {
            trace!(
                from = self.blocks.len(),
                to = block_count,
                "growing bit vector blocks"
            );
            self.blocks.resize(block_count, Bitset256::ZERO);
        }
    }

    /// Returns an iterator over all set keys in ascending order.
    #[inline]
    pub fn iter_ones(&self) -> IterKeys<'_> {
        IterKeys {
            blocks: &self.blocks,
            block_idx: 0,
            current: Bitset256::ZERO.iter_ones(),
        }
    }

    /// Returns `true` if `self` and `other` have at least one key in common.
    ///
    /// Only the blocks both vectors hold are compared; missing blocks are
    /// empty.
    ///
    /// # Examples
    /// ```
    /// use light_bitsets::BitVector;
    ///
    /// let a: BitVector = [10, 20].into_iter().collect();
    /// let b: BitVector = [20, 30].into_iter().collect();
    /// let c: BitVector = [30, 5000].into_iter().collect();
    /// assert!(a.intersects(&b));
    /// assert!(!a.intersects(&c));
    /// ```
    pub fn intersects(&self, other: &Self) -> bool {
        self.blocks
            .iter()
            .zip(other.blocks.iter())
            .any(|(own, theirs)| own.and_any(theirs))
    }

    /// Adds every key of `other` to `self`, growing `self` to at least
    /// `other`'s block count.
    ///
    /// # Examples
    /// ```
    /// use light_bitsets::BitVector;
    ///
    /// let mut a: BitVector = [3, 300].into_iter().collect();
    /// let b: BitVector = [3, 600].into_iter().collect();
    /// a.union_with(&b);
    /// assert_eq!(a.iter_ones().collect::<Vec<_>>(), [3, 300, 600]);
    /// ```
    pub fn union_with(&mut self, other: &Self) {
        self.grow_to(other.blocks.len());
        for (own, theirs) in self.blocks.iter_mut().zip(other.blocks.iter()) {
            *own |= *theirs;
        }
    }

    /// Returns a new vector holding the keys of `self` plus `key`, leaving
    /// `self` untouched.
    ///
    /// # Examples
    /// ```
    /// use light_bitsets::BitVector;
    ///
    /// let base: BitVector = [1].into_iter().collect();
    /// let derived = base.clone_and_set(700);
    /// assert!(!base.get(700));
    /// assert_eq!(derived.iter_ones().collect::<Vec<_>>(), [1, 700]);
    /// ```
    pub fn clone_and_set(&self, key: usize) -> Self {
        let (block_idx, bit_idx) = Self::idxs(key);
        let len = self.blocks.len().max(block_idx + 1);

        let mut blocks = Vec::with_capacity(len);
        blocks.extend_from_slice(&self.blocks);
        blocks.resize(len, Bitset256::ZERO);
        blocks[block_idx].set_unchecked(bit_idx);

        Self { blocks }
    }

    /// The backing blocks, lowest keys first.
    #[inline]
    pub fn blocks(&self) -> &[Bitset256] {
        &self.blocks
    }

    /// Number of allocated blocks.
    #[inline]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Number of set keys.
    pub fn count_ones(&self) -> usize {
        self.blocks.iter().map(Bitset256::popcount).sum()
    }

    /// Returns `true` if no key is set, regardless of how many blocks are
    /// allocated.
    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(Bitset256::is_zero)
    }

    // Blocks up to and including the last one with a set bit.
    fn occupied_blocks(&self) -> &[Bitset256] {
        let len = self
            .blocks
            .iter()
            .rposition(|block| !block.is_zero())
            .map_or(0, |last| last + 1);
        &self.blocks[..len]
    }
}

/// Two vectors are equal when they hold the same keys. Trailing all-zero
/// blocks are ignored.
impl PartialEq for BitVector {
    fn eq(&self, other: &Self) -> bool {
        self.occupied_blocks() == other.occupied_blocks()
    }
}

impl Eq for BitVector {}

impl Hash for BitVector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.occupied_blocks().hash(state);
    }
}

impl BitOrAssign<&BitVector> for BitVector {
    fn bitor_assign(&mut self, rhs: &BitVector) {
        self.union_with(rhs);
    }
}

impl core::fmt::Debug for BitVector {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter_ones()).finish()
    }
}

impl FromIterator<usize> for BitVector {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut bits = Self::new();
        bits.extend(iter);
        bits
    }
}

impl Extend<usize> for BitVector {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        for key in iter {
            self.set(key);
        }
    }
}

impl<'bits> IntoIterator for &'bits BitVector {
    type Item = usize;
    type IntoIter = IterKeys<'bits>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_ones()
    }
}

/// Iterator over the set keys of a [`BitVector`], in ascending order.
///
/// Returned by [`BitVector::iter_ones()`].
#[derive(Clone, Debug)]
pub struct IterKeys<'bits> {
    blocks: &'bits [Bitset256],
    block_idx: usize,
    current: IterOnes<u64, 4>,
}

impl Iterator for IterKeys<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(bit_idx) = self.current.next() {
                // `block_idx` was advanced past the block `current` came from
                return Some((self.block_idx - 1) * BLOCK_BITS + bit_idx);
            }
            let block = self.blocks.get(self.block_idx)?;
            self.current = block.iter_ones();
            self.block_idx += 1;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending_blocks = self.blocks.len().saturating_sub(self.block_idx);
        let upper = pending_blocks
            .checked_mul(BLOCK_BITS)
            .and_then(|bits| bits.checked_add(self.current.len()));
        (self.current.len(), upper)
    }
}

impl FusedIterator for IterKeys<'_> {}
