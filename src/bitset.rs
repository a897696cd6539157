use crate::error::{Error, Result};
use crate::word::Word;
use core::array::from_fn;
use core::fmt::{self, Debug, Display, Formatter};
use core::iter::FusedIterator;
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

/// Separator written between two indices by [`Display`] and
/// [`FixedBitset::write_indices`].
pub const SEPARATOR: &str = ", ";

// Enough for `usize::MAX` in decimal.
const DECIMAL_DIGITS: usize = 20;

pub(crate) const fn bit_capacity(words: usize, word_bits: usize) -> usize {
    assert!(words > 0, "WORDS must be greater than zero.");
    words * word_bits
}

/// A bitset with a fixed capacity of `WORDS * W::BITS` bits.
///
/// Bit `i` lives in word `i / W::BITS` at position `i % W::BITS`, counting
/// from the least significant bit. Every accessor, [`first_set_bit`] and the
/// enumeration use that same numbering.
///
/// The type is `Copy`, never allocates and has no unused tail bits, so every
/// stored bit is observable through the indexed accessors.
///
/// Instantiating it with `WORDS == 0` fails to compile:
///
/// ```compile_fail
/// let _ = light_bitsets::FixedBitset::<u8, 0>::new();
/// ```
///
/// ```compile_fail
/// let _ = light_bitsets::FixedBitset::<u64, 0>::from_words([]);
/// ```
///
/// [`first_set_bit`]: FixedBitset::first_set_bit
#[derive(PartialEq, Eq, Hash, Clone, Copy)]
pub struct FixedBitset<W: Word, const WORDS: usize>(pub(crate) [W; WORDS]);

/// An 8-bit bitset stored in a single byte.
pub type Bitset8 = FixedBitset<u8, 1>;

/// A 256-bit bitset stored as four 64-bit lanes.
pub type Bitset256 = FixedBitset<u64, 4>;

impl<W: Word, const WORDS: usize> FixedBitset<W, WORDS> {
    /// Number of bits the bitset can hold.
    pub const CAPACITY: usize = bit_capacity(WORDS, W::BITS);

    /// A bitset with every bit unset.
    pub const ZERO: Self = Self::from_words([W::ZERO; WORDS]);

    /// A bitset with every bit set.
    pub const FULL: Self = Self::from_words([W::ONES; WORDS]);

    /// Creates a new bitset with all bits unset.
    ///
    /// # Examples
    /// ```
    /// use light_bitsets::Bitset256;
    ///
    /// let bitset = Bitset256::new();
    /// assert!(bitset.is_zero());
    /// assert_eq!(bitset.popcount(), 0);
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Self::ZERO
    }

    /// Creates a bitset from its raw words, lowest word first.
    ///
    /// # Examples
    /// ```
    /// use light_bitsets::Bitset256;
    ///
    /// let bitset = Bitset256::from_words([0b101, 0, 0, 1]);
    /// assert_eq!(bitset.iter_ones().collect::<Vec<_>>(), [0, 2, 192]);
    /// ```
    #[inline]
    pub const fn from_words(words: [W; WORDS]) -> Self {
        let _ = Self::CAPACITY;
        Self(words)
    }

    /// Creates a bitset with exactly the given indices set.
    ///
    /// # Errors
    /// Returns [`Error::IndexOutOfRange`] for the first index that is not
    /// below [`CAPACITY`](Self::CAPACITY).
    ///
    /// # Examples
    /// ```
    /// use light_bitsets::Bitset8;
    ///
    /// let bitset = Bitset8::from_indices([1, 3]).unwrap();
    /// assert_eq!(u8::from(bitset), 0b1010);
    /// assert!(Bitset8::from_indices([8]).is_err());
    /// ```
    pub fn from_indices<I: IntoIterator<Item = usize>>(indices: I) -> Result<Self> {
        let mut bitset = Self::new();
        for idx in indices {
            bitset.set(idx)?;
        }
        Ok(bitset)
    }

    /// The raw words, lowest word first.
    #[inline]
    pub const fn words(&self) -> &[W; WORDS] {
        &self.0
    }

    /// Returns `true` if no bit is set.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|word| *word == W::ZERO)
    }

    /// Returns whether the bit at `idx` is set.
    ///
    /// # Errors
    /// Returns [`Error::IndexOutOfRange`] if `idx >= CAPACITY`.
    ///
    /// # Examples
    /// ```
    /// use light_bitsets::Bitset256;
    ///
    /// let mut bitset = Bitset256::new();
    /// bitset.set(200).unwrap();
    /// assert_eq!(bitset.get(200), Ok(true));
    /// assert_eq!(bitset.get(199), Ok(false));
    /// assert!(bitset.get(256).is_err());
    /// ```
    #[inline]
    pub fn get(&self, idx: usize) -> Result<bool> {
        Self::check_index(idx)?;
        Ok(self.get_unchecked(idx))
    }

    /// Sets the bit at `idx`.
    ///
    /// # Errors
    /// Returns [`Error::IndexOutOfRange`] if `idx >= CAPACITY`. The bitset
    /// is left untouched in that case.
    #[inline]
    pub fn set(&mut self, idx: usize) -> Result<()> {
        Self::check_index(idx)?;
        self.set_unchecked(idx);
        Ok(())
    }

    /// Unsets the bit at `idx`.
    ///
    /// # Errors
    /// Returns [`Error::IndexOutOfRange`] if `idx >= CAPACITY`. The bitset
    /// is left untouched in that case.
    #[inline]
    pub fn clear(&mut self, idx: usize) -> Result<()> {
        Self::check_index(idx)?;
        self.clear_unchecked(idx);
        Ok(())
    }

    /// Sets the bit at `idx` to `value`.
    ///
    /// # Errors
    /// Returns [`Error::IndexOutOfRange`] if `idx >= CAPACITY`.
    ///
    /// # Examples
    /// ```
    /// use light_bitsets::Bitset8;
    ///
    /// let mut bitset = Bitset8::new();
    /// bitset.assign(4, true).unwrap();
    /// assert_eq!(u8::from(bitset), 0b1_0000);
    /// bitset.assign(4, false).unwrap();
    /// assert!(bitset.is_zero());
    /// ```
    #[inline]
    pub fn assign(&mut self, idx: usize, value: bool) -> Result<()> {
        Self::check_index(idx)?;
        if value {
            self.set_unchecked(idx);
        } else {
            self.clear_unchecked(idx);
        }
        Ok(())
    }

    /// Returns whether the bit at `idx` is set, without range validation.
    ///
    /// The caller must guarantee `idx < CAPACITY`. Breaking that is a logic
    /// error: the call panics or reads an unrelated bit.
    #[inline]
    pub fn get_unchecked(&self, idx: usize) -> bool {
        debug_assert!(idx < Self::CAPACITY, "Bit index {idx} out of bounds");
        let (word_idx, bit_idx) = Self::idxs(idx);
        self.0[word_idx] & W::bit(bit_idx) != W::ZERO
    }

    /// Sets the bit at `idx` without range validation.
    ///
    /// The caller must guarantee `idx < CAPACITY`. Breaking that is a logic
    /// error: the call panics or sets an unrelated bit.
    #[inline]
    pub fn set_unchecked(&mut self, idx: usize) {
        debug_assert!(idx < Self::CAPACITY, "Bit index {idx} out of bounds");
        let (word_idx, bit_idx) = Self::idxs(idx);
        self.0[word_idx] |= W::bit(bit_idx);
    }

    /// Unsets the bit at `idx` without range validation.
    ///
    /// The caller must guarantee `idx < CAPACITY`. Breaking that is a logic
    /// error: the call panics or clears an unrelated bit.
    #[inline]
    pub fn clear_unchecked(&mut self, idx: usize) {
        debug_assert!(idx < Self::CAPACITY, "Bit index {idx} out of bounds");
        let (word_idx, bit_idx) = Self::idxs(idx);
        self.0[word_idx] &= !W::bit(bit_idx);
    }

    /// Sets every bit.
    #[inline]
    pub fn set_all(&mut self) {
        self.0 = [W::ONES; WORDS];
    }

    /// Unsets every bit.
    #[inline]
    pub fn clear_all(&mut self) {
        self.0 = [W::ZERO; WORDS];
    }

    #[inline]
    fn check_index(idx: usize) -> Result<()> {
        if idx < Self::CAPACITY {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                index: idx,
                capacity: Self::CAPACITY,
            })
        }
    }

    #[inline]
    fn idxs(idx: usize) -> (usize, usize) {
        (idx / W::BITS, idx % W::BITS)
    }

    /// Returns `true` if every bit set in `other` is also set in `self`.
    ///
    /// Folds `other & !self` over all words without an early exit, which
    /// lowers to a single vector test on targets that provide one. The
    /// result always equals `(self & other) == other`.
    ///
    /// # Examples
    /// ```
    /// use light_bitsets::Bitset256;
    ///
    /// let all = Bitset256::from_indices([1, 70, 200]).unwrap();
    /// let some = Bitset256::from_indices([70, 200]).unwrap();
    /// assert!(all.contains(&some));
    /// assert!(!some.contains(&all));
    /// assert!(all.contains(&Bitset256::ZERO));
    /// ```
    #[inline]
    pub fn contains(&self, other: &Self) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .fold(W::ZERO, |missing, (&own, &theirs)| missing | (theirs & !own))
            == W::ZERO
    }

    /// Returns `true` if `self` and `other` share at least one set bit.
    ///
    /// # Examples
    /// ```
    /// use light_bitsets::Bitset256;
    ///
    /// let a = Bitset256::from_indices([3, 130]).unwrap();
    /// let b = Bitset256::from_indices([130]).unwrap();
    /// let c = Bitset256::from_indices([4]).unwrap();
    /// assert!(a.and_any(&b));
    /// assert!(!a.and_any(&c));
    /// ```
    #[inline]
    pub fn and_any(&self, other: &Self) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .fold(W::ZERO, |shared, (&own, &theirs)| shared | (own & theirs))
            != W::ZERO
    }

    /// Returns the number of set bits.
    #[inline]
    pub fn popcount(&self) -> usize {
        self.0.iter().map(|word| word.count_ones() as usize).sum()
    }

    /// Returns the index of the lowest set bit, or [`CAPACITY`] if no bit is
    /// set.
    ///
    /// Runs in O(w) where w is the word count.
    ///
    /// # Examples
    /// ```
    /// use light_bitsets::Bitset256;
    ///
    /// assert_eq!(Bitset256::ZERO.first_set_bit(), Bitset256::CAPACITY);
    /// let bitset = Bitset256::from_indices([130, 64]).unwrap();
    /// assert_eq!(bitset.first_set_bit(), 64);
    /// ```
    ///
    /// [`CAPACITY`]: Self::CAPACITY
    pub fn first_set_bit(&self) -> usize {
        for (i, word) in self.0.iter().enumerate() {
            if *word != W::ZERO {
                return i * W::BITS + word.trailing_zeros() as usize;
            }
        }
        Self::CAPACITY
    }

    /// Returns an iterator over the indices of all set bits, in ascending
    /// order.
    ///
    /// The iterator works on its own copy of the bitset, so later changes to
    /// `self` do not affect it.
    ///
    /// # Examples
    /// ```
    /// use light_bitsets::Bitset256;
    ///
    /// let mut bitset = Bitset256::from_indices([255, 5, 64, 0]).unwrap();
    /// let ones = bitset.iter_ones();
    /// bitset.clear_all();
    /// assert_eq!(ones.collect::<Vec<_>>(), [0, 5, 64, 255]);
    /// ```
    #[inline]
    pub fn iter_ones(&self) -> IterOnes<W, WORDS> {
        IterOnes { remaining: *self }
    }

    /// The low byte of the first word, for callers that consume raw 8-bit
    /// flag values.
    ///
    /// # Examples
    /// ```
    /// use light_bitsets::Bitset256;
    ///
    /// let bitset = Bitset256::from_words([0x1FF, 0, 0, 0]);
    /// assert_eq!(bitset.low_byte(), 0xFF);
    /// ```
    #[inline]
    pub fn low_byte(&self) -> u8 {
        self.0[0].low_byte()
    }

    /// Writes the ascending set indices into `buf` as `", "` separated ASCII
    /// decimals and returns the number of bytes written.
    ///
    /// Output stops before the first index whose digits do not fit. Such an
    /// index is never written partially. A separator placed in front of it
    /// may remain in `buf` beyond the returned length.
    ///
    /// # Examples
    /// ```
    /// use light_bitsets::Bitset256;
    ///
    /// let bitset = Bitset256::from_indices([0, 5, 64, 255]).unwrap();
    ///
    /// let mut buf = [0u8; 32];
    /// let len = bitset.write_indices(&mut buf);
    /// assert_eq!(&buf[..len], b"0, 5, 64, 255");
    ///
    /// let mut short = [0u8; 7];
    /// let len = bitset.write_indices(&mut short);
    /// assert_eq!(&short[..len], b"0, 5");
    /// ```
    pub fn write_indices(&self, buf: &mut [u8]) -> usize {
        let separator = SEPARATOR.as_bytes();
        let mut digits = [0u8; DECIMAL_DIGITS];
        let mut len = 0;

        for (n, idx) in self.iter_ones().enumerate() {
            let mut start = len;
            if n > 0 {
                if start + separator.len() > buf.len() {
                    break;
                }
                buf[start..start + separator.len()].copy_from_slice(separator);
                start += separator.len();
            }

            let number = format_decimal(idx, &mut digits);
            if start + number.len() > buf.len() {
                break;
            }
            buf[start..start + number.len()].copy_from_slice(number);
            len = start + number.len();
        }

        len
    }
}

fn format_decimal(mut value: usize, digits: &mut [u8; DECIMAL_DIGITS]) -> &[u8] {
    let mut pos = DECIMAL_DIGITS;
    loop {
        pos -= 1;
        digits[pos] = b'0' + (value % 10) as u8;
        value /= 10;
        if value == 0 {
            break;
        }
    }
    &digits[pos..]
}

impl<W: Word, const WORDS: usize> Default for FixedBitset<W, WORDS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Word, const WORDS: usize> IntoIterator for FixedBitset<W, WORDS> {
    type Item = usize;
    type IntoIter = IterOnes<W, WORDS>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_ones()
    }
}

impl<W: Word, const WORDS: usize> IntoIterator for &FixedBitset<W, WORDS> {
    type Item = usize;
    type IntoIter = IterOnes<W, WORDS>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_ones()
    }
}

/// Renders the set indices in ascending order, separated by `", "`.
///
/// ```
/// use light_bitsets::Bitset8;
///
/// assert_eq!(Bitset8::from(0b1000_0101u8).to_string(), "0, 2, 7");
/// assert_eq!(Bitset8::ZERO.to_string(), "");
/// ```
impl<W: Word, const WORDS: usize> Display for FixedBitset<W, WORDS> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (n, idx) in self.iter_ones().enumerate() {
            if n > 0 {
                f.write_str(SEPARATOR)?;
            }
            write!(f, "{idx}")?;
        }
        Ok(())
    }
}

impl<W: Word, const WORDS: usize> Debug for FixedBitset<W, WORDS> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter_ones()).finish()
    }
}

impl From<u8> for Bitset8 {
    fn from(value: u8) -> Self {
        Self([value])
    }
}

impl<W: Word, const WORDS: usize> From<FixedBitset<W, WORDS>> for u8 {
    fn from(value: FixedBitset<W, WORDS>) -> Self {
        value.low_byte()
    }
}

impl<W: Word, const WORDS: usize> BitAnd for FixedBitset<W, WORDS> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self(from_fn(|i| self.0[i] & rhs.0[i]))
    }
}

impl<W: Word, const WORDS: usize> BitAndAssign for FixedBitset<W, WORDS> {
    fn bitand_assign(&mut self, rhs: Self) {
        for (own, theirs) in self.0.iter_mut().zip(rhs.0) {
            *own &= theirs;
        }
    }
}

impl<W: Word, const WORDS: usize> BitOr for FixedBitset<W, WORDS> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(from_fn(|i| self.0[i] | rhs.0[i]))
    }
}

impl<W: Word, const WORDS: usize> BitOrAssign for FixedBitset<W, WORDS> {
    fn bitor_assign(&mut self, rhs: Self) {
        for (own, theirs) in self.0.iter_mut().zip(rhs.0) {
            *own |= theirs;
        }
    }
}

impl<W: Word, const WORDS: usize> BitXor for FixedBitset<W, WORDS> {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Self(from_fn(|i| self.0[i] ^ rhs.0[i]))
    }
}

impl<W: Word, const WORDS: usize> BitXorAssign for FixedBitset<W, WORDS> {
    fn bitxor_assign(&mut self, rhs: Self) {
        for (own, theirs) in self.0.iter_mut().zip(rhs.0) {
            *own ^= theirs;
        }
    }
}

impl<W: Word, const WORDS: usize> Not for FixedBitset<W, WORDS> {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self(self.0.map(|word| !word))
    }
}

/// Iterator over the indices of set bits, in ascending order.
///
/// Holds a private copy of the bitset. Each step takes the lowest set bit of
/// the copy and clears it.
///
/// Returned by [`FixedBitset::iter_ones()`].
#[derive(Clone, Copy, Debug)]
pub struct IterOnes<W: Word, const WORDS: usize> {
    remaining: FixedBitset<W, WORDS>,
}

impl<W: Word, const WORDS: usize> Iterator for IterOnes<W, WORDS> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.remaining.first_set_bit();
        if idx >= FixedBitset::<W, WORDS>::CAPACITY {
            return None;
        }
        self.remaining.clear_unchecked(idx);
        Some(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remaining.popcount();
        (len, Some(len))
    }
}

impl<W: Word, const WORDS: usize> ExactSizeIterator for IterOnes<W, WORDS> {}

impl<W: Word, const WORDS: usize> FusedIterator for IterOnes<W, WORDS> {}
