use core::fmt::Debug;
use core::hash::Hash;
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

mod sealed {
    /// Restricts [`Word`](super::Word) to the primitive unsigned integers.
    pub trait Sealed {}
}

/// An unsigned machine word used as backing storage of a
/// [`FixedBitset`](crate::FixedBitset).
///
/// Implemented for `u8`, `u16`, `u32` and `u64`. The trait is sealed.
pub trait Word:
    sealed::Sealed
    + Copy
    + Default
    + Eq
    + Hash
    + Debug
    + BitAnd<Output = Self>
    + BitAndAssign
    + BitOr<Output = Self>
    + BitOrAssign
    + BitXor<Output = Self>
    + BitXorAssign
    + Not<Output = Self>
{
    /// Number of bits in the word.
    const BITS: usize;
    /// All bits unset.
    const ZERO: Self;
    /// All bits set.
    const ONES: Self;

    /// Returns a word with only bit `pos` set, counting from the least
    /// significant bit. `pos` must be below [`Word::BITS`].
    fn bit(pos: usize) -> Self;

    /// Number of set bits.
    fn count_ones(self) -> u32;

    /// Number of unset bits below the lowest set bit.
    fn trailing_zeros(self) -> u32;

    /// The lowest eight bits, truncating the rest.
    fn low_byte(self) -> u8;
}

macro_rules! impl_word {
    ($($t:ty),+ $(,)?) => {
        $(
            impl sealed::Sealed for $t {}

            impl Word for $t {
                const BITS: usize = <$t>::BITS as usize;
                const ZERO: Self = 0;
                const ONES: Self = <$t>::MAX;

                #[inline]
                fn bit(pos: usize) -> Self {
                    debug_assert!(pos < <Self as Word>::BITS, "bit position {pos} exceeds word width");
                    1 << pos
                }

                #[inline]
                fn count_ones(self) -> u32 {
                    <$t>::count_ones(self)
                }

                #[inline]
                fn trailing_zeros(self) -> u32 {
                    <$t>::trailing_zeros(self)
                }

                #[inline]
                fn low_byte(self) -> u8 {
                    self as u8
                }
            }
        )+
    };
}

impl_word!(u8, u16, u32, u64);
