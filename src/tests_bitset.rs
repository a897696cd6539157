use super::*;
use proptest::prelude::*;

#[test]
fn test_capacity() {
    assert_eq!(Bitset8::CAPACITY, 8);
    assert_eq!(Bitset256::CAPACITY, 256);
    assert_eq!(FixedBitset::<u16, 3>::CAPACITY, 48);
    assert_eq!(FixedBitset::<u32, 1>::CAPACITY, 32);
}

#[test]
fn test_word_bit_per_width() {
    macro_rules! test_word_bit {
        ($($word:ty),+ $(,)?) => {
            $(
                assert_eq!(<$word as Word>::BITS, <$word>::BITS as usize);
                assert_eq!(<$word as Word>::bit(0), 1);
                let top = <$word as Word>::bit(<$word as Word>::BITS - 1);
                assert_eq!(top, <$word>::MAX ^ (<$word>::MAX >> 1), "Failed for {}", stringify!($word));
                assert_eq!(Word::trailing_zeros(top) as usize, <$word as Word>::BITS - 1);
            )+
        };
    }

    test_word_bit!(u8, u16, u32, u64);
}

#[test]
fn test_new() {
    macro_rules! test_new_by_width {
        ($($word:ty, $words:expr);+ $(;)?) => {
            $(
                {
                    type Set = FixedBitset<$word, $words>;
                    let bitset = Set::new();
                    for idx in 0..Set::CAPACITY {
                        assert_eq!(bitset.get(idx), Ok(false), "Failed for {}", stringify!($word));
                    }
                    assert_eq!(bitset.popcount(), 0);
                    assert!(bitset.is_zero());
                    assert_eq!(bitset, Set::default());
                    assert_eq!(bitset, Set::ZERO);
                }
            )+
        };
    }

    test_new_by_width!(u8, 1; u8, 3; u16, 2; u32, 5; u64, 1; u64, 4);
}

#[test]
fn test_full() {
    macro_rules! test_full_by_width {
        ($($word:ty, $words:expr);+ $(;)?) => {
            $(
                {
                    type Set = FixedBitset<$word, $words>;
                    let bitset = Set::FULL;
                    assert_eq!(bitset.popcount(), Set::CAPACITY);
                    assert_eq!(bitset.iter_ones().count(), Set::CAPACITY);
                    assert_eq!(!bitset, Set::ZERO);
                }
            )+
        };
    }

    test_full_by_width!(u8, 1; u16, 2; u32, 5; u64, 4);
}

#[test]
fn test_set_and_clear() {
    let mut bitset = Bitset256::new();
    for idx in [0, 1, 63, 64, 127, 128, 200, 255] {
        bitset.set(idx).unwrap();
        assert_eq!(bitset.get(idx), Ok(true));
    }
    assert_eq!(bitset.popcount(), 8);

    bitset.clear(64).unwrap();
    assert_eq!(bitset.get(64), Ok(false));
    assert_eq!(bitset.get(63), Ok(true));
    assert_eq!(bitset.get(127), Ok(true));
    assert_eq!(bitset.popcount(), 7);
}

#[test]
fn test_set_is_idempotent() {
    let mut bitset = Bitset8::new();
    bitset.set(5).unwrap();
    bitset.set(5).unwrap();
    assert_eq!(bitset.popcount(), 1);
    bitset.clear(5).unwrap();
    bitset.clear(5).unwrap();
    assert!(bitset.is_zero());
}

#[test]
fn test_out_of_range() {
    let mut bitset = Bitset256::new();
    let err = Error::IndexOutOfRange {
        index: 256,
        capacity: 256,
    };
    assert_eq!(bitset.get(256), Err(err));
    assert_eq!(bitset.set(256), Err(err));
    assert_eq!(bitset.clear(256), Err(err));
    assert_eq!(bitset.assign(256, true), Err(err));
    assert!(bitset.is_zero());

    let mut small = Bitset8::new();
    assert_eq!(
        small.set(8),
        Err(Error::IndexOutOfRange {
            index: 8,
            capacity: 8
        })
    );
    assert!(small.get(usize::MAX).is_err());
    assert!(small.is_zero());
}

#[test]
fn test_out_of_range_message() {
    let err = Bitset8::new().get(9).unwrap_err();
    assert_eq!(err.to_string(), "bit index 9 out of range, capacity is 8");
}

#[test]
fn test_unchecked_matches_checked() {
    let mut checked = Bitset256::new();
    let mut unchecked = Bitset256::new();
    for idx in [0, 7, 64, 65, 191, 255] {
        checked.set(idx).unwrap();
        unchecked.set_unchecked(idx);
        assert_eq!(unchecked.get_unchecked(idx), checked.get(idx).unwrap());
    }
    assert_eq!(checked, unchecked);

    checked.clear(65).unwrap();
    unchecked.clear_unchecked(65);
    assert_eq!(checked, unchecked);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn test_unchecked_out_of_range_panics() {
    let mut bitset = Bitset256::new();
    bitset.set_unchecked(256);
}

#[test]
fn test_lsb_first_numbering() {
    let mut bitset = Bitset256::new();
    bitset.set(0).unwrap();
    bitset.set(65).unwrap();
    assert_eq!(bitset.words(), &[1, 2, 0, 0]);

    let mut small = Bitset8::new();
    small.set(7).unwrap();
    assert_eq!(u8::from(small), 0b1000_0000);
    assert_eq!(small.first_set_bit(), 7);
}

#[test]
fn test_assign() {
    let mut bitset = Bitset256::new();
    bitset.assign(100, true).unwrap();
    assert_eq!(bitset.get(100), Ok(true));
    bitset.assign(100, false).unwrap();
    assert_eq!(bitset.get(100), Ok(false));
}

#[test]
fn test_set_all_and_clear_all() {
    let mut bitset = Bitset8::new();
    bitset.set_all();
    assert_eq!(u8::from(bitset), u8::MAX);
    bitset.clear_all();
    assert!(bitset.is_zero());
}

#[test]
fn test_from_indices() {
    let bitset = Bitset256::from_indices([255, 0, 64]).unwrap();
    assert_eq!(bitset.words(), &[1, 1, 0, 1 << 63]);
    assert_eq!(
        Bitset256::from_indices([1, 300]),
        Err(Error::IndexOutOfRange {
            index: 300,
            capacity: 256
        })
    );
}

#[test]
fn test_contains() {
    let a = Bitset256::from_indices([1, 64, 200]).unwrap();
    let b = Bitset256::from_indices([64, 200]).unwrap();
    let c = Bitset256::from_indices([64, 201]).unwrap();

    assert!(a.contains(&a));
    assert!(a.contains(&b));
    assert!(!b.contains(&a));
    assert!(!a.contains(&c));
    assert!(a.contains(&Bitset256::ZERO));
    assert!(Bitset256::ZERO.contains(&Bitset256::ZERO));
    assert!(!Bitset256::ZERO.contains(&a));
    assert!(Bitset256::FULL.contains(&a));
}

#[test]
fn test_and_any() {
    let a = Bitset256::from_indices([10, 255]).unwrap();
    let b = Bitset256::from_indices([20, 255]).unwrap();
    let c = Bitset256::from_indices([11, 254]).unwrap();

    assert!(a.and_any(&b));
    assert!(b.and_any(&a));
    assert!(!a.and_any(&c));
    assert!(!a.and_any(&Bitset256::ZERO));
    assert!(!Bitset256::ZERO.and_any(&Bitset256::ZERO));
}

#[test]
fn test_popcount() {
    assert_eq!(Bitset8::from(0b1011_0001u8).popcount(), 4);
    assert_eq!(Bitset256::from_words([u64::MAX, 0, 1, 3]).popcount(), 67);
}

#[test]
fn test_first_set_bit() {
    assert_eq!(Bitset8::ZERO.first_set_bit(), 8);
    assert_eq!(Bitset256::ZERO.first_set_bit(), 256);

    assert_eq!(Bitset8::from(0b0110_0000u8).first_set_bit(), 5);

    let mut bitset = Bitset256::new();
    bitset.set(255).unwrap();
    assert_eq!(bitset.first_set_bit(), 255);
    bitset.set(130).unwrap();
    assert_eq!(bitset.first_set_bit(), 130);
    bitset.set(64).unwrap();
    assert_eq!(bitset.first_set_bit(), 64);
}

#[test]
fn test_iter_ones() {
    let mut bitset = Bitset256::new();
    for idx in [5, 0, 64, 255] {
        bitset.set(idx).unwrap();
    }

    let ones: Vec<usize> = bitset.iter_ones().collect();
    assert_eq!(ones, [0, 5, 64, 255]);
    assert_eq!(ones.len(), bitset.popcount());
    assert_eq!(bitset.iter_ones().len(), 4);
    assert_eq!((&bitset).into_iter().collect::<Vec<_>>(), ones);
    assert_eq!(bitset.into_iter().collect::<Vec<_>>(), ones);
}

#[test]
fn test_iter_ones_works_on_a_copy() {
    let mut bitset = Bitset8::from(0b0000_0110u8);
    let mut ones = bitset.iter_ones();
    assert_eq!(ones.next(), Some(1));

    bitset.clear_all();
    bitset.set(7).unwrap();
    assert_eq!(ones.next(), Some(2));
    assert_eq!(ones.next(), None);

    // a new iterator sees the current value
    assert_eq!(bitset.iter_ones().collect::<Vec<_>>(), [7]);
}

#[test]
fn test_fused_iter_ones() {
    let bitset = Bitset256::from_indices([3]).unwrap();
    let mut ones = bitset.iter_ones();
    assert_eq!(ones.next(), Some(3));
    assert_eq!(ones.next(), None);
    assert_eq!(ones.next(), None);
    assert_eq!(ones.len(), 0);
}

#[test]
fn test_operator_traits() {
    let a = Bitset8::from(0b1100_1010u8);
    let b = Bitset8::from(0b1010_0110u8);

    assert_eq!(u8::from(a & b), 0b1000_0010);
    assert_eq!(u8::from(a | b), 0b1110_1110);
    assert_eq!(u8::from(a ^ b), 0b0110_1100);
    assert_eq!(u8::from(!a), 0b0011_0101);

    let mut tmp = a;
    tmp &= b;
    assert_eq!(tmp, a & b);
    let mut tmp = a;
    tmp |= b;
    assert_eq!(tmp, a | b);
    let mut tmp = a;
    tmp ^= b;
    assert_eq!(tmp, a ^ b);
}

#[test]
fn test_operators_across_lanes() {
    let a = Bitset256::from_indices([0, 64, 128, 192]).unwrap();
    let b = Bitset256::from_indices([64, 255]).unwrap();

    assert_eq!((a & b).iter_ones().collect::<Vec<_>>(), [64]);
    assert_eq!((a | b).iter_ones().collect::<Vec<_>>(), [0, 64, 128, 192, 255]);
    assert_eq!((a ^ b).iter_ones().collect::<Vec<_>>(), [0, 128, 192, 255]);
    assert_eq!((!a).popcount(), 252);
    assert_ne!(a, b);
}

#[test]
fn test_low_byte_conversion() {
    let bitset = Bitset256::from_words([0xABCD, u64::MAX, 0, 0]);
    assert_eq!(bitset.low_byte(), 0xCD);
    assert_eq!(u8::from(bitset), 0xCD);

    let small = Bitset8::from(0x5Au8);
    assert_eq!(u8::from(small), 0x5A);
}

#[test]
fn test_display() {
    let bitset = Bitset256::from_indices([0, 5, 64, 255]).unwrap();
    assert_eq!(bitset.to_string(), "0, 5, 64, 255");
    assert_eq!(Bitset256::ZERO.to_string(), "");
    assert_eq!(Bitset8::from(0b1000_0000u8).to_string(), "7");
}

#[test]
fn test_display_full_bitset_is_not_truncated() {
    let text = Bitset256::FULL.to_string();
    assert!(text.starts_with("0, 1, 2, "));
    assert!(text.ends_with("254, 255"));
    assert_eq!(text.split(SEPARATOR).count(), 256);
}

#[test]
fn test_debug() {
    let bitset = Bitset8::from(0b0000_1001u8);
    assert_eq!(format!("{bitset:?}"), "{0, 3}");
}

#[test]
fn test_write_indices() {
    let bitset = Bitset256::from_indices([0, 5, 64, 255]).unwrap();

    let mut buf = [0u8; 64];
    let len = bitset.write_indices(&mut buf);
    assert_eq!(&buf[..len], b"0, 5, 64, 255");
    assert_eq!(len, bitset.to_string().len());

    let mut exact = [0u8; 13];
    assert_eq!(bitset.write_indices(&mut exact), 13);
    assert_eq!(&exact, b"0, 5, 64, 255");
}

#[test]
fn test_write_indices_truncates_before_number() {
    let bitset = Bitset256::from_indices([0, 5, 64, 255]).unwrap();

    // room for the separator but not for "64"
    let mut buf = [b'x'; 7];
    let len = bitset.write_indices(&mut buf);
    assert_eq!(len, 4);
    assert_eq!(&buf[..len], b"0, 5");
    assert_eq!(&buf[len..], b", x");

    // no room for the separator at all
    let mut buf = [b'x'; 5];
    let len = bitset.write_indices(&mut buf);
    assert_eq!(&buf[..len], b"0, 5");

    // first number does not fit
    let big = Bitset256::from_indices([255]).unwrap();
    let mut buf = [b'x'; 2];
    assert_eq!(big.write_indices(&mut buf), 0);
    assert_eq!(&buf, b"xx");

    let mut empty: [u8; 0] = [];
    assert_eq!(bitset.write_indices(&mut empty), 0);
}

#[test]
fn test_write_indices_empty_bitset() {
    let mut buf = [0u8; 8];
    assert_eq!(Bitset8::ZERO.write_indices(&mut buf), 0);
}

fn arb_bitset256() -> impl Strategy<Value = Bitset256> {
    any::<[u64; 4]>().prop_map(Bitset256::from_words)
}

proptest! {
    #[test]
    fn prop_set_get_clear(indices in proptest::collection::vec(0usize..256, 0..64)) {
        let mut bitset = Bitset256::new();
        for &idx in &indices {
            bitset.set(idx).unwrap();
            prop_assert_eq!(bitset.get(idx), Ok(true));
        }
        for &idx in &indices {
            bitset.clear(idx).unwrap();
            prop_assert_eq!(bitset.get(idx), Ok(false));
        }
        prop_assert!(bitset.is_zero());
    }

    #[test]
    fn prop_iter_ones_is_ascending_and_complete(bitset in arb_bitset256()) {
        let ones: Vec<usize> = bitset.iter_ones().collect();
        prop_assert!(ones.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(ones.len(), bitset.popcount());
        for idx in 0..Bitset256::CAPACITY {
            prop_assert_eq!(bitset.get(idx).unwrap(), ones.binary_search(&idx).is_ok());
        }
        prop_assert_eq!(Bitset256::from_indices(ones).unwrap(), bitset);
    }

    #[test]
    fn prop_first_set_bit_is_first_one(bitset in arb_bitset256()) {
        let expected = bitset.iter_ones().next().unwrap_or(Bitset256::CAPACITY);
        prop_assert_eq!(bitset.first_set_bit(), expected);
    }

    #[test]
    fn prop_contains_matches_and_fallback(a in arb_bitset256(), b in arb_bitset256()) {
        prop_assert_eq!(a.contains(&b), (a & b) == b);
        prop_assert!(a.contains(&a));
        prop_assert!((a | b).contains(&a));
        prop_assert!((a | b).contains(&b));
        prop_assert!(a.contains(&(a & b)));
    }

    #[test]
    fn prop_and_any_matches_shared_indices(a in arb_bitset256(), b in arb_bitset256()) {
        let shared = a.iter_ones().any(|idx| b.get(idx).unwrap());
        prop_assert_eq!(a.and_any(&b), shared);
        prop_assert_eq!(a.and_any(&b), !(a & b).is_zero());
        prop_assert!(!a.and_any(&!a));
    }

    #[test]
    fn prop_write_indices_is_prefix_of_display(bitset in arb_bitset256(), len in 0usize..128) {
        let text = bitset.to_string();
        let mut buf = vec![0u8; len];
        let written = bitset.write_indices(&mut buf);
        prop_assert!(written <= len);
        prop_assert!(text.as_bytes().starts_with(&buf[..written]));
        // never ends mid-number or on a separator
        let tail = &text.as_bytes()[written..];
        prop_assert!(written == 0 || tail.is_empty() || tail.starts_with(SEPARATOR.as_bytes()));
    }
}
