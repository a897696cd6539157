//! Fixed-capacity bitsets, a block-growable bit vector and a sparse set,
//! written in pure Rust.
//! `no_std` (with `alloc`), no `unsafe`.
//!
//! The types are building blocks for things like entity/component masks,
//! visibility masks or free-list tracking. None of them is thread-safe on
//! its own; share them behind your own synchronization.
//!
//! # Examples
//! ```
//! use light_bitsets::{BitVector, Bitset256, SparseSet};
//!
//! let mut mask = Bitset256::new();
//! mask.set(3).unwrap();
//! mask.set(64).unwrap();
//! assert_eq!(mask.to_string(), "3, 64");
//!
//! let mut entities = BitVector::new();
//! entities.set(1000);
//! assert_eq!(entities.iter_ones().collect::<Vec<_>>(), [1000]);
//!
//! let mut positions = SparseSet::new();
//! positions.add(1000, (1.0_f32, 2.0_f32)).unwrap();
//! assert_eq!(positions.get(1000), Ok(&(1.0, 2.0)));
//! ```
//!
//! # Features
//!
//! - [`FixedBitset`]: `Copy` bitset over an array of machine words, with the
//!   aliases [`Bitset8`] (one `u8`) and [`Bitset256`] (four `u64` lanes)
//!   - checked `get` / `set` / `clear` / `assign` and unchecked fast paths
//!   - `contains` (subset test), `and_any` (intersection test)
//!   - `popcount`, `first_set_bit`, ascending `iter_ones`
//!   - `&`, `|`, `^`, `!`, `&=`, `|=`, `^=`
//!   - `", "` separated rendering, owned or into a caller buffer
//! - [`BitVector`]: unbounded keys stored in [`Bitset256`] blocks, with
//!   `union_with`, `intersects` and copy-on-write `clone_and_set`
//! - [`SparseSet`]: O(1) `has` / `get` / `add` / `remove` for sparse keys
//!   with densely packed values
//!
//! Growth of the allocating types is reported through [`tracing`] at `trace`
//! level.

#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod bit_vector;
mod bitset;
mod error;
mod sparse_set;
mod word;

#[cfg(test)]
mod tests_bitset;

pub use bit_vector::{BitVector, IterKeys};
pub use bitset::{Bitset8, Bitset256, FixedBitset, IterOnes, SEPARATOR};
pub use error::{Error, Result};
pub use sparse_set::{INVALID_INDEX, SparseSet};
pub use word::Word;
