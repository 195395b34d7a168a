//! Forward error correction for the link.
//!
//! Codes here operate on flat bit sequences rather than bytes, so that the
//! output of one stage can be handed straight to the modulator.
//!
//! Currently implemented:
//! - Hamming(7,4) with single-bit correction per block
//!
//! # Examples
//!
//! ```rust
//! use commlink::comms::bits::text_to_bits;
//! use commlink::comms::ecc::{hamming_decode, hamming_encode};
//!
//! let data = text_to_bits("HI").unwrap();
//! let encoded = hamming_encode(&data);
//! assert_eq!(encoded.len(), 28);
//! assert_eq!(hamming_decode(&encoded), data);
//! ```

use crate::comms::bits::Bits;
use bitvec::prelude::*;

/// Trait for block error correction codes over bit sequences
pub trait ErrorCorrection {
    /// Encode data bits, padding the final block with zeros if short
    fn encode(&self, data: &BitSlice<u8, Msb0>) -> Bits;

    /// Decode code bits, correcting errors where the code allows
    fn decode(&self, encoded: &BitSlice<u8, Msb0>) -> Bits;
}

/// Hamming(7,4) block code
pub mod hamming;
pub use hamming::{hamming_decode, hamming_encode, Hamming74};
