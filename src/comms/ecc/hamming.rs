//! Hamming(7,4) error correction code implementation.
//!
//! Hamming codes are a family of linear error-correcting codes developed by Richard Hamming in 1950.
//! The (7,4) variant encodes 4 data bits into 7 bits by adding 3 parity bits, and corrects any
//! single-bit error within a block.
//!
//! Parity bits sit at the power-of-two positions of the block, so a codeword is laid out as
//! `[p1, p2, d1, p3, d2, d3, d4]` with
//!
//! - `p1 = d1 ^ d2 ^ d4`
//! - `p2 = d1 ^ d3 ^ d4`
//! - `p3 = d2 ^ d3 ^ d4`
//!
//! On decode the three syndrome bits, read as `s1 + 2*s2 + 4*s3`, give the 1-indexed position
//! of the bit to flip. Two or more errors in one block are not detected: the syndrome still
//! points somewhere and the decoder still flips that bit, so the nibble comes out wrong.
//!
//! Every block is self-contained. A trailing partial block on decode is dropped.

use crate::comms::bits::Bits;
use crate::comms::ecc::ErrorCorrection;
use bitvec::prelude::*;
use std::cmp::min;

/// Data bits per block
const DATA_BITS: usize = 4;

/// Parity bits per block
const PARITY_BITS: usize = 3;

/// Code word length
const TOTAL_BITS: usize = DATA_BITS + PARITY_BITS;

/// Standard (7,4) Hamming code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hamming74;

impl Hamming74 {
    /// Gets the number of data bits per block
    pub fn data_bits(&self) -> usize {
        DATA_BITS
    }

    /// Gets the total code word length (data bits + parity bits)
    pub fn total_bits(&self) -> usize {
        TOTAL_BITS
    }

    /// Gets the number of code bits produced for a given number of data bits
    pub fn encoded_len(&self, data_len: usize) -> usize {
        data_len.div_ceil(DATA_BITS) * TOTAL_BITS
    }

    /// Gets the number of data bits recovered from a given number of code bits
    pub fn decoded_len(&self, encoded_len: usize) -> usize {
        encoded_len / TOTAL_BITS * DATA_BITS
    }

    /// Computes the 1-indexed error position for one code word, 0 when the parity checks pass
    pub fn syndrome(&self, block: &BitSlice<u8, Msb0>) -> usize {
        let mut syndrome = 0;

        for r in 0..PARITY_BITS {
            // Parity over every position whose 1-indexed number has bit r set
            let parity = block
                .iter()
                .by_vals()
                .enumerate()
                .filter(|&(i, bit)| bit && ((i + 1) & (1 << r)) != 0)
                .count()
                % 2;

            syndrome |= parity << r;
        }

        syndrome
    }

    /// Encodes a single block of up to four data bits, missing bits read as zero
    fn encode_block(&self, data: &BitSlice<u8, Msb0>, output: &mut BitSlice<u8, Msb0>) {
        // Data bits go to the non-power-of-two positions
        let mut data_idx = 0;
        for i in 0..TOTAL_BITS {
            if (i + 1).is_power_of_two() {
                continue;
            }

            let bit = data.get(data_idx).map_or(false, |b| *b);
            output.set(i, bit);
            data_idx += 1;
        }

        for r in 0..PARITY_BITS {
            let parity_pos = (1 << r) - 1;
            let mut parity = false;

            for i in 0..TOTAL_BITS {
                if i != parity_pos && ((i + 1) & (1 << r)) != 0 && output[i] {
                    parity = !parity;
                }
            }

            output.set(parity_pos, parity);
        }
    }

    /// Decodes a single code word, flipping the bit the syndrome points at
    fn decode_block(&self, encoded: &BitSlice<u8, Msb0>, output: &mut BitSlice<u8, Msb0>) {
        let mut corrected: BitArray<[u8; 1], Msb0> = BitArray::ZERO;
        corrected[..TOTAL_BITS].copy_from_bitslice(encoded);

        let syndrome = self.syndrome(encoded);
        if syndrome != 0 {
            let error_pos = syndrome - 1;
            let flipped = !corrected[error_pos];
            corrected.set(error_pos, flipped);
        }

        let data_positions = (0..TOTAL_BITS).filter(|i| !(i + 1).is_power_of_two());
        for (data_idx, i) in data_positions.enumerate() {
            output.set(data_idx, corrected[i]);
        }
    }
}

impl ErrorCorrection for Hamming74 {
    fn encode(&self, data: &BitSlice<u8, Msb0>) -> Bits {
        let blocks = data.len().div_ceil(DATA_BITS);
        let mut encoded = bitvec![u8, Msb0; 0; blocks * TOTAL_BITS];

        for block_idx in 0..blocks {
            let input_start = block_idx * DATA_BITS;
            let output_start = block_idx * TOTAL_BITS;

            self.encode_block(
                &data[input_start..min(input_start + DATA_BITS, data.len())],
                &mut encoded[output_start..output_start + TOTAL_BITS],
            );
        }

        encoded
    }

    fn decode(&self, encoded: &BitSlice<u8, Msb0>) -> Bits {
        let blocks = encoded.len() / TOTAL_BITS;
        let mut decoded = bitvec![u8, Msb0; 0; blocks * DATA_BITS];

        for block_idx in 0..blocks {
            let input_start = block_idx * TOTAL_BITS;
            let output_start = block_idx * DATA_BITS;

            self.decode_block(
                &encoded[input_start..input_start + TOTAL_BITS],
                &mut decoded[output_start..output_start + DATA_BITS],
            );
        }

        decoded
    }
}

/// Encodes data bits using standard (7,4) Hamming code
pub fn hamming_encode(data: &BitSlice<u8, Msb0>) -> Bits {
    Hamming74.encode(data)
}

/// Decodes code bits using standard (7,4) Hamming code
pub fn hamming_decode(encoded: &BitSlice<u8, Msb0>) -> Bits {
    Hamming74.decode(encoded)
}
