//! QPSK modulation (2 bits per symbol)
//!
//! Each bit of the pair drives one axis independently:
//! (0,0) → -1 - j
//! (0,1) → -1 + j
//! (1,0) → +1 - j
//! (1,1) → +1 + j
//!
//! Symbols are not normalised to unit energy.

use crate::comms::bits::Bits;
use crate::comms::modulation::Modulation;
use bitvec::prelude::*;
use num_complex::Complex64;

/// Quadrature Phase Shift Keying
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Qpsk;

fn level(bit: bool) -> f64 {
    if bit {
        1.0
    } else {
        -1.0
    }
}

impl Modulation for Qpsk {
    fn name(&self) -> &'static str {
        "QPSK"
    }

    fn bits_per_symbol(&self) -> usize {
        2
    }

    fn constellation(&self) -> Vec<Complex64> {
        (0..4u8)
            .map(|sym| Complex64::new(level(sym & 0b10 != 0), level(sym & 0b01 != 0)))
            .collect()
    }

    fn modulate(&self, bits: &BitSlice<u8, Msb0>) -> Vec<Complex64> {
        bits.chunks(2)
            .map(|pair| {
                let b1 = pair[0];
                let b2 = pair.get(1).map_or(false, |b| *b);
                Complex64::new(level(b1), level(b2))
            })
            .collect()
    }

    fn demodulate(&self, symbols: &[Complex64]) -> Bits {
        symbols
            .iter()
            .flat_map(|s| [s.re >= 0.0, s.im >= 0.0])
            .collect()
    }
}
