//! 16-QAM modulation (4 bits per symbol)
//!
//! Rectangular constellation on the {-3, -1, +1, +3} grid. The first bit pair
//! sets the in-phase level and the second pair the quadrature level, each
//! through the Gray map
//!
//! (0,0) → -3
//! (0,1) → -1
//! (1,1) → +1
//! (1,0) → +3
//!
//! The demodulator does not search for the nearest point. Per axis it emits a
//! sign bit `v > 0` followed by a magnitude bit `|v| < 2`. Note the strict
//! comparison: a value of exactly zero reads as negative.

use crate::comms::bits::Bits;
use crate::comms::modulation::Modulation;
use bitvec::prelude::*;
use num_complex::Complex64;

/// Magnitude threshold separating the inner (±1) and outer (±3) levels
const MAGNITUDE_THRESHOLD: f64 = 2.0;

/// 16-point Quadrature Amplitude Modulation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Qam16;

fn level(b1: bool, b2: bool) -> f64 {
    match (b1, b2) {
        (false, false) => -3.0,
        (false, true) => -1.0,
        (true, true) => 1.0,
        (true, false) => 3.0,
    }
}

fn slice(value: f64) -> [bool; 2] {
    [value > 0.0, value.abs() < MAGNITUDE_THRESHOLD]
}

impl Modulation for Qam16 {
    fn name(&self) -> &'static str {
        "16-QAM"
    }

    fn bits_per_symbol(&self) -> usize {
        4
    }

    fn constellation(&self) -> Vec<Complex64> {
        (0..16u8)
            .map(|sym| {
                let bit = |shift: u8| (sym >> shift) & 1 == 1;
                Complex64::new(level(bit(3), bit(2)), level(bit(1), bit(0)))
            })
            .collect()
    }

    fn modulate(&self, bits: &BitSlice<u8, Msb0>) -> Vec<Complex64> {
        bits.chunks(4)
            .map(|group| {
                let bit = |i: usize| group.get(i).map_or(false, |b| *b);
                Complex64::new(level(bit(0), bit(1)), level(bit(2), bit(3)))
            })
            .collect()
    }

    fn demodulate(&self, symbols: &[Complex64]) -> Bits {
        symbols
            .iter()
            .flat_map(|s| {
                let [i_sign, i_mag] = slice(s.re);
                let [q_sign, q_mag] = slice(s.im);
                [i_sign, i_mag, q_sign, q_mag]
            })
            .collect()
    }
}
