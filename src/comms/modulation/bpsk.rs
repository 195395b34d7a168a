//! BPSK modulation (1 bit per symbol)
//!
//! Bit 0 → -1
//! Bit 1 → +1

use crate::comms::bits::Bits;
use crate::comms::modulation::{Modulation, SignalDomain};
use bitvec::prelude::*;
use num_complex::Complex64;

/// Binary Phase Shift Keying
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bpsk;

impl Modulation for Bpsk {
    fn name(&self) -> &'static str {
        "BPSK"
    }

    fn bits_per_symbol(&self) -> usize {
        1
    }

    fn signal_domain(&self) -> SignalDomain {
        SignalDomain::Real
    }

    fn constellation(&self) -> Vec<Complex64> {
        vec![Complex64::new(-1.0, 0.0), Complex64::new(1.0, 0.0)]
    }

    fn modulate(&self, bits: &BitSlice<u8, Msb0>) -> Vec<Complex64> {
        bits.iter()
            .by_vals()
            .map(|bit| Complex64::new(if bit { 1.0 } else { -1.0 }, 0.0))
            .collect()
    }

    fn demodulate(&self, symbols: &[Complex64]) -> Bits {
        symbols.iter().map(|s| s.re >= 0.0).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bpsk_mapping() {
        let symbols = Bpsk.modulate(bits![u8, Msb0; 0, 1, 1, 0]);
        let re: Vec<f64> = symbols.iter().map(|s| s.re).collect();
        assert_eq!(re, vec![-1.0, 1.0, 1.0, -1.0]);
        assert!(symbols.iter().all(|s| s.im == 0.0));
    }

    #[test]
    fn test_bpsk_decision_boundary() {
        let symbols = [
            Complex64::new(0.0, 0.0),
            Complex64::new(-1e-9, 5.0),
            Complex64::new(0.3, -5.0),
        ];
        assert_eq!(Bpsk.demodulate(&symbols).as_bitslice(), bits![u8, Msb0; 1, 0, 1]);
    }

    #[test]
    fn test_bpsk_order() {
        assert_eq!(Bpsk.bits_per_symbol(), 1);
        assert_eq!(Bpsk.symbols_for(28), 28);
    }
}
