//! Digital modulation schemes.
//!
//! Each scheme maps fixed-size groups of bits onto complex baseband symbols and
//! back. The number of bits per symbol also parameterises the channel's noise
//! scaling, so it travels with the scheme.
//!
//! Currently implemented:
//! - BPSK (1 bit/symbol, real valued)
//! - QPSK (2 bits/symbol)
//! - 16-QAM (4 bits/symbol)
//!
//! Input whose length is not a multiple of the group size is zero-padded on
//! modulation, so demodulation can return up to `bits_per_symbol - 1` extra
//! trailing zero bits.

use crate::comms::bits::Bits;
use crate::error::{Error, Result};
use bitvec::prelude::*;
use num_complex::Complex64;
use std::fmt;
use std::str::FromStr;

/// Whether a scheme's symbols carry a quadrature component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalDomain {
    /// Symbols lie on the real axis; the imaginary part is always zero
    Real,
    /// Symbols use both in-phase and quadrature components
    Complex,
}

/// Capability set shared by every modulation scheme
pub trait Modulation: Send + Sync {
    /// Display name of the scheme
    fn name(&self) -> &'static str;

    /// Number of bits carried by one symbol
    fn bits_per_symbol(&self) -> usize;

    /// Whether symbols are real valued or complex
    fn signal_domain(&self) -> SignalDomain {
        SignalDomain::Complex
    }

    /// Ideal constellation points, indexed by the bit group read MSB first
    fn constellation(&self) -> Vec<Complex64>;

    /// Map bits to symbols, zero-padding the final group
    fn modulate(&self, bits: &BitSlice<u8, Msb0>) -> Vec<Complex64>;

    /// Hard-decision map from symbols back to bits
    fn demodulate(&self, symbols: &[Complex64]) -> Bits;

    /// Number of symbols produced for a given number of bits
    fn symbols_for(&self, bit_count: usize) -> usize {
        bit_count.div_ceil(self.bits_per_symbol())
    }
}

pub mod bpsk;
pub mod qam16;
pub mod qpsk;

pub use bpsk::Bpsk;
pub use qam16::Qam16;
pub use qpsk::Qpsk;

/// Selector for the three supported schemes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ModulationScheme {
    #[default]
    Bpsk,
    Qpsk,
    Qam16,
}

impl ModulationScheme {
    /// All supported schemes, in menu order
    pub const ALL: [ModulationScheme; 3] = [Self::Bpsk, Self::Qpsk, Self::Qam16];

    /// The modulator/demodulator for this scheme
    pub fn modulation(&self) -> &'static dyn Modulation {
        match self {
            Self::Bpsk => &Bpsk,
            Self::Qpsk => &Qpsk,
            Self::Qam16 => &Qam16,
        }
    }

    /// Shorthand for `self.modulation().bits_per_symbol()`
    pub fn bits_per_symbol(&self) -> usize {
        self.modulation().bits_per_symbol()
    }
}

impl fmt::Display for ModulationScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.modulation().name())
    }
}

impl FromStr for ModulationScheme {
    type Err = Error;

    /// Accepts scheme names and the legacy menu codes 1, 2 and 3
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "bpsk" => Ok(Self::Bpsk),
            "2" | "qpsk" => Ok(Self::Qpsk),
            "3" | "16-qam" | "16qam" | "qam16" => Ok(Self::Qam16),
            other => Err(Error::InvalidConfig(format!(
                "unknown modulation scheme '{}', expected BPSK, QPSK or 16-QAM",
                other
            ))),
        }
    }
}
