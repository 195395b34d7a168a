//! Channel simulation.
//!
//! Additive white Gaussian noise scaled to a target Eb/N0. Noise power is
//! referenced to the measured average power of the signal being sent:
//!
//! `noise_power = signal_power / (2 * bits_per_symbol * 10^(EbN0_dB / 10))`
//!
//! Complex signals get independent noise on each component with standard
//! deviation `sqrt(noise_power)`. Real signals have no quadrature component to
//! absorb half the noise, so the single component gets `sqrt(2 * noise_power)`.
//! Nothing is clipped after the noise is added.

use crate::comms::modulation::SignalDomain;
use crate::error::{Error, Result};
use log::trace;
use num_complex::Complex64;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rand_distr::{Distribution, Normal};

/// How the channel stage treats the signal
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChannelCondition {
    /// Skip the channel stage, as if Eb/N0 were infinite
    Noiseless,
    /// Additive white Gaussian noise at the given Eb/N0 in decibels
    Awgn { eb_n0_db: f64 },
}

/// Converts a ratio in decibels to a linear ratio
pub fn db_to_linear(db: f64) -> f64 {
    10f64.powf(db / 10.0)
}

/// Mean of the squared magnitudes, zero for an empty signal
pub fn signal_power(signal: &[Complex64]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    signal.iter().map(|s| s.norm_sqr()).sum::<f64>() / signal.len() as f64
}

/// Computes the per-component noise power the channel adds for a signal.
///
/// # Arguments
///
/// * `signal` - The clean modulated symbols
/// * `eb_n0_db` - Target energy per bit to noise density ratio, in decibels
/// * `bits_per_symbol` - Bits carried by each symbol of the scheme in use
///
/// # Returns
///
/// The noise power, or an error for a NaN Eb/N0 or zero bits per symbol
pub fn noise_power(signal: &[Complex64], eb_n0_db: f64, bits_per_symbol: usize) -> Result<f64> {
    if eb_n0_db.is_nan() {
        return Err(Error::InvalidInput("Eb/N0 must not be NaN".to_string()));
    }
    if bits_per_symbol == 0 {
        return Err(Error::InvalidInput(
            "Bits per symbol must be positive".to_string(),
        ));
    }

    let eb_n0 = db_to_linear(eb_n0_db);
    Ok(signal_power(signal) / (2.0 * bits_per_symbol as f64 * eb_n0))
}

/// AWGN channel driven by an injectable random source
#[derive(Debug, Clone)]
pub struct AwgnChannel<R: Rng = ChaCha20Rng> {
    rng: R,
}

impl AwgnChannel<ChaCha20Rng> {
    /// Create a channel with a reproducible noise sequence
    pub fn with_seed(seed: u64) -> Self {
        Self::new(ChaCha20Rng::seed_from_u64(seed))
    }

    /// Create a channel seeded from system entropy
    pub fn from_entropy() -> Self {
        Self::new(ChaCha20Rng::from_entropy())
    }
}

impl<R: Rng> AwgnChannel<R> {
    /// Create a channel drawing noise from the given generator
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Adds Gaussian noise to a signal.
    ///
    /// The output has the same length as the input. An empty signal, or an
    /// Eb/N0 of positive infinity, passes through unchanged.
    pub fn add_noise(
        &mut self,
        signal: &[Complex64],
        eb_n0_db: f64,
        bits_per_symbol: usize,
        domain: SignalDomain,
    ) -> Result<Vec<Complex64>> {
        let noise_power = noise_power(signal, eb_n0_db, bits_per_symbol)?;
        if signal.is_empty() || noise_power == 0.0 {
            return Ok(signal.to_vec());
        }

        let sigma = match domain {
            SignalDomain::Complex => noise_power.sqrt(),
            SignalDomain::Real => (2.0 * noise_power).sqrt(),
        };
        trace!(
            "AWGN at {} dB over {} symbols: noise power {:.6}, sigma {:.6}",
            eb_n0_db,
            signal.len(),
            noise_power,
            sigma
        );

        let normal = Normal::new(0.0, sigma).map_err(|e| {
            Error::InvalidInput(format!("Cannot build noise distribution: {}", e))
        })?;

        let rng = &mut self.rng;
        let noisy = match domain {
            SignalDomain::Complex => signal
                .iter()
                .map(|s| s + Complex64::new(normal.sample(rng), normal.sample(rng)))
                .collect(),
            SignalDomain::Real => signal
                .iter()
                .map(|s| Complex64::new(s.re + normal.sample(rng), s.im))
                .collect(),
        };

        Ok(noisy)
    }

    /// Applies a channel condition, skipping the noise draw when noiseless
    pub fn apply(
        &mut self,
        signal: &[Complex64],
        condition: ChannelCondition,
        bits_per_symbol: usize,
        domain: SignalDomain,
    ) -> Result<Vec<Complex64>> {
        match condition {
            ChannelCondition::Noiseless => Ok(signal.to_vec()),
            ChannelCondition::Awgn { eb_n0_db } => {
                self.add_noise(signal, eb_n0_db, bits_per_symbol, domain)
            }
        }
    }
}
