//! Bit error rate sweep across Eb/N0.
//!
//! Runs the same bit sequence over the coded link at each requested Eb/N0 and
//! records the raw channel BER next to the BER left after Hamming decoding.
//! Points run in parallel; each derives its own generator from the base seed
//! and its index, so results do not depend on scheduling.

use crate::comms::channel::{AwgnChannel, ChannelCondition};
use crate::comms::modulation::ModulationScheme;
use crate::comms::pipeline::Pipeline;
use crate::error::Result;
use bitvec::prelude::*;
use log::debug;
use rayon::prelude::*;

/// One point of a BER curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BerPoint {
    /// Channel quality in decibels
    pub eb_n0_db: f64,
    /// Bit error rate on the channel, before correction
    pub channel_ber: f64,
    /// Bit error rate after Hamming decoding
    pub payload_ber: f64,
}

/// Measures channel and post-decoding BER at each Eb/N0 point.
///
/// # Arguments
///
/// * `scheme` - Modulation scheme under test
/// * `bits` - Payload bits sent at every point
/// * `eb_n0_points` - Eb/N0 values in decibels, reported in the same order
/// * `seed` - Base seed for the per-point noise generators
pub fn ber_sweep(
    scheme: ModulationScheme,
    bits: &BitSlice<u8, Msb0>,
    eb_n0_points: &[f64],
    seed: u64,
) -> Result<Vec<BerPoint>> {
    debug!(
        "Sweeping {} over {} Eb/N0 points with {} bits each",
        scheme,
        eb_n0_points.len(),
        bits.len()
    );

    eb_n0_points
        .par_iter()
        .enumerate()
        .map(|(index, &eb_n0_db)| {
            let channel = AwgnChannel::with_seed(seed.wrapping_add(index as u64));
            let mut pipeline = Pipeline::new(scheme, ChannelCondition::Awgn { eb_n0_db }, channel);
            let trace = pipeline.transmit_bits(bits)?;

            Ok(BerPoint {
                eb_n0_db,
                channel_ber: trace.channel_ber(),
                payload_ber: trace.payload_ber(),
            })
        })
        .collect()
}
