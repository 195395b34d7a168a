//! End-to-end link orchestration.
//!
//! Transmission runs bit codec, Hamming encoder, modulator and channel in that
//! order; reception runs demodulator, Hamming decoder and bit codec in reverse.
//! A run is a single deterministic pass. Nothing is retried, and a degraded
//! result is returned as data together with a [`Recovery`] assessment.

use crate::comms::bits::{audio_to_bits, bits_to_audio, bits_to_text, text_to_bits, Bits};
use crate::comms::channel::{AwgnChannel, ChannelCondition};
use crate::comms::config::{PayloadMode, SimulationConfig};
use crate::comms::ecc::{ErrorCorrection, Hamming74};
use crate::comms::modulation::ModulationScheme;
use crate::error::{Error, Result};
use bitvec::prelude::*;
use log::{debug, warn};
use num_complex::Complex64;
use rand::Rng;
use rand_chacha::ChaCha20Rng;

/// Peak amplitude below which recovered audio counts as silent
pub const SILENCE_THRESHOLD: f32 = 1e-3;

/// A message carried over the link
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Characters in the U+0000..=U+00FF range
    Text(String),
    /// Normalised samples in [-1.0, 1.0] with their sample rate
    Audio { samples: Vec<f32>, sample_rate: u32 },
}

impl Payload {
    pub fn mode(&self) -> PayloadMode {
        match self {
            Self::Text(_) => PayloadMode::Text,
            Self::Audio { .. } => PayloadMode::Audio,
        }
    }

    /// Whether the payload carries no characters or samples
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Audio { samples, .. } => samples.is_empty(),
        }
    }

    /// Converts the payload to its bit sequence
    pub fn to_bits(&self) -> Result<Bits> {
        match self {
            Self::Text(text) => text_to_bits(text),
            Self::Audio { samples, .. } => Ok(audio_to_bits(samples)),
        }
    }
}

/// Caller-visible assessment of a recovered payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Decoded bits match the source bits exactly
    Intact,
    /// Payload differs from the source but is well formed
    Degraded,
    /// Recovered text contains control characters
    InvalidText { invalid_chars: usize },
    /// Recovered audio peak is below [`SILENCE_THRESHOLD`]
    Silent,
    /// Nothing was recovered from a non-empty source
    Empty,
}

impl Recovery {
    pub fn is_intact(&self) -> bool {
        matches!(self, Self::Intact)
    }
}

/// Every intermediate artifact of one pass over the link
#[derive(Debug, Clone, PartialEq)]
pub struct LinkTrace {
    /// Payload bits before error control
    pub source_bits: Bits,
    /// Hamming(7,4) code bits
    pub encoded_bits: Bits,
    /// Clean modulated symbols
    pub symbols: Vec<Complex64>,
    /// Symbols after the channel
    pub received: Vec<Complex64>,
    /// Hard decisions, including any modulation padding
    pub demodulated_bits: Bits,
    /// Hamming-decoded data bits
    pub decoded_bits: Bits,
}

impl LinkTrace {
    /// Bit errors introduced by the channel, before correction
    pub fn channel_bit_errors(&self) -> usize {
        bit_errors(&self.encoded_bits, &self.demodulated_bits)
    }

    /// Raw bit error rate on the channel
    pub fn channel_ber(&self) -> f64 {
        ratio(self.channel_bit_errors(), self.encoded_bits.len())
    }

    /// Bit errors left after Hamming decoding
    pub fn payload_bit_errors(&self) -> usize {
        bit_errors(&self.source_bits, &self.decoded_bits)
    }

    /// Bit error rate after Hamming decoding
    pub fn payload_ber(&self) -> f64 {
        ratio(self.payload_bit_errors(), self.source_bits.len())
    }

    /// Whether decoding reproduced the source bits exactly
    pub fn is_exact(&self) -> bool {
        self.decoded_bits.len() >= self.source_bits.len()
            && self.decoded_bits[..self.source_bits.len()] == *self.source_bits.as_bitslice()
    }
}

/// Result of running a payload over the link
#[derive(Debug, Clone, PartialEq)]
pub struct Transmission {
    /// Scheme used on the channel
    pub scheme: ModulationScheme,
    /// Channel condition applied
    pub condition: ChannelCondition,
    /// Intermediate artifacts
    pub trace: LinkTrace,
    /// Payload rebuilt from the decoded bits
    pub recovered: Payload,
    /// Assessment of the recovered payload
    pub recovery: Recovery,
}

/// Counts positions where two bit sequences differ, over their common prefix
pub fn bit_errors(a: &BitSlice<u8, Msb0>, b: &BitSlice<u8, Msb0>) -> usize {
    let len = a.len().min(b.len());
    a[..len]
        .iter()
        .by_vals()
        .zip(b[..len].iter().by_vals())
        .filter(|(x, y)| x != y)
        .count()
}

fn ratio(errors: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        errors as f64 / total as f64
    }
}

/// The coded, modulated link
#[derive(Debug, Clone)]
pub struct Pipeline<R: Rng = ChaCha20Rng> {
    scheme: ModulationScheme,
    condition: ChannelCondition,
    expected_mode: Option<PayloadMode>,
    code: Hamming74,
    channel: AwgnChannel<R>,
}

impl Pipeline<ChaCha20Rng> {
    /// Create a pipeline whose channel noise is reproducible
    pub fn with_seed(scheme: ModulationScheme, condition: ChannelCondition, seed: u64) -> Self {
        Self::new(scheme, condition, AwgnChannel::with_seed(seed))
    }

    /// Create a pipeline from a validated configuration, seeded from entropy
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        Self::from_config_with_channel(config, AwgnChannel::from_entropy())
    }

    /// Create a pipeline from a validated configuration with a fixed seed
    pub fn from_config_seeded(config: &SimulationConfig, seed: u64) -> Result<Self> {
        Self::from_config_with_channel(config, AwgnChannel::with_seed(seed))
    }
}

impl<R: Rng> Pipeline<R> {
    /// Create a pipeline that accepts either payload mode
    pub fn new(
        scheme: ModulationScheme,
        condition: ChannelCondition,
        channel: AwgnChannel<R>,
    ) -> Self {
        Self {
            scheme,
            condition,
            expected_mode: None,
            code: Hamming74,
            channel,
        }
    }

    /// Create a pipeline locked to the configuration's payload mode
    pub fn from_config_with_channel(
        config: &SimulationConfig,
        channel: AwgnChannel<R>,
    ) -> Result<Self> {
        config.validate()?;
        let mut pipeline = Self::new(config.scheme, config.channel_condition(), channel);
        pipeline.expected_mode = Some(config.mode);
        Ok(pipeline)
    }

    pub fn scheme(&self) -> ModulationScheme {
        self.scheme
    }

    pub fn condition(&self) -> ChannelCondition {
        self.condition
    }

    /// Runs raw payload bits through encoder, modulator, channel, demodulator and decoder
    pub fn transmit_bits(&mut self, source_bits: &BitSlice<u8, Msb0>) -> Result<LinkTrace> {
        let modulation = self.scheme.modulation();

        let encoded_bits = self.code.encode(source_bits);
        debug!(
            "Hamming(7,4) encoded {} bits into {}",
            source_bits.len(),
            encoded_bits.len()
        );

        let symbols = modulation.modulate(&encoded_bits);
        debug!("{} modulated {} symbols", modulation.name(), symbols.len());

        let received = self.channel.apply(
            &symbols,
            self.condition,
            modulation.bits_per_symbol(),
            modulation.signal_domain(),
        )?;
        debug!("Channel {:?} passed {} symbols", self.condition, received.len());

        let demodulated_bits = modulation.demodulate(&received);
        let decoded_bits = self.code.decode(&demodulated_bits);
        debug!(
            "Demodulated {} bits, decoded {} data bits",
            demodulated_bits.len(),
            decoded_bits.len()
        );

        Ok(LinkTrace {
            source_bits: source_bits.to_bitvec(),
            encoded_bits,
            symbols,
            received,
            demodulated_bits,
            decoded_bits,
        })
    }

    /// Runs a payload over the link and rebuilds it on the far side
    pub fn run(&mut self, payload: &Payload) -> Result<Transmission> {
        if let Some(expected) = self.expected_mode {
            if expected != payload.mode() {
                return Err(Error::PayloadMismatch {
                    expected: expected.as_str(),
                    found: payload.mode().as_str(),
                });
            }
        }

        let source_bits = payload.to_bits()?;
        debug!(
            "Converted {} payload into {} bits",
            payload.mode(),
            source_bits.len()
        );

        let trace = self.transmit_bits(&source_bits)?;
        let recovered = match payload {
            Payload::Text(_) => Payload::Text(bits_to_text(&trace.decoded_bits)),
            Payload::Audio { sample_rate, .. } => {
                let (samples, sample_rate) = bits_to_audio(&trace.decoded_bits, *sample_rate);
                Payload::Audio {
                    samples,
                    sample_rate,
                }
            }
        };

        let recovery = assess(payload, &recovered, &trace);
        if !recovery.is_intact() {
            warn!(
                "Recovered {} payload is {:?} ({} channel bit errors, {} after decoding)",
                payload.mode(),
                recovery,
                trace.channel_bit_errors(),
                trace.payload_bit_errors()
            );
        }

        Ok(Transmission {
            scheme: self.scheme,
            condition: self.condition,
            trace,
            recovered,
            recovery,
        })
    }
}

fn assess(source: &Payload, recovered: &Payload, trace: &LinkTrace) -> Recovery {
    if trace.is_exact() {
        return Recovery::Intact;
    }
    if recovered.is_empty() && !source.is_empty() {
        return Recovery::Empty;
    }

    match recovered {
        Payload::Text(text) => {
            let invalid_chars = text
                .chars()
                .filter(|c| c.is_control() && !matches!(c, '\t' | '\n' | '\r'))
                .count();
            if invalid_chars > 0 {
                Recovery::InvalidText { invalid_chars }
            } else {
                Recovery::Degraded
            }
        }
        Payload::Audio { samples, .. } => {
            let peak = samples.iter().fold(0.0f32, |peak, s| peak.max(s.abs()));
            if peak < SILENCE_THRESHOLD {
                Recovery::Silent
            } else {
                Recovery::Degraded
            }
        }
    }
}
