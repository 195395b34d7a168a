//! Point-to-point digital link simulation.
//!
//! The link is a straight chain of stages:
//! - Bit codec (text characters or audio samples to and from bits)
//! - Hamming(7,4) forward error correction
//! - BPSK, QPSK and 16-QAM modulation
//! - Additive white Gaussian noise channel
//!
//! The [`pipeline`] module runs the chain forward for transmission and in
//! reverse for reception, keeping every intermediate artifact.
//!
//! # Examples
//!
//! ```
//! use commlink::comms::{ChannelCondition, ModulationScheme, Payload, Pipeline};
//!
//! let mut pipeline = Pipeline::with_seed(
//!     ModulationScheme::Bpsk,
//!     ChannelCondition::Awgn { eb_n0_db: 100.0 },
//!     7,
//! );
//! let transmission = pipeline.run(&Payload::Text("HI".to_string())).unwrap();
//! assert_eq!(transmission.recovered, Payload::Text("HI".to_string()));
//! ```

pub mod bits;
pub mod channel;
pub mod config;
pub mod ecc;
pub mod modulation;
pub mod pipeline;
pub mod sweep;

pub use bits::{audio_to_bits, bits_to_audio, bits_to_text, text_to_bits, Bits};
pub use channel::{noise_power, AwgnChannel, ChannelCondition};
pub use config::{PayloadMode, SimulationConfig};
pub use ecc::{hamming_decode, hamming_encode, ErrorCorrection, Hamming74};
pub use modulation::{Bpsk, Modulation, ModulationScheme, Qam16, Qpsk, SignalDomain};
pub use pipeline::{bit_errors, LinkTrace, Payload, Pipeline, Recovery, Transmission};
pub use sweep::{ber_sweep, BerPoint};
