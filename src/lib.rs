pub mod comms;
pub mod error;

pub use comms::{bits, channel, config, ecc, modulation, pipeline, sweep};
pub use error::{Error, Result};
