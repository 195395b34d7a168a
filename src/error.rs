//! Error types shared across the link simulation.
//!
//! Only hard failures live here. Lossy outcomes (truncated bit tails,
//! mis-corrected Hamming blocks, garbled text) are returned as ordinary data.

use thiserror::Error;

/// Result type for link operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the link simulation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A value the core cannot process
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A text character with no 8-bit representation
    #[error("character {ch:?} at position {position} does not fit in 8 bits")]
    UnsupportedCharacter { ch: char, position: usize },

    /// A configuration option outside its recognised set or range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A pipeline configured for one payload mode received the other
    #[error("pipeline expects a {expected} payload, got {found}")]
    PayloadMismatch {
        expected: &'static str,
        found: &'static str,
    },
}
