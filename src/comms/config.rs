//! Simulation configuration, validated once at the boundary.
//!
//! The core stages never re-check these values; a [`SimulationConfig`] that has
//! passed [`SimulationConfig::validate`] is trusted downstream.

use crate::comms::channel::ChannelCondition;
use crate::comms::modulation::ModulationScheme;
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Lowest accepted Eb/N0, in decibels
pub const EB_N0_MIN_DB: f64 = 0.0;

/// Highest accepted Eb/N0, in decibels
pub const EB_N0_MAX_DB: f64 = 20.0;

/// Kind of message carried over the link
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PayloadMode {
    #[default]
    Text,
    Audio,
}

impl PayloadMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Audio => "audio",
        }
    }
}

impl fmt::Display for PayloadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayloadMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "text" => Ok(Self::Text),
            "2" | "audio" => Ok(Self::Audio),
            other => Err(Error::InvalidConfig(format!(
                "unknown payload mode '{}', expected text or audio",
                other
            ))),
        }
    }
}

/// Parameters for one end-to-end run
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Text or audio payload
    pub mode: PayloadMode,
    /// Modulation scheme used on the channel
    pub scheme: ModulationScheme,
    /// Channel quality in decibels
    pub eb_n0_db: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            mode: PayloadMode::Text,
            scheme: ModulationScheme::Bpsk,
            eb_n0_db: 10.0,
        }
    }
}

impl SimulationConfig {
    /// Create a configuration, validating it before returning
    pub fn new(mode: PayloadMode, scheme: ModulationScheme, eb_n0_db: f64) -> Result<Self> {
        let config = Self {
            mode,
            scheme,
            eb_n0_db,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from its three textual options
    pub fn parse(mode: &str, scheme: &str, eb_n0_db: &str) -> Result<Self> {
        let eb_n0_db = eb_n0_db.trim().parse::<f64>().map_err(|_| {
            Error::InvalidConfig(format!("Eb/N0 '{}' is not a number", eb_n0_db.trim()))
        })?;
        Self::new(mode.parse()?, scheme.parse()?, eb_n0_db)
    }

    /// Checks that Eb/N0 is finite and within the accepted range
    pub fn validate(&self) -> Result<()> {
        if !self.eb_n0_db.is_finite() || !(EB_N0_MIN_DB..=EB_N0_MAX_DB).contains(&self.eb_n0_db)
        {
            return Err(Error::InvalidConfig(format!(
                "Eb/N0 must be between {} and {} dB, got {}",
                EB_N0_MIN_DB, EB_N0_MAX_DB, self.eb_n0_db
            )));
        }
        Ok(())
    }

    /// The channel condition this configuration describes
    pub fn channel_condition(&self) -> ChannelCondition {
        ChannelCondition::Awgn {
            eb_n0_db: self.eb_n0_db,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.mode, PayloadMode::Text);
        assert_eq!(config.scheme, ModulationScheme::Bpsk);
    }

    #[test]
    fn test_range_bounds() {
        assert!(SimulationConfig::new(PayloadMode::Text, ModulationScheme::Qpsk, 0.0).is_ok());
        assert!(SimulationConfig::new(PayloadMode::Audio, ModulationScheme::Qam16, 20.0).is_ok());

        for bad in [-0.5, 20.01, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                SimulationConfig::new(PayloadMode::Text, ModulationScheme::Bpsk, bad),
                Err(Error::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn test_parse_options() {
        let config = SimulationConfig::parse("audio", "16-QAM", " 7.5 ").unwrap();
        assert_eq!(config.mode, PayloadMode::Audio);
        assert_eq!(config.scheme, ModulationScheme::Qam16);
        assert_eq!(config.eb_n0_db, 7.5);
        assert_eq!(
            config.channel_condition(),
            ChannelCondition::Awgn { eb_n0_db: 7.5 }
        );

        let config = SimulationConfig::parse("1", "2", "0").unwrap();
        assert_eq!(config.mode, PayloadMode::Text);
        assert_eq!(config.scheme, ModulationScheme::Qpsk);
    }

    #[test]
    fn test_parse_rejects_unknown_options() {
        assert!(SimulationConfig::parse("video", "bpsk", "5").is_err());
        assert!(SimulationConfig::parse("text", "ofdm", "5").is_err());
        assert!(SimulationConfig::parse("text", "bpsk", "loud").is_err());
        assert!(SimulationConfig::parse("text", "bpsk", "25").is_err());
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(PayloadMode::Text.to_string(), "text");
        assert_eq!("AUDIO".parse::<PayloadMode>().unwrap(), PayloadMode::Audio);
    }
}
