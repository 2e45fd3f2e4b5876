//! Session configuration
//!
//! Timing only. Pin assignments are a property of the board and live in
//! the firmware.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default inactivity window before a partial packet is dropped
pub const DEFAULT_PACKET_TIMEOUT_MS: u32 = 100;

/// Default time the printer reports itself busy after PRINT
pub const DEFAULT_PRETEND_PRINT_MS: u32 = 2000;

/// Default interval between deadline polls
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 10;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A duration is zero
    ZeroDuration,
    /// Poll interval is not shorter than the packet timeout
    PollTooSlow,
}

/// Timing of the session controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SessionConfig {
    /// Silence after which a partial packet is dropped (ms)
    pub packet_timeout_ms: u32,
    /// Busy time after a PRINT command (ms)
    pub pretend_print_ms: u32,
    /// How often deadlines are checked (ms)
    pub poll_interval_ms: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl SessionConfig {
    /// Timing matching the real printer
    pub const DEFAULT: Self = Self {
        packet_timeout_ms: DEFAULT_PACKET_TIMEOUT_MS,
        pretend_print_ms: DEFAULT_PRETEND_PRINT_MS,
        poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
    };

    /// Check the timing is usable
    ///
    /// The poll interval bounds how late a deadline is noticed, so it has
    /// to be shorter than the packet timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.packet_timeout_ms == 0 || self.pretend_print_ms == 0 || self.poll_interval_ms == 0
        {
            return Err(ConfigError::ZeroDuration);
        }
        if self.poll_interval_ms >= self.packet_timeout_ms {
            return Err(ConfigError::PollTooSlow);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(SessionConfig::default(), SessionConfig::DEFAULT);
        assert_eq!(SessionConfig::DEFAULT.validate(), Ok(()));
        assert_eq!(SessionConfig::DEFAULT.packet_timeout_ms, 100);
        assert_eq!(SessionConfig::DEFAULT.pretend_print_ms, 2000);
    }

    #[test]
    fn test_zero_rejected() {
        let config = SessionConfig {
            pretend_print_ms: 0,
            ..SessionConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroDuration));
    }

    #[test]
    fn test_slow_poll_rejected() {
        let config = SessionConfig {
            packet_timeout_ms: 50,
            poll_interval_ms: 50,
            ..SessionConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::PollTooSlow));
    }
}
