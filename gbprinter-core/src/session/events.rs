//! What the session reports to its consumer

use gbprinter_protocol::Command;

use crate::parser::{ParseState, ProtocolViolation};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Short description of a completed packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PacketSummary {
    pub command: Command,
    pub compression: u8,
    pub data_length: u16,
    pub checksum_ok: bool,
    /// Status byte answered to the console
    pub status: u8,
    /// The previous ready signal had not been cleared yet
    pub overwrote_pending: bool,
}

/// Session events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionEvent {
    /// A packet has been parsed and answered
    PacketReady(PacketSummary),
    /// A packet was rejected and the link resynchronized
    ProtocolViolation(ProtocolViolation),
    /// The console went silent mid-packet
    Timeout {
        /// Parser state when the link went quiet
        state: ParseState,
    },
    /// The pretend print is over
    PrintFinished,
}

/// Running counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SessionStats {
    /// Completed packets
    pub packets: u32,
    /// Completed packets with a bad checksum
    pub checksum_errors: u32,
    /// Rejected packets
    pub violations: u32,
    /// Inactivity resyncs
    pub timeouts: u32,
    /// Ready signals raised while the previous one was pending
    pub overwritten: u32,
}

impl SessionStats {
    pub const fn new() -> Self {
        Self {
            packets: 0,
            checksum_errors: 0,
            violations: 0,
            timeouts: 0,
            overwritten: 0,
        }
    }
}
