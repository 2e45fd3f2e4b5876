//! Command byte values

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// Wire format values
const COMMAND_INIT: u8 = 0x01;
const COMMAND_PRINT: u8 = 0x02;
const COMMAND_DATA: u8 = 0x04;
const COMMAND_INQUIRY: u8 = 0x0F;

/// Packet command sent by the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Command {
    /// Clear the printer's buffers
    Init,
    /// Start printing, payload carries the print settings
    Print,
    /// Image data, payload carries tile bytes
    Data,
    /// Status request
    Inquiry,
    /// Any other byte
    #[default]
    Unknown,
}

impl Command {
    /// Parse a command from its wire format byte
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            COMMAND_INIT => Command::Init,
            COMMAND_PRINT => Command::Print,
            COMMAND_DATA => Command::Data,
            COMMAND_INQUIRY => Command::Inquiry,
            _ => Command::Unknown,
        }
    }

    /// Convert to wire format byte
    ///
    /// `Unknown` has no wire value and encodes as zero.
    pub fn to_byte(self) -> u8 {
        match self {
            Command::Init => COMMAND_INIT,
            Command::Print => COMMAND_PRINT,
            Command::Data => COMMAND_DATA,
            Command::Inquiry => COMMAND_INQUIRY,
            Command::Unknown => 0x00,
        }
    }
}
