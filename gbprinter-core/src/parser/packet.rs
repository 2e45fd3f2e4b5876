//! Packet fields as they are parsed

use gbprinter_protocol::{Command, IMAGE_BUFFER_SIZE, SETTINGS_BUFFER_SIZE};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Buffer a packet's payload is written into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PayloadTarget {
    /// Command carries no payload
    #[default]
    None,
    /// PRINT settings
    Settings,
    /// DATA tiles
    Image,
}

impl PayloadTarget {
    /// Buffer selected by a command
    pub fn for_command(command: Command) -> Self {
        match command {
            Command::Data => PayloadTarget::Image,
            Command::Print => PayloadTarget::Settings,
            Command::Init | Command::Inquiry | Command::Unknown => PayloadTarget::None,
        }
    }

    /// Capacity of the buffer, if there is one
    pub fn capacity(&self) -> Option<usize> {
        match self {
            PayloadTarget::None => None,
            PayloadTarget::Settings => Some(SETTINGS_BUFFER_SIZE),
            PayloadTarget::Image => Some(IMAGE_BUFFER_SIZE),
        }
    }
}

/// The packet currently (or last) parsed
///
/// Header fields are cleared when the next command byte arrives, so after
/// a packet completes this still describes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Packet {
    /// Decoded command
    pub command: Command,
    /// Raw command byte
    pub command_byte: u8,
    /// Compression flag
    pub compression: u8,
    /// Payload length, only valid once both length bytes are in
    pub data_length: u16,
    /// Where the payload goes
    pub target: PayloadTarget,
    /// Checksum sent by the console
    pub checksum_received: u16,
    /// Running sum of header and payload bytes
    pub checksum_computed: u16,
    /// Device ID shifted out in the acknowledgement slot
    pub device_ack: u8,
    /// Status byte shifted out in the last slot
    pub status_byte: u8,
}

impl Default for Packet {
    fn default() -> Self {
        Self::new()
    }
}

impl Packet {
    /// An empty packet
    pub const fn new() -> Self {
        Self {
            command: Command::Unknown,
            command_byte: 0,
            compression: 0,
            data_length: 0,
            target: PayloadTarget::None,
            checksum_received: 0,
            checksum_computed: 0,
            device_ack: 0,
            status_byte: 0,
        }
    }

    /// Clear the header and start a packet with its command byte
    pub fn start(&mut self, command_byte: u8) {
        *self = Self {
            command: Command::from_byte(command_byte),
            command_byte,
            ..Self::new()
        };
    }

    /// Add a byte to the running checksum
    pub fn accumulate(&mut self, byte: u8) {
        self.checksum_computed = self.checksum_computed.wrapping_add(byte as u16);
    }

    /// Received and computed checksums agree
    pub fn checksum_ok(&self) -> bool {
        self.checksum_computed == self.checksum_received
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_for_command() {
        assert_eq!(PayloadTarget::for_command(Command::Data), PayloadTarget::Image);
        assert_eq!(PayloadTarget::for_command(Command::Print), PayloadTarget::Settings);
        assert_eq!(PayloadTarget::for_command(Command::Init), PayloadTarget::None);
        assert_eq!(PayloadTarget::for_command(Command::Inquiry), PayloadTarget::None);
        assert_eq!(PayloadTarget::for_command(Command::Unknown), PayloadTarget::None);
    }

    #[test]
    fn test_capacity() {
        assert_eq!(PayloadTarget::None.capacity(), None);
        assert_eq!(PayloadTarget::Settings.capacity(), Some(4));
        assert_eq!(PayloadTarget::Image.capacity(), Some(650));
    }

    #[test]
    fn test_start_clears_header() {
        let mut packet = Packet::new();
        packet.data_length = 640;
        packet.checksum_received = 0x1234;
        packet.status_byte = 0x08;

        packet.start(0x04);
        assert_eq!(packet.command, Command::Data);
        assert_eq!(packet.data_length, 0);
        assert_eq!(packet.checksum_received, 0);
        assert_eq!(packet.status_byte, 0);
        assert_eq!(packet.checksum_computed, 0);
    }

    #[test]
    fn test_checksum_wraps() {
        let mut packet = Packet::new();
        packet.checksum_computed = 0xFFFF;
        packet.accumulate(0x02);
        assert_eq!(packet.checksum_computed, 0x0001);
    }
}
