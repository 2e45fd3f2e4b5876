//! Parser states, outputs and protocol violations

use gbprinter_protocol::Command;

/// Stage of packet parsing (the sync word is handled by the streamer)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseState {
    /// Waiting for the command byte
    Command,
    /// Waiting for the compression flag
    Compression,
    /// Waiting for the low length byte
    LengthLow,
    /// Waiting for the high length byte
    LengthHigh,
    /// Collecting payload bytes
    Payload,
    /// Waiting for the low checksum byte
    ChecksumLow,
    /// Waiting for the high checksum byte
    ChecksumHigh,
    /// Device ID is being shifted out
    DeviceId,
    /// Status byte is being shifted out
    Status,
    /// Packet complete
    PacketReceived,
}

impl ParseState {
    /// Check if a packet is partially received
    pub fn is_mid_packet(&self) -> bool {
        !matches!(self, ParseState::Command | ParseState::PacketReceived)
    }

    /// Check if this state's bytes count towards the checksum
    pub fn is_checksummed(&self) -> bool {
        matches!(
            self,
            ParseState::Command
                | ParseState::Compression
                | ParseState::LengthLow
                | ParseState::LengthHigh
                | ParseState::Payload
        )
    }
}

/// Output of feeding one byte to the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParserEvent {
    /// Nothing to do
    None,
    /// Byte to shift out in the next byte frame
    TransmitByte(u8),
    /// A whole packet has been parsed
    PacketReady,
}

/// Packet that cannot be parsed safely
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolViolation {
    /// Non-zero length for a command that has no payload buffer
    UnexpectedPayload { command: Command, length: u16 },
    /// Payload longer than the command's buffer
    PayloadOverrun {
        command: Command,
        length: u16,
        capacity: u16,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mid_packet() {
        assert!(!ParseState::Command.is_mid_packet());
        assert!(!ParseState::PacketReceived.is_mid_packet());
        assert!(ParseState::Payload.is_mid_packet());
        assert!(ParseState::Status.is_mid_packet());
    }

    #[test]
    fn test_checksummed_states() {
        assert!(ParseState::Command.is_checksummed());
        assert!(ParseState::Payload.is_checksummed());
        assert!(!ParseState::ChecksumLow.is_checksummed());
        assert!(!ParseState::DeviceId.is_checksummed());
        assert!(!ParseState::Status.is_checksummed());
    }
}
