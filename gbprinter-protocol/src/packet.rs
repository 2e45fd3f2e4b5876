//! Packet framing for the link-cable printer protocol.
//!
//! Packet format (as clocked out by the console):
//! - SYNC (2 bytes): 0x88 0x33 preamble
//! - COMMAND (1 byte)
//! - COMPRESSION (1 byte): non-zero if the payload is RLE compressed
//! - LENGTH (2 bytes, little-endian): payload length
//! - PAYLOAD (LENGTH bytes)
//! - CHECKSUM (2 bytes, little-endian): 16-bit wrapping sum of COMMAND,
//!   COMPRESSION, both LENGTH bytes and all PAYLOAD bytes
//! - ACK slot (1 byte): console sends 0x00, printer answers [`DEVICE_ID`]
//! - STATUS slot (1 byte): console sends 0x00, printer answers its status

use crate::command::Command;

/// Preamble that aligns the bitstream to byte frames, sent MSB-first
pub const SYNC_WORD: u16 = 0x8833;

/// Device ID the printer answers in the acknowledgement slot
pub const DEVICE_ID: u8 = 0x81;

/// Bytes on the wire around the payload (sync, header, checksum, ack, status)
pub const FRAME_OVERHEAD: usize = 2 + 4 + 2 + 2;

/// Errors that can occur while encoding a packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload does not fit the 16-bit length field
    PayloadTooLarge,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// Sum every header and payload byte with 16-bit wraparound
pub fn checksum(command: u8, compression: u8, payload: &[u8]) -> u16 {
    let length = payload.len() as u16;
    let [length_low, length_high] = length.to_le_bytes();

    let mut sum = (command as u16)
        .wrapping_add(compression as u16)
        .wrapping_add(length_low as u16)
        .wrapping_add(length_high as u16);
    for &byte in payload {
        sum = sum.wrapping_add(byte as u16);
    }
    sum
}

/// A packet as the console sends it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketFrame<'a> {
    /// Raw command byte
    pub command: u8,
    /// Compression flag
    pub compression: u8,
    /// Payload bytes
    pub payload: &'a [u8],
}

impl<'a> PacketFrame<'a> {
    /// Create a packet for a known command
    pub fn new(command: Command, compression: u8, payload: &'a [u8]) -> Self {
        Self {
            command: command.to_byte(),
            compression,
            payload,
        }
    }

    /// Create a packet with no payload
    pub fn empty(command: Command) -> Self {
        Self::new(command, 0, &[])
    }

    /// Checksum the console computes for this packet
    pub fn checksum(&self) -> u16 {
        checksum(self.command, self.compression, self.payload)
    }

    /// Number of bytes [`encode`](Self::encode) writes
    pub fn encoded_len(&self) -> usize {
        FRAME_OVERHEAD + self.payload.len()
    }

    /// Bytes exactly as the console clocks them out, including the two
    /// trailing response slots
    pub fn wire_bytes(&self) -> impl Iterator<Item = u8> + 'a {
        let payload: &'a [u8] = self.payload;
        let [sync_high, sync_low] = SYNC_WORD.to_be_bytes();
        let [length_low, length_high] = (payload.len() as u16).to_le_bytes();
        let [checksum_low, checksum_high] = self.checksum().to_le_bytes();

        let header = [
            sync_high,
            sync_low,
            self.command,
            self.compression,
            length_low,
            length_high,
        ];
        let trailer = [checksum_low, checksum_high, 0x00, 0x00];

        header
            .into_iter()
            .chain(payload.iter().copied())
            .chain(trailer)
    }

    /// Encode this packet into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        if self.payload.len() > u16::MAX as usize {
            return Err(FrameError::PayloadTooLarge);
        }
        let frame_len = self.encoded_len();
        if buffer.len() < frame_len {
            return Err(FrameError::BufferTooSmall);
        }

        for (slot, byte) in buffer.iter_mut().zip(self.wire_bytes()) {
            *slot = byte;
        }

        Ok(frame_len)
    }
}
