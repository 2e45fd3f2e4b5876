//! Packet parser state machine
//!
//! Fed one byte at a time by the streamer. Each byte is first consumed by
//! the current state, then, if the state changed, the new state's entry
//! action runs. Entry actions are where the answer bytes are produced and
//! the printer status is updated.

use gbprinter_protocol::{
    Command, PrinterStatus, DEVICE_ID, IMAGE_BUFFER_SIZE, SETTINGS_BUFFER_SIZE,
};

use super::packet::{Packet, PayloadTarget};
use super::state::{ParseState, ParserEvent, ProtocolViolation};

/// Result of feeding one byte
pub type ParserResult = Result<ParserEvent, ProtocolViolation>;

/// Packet parser with its payload buffers
#[derive(Debug, Clone)]
pub struct PacketParser {
    state: ParseState,
    packet: Packet,
    payload_index: u16,
    settings: [u8; SETTINGS_BUFFER_SIZE],
    image: [u8; IMAGE_BUFFER_SIZE],
    /// Bytes written by the last DATA packet
    image_len: usize,
    /// Compression flag of the last DATA packet
    image_compression: u8,
}

impl Default for PacketParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PacketParser {
    /// Create a parser waiting for a command byte
    pub const fn new() -> Self {
        Self {
            state: ParseState::Command,
            packet: Packet::new(),
            payload_index: 0,
            settings: [0; SETTINGS_BUFFER_SIZE],
            image: [0; IMAGE_BUFFER_SIZE],
            image_len: 0,
            image_compression: 0,
        }
    }

    /// Drop any partial packet and wait for a command byte
    ///
    /// Buffers and the last packet header are kept.
    pub fn reset(&mut self) {
        self.state = ParseState::Command;
        self.payload_index = 0;
    }

    /// Current state
    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Packet being (or last) parsed
    pub fn packet(&self) -> &Packet {
        &self.packet
    }

    /// A packet has been started but not finished
    pub fn in_progress(&self) -> bool {
        self.state.is_mid_packet()
    }

    /// Settings from the last PRINT packet
    pub fn settings(&self) -> &[u8; SETTINGS_BUFFER_SIZE] {
        &self.settings
    }

    /// Payload of the last DATA packet
    pub fn image(&self) -> &[u8] {
        &self.image[..self.image_len]
    }

    /// Compression flag of the last DATA packet
    pub fn image_compression(&self) -> u8 {
        self.image_compression
    }

    /// Feed one received byte
    ///
    /// On a violation the parser resets itself before returning the error.
    pub fn on_byte(&mut self, byte: u8, status: &mut PrinterStatus) -> ParserResult {
        let previous = self.state;

        if let Err(violation) = self.consume(byte) {
            self.reset();
            return Err(violation);
        }

        if self.state == previous {
            return Ok(ParserEvent::None);
        }

        Ok(self.enter(status))
    }

    /// Let the current state take the byte and pick the next state
    fn consume(&mut self, byte: u8) -> Result<(), ProtocolViolation> {
        if self.state.is_checksummed() {
            if self.state == ParseState::Command {
                self.packet.start(byte);
            }
            self.packet.accumulate(byte);
        }

        self.state = match self.state {
            ParseState::Command => ParseState::Compression,
            ParseState::Compression => {
                self.packet.compression = byte;
                ParseState::LengthLow
            }
            ParseState::LengthLow => {
                self.packet.data_length = byte as u16;
                ParseState::LengthHigh
            }
            ParseState::LengthHigh => {
                self.packet.data_length |= (byte as u16) << 8;
                let next = self.check_length()?;
                // an accepted DATA packet replaces the image, even when empty
                if self.packet.command == Command::Data {
                    self.image_len = 0;
                    self.image_compression = self.packet.compression;
                }
                next
            }
            ParseState::Payload => {
                self.store_payload(byte)?;
                // exactly data_length bytes, the checksum follows the last one
                if self.payload_index >= self.packet.data_length {
                    ParseState::ChecksumLow
                } else {
                    ParseState::Payload
                }
            }
            ParseState::ChecksumLow => {
                self.packet.checksum_received = byte as u16;
                ParseState::ChecksumHigh
            }
            ParseState::ChecksumHigh => {
                self.packet.checksum_received |= (byte as u16) << 8;
                ParseState::DeviceId
            }
            ParseState::DeviceId => ParseState::Status,
            ParseState::Status => ParseState::PacketReceived,
            // Packet already delivered, anything further starts a new one
            ParseState::PacketReceived => {
                self.packet.start(byte);
                self.packet.accumulate(byte);
                ParseState::Compression
            }
        };

        Ok(())
    }

    /// Decide whether the length just read can be taken
    fn check_length(&self) -> Result<ParseState, ProtocolViolation> {
        let command = self.packet.command;
        let length = self.packet.data_length;

        if length == 0 {
            return Ok(ParseState::ChecksumLow);
        }

        match PayloadTarget::for_command(command).capacity() {
            None => Err(ProtocolViolation::UnexpectedPayload { command, length }),
            Some(capacity) if length as usize > capacity => {
                Err(ProtocolViolation::PayloadOverrun {
                    command,
                    length,
                    capacity: capacity as u16,
                })
            }
            Some(_) => Ok(ParseState::Payload),
        }
    }

    /// Write one payload byte into the selected buffer
    fn store_payload(&mut self, byte: u8) -> Result<(), ProtocolViolation> {
        let index = self.payload_index as usize;
        let slot = match self.packet.target {
            PayloadTarget::Settings => self.settings.get_mut(index),
            PayloadTarget::Image => self.image.get_mut(index),
            PayloadTarget::None => None,
        };

        let Some(slot) = slot else {
            return Err(ProtocolViolation::PayloadOverrun {
                command: self.packet.command,
                length: self.packet.data_length,
                capacity: self.packet.target.capacity().unwrap_or(0) as u16,
            });
        };

        *slot = byte;
        self.payload_index += 1;
        if self.packet.target == PayloadTarget::Image {
            self.image_len = self.payload_index as usize;
        }
        Ok(())
    }

    /// Run the entry action of the state just entered
    fn enter(&mut self, status: &mut PrinterStatus) -> ParserEvent {
        match self.state {
            ParseState::LengthLow => {
                self.packet.data_length = 0;
                ParserEvent::None
            }
            ParseState::Payload => {
                self.packet.target = PayloadTarget::for_command(self.packet.command);
                self.payload_index = 0;
                ParserEvent::None
            }
            ParseState::DeviceId => {
                self.packet.device_ack = DEVICE_ID;
                ParserEvent::TransmitByte(DEVICE_ID)
            }
            ParseState::Status => {
                self.update_status(status);
                self.packet.status_byte = status.to_byte();
                ParserEvent::TransmitByte(self.packet.status_byte)
            }
            ParseState::PacketReceived => ParserEvent::PacketReady,
            _ => ParserEvent::None,
        }
    }

    fn update_status(&self, status: &mut PrinterStatus) {
        status.checksum_error = !self.packet.checksum_ok();

        match self.packet.command {
            Command::Data => {
                status.unprocessed_data = true;
            }
            Command::Print => {
                status.unprocessed_data = false;
                status.print_buffer_full = true;
                status.printer_busy = true;
            }
            Command::Init | Command::Inquiry | Command::Unknown => {}
        }
    }
}
