//! Session controller
//!
//! Owns the streamer, the parser and the printer status, and ties them to
//! time. Two entry points, which the caller must never run concurrently:
//!
//! - [`Session::on_clock_edge`]: edge path, called for every change of the
//!   clock line. Constant work, no clock reads beyond the `now_ms` passed in.
//! - [`Session::poll`]: time path, called periodically. Only acts once a
//!   deadline has passed.

use gbprinter_hal::{InputPin, Monotonic, OutputPin};
use gbprinter_protocol::{
    decompress, Command, DecompressError, PrinterStatus, SETTINGS_BUFFER_SIZE,
};

use super::deadline::Deadline;
use super::events::{PacketSummary, SessionEvent, SessionStats};
use crate::config::SessionConfig;
use crate::link::{ByteEvent, ByteStreamer, LinkLines};
use crate::parser::{Packet, PacketParser, ParseState, ParserEvent, ProtocolViolation};

/// Printer side of one link cable
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    streamer: ByteStreamer,
    parser: PacketParser,
    status: PrinterStatus,
    packet_ready: bool,
    timeout: Deadline,
    pretend_print: Deadline,
    stats: SessionStats,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::DEFAULT)
    }
}

impl Session {
    /// Create an idle session
    pub const fn new(config: SessionConfig) -> Self {
        Self {
            config,
            streamer: ByteStreamer::new(),
            parser: PacketParser::new(),
            status: PrinterStatus::new(),
            packet_ready: false,
            timeout: Deadline::new(),
            pretend_print: Deadline::new(),
            stats: SessionStats::new(),
        }
    }

    /// Current configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Replace the configuration
    ///
    /// Deadlines already armed keep their instants.
    pub fn set_config(&mut self, config: SessionConfig) {
        self.config = config;
    }

    /// Back to power-on state
    ///
    /// Drops any partial packet, clears status, buffers and counters. The
    /// last clock level is kept, so the next call is still edge-checked
    /// against the real line.
    pub fn reset(&mut self) {
        let mut streamer = self.streamer.clone();
        streamer.resync();
        *self = Self {
            streamer,
            ..Self::new(self.config)
        };
    }

    /// Service one clock-line interrupt
    ///
    /// `out` is the data line back to the console. Only a change of
    /// `clock_high` since the previous call does anything.
    pub fn on_clock_edge<P: OutputPin>(
        &mut self,
        clock_high: bool,
        data_high: bool,
        now_ms: u64,
        out: &mut P,
    ) -> Option<SessionEvent> {
        let was_synchronized = self.streamer.is_synchronized();

        let byte = match self.streamer.on_clock_edge(clock_high, data_high, out) {
            ByteEvent::ByteReceived(byte) => byte,
            ByteEvent::None => {
                if !was_synchronized && self.streamer.is_synchronized() {
                    self.timeout.arm(now_ms, self.config.packet_timeout_ms);
                }
                return None;
            }
        };

        self.timeout.arm(now_ms, self.config.packet_timeout_ms);

        match self.parser.on_byte(byte, &mut self.status) {
            Ok(ParserEvent::None) => None,
            Ok(ParserEvent::TransmitByte(answer)) => {
                self.streamer.stage_outgoing_byte(answer);
                if self.parser.state() == ParseState::Status
                    && self.parser.packet().command == Command::Print
                {
                    self.pretend_print.arm(now_ms, self.config.pretend_print_ms);
                }
                None
            }
            Ok(ParserEvent::PacketReady) => Some(self.finish_packet()),
            Err(violation) => Some(self.reject_packet(violation)),
        }
    }

    /// Sample the lines and the clock, then service the edge
    pub fn service_edge<C, D, O, M>(
        &mut self,
        lines: &mut LinkLines<C, D, O>,
        clock: &M,
    ) -> Option<SessionEvent>
    where
        C: InputPin,
        D: InputPin,
        O: OutputPin,
        M: Monotonic,
    {
        let (clock_high, data_high) = lines.sample();
        self.on_clock_edge(clock_high, data_high, clock.now_ms(), &mut lines.data_out)
    }

    /// Check deadlines
    ///
    /// Handles at most one expired deadline per call; call again until it
    /// returns `None`.
    pub fn poll(&mut self, now_ms: u64) -> Option<SessionEvent> {
        if self.timeout.expired(now_ms) {
            let state = self.parser.state();
            self.restart();
            self.stats.timeouts = self.stats.timeouts.wrapping_add(1);
            return Some(SessionEvent::Timeout { state });
        }

        if self.pretend_print.expired(now_ms) {
            self.pretend_print.cancel();
            self.status.printer_busy = false;
            self.status.print_buffer_full = false;
            return Some(SessionEvent::PrintFinished);
        }

        None
    }

    /// Check deadlines against a time source
    pub fn poll_clock<M: Monotonic>(&mut self, clock: &M) -> Option<SessionEvent> {
        self.poll(clock.now_ms())
    }

    /// A packet has completed and the ready flag not yet cleared
    pub fn is_packet_ready(&self) -> bool {
        self.packet_ready
    }

    /// Acknowledge the ready flag
    pub fn clear_packet_ready(&mut self) {
        self.packet_ready = false;
    }

    /// Raw payload of the last DATA packet
    pub fn image_data(&self) -> &[u8] {
        self.parser.image()
    }

    /// Settings from the last PRINT packet
    pub fn settings(&self) -> &[u8; SETTINGS_BUFFER_SIZE] {
        self.parser.settings()
    }

    /// Expand the last DATA payload into `dst`
    ///
    /// Uncompressed payloads are copied as they are. Returns the number of
    /// bytes written.
    pub fn decode_image_into(&self, dst: &mut [u8]) -> Result<usize, DecompressError> {
        let image = self.parser.image();

        if self.parser.image_compression() != 0 {
            return decompress(image, dst);
        }

        let out = dst
            .get_mut(..image.len())
            .ok_or(DecompressError::OutputOverflow)?;
        out.copy_from_slice(image);
        Ok(image.len())
    }

    /// Command of the last packet seen
    pub fn last_command(&self) -> Command {
        self.parser.packet().command
    }

    /// Header of the last packet seen
    pub fn last_packet(&self) -> &Packet {
        self.parser.packet()
    }

    /// Current printer status
    pub fn status(&self) -> &PrinterStatus {
        &self.status
    }

    /// Counters since the last reset
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Byte streamer state
    pub fn streamer(&self) -> &ByteStreamer {
        &self.streamer
    }

    /// Parser state
    pub fn parse_state(&self) -> ParseState {
        self.parser.state()
    }

    /// Inactivity deadline is running
    pub fn timeout_armed(&self) -> bool {
        self.timeout.is_armed()
    }

    /// Milliseconds until the pretend print ends, `None` when not printing
    pub fn print_remaining_ms(&self, now_ms: u64) -> Option<u64> {
        self.pretend_print.remaining_ms(now_ms)
    }

    /// Raise the ready flag and get ready for the next packet
    fn finish_packet(&mut self) -> SessionEvent {
        let packet = *self.parser.packet();
        let overwrote_pending = self.packet_ready;

        self.packet_ready = true;
        self.stats.packets = self.stats.packets.wrapping_add(1);
        if overwrote_pending {
            self.stats.overwritten = self.stats.overwritten.wrapping_add(1);
        }
        if !packet.checksum_ok() {
            self.stats.checksum_errors = self.stats.checksum_errors.wrapping_add(1);
        }

        // status byte has been shifted out, the next packet starts with a sync word
        self.restart();

        SessionEvent::PacketReady(PacketSummary {
            command: packet.command,
            compression: packet.compression,
            data_length: packet.data_length,
            checksum_ok: packet.checksum_ok(),
            status: packet.status_byte,
            overwrote_pending,
        })
    }

    /// Treat a violation like a failed checksum and resynchronize
    fn reject_packet(&mut self, violation: ProtocolViolation) -> SessionEvent {
        self.status.checksum_error = true;
        self.stats.violations = self.stats.violations.wrapping_add(1);
        self.restart();
        SessionEvent::ProtocolViolation(violation)
    }

    /// Wait for a fresh sync word
    fn restart(&mut self) {
        self.streamer.resync();
        self.parser.reset();
        self.timeout.cancel();
    }
}
