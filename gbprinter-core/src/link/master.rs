//! Console side of the link cable
//!
//! Drives a [`Session`] the way the console drives the printer: for each
//! bit the clock falls (both sides put their bit on the wire), then rises
//! (both sides sample). Used for bench testing without a console.

use gbprinter_hal::OutputPin;
use gbprinter_protocol::PacketFrame;
use heapless::Vec;

use crate::session::{Session, SessionEvent};

/// Maximum events collected while sending one packet
pub const MAX_EXCHANGE_EVENTS: usize = 4;

/// The printer's data line as seen by the console
#[derive(Debug, Clone, Copy, Default)]
struct ResponseLine {
    high: bool,
}

impl OutputPin for ResponseLine {
    fn set_high(&mut self) {
        self.high = true;
    }

    fn set_low(&mut self) {
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// What the printer answered to one packet
#[derive(Debug, Clone, Default)]
pub struct PacketExchange {
    /// Byte received in the acknowledgement slot
    pub device_ack: u8,
    /// Byte received in the status slot
    pub status: u8,
    /// Session events raised while the packet was clocked in
    pub events: Vec<SessionEvent, MAX_EXCHANGE_EVENTS>,
}

/// Simulated console
#[derive(Debug, Clone, Default)]
pub struct LinkMaster {
    response: ResponseLine,
    now_ms: u64,
    attached: bool,
}

impl LinkMaster {
    /// Create a master at time zero
    pub const fn new() -> Self {
        Self {
            response: ResponseLine { high: false },
            now_ms: 0,
            attached: false,
        }
    }

    /// Set the time stamped on the following edges
    pub fn set_time(&mut self, now_ms: u64) {
        self.now_ms = now_ms;
    }

    /// Move time forward
    pub fn advance(&mut self, ms: u64) {
        self.now_ms = self.now_ms.saturating_add(ms);
    }

    /// Time stamped on the following edges
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Show the session the idle (high) clock level
    pub fn attach(&mut self, session: &mut Session) {
        session.on_clock_edge(true, false, self.now_ms, &mut self.response);
        self.attached = true;
    }

    /// Clock one bit, returning the bit the printer sent back
    pub fn clock_bit(&mut self, session: &mut Session, bit: bool) -> (bool, Option<SessionEvent>) {
        if !self.attached {
            self.attach(session);
        }

        let falling = session.on_clock_edge(false, bit, self.now_ms, &mut self.response);
        let answer = self.response.high;
        let rising = session.on_clock_edge(true, bit, self.now_ms, &mut self.response);

        (answer, falling.or(rising))
    }

    /// Clock one byte MSB-first, returning the byte the printer sent back
    pub fn send_byte(&mut self, session: &mut Session, byte: u8) -> (u8, Option<SessionEvent>) {
        let mut answer = 0;
        let mut event = None;

        for bit in (0..8).rev() {
            let (high, bit_event) = self.clock_bit(session, (byte >> bit) & 1 != 0);
            if high {
                answer |= 1 << bit;
            }
            event = event.or(bit_event);
        }

        (answer, event)
    }

    /// Clock raw bytes, returning the first event raised
    pub fn send_bytes(&mut self, session: &mut Session, bytes: &[u8]) -> Option<SessionEvent> {
        let mut event = None;
        for &byte in bytes {
            let (_, byte_event) = self.send_byte(session, byte);
            event = event.or(byte_event);
        }
        event
    }

    /// Send a whole packet, sync word included
    pub fn send_packet(&mut self, session: &mut Session, frame: &PacketFrame<'_>) -> PacketExchange {
        let mut exchange = PacketExchange::default();
        let status_slot = frame.encoded_len() - 1;
        let ack_slot = status_slot - 1;

        for (slot, byte) in frame.wire_bytes().enumerate() {
            let (answer, event) = self.send_byte(session, byte);

            if slot == ack_slot {
                exchange.device_ack = answer;
            } else if slot == status_slot {
                exchange.status = answer;
            }

            if let Some(event) = event {
                let pushed = exchange.events.push(event);
                debug_assert!(pushed.is_ok(), "more than MAX_EXCHANGE_EVENTS events");
            }
        }

        exchange
    }
}
