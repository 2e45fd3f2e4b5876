//! Bit synchronizer and byte framer
//!
//! Turns clock edges plus the sampled data line into whole bytes, and
//! shifts a staged byte back out on the opposite clock phase. Knows
//! nothing about packets.
//!
//! Rising edges sample the incoming bit, falling edges drive the outgoing
//! bit. Both directions are MSB-first. Until the 16-bit sync word has been
//! seen on consecutive rising edges, incoming bits only feed the sync
//! scanner and nothing is driven.

use gbprinter_hal::OutputPin;
use gbprinter_protocol::SYNC_WORD;

/// First bit position of a byte frame (MSB)
const FRAME_START_BIT: u8 = 7;

/// Result of servicing one clock edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ByteEvent {
    /// No byte completed on this edge
    None,
    /// The eighth bit of a byte frame was sampled
    ByteReceived(u8),
}

/// Bit-level state of the link
#[derive(Debug, Clone)]
pub struct ByteStreamer {
    /// First edge has been seen and the clock level recorded
    initialized: bool,
    /// Clock level on the previous call
    previous_clock: bool,
    /// Byte frames are aligned
    synchronized: bool,
    /// Last 16 bits seen while scanning for the sync word
    sync_shift: u16,
    /// Bit of the current frame handled next (7 = MSB)
    bit_position: u8,
    /// Byte being received
    rx_accumulator: u8,
    /// Byte waiting for the next frame start
    tx_staged: Option<u8>,
    /// Byte being shifted out
    tx_active: u8,
}

impl Default for ByteStreamer {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteStreamer {
    /// Create a streamer that has not yet seen an edge
    pub const fn new() -> Self {
        Self {
            initialized: false,
            previous_clock: false,
            synchronized: false,
            sync_shift: 0,
            bit_position: FRAME_START_BIT,
            rx_accumulator: 0,
            tx_staged: None,
            tx_active: 0,
        }
    }

    /// Forget everything, including the recorded clock level
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Drop byte alignment and go back to scanning for the sync word
    ///
    /// Keeps the recorded clock level so the next call is still judged as
    /// an edge or a no-op.
    pub fn resync(&mut self) {
        *self = Self {
            initialized: self.initialized,
            previous_clock: self.previous_clock,
            ..Self::new()
        };
    }

    /// Byte frames are aligned
    pub fn is_synchronized(&self) -> bool {
        self.synchronized
    }

    /// Bit position the next edge works on
    pub fn bit_position(&self) -> u8 {
        self.bit_position
    }

    /// Queue the byte to send in the next byte frame
    ///
    /// Replaces any byte staged earlier that has not started shifting out.
    pub fn stage_outgoing_byte(&mut self, byte: u8) {
        self.tx_staged = Some(byte);
    }

    /// Service a call from the clock-line interrupt
    ///
    /// Only a change of `clock_high` relative to the previous call is an
    /// edge; the very first call just records the level.
    pub fn on_clock_edge<P: OutputPin>(
        &mut self,
        clock_high: bool,
        data_high: bool,
        out: &mut P,
    ) -> ByteEvent {
        if !self.initialized {
            self.initialized = true;
            self.previous_clock = clock_high;
            return ByteEvent::None;
        }

        if clock_high == self.previous_clock {
            return ByteEvent::None;
        }
        self.previous_clock = clock_high;

        if clock_high {
            self.on_rising_edge(data_high)
        } else {
            self.on_falling_edge(out);
            ByteEvent::None
        }
    }

    /// Sample the incoming bit
    fn on_rising_edge(&mut self, data_high: bool) -> ByteEvent {
        if !self.synchronized {
            self.sync_shift = (self.sync_shift << 1) | data_high as u16;
            if self.sync_shift == SYNC_WORD {
                self.synchronized = true;
                self.bit_position = FRAME_START_BIT;
            }
            return ByteEvent::None;
        }

        if data_high {
            self.rx_accumulator |= 1 << self.bit_position;
        }

        if self.bit_position > 0 {
            self.bit_position -= 1;
            return ByteEvent::None;
        }

        let byte = self.rx_accumulator;
        self.rx_accumulator = 0;
        self.bit_position = FRAME_START_BIT;
        ByteEvent::ByteReceived(byte)
    }

    /// Drive the outgoing bit
    fn on_falling_edge<P: OutputPin>(&mut self, out: &mut P) {
        if !self.synchronized {
            return;
        }

        if self.bit_position == FRAME_START_BIT {
            // Idle frames send zeros, never a repeat of the last byte
            self.tx_active = self.tx_staged.take().unwrap_or(0);
        }

        out.set_state(self.tx_active & (1 << self.bit_position) != 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock output line for testing
    struct MockPin {
        high: bool,
        writes: usize,
    }

    impl MockPin {
        fn new() -> Self {
            Self {
                high: false,
                writes: 0,
            }
        }
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
            self.writes += 1;
        }

        fn set_low(&mut self) {
            self.high = false;
            self.writes += 1;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    /// Clock one bit the way the console does: falling edge, then rising edge.
    /// Returns the byte event and the level the streamer drove.
    fn clock_bit(streamer: &mut ByteStreamer, pin: &mut MockPin, bit: bool) -> (ByteEvent, bool) {
        streamer.on_clock_edge(false, bit, pin);
        let driven = pin.high;
        let event = streamer.on_clock_edge(true, bit, pin);
        (event, driven)
    }

    /// Clock a whole byte, returning the last event and the byte driven back
    fn clock_byte(streamer: &mut ByteStreamer, pin: &mut MockPin, byte: u8) -> (ByteEvent, u8) {
        let mut event = ByteEvent::None;
        let mut driven = 0u8;
        for bit in (0..8).rev() {
            let (e, level) = clock_bit(streamer, pin, byte & (1 << bit) != 0);
            driven = (driven << 1) | level as u8;
            event = e;
        }
        (event, driven)
    }

    fn synchronized_streamer(pin: &mut MockPin) -> ByteStreamer {
        let mut streamer = ByteStreamer::new();
        streamer.on_clock_edge(true, false, pin);
        clock_byte(&mut streamer, pin, 0x88);
        clock_byte(&mut streamer, pin, 0x33);
        assert!(streamer.is_synchronized());
        streamer
    }

    #[test]
    fn test_first_call_only_records_level() {
        let mut pin = MockPin::new();
        let mut streamer = ByteStreamer::new();

        // A rising level on the first call is not an edge
        assert_eq!(streamer.on_clock_edge(true, true, &mut pin), ByteEvent::None);
        // Same level again is not an edge either
        assert_eq!(streamer.on_clock_edge(true, true, &mut pin), ByteEvent::None);
        assert_eq!(streamer.sync_shift, 0);
    }

    #[test]
    fn test_sync_word_detection() {
        let mut pin = MockPin::new();
        let streamer = synchronized_streamer(&mut pin);
        assert_eq!(streamer.bit_position(), 7);
        // Nothing is driven while scanning
        assert_eq!(pin.writes, 0);
    }

    #[test]
    fn test_sync_after_garbage() {
        let mut pin = MockPin::new();
        let mut streamer = ByteStreamer::new();
        streamer.on_clock_edge(true, false, &mut pin);

        clock_byte(&mut streamer, &mut pin, 0xFF);
        clock_byte(&mut streamer, &mut pin, 0x12);
        assert!(!streamer.is_synchronized());

        clock_byte(&mut streamer, &mut pin, 0x88);
        assert!(!streamer.is_synchronized());
        clock_byte(&mut streamer, &mut pin, 0x33);
        assert!(streamer.is_synchronized());
    }

    #[test]
    fn test_byte_framing_msb_first() {
        let mut pin = MockPin::new();
        let mut streamer = synchronized_streamer(&mut pin);

        let (event, _) = clock_byte(&mut streamer, &mut pin, 0xA5);
        assert_eq!(event, ByteEvent::ByteReceived(0xA5));

        let (event, _) = clock_byte(&mut streamer, &mut pin, 0x01);
        assert_eq!(event, ByteEvent::ByteReceived(0x01));
        assert_eq!(streamer.bit_position(), 7);
    }

    #[test]
    fn test_byte_only_on_eighth_edge() {
        let mut pin = MockPin::new();
        let mut streamer = synchronized_streamer(&mut pin);

        for _ in 0..7 {
            let (event, _) = clock_bit(&mut streamer, &mut pin, true);
            assert_eq!(event, ByteEvent::None);
        }
        let (event, _) = clock_bit(&mut streamer, &mut pin, true);
        assert_eq!(event, ByteEvent::ByteReceived(0xFF));
    }

    #[test]
    fn test_staged_byte_is_transmitted() {
        let mut pin = MockPin::new();
        let mut streamer = synchronized_streamer(&mut pin);

        streamer.stage_outgoing_byte(0x81);
        let (_, driven) = clock_byte(&mut streamer, &mut pin, 0x00);
        assert_eq!(driven, 0x81);
    }

    #[test]
    fn test_idle_transmits_zero() {
        let mut pin = MockPin::new();
        let mut streamer = synchronized_streamer(&mut pin);

        streamer.stage_outgoing_byte(0xFF);
        let (_, driven) = clock_byte(&mut streamer, &mut pin, 0x00);
        assert_eq!(driven, 0xFF);

        // Nothing staged for the next frame
        let (_, driven) = clock_byte(&mut streamer, &mut pin, 0x00);
        assert_eq!(driven, 0x00);
    }

    #[test]
    fn test_staging_mid_frame_waits_for_next_frame() {
        let mut pin = MockPin::new();
        let mut streamer = synchronized_streamer(&mut pin);

        clock_bit(&mut streamer, &mut pin, false);
        streamer.stage_outgoing_byte(0xF0);
        for _ in 0..7 {
            clock_bit(&mut streamer, &mut pin, false);
        }

        let (_, driven) = clock_byte(&mut streamer, &mut pin, 0x00);
        assert_eq!(driven, 0xF0);
    }

    #[test]
    fn test_resync_keeps_clock_level() {
        let mut pin = MockPin::new();
        let mut streamer = synchronized_streamer(&mut pin);

        streamer.resync();
        assert!(!streamer.is_synchronized());

        // Clock is still high: repeating high is no edge, falling is
        assert_eq!(streamer.on_clock_edge(true, true, &mut pin), ByteEvent::None);
        clock_byte(&mut streamer, &mut pin, 0x88);
        clock_byte(&mut streamer, &mut pin, 0x33);
        assert!(streamer.is_synchronized());
    }

    #[test]
    fn test_reset_forgets_clock_level() {
        let mut pin = MockPin::new();
        let mut streamer = synchronized_streamer(&mut pin);
        streamer.stage_outgoing_byte(0x42);

        streamer.reset();
        assert!(!streamer.initialized);
        assert!(!streamer.is_synchronized());
        assert_eq!(streamer.tx_staged, None);
    }
}
