//! Bit-level properties of the byte streamer

use gbprinter_core::link::{ByteEvent, ByteStreamer};
use gbprinter_hal::OutputPin;
use gbprinter_protocol::SYNC_WORD;
use proptest::prelude::*;

#[derive(Default)]
struct Wire {
    high: bool,
}

impl OutputPin for Wire {
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

/// Falling then rising edge; returns the level driven on the falling edge
fn clock_bit(streamer: &mut ByteStreamer, wire: &mut Wire, bit: bool) -> (bool, ByteEvent) {
    streamer.on_clock_edge(false, bit, wire);
    let driven = wire.high;
    let event = streamer.on_clock_edge(true, bit, wire);
    (driven, event)
}

fn sync_bits() -> impl Iterator<Item = bool> {
    (0..16).rev().map(|i| (SYNC_WORD >> i) & 1 != 0)
}

/// Whether the sync word appears in `bits` at any alignment
fn contains_sync(bits: &[bool]) -> bool {
    let mut shift: u16 = 0;
    bits.iter().any(|&bit| {
        shift = (shift << 1) | bit as u16;
        shift == SYNC_WORD
    })
}

fn synchronized(wire: &mut Wire) -> ByteStreamer {
    let mut streamer = ByteStreamer::new();
    streamer.on_clock_edge(true, false, wire);
    for bit in sync_bits() {
        clock_bit(&mut streamer, wire, bit);
    }
    assert!(streamer.is_synchronized());
    streamer
}

proptest! {
    #[test]
    fn sync_detected_exactly_at_end_of_sync_word(
        garbage in proptest::collection::vec(any::<bool>(), 0..200)
    ) {
        let mut bits = garbage.clone();
        bits.extend(sync_bits());
        prop_assume!(!contains_sync(&bits[..bits.len() - 1]));

        let mut wire = Wire::default();
        let mut streamer = ByteStreamer::new();
        streamer.on_clock_edge(true, false, &mut wire);

        let last = bits.len() - 1;
        for (i, &bit) in bits.iter().enumerate() {
            let (_, event) = clock_bit(&mut streamer, &mut wire, bit);
            prop_assert_eq!(event, ByteEvent::None);
            prop_assert_eq!(streamer.is_synchronized(), i == last);
        }
        prop_assert_eq!(streamer.bit_position(), 7);
    }

    #[test]
    fn staged_byte_is_sent_msb_first(staged in any::<u8>(), incoming in any::<u8>()) {
        let mut wire = Wire::default();
        let mut streamer = synchronized(&mut wire);
        streamer.stage_outgoing_byte(staged);

        let mut sent = 0u8;
        let mut received = None;
        for i in (0..8).rev() {
            let (driven, event) = clock_bit(&mut streamer, &mut wire, (incoming >> i) & 1 != 0);
            if driven {
                sent |= 1 << i;
            }
            if let ByteEvent::ByteReceived(byte) = event {
                received = Some(byte);
            }
        }

        prop_assert_eq!(sent, staged);
        prop_assert_eq!(received, Some(incoming));
    }

    #[test]
    fn repeated_levels_are_ignored(bits in proptest::collection::vec(any::<bool>(), 1..64)) {
        let mut wire = Wire::default();
        let mut streamer = synchronized(&mut wire);

        let mut received = 0u32;
        for &bit in &bits {
            // duplicate calls at the same level are not edges
            streamer.on_clock_edge(false, bit, &mut wire);
            streamer.on_clock_edge(false, !bit, &mut wire);
            if let ByteEvent::ByteReceived(_) = streamer.on_clock_edge(true, bit, &mut wire) {
                received += 1;
            }
            streamer.on_clock_edge(true, !bit, &mut wire);
        }

        prop_assert_eq!(received as usize, bits.len() / 8);
    }
}

#[test]
fn idle_frame_after_sent_byte_is_zero() {
    let mut wire = Wire::default();
    let mut streamer = synchronized(&mut wire);
    streamer.stage_outgoing_byte(0xFF);

    for _ in 0..8 {
        clock_bit(&mut streamer, &mut wire, false);
    }

    for _ in 0..8 {
        let (driven, _) = clock_bit(&mut streamer, &mut wire, false);
        assert!(!driven);
    }
}
