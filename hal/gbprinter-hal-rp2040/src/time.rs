//! Uptime from the embassy time driver

use embassy_time::Instant;
use gbprinter_hal::Monotonic;

/// Milliseconds since boot, from the embassy time driver
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Monotonic for EmbassyClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}
