//! Tick task for deadline checks
//!
//! The time path of the session: drops stalled packets after the
//! inactivity timeout and ends the pretend print.

use defmt::*;
use embassy_time::{Duration, Ticker};

use gbprinter_hal_rp2040::EmbassyClock;

use crate::channels::{publish, with_session};

/// Tick task - polls session deadlines every `poll_interval_ms`
#[embassy_executor::task]
pub async fn tick_task(poll_interval_ms: u32) {
    info!("Tick task started ({} ms)", poll_interval_ms);

    let mut ticker = Ticker::every(Duration::from_millis(poll_interval_ms as u64));
    let clock = EmbassyClock;

    loop {
        ticker.next().await;

        // One expired deadline per poll, drain them all
        while let Some(event) = with_session(|session| session.poll_clock(&clock)) {
            publish(event);
        }
    }
}
