//! Link cable edge task
//!
//! Services every change of the clock line. This is the edge path: a bit
//! is sampled or driven per call, and a missed edge costs the rest of the
//! packet until the next sync word.

use defmt::*;

use gbprinter_hal_rp2040::EmbassyClock;

use crate::board::PrinterLines;
use crate::channels::{publish, with_session};

/// Link task - feeds clock edges to the session
#[embassy_executor::task]
pub async fn link_task(mut lines: PrinterLines) {
    info!("Link task started");

    let clock = EmbassyClock;

    // First call records the idle clock level
    with_session(|session| session.service_edge(&mut lines, &clock));

    loop {
        lines.clock.wait_for_any_edge().await;

        if let Some(event) = with_session(|session| session.service_edge(&mut lines, &clock)) {
            publish(event);
        }
    }
}
