//! Game Boy Printer emulator firmware
//!
//! Plays the printer on a link cable: answers the console's packets in
//! real time and logs the received image data over RTT.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use {defmt_rtt as _, panic_probe as _};

use gbprinter_core::config::toml::parse_config;
use gbprinter_core::SessionConfig;

mod board;
mod channels;
mod tasks;

/// Embedded configuration (compiled into firmware)
/// Edit printer.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../printer.toml");

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Game Boy Printer emulator starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();
    channels::with_session(|session| session.set_config(config));

    // Pin assignments are board-specific (see board.rs)
    let lines = board::link_lines(p.PIN_2, p.PIN_3, p.PIN_4);
    info!("Link cable lines configured");

    spawner.spawn(tasks::link_task(lines)).unwrap();
    spawner.spawn(tasks::tick_task(config.poll_interval_ms)).unwrap();
    spawner.spawn(tasks::printer_task()).unwrap();

    info!("All tasks spawned");
}

/// Parse the embedded config, falling back to defaults
fn load_config() -> SessionConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Timing: timeout={}ms print={}ms poll={}ms",
                config.packet_timeout_ms, config.pretend_print_ms, config.poll_interval_ms
            );
            config
        }
        Err(e) => {
            warn!("printer.toml rejected ({:?}), using defaults", e);
            SessionConfig::DEFAULT
        }
    }
}
