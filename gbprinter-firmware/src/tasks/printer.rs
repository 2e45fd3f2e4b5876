//! Packet consumer task
//!
//! Logs every session event, reads completed packets out of the session
//! and acknowledges the ready flag.

use defmt::*;

use gbprinter_core::{PacketSummary, SessionEvent};
use gbprinter_protocol::{Command, IMAGE_BUFFER_SIZE};

use crate::channels::{with_session, EVENT_CHANNEL};

/// Printer task - consumes session events
#[embassy_executor::task]
pub async fn printer_task() {
    info!("Printer task started");

    let mut image = [0u8; IMAGE_BUFFER_SIZE];

    loop {
        match EVENT_CHANNEL.receive().await {
            SessionEvent::PacketReady(summary) => handle_packet(&summary, &mut image),
            SessionEvent::ProtocolViolation(violation) => {
                warn!("Packet rejected: {:?}", violation);
            }
            SessionEvent::Timeout { state } => {
                warn!("Link went quiet in {:?}, resynchronizing", state);
            }
            SessionEvent::PrintFinished => {
                info!("Print finished");
            }
        }
    }
}

/// Read a completed packet and clear the ready flag
fn handle_packet(summary: &PacketSummary, image: &mut [u8]) {
    if summary.overwrote_pending {
        warn!("Previous packet was not consumed in time");
    }
    if !summary.checksum_ok {
        warn!("{:?} packet failed its checksum", summary.command);
    }

    match summary.command {
        Command::Init => info!("INIT"),
        Command::Inquiry => trace!("INQUIRY -> status {=u8:#x}", summary.status),
        Command::Data if summary.data_length == 0 => info!("DATA end of image"),
        Command::Data => {
            match with_session(|session| session.decode_image_into(image)) {
                Ok(len) => {
                    info!(
                        "DATA {} bytes (compression {}), {} decoded",
                        summary.data_length, summary.compression, len
                    );
                    trace!("{=[u8]:x}", &image[..len]);
                }
                Err(e) => warn!("DATA could not be decoded: {:?}", e),
            }
        }
        Command::Print => {
            let settings = with_session(|session| *session.settings());
            info!(
                "PRINT sheets={} margins={=u8:#x} palette={=u8:#x} exposure={=u8:#x}",
                settings[0], settings[1], settings[2], settings[3]
            );
        }
        Command::Unknown => warn!("Unknown command"),
    }

    with_session(|session| session.clear_packet_ready());
}
