//! Shared session and inter-task channels
//!
//! The session is touched by the link task (every clock edge) and the tick
//! task (deadlines). Both go through a critical-section mutex, so an edge
//! is never serviced halfway through a timeout reset and vice versa.

use core::cell::RefCell;

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::channel::Channel;

use gbprinter_core::{Session, SessionConfig, SessionEvent};

/// Channel capacity for session events
const EVENT_CHANNEL_SIZE: usize = 8;

/// The printer session
static SESSION: Mutex<CriticalSectionRawMutex, RefCell<Session>> =
    Mutex::new(RefCell::new(Session::new(SessionConfig::DEFAULT)));

/// Session events for the printer task
pub static EVENT_CHANNEL: Channel<CriticalSectionRawMutex, SessionEvent, EVENT_CHANNEL_SIZE> =
    Channel::new();

/// Run `f` with exclusive access to the session
pub fn with_session<R>(f: impl FnOnce(&mut Session) -> R) -> R {
    SESSION.lock(|cell| f(&mut cell.borrow_mut()))
}

/// Hand an event to the printer task without waiting
pub fn publish(event: SessionEvent) {
    if EVENT_CHANNEL.try_send(event).is_err() {
        warn!("Event channel full, dropping {:?}", event);
    }
}
