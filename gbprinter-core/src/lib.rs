//! Board-agnostic core of the link-cable printer emulator
//!
//! This crate contains everything between the pins and the image buffer
//! that does not depend on a specific board:
//!
//! - Byte streamer (sync word scan, byte framing, answer bits)
//! - Packet parser state machine and payload buffers
//! - Session controller (inactivity timeout, pretend print)
//! - Configuration types and the embedded config reader
//! - A console simulator for bench tests
//!
//! ```text
//! clock edge ─► ByteStreamer ─► PacketParser ─► Session ─► consumer
//!                    ▲               │
//!                    └─ answer byte ─┘
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod link;
pub mod parser;
pub mod session;

pub use config::SessionConfig;
pub use session::{PacketSummary, Session, SessionEvent, SessionStats};
