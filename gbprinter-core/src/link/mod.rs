//! Bit-level link handling
//!
//! The streamer runs on every clock edge and owns byte alignment. The
//! master simulator plays the console's side of the cable for bench
//! testing.

pub mod lines;
pub mod master;
pub mod streamer;

pub use lines::LinkLines;
pub use master::{LinkMaster, PacketExchange};
pub use streamer::{ByteEvent, ByteStreamer};
