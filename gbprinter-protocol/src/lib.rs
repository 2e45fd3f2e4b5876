//! Game Boy Printer link-cable protocol
//!
//! This crate defines the fixed wire contract between a handheld console
//! (the clock master) and the printer peripheral. Everything here is a
//! constant of the protocol and must match bit-for-bit.
//!
//! # Protocol Overview
//!
//! Every packet is sent MSB-first over a synchronous serial link clocked
//! by the console:
//! ```text
//! ┌──────┬─────┬──────┬────────┬─────────────┬──────────┬─────┬────────┐
//! │ SYNC │ CMD │ COMP │ LENGTH │ PAYLOAD     │ CHECKSUM │ ACK │ STATUS │
//! │ 2B   │ 1B  │ 1B   │ 2B LE  │ 0–65535B    │ 2B LE    │ 1B  │ 1B     │
//! └──────┴─────┴──────┴────────┴─────────────┴──────────┴─────┴────────┘
//! ```
//!
//! The printer shifts its answer back during the last two byte slots: the
//! device ID in the ACK slot, then the status byte.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod compression;
pub mod packet;
pub mod status;

pub use command::Command;
pub use compression::{decompress, DecompressError};
pub use packet::{checksum, FrameError, PacketFrame, DEVICE_ID, SYNC_WORD};
pub use status::PrinterStatus;

/// Capacity of the print settings buffer (PRINT payload)
pub const SETTINGS_BUFFER_SIZE: usize = 4;

/// Capacity of the image buffer (DATA payload, 640 bytes usually)
pub const IMAGE_BUFFER_SIZE: usize = 650;
