//! RP2040 implementation of the link-cable printer HAL
//!
//! Wraps embassy-rp GPIO and embassy-time so the board-agnostic core can
//! drive real pins:
//!
//! - Link cable input and output lines
//! - Monotonic millisecond clock

#![no_std]

pub mod gpio;
pub mod time;

pub use gpio::{LinkInput, LinkOutput};
pub use time::EmbassyClock;
