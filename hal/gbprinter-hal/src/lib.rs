//! gbprinter Hardware Abstraction Layer
//!
//! Traits the link-cable core needs from the board: three digital lines
//! and a millisecond clock. Chip-specific firmware implements them on top
//! of its own GPIO and timer drivers, and tests implement them with mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  gbprinter-firmware (embassy tasks)      │
//! └──────────────────────────────────────────┘
//!          │                       │
//!          ▼                       ▼
//! ┌──────────────────┐   ┌───────────────────┐
//! │  gbprinter-core  │   │ gbprinter-hal-    │
//! │  (session)       │   │ rp2040 (impls)    │
//! └──────────────────┘   └───────────────────┘
//!          │                       │
//!          ▼                       ▼
//! ┌──────────────────────────────────────────┐
//! │  gbprinter-hal (this crate - traits)     │
//! └──────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Link cable lines
//! - [`time::Monotonic`] - Milliseconds since boot

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod time;

pub use gpio::{InputPin, OutputPin};
pub use time::Monotonic;
