//! Embassy async tasks
//!
//! Each task runs independently and communicates via the shared session
//! and the event channel.

pub mod link;
pub mod printer;
pub mod tick;

pub use link::link_task;
pub use printer::printer_task;
pub use tick::tick_task;
