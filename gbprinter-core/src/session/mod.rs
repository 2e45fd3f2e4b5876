//! Session controller, deadlines and the events it reports

pub mod controller;
pub mod deadline;
pub mod events;

pub use controller::Session;
pub use deadline::Deadline;
pub use events::{PacketSummary, SessionEvent, SessionStats};
