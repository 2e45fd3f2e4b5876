//! Packet parser
//!
//! ```text
//! COMMAND → COMPRESSION → LENGTH_LOW → LENGTH_HIGH → [PAYLOAD]*
//!   → CHECKSUM_LOW → CHECKSUM_HIGH → DEVICE_ID → STATUS → PACKET_RECEIVED
//! ```

pub mod machine;
pub mod packet;
pub mod state;

pub use machine::{PacketParser, ParserResult};
pub use packet::{Packet, PayloadTarget};
pub use state::{ParseState, ParserEvent, ProtocolViolation};
