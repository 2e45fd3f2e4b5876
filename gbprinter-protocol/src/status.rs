//! Printer status byte
//!
//! One bit per flag, sent back to the console in the last byte slot of
//! every packet:
//!
//! ```text
//! bit 7  low battery
//! bit 6  other error
//! bit 5  paper jam
//! bit 4  packet error
//! bit 3  unprocessed data
//! bit 2  image data full
//! bit 1  printer busy
//! bit 0  checksum error
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const STATUS_CHECKSUM_ERROR: u8 = 1 << 0;
const STATUS_PRINTER_BUSY: u8 = 1 << 1;
const STATUS_PRINT_BUFFER_FULL: u8 = 1 << 2;
const STATUS_UNPROCESSED_DATA: u8 = 1 << 3;
const STATUS_PACKET_ERROR: u8 = 1 << 4;
const STATUS_PAPER_JAM: u8 = 1 << 5;
const STATUS_OTHER_ERROR: u8 = 1 << 6;
const STATUS_LOW_BATTERY: u8 = 1 << 7;

/// Printer status flags
///
/// Persists across packets. The packet parser only touches the first four
/// flags; the rest exist so a status byte can be decoded without loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrinterStatus {
    /// Last packet failed its checksum
    pub checksum_error: bool,
    /// Printer is printing
    pub printer_busy: bool,
    /// Image buffer is full and waiting to be printed
    pub print_buffer_full: bool,
    /// DATA has been received but not yet printed
    pub unprocessed_data: bool,
    /// Malformed packet
    pub packet_error: bool,
    /// Paper jam
    pub paper_jam: bool,
    /// Unspecified hardware error
    pub other_error: bool,
    /// Battery low
    pub low_battery: bool,
}

impl PrinterStatus {
    /// A status with every flag cleared
    pub const fn new() -> Self {
        Self {
            checksum_error: false,
            printer_busy: false,
            print_buffer_full: false,
            unprocessed_data: false,
            packet_error: false,
            paper_jam: false,
            other_error: false,
            low_battery: false,
        }
    }

    /// Encode to the wire status byte
    pub fn to_byte(&self) -> u8 {
        let mut byte = 0;
        if self.checksum_error {
            byte |= STATUS_CHECKSUM_ERROR;
        }
        if self.printer_busy {
            byte |= STATUS_PRINTER_BUSY;
        }
        if self.print_buffer_full {
            byte |= STATUS_PRINT_BUFFER_FULL;
        }
        if self.unprocessed_data {
            byte |= STATUS_UNPROCESSED_DATA;
        }
        if self.packet_error {
            byte |= STATUS_PACKET_ERROR;
        }
        if self.paper_jam {
            byte |= STATUS_PAPER_JAM;
        }
        if self.other_error {
            byte |= STATUS_OTHER_ERROR;
        }
        if self.low_battery {
            byte |= STATUS_LOW_BATTERY;
        }
        byte
    }

    /// Decode a wire status byte
    pub fn from_byte(byte: u8) -> Self {
        Self {
            checksum_error: byte & STATUS_CHECKSUM_ERROR != 0,
            printer_busy: byte & STATUS_PRINTER_BUSY != 0,
            print_buffer_full: byte & STATUS_PRINT_BUFFER_FULL != 0,
            unprocessed_data: byte & STATUS_UNPROCESSED_DATA != 0,
            packet_error: byte & STATUS_PACKET_ERROR != 0,
            paper_jam: byte & STATUS_PAPER_JAM != 0,
            other_error: byte & STATUS_OTHER_ERROR != 0,
            low_battery: byte & STATUS_LOW_BATTERY != 0,
        }
    }
}
