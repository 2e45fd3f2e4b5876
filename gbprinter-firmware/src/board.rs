//! Board wiring (Raspberry Pi Pico)
//!
//! ```text
//! link cable pin      direction            GPIO
//! 2  SOUT             console → printer    GPIO3  (data in)
//! 3  SIN              printer → console    GPIO4  (data out)
//! 5  SCK              console → printer    GPIO2  (clock)
//! 6  GND                                   GND
//! ```
//!
//! The console side runs at 5V; the inputs need a level shifter or series
//! resistors in front of the RP2040.

use embassy_rp::gpio::{Input, Level, Output, Pin, Pull};
use embassy_rp::Peri;
use gbprinter_core::link::LinkLines;
use gbprinter_hal_rp2040::{LinkInput, LinkOutput};

/// The link cable lines as the core sees them
pub type PrinterLines = LinkLines<LinkInput<'static>, LinkInput<'static>, LinkOutput<'static>>;

/// Configure the link cable pins
///
/// Inputs are pulled up so an unplugged cable reads as an idle link
/// (clock high) instead of floating into spurious edges.
pub fn link_lines(
    clock: Peri<'static, impl Pin>,
    data_in: Peri<'static, impl Pin>,
    data_out: Peri<'static, impl Pin>,
) -> PrinterLines {
    LinkLines::new(
        LinkInput::new(Input::new(clock, Pull::Up)),
        LinkInput::new(Input::new(data_in, Pull::Up)),
        LinkOutput::new(Output::new(data_out, Level::Low)),
    )
}
