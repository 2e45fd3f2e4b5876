//! Link cable lines on RP2040 GPIO

use embassy_rp::gpio::{Input, Output};
use gbprinter_hal::{InputPin, OutputPin};

/// A line driven by the console (clock or serial data in)
pub struct LinkInput<'d> {
    pin: Input<'d>,
}

impl<'d> LinkInput<'d> {
    pub fn new(pin: Input<'d>) -> Self {
        Self { pin }
    }

    /// Wait until the line changes level
    pub async fn wait_for_any_edge(&mut self) {
        self.pin.wait_for_any_edge().await;
    }
}

impl InputPin for LinkInput<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}

/// The serial data line back to the console
pub struct LinkOutput<'d> {
    pin: Output<'d>,
}

impl<'d> LinkOutput<'d> {
    pub fn new(pin: Output<'d>) -> Self {
        Self { pin }
    }
}

impl OutputPin for LinkOutput<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}
