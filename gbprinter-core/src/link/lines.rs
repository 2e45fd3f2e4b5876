//! The three link-cable lines seen from the printer side

use gbprinter_hal::{InputPin, OutputPin};

/// Link cable lines
///
/// - `clock`: serial clock, driven by the console
/// - `data_in`: serial data from the console
/// - `data_out`: serial data back to the console
pub struct LinkLines<C, D, O> {
    pub clock: C,
    pub data_in: D,
    pub data_out: O,
}

impl<C: InputPin, D: InputPin, O: OutputPin> LinkLines<C, D, O> {
    /// Bundle the lines, releasing the output line low
    pub fn new(clock: C, data_in: D, mut data_out: O) -> Self {
        data_out.set_low();
        Self {
            clock,
            data_in,
            data_out,
        }
    }

    /// Read the clock level and the incoming data level
    pub fn sample(&self) -> (bool, bool) {
        (self.clock.is_high(), self.data_in.is_high())
    }
}
