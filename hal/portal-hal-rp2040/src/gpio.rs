//! Button inputs

use embassy_rp::gpio::{AnyPin, Input};
use embassy_rp::Peri;
use portal_hal::gpio::Pull;

/// Map the shared pull setting onto embassy's
pub fn to_rp_pull(pull: Pull) -> embassy_rp::gpio::Pull {
    match pull {
        Pull::None => embassy_rp::gpio::Pull::None,
        Pull::Up => embassy_rp::gpio::Pull::Up,
        Pull::Down => embassy_rp::gpio::Pull::Down,
    }
}

/// A GPIO configured as a digital input
pub struct ButtonInput<'d> {
    inner: Input<'d>,
}

impl<'d> ButtonInput<'d> {
    pub fn new(pin: Peri<'d, AnyPin>, pull: Pull) -> Self {
        Self {
            inner: Input::new(pin, to_rp_pull(pull)),
        }
    }
}

impl portal_hal::InputPin for ButtonInput<'_> {
    fn is_high(&self) -> bool {
        self.inner.is_high()
    }
}
