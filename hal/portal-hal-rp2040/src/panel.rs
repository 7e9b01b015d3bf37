//! Resistive touch panel on the RP2040 ADC
//!
//! The panel's four electrodes share GPIOs between digital drive and
//! analog sense. Each measurement borrows the pins it needs, switches
//! them into the right role, samples, and lets them fall back to high-Z
//! when the temporary `Flex`/`Channel` handles drop.
//!
//! Three of the electrodes must be on ADC-capable pins (GPIO26-29):
//! X-right, Y-down and Y-up are sampled; X-left is only ever driven.

use embassy_rp::adc::{Adc, AdcPin, Blocking, Channel};
use embassy_rp::gpio::{AnyPin, Flex, Pull};
use embassy_rp::Peri;
use portal_hal::panel::widen_sample;
use portal_hal::{PanelError, ResistivePanel};

/// RP2040 ADC resolution
const ADC_BITS: u32 = 12;

/// Cycles to wait after switching plates (~10us at 125MHz)
const SETTLE_CYCLES: u32 = 1_250;

/// Four-wire panel wired to the RP2040
pub struct Rp2040Panel<'d, XR, YD, YU>
where
    XR: AdcPin + 'd,
    YD: AdcPin + 'd,
    YU: AdcPin + 'd,
{
    adc: Adc<'d, Blocking>,
    x_left: Peri<'d, AnyPin>,
    x_right: Peri<'d, XR>,
    y_down: Peri<'d, YD>,
    y_up: Peri<'d, YU>,
}

impl<'d, XR, YD, YU> Rp2040Panel<'d, XR, YD, YU>
where
    XR: AdcPin + 'd,
    YD: AdcPin + 'd,
    YU: AdcPin + 'd,
{
    /// Create a new panel
    ///
    /// # Arguments
    /// - `adc`: Blocking ADC driver
    /// - `x_left`: X- electrode (any GPIO)
    /// - `x_right`: X+ electrode (ADC pin)
    /// - `y_down`: Y- electrode (ADC pin)
    /// - `y_up`: Y+ electrode (ADC pin)
    pub fn new(
        adc: Adc<'d, Blocking>,
        x_left: Peri<'d, AnyPin>,
        x_right: Peri<'d, XR>,
        y_down: Peri<'d, YD>,
        y_up: Peri<'d, YU>,
    ) -> Self {
        Self {
            adc,
            x_left,
            x_right,
            y_down,
            y_up,
        }
    }
}

impl<'d, XR, YD, YU> ResistivePanel for Rp2040Panel<'d, XR, YD, YU>
where
    XR: AdcPin + 'd,
    YD: AdcPin + 'd,
    YU: AdcPin + 'd,
{
    fn sample_pressure(&mut self) -> Result<(u16, u16), PanelError> {
        let _y_up = drive(Flex::new(self.y_up.reborrow()), true);
        let _x_left = drive(Flex::new(self.x_left.reborrow()), false);
        settle();

        let mut x_right = Channel::new_pin(self.x_right.reborrow(), Pull::None);
        let z1 = read(&mut self.adc, &mut x_right)?;

        let mut y_down = Channel::new_pin(self.y_down.reborrow(), Pull::None);
        let z2 = read(&mut self.adc, &mut y_down)?;

        Ok((z1, z2))
    }

    fn sample_x(&mut self, out: &mut [u16]) -> Result<(), PanelError> {
        let _y_up = drive(Flex::new(self.y_up.reborrow()), true);
        let _y_down = drive(Flex::new(self.y_down.reborrow()), false);
        settle();

        let mut x_right = Channel::new_pin(self.x_right.reborrow(), Pull::None);
        for slot in out.iter_mut() {
            *slot = read(&mut self.adc, &mut x_right)?;
        }
        Ok(())
    }

    fn sample_y(&mut self, out: &mut [u16]) -> Result<(), PanelError> {
        let _x_right = drive(Flex::new(self.x_right.reborrow()), true);
        let _x_left = drive(Flex::new(self.x_left.reborrow()), false);
        settle();

        let mut y_up = Channel::new_pin(self.y_up.reborrow(), Pull::None);
        for slot in out.iter_mut() {
            *slot = read(&mut self.adc, &mut y_up)?;
        }
        Ok(())
    }
}

/// Configure `pin` as a push-pull output at the given level
fn drive(mut pin: Flex<'_>, high: bool) -> Flex<'_> {
    if high {
        pin.set_high();
    } else {
        pin.set_low();
    }
    pin.set_as_output();
    pin
}

fn settle() {
    cortex_m::asm::delay(SETTLE_CYCLES);
}

fn read(adc: &mut Adc<'_, Blocking>, channel: &mut Channel<'_>) -> Result<u16, PanelError> {
    adc.blocking_read(channel)
        .map(|raw| widen_sample(raw, ADC_BITS))
        .map_err(|_| PanelError::Conversion)
}
