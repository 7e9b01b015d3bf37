//! Dynamic pin allocation for config-driven hardware setup
//!
//! Button pins come from `board.toml`, so they are taken from the bank by
//! number at runtime. The console and touch panel pins are wired on the
//! board and need their concrete pin types (the ADC channels are typed),
//! so they are split out up front and the bank refuses them.

use embassy_rp::gpio::AnyPin;
use embassy_rp::peripherals::{PIN_0, PIN_1, PIN_22, PIN_26, PIN_27, PIN_28};
use embassy_rp::Peri;
use embassy_rp::Peripherals;

/// Number of user GPIOs on the RP2040
pub const GPIO_COUNT: usize = 30;

/// Pins claimed by the fixed board wiring
///
/// UART0 TX/RX, then touch X-left, X-right, Y-down, Y-up.
pub const RESERVED_PINS: [u8; 6] = [0, 1, 22, 26, 27, 28];

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin,
    /// Pin already taken
    AlreadyTaken,
    /// Pin reserved for the console or the touch panel
    Reserved,
}

/// Whether `pin` belongs to the fixed board wiring
pub fn is_reserved(pin: u8) -> bool {
    RESERVED_PINS.contains(&pin)
}

/// Pin bank that holds the free GPIO pins and allows taking them by number
///
/// This enables config-driven pin assignment where pin numbers come from
/// a TOML config file rather than being hardcoded.
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; GPIO_COUNT],
}

impl PinBank {
    /// Split the peripherals into the pin bank, the fixed board pins, and
    /// the non-GPIO peripherals the firmware needs
    pub fn from_peripherals(p: Peripherals) -> (Self, BoardPins, RemainingPeripherals) {
        let board = BoardPins {
            console_tx: p.PIN_0,
            console_rx: p.PIN_1,
            touch_x_left: p.PIN_22,
            touch_x_right: p.PIN_26,
            touch_y_down: p.PIN_27,
            touch_y_up: p.PIN_28,
        };

        let bank = Self {
            pins: [
                None,
                None,
                Some(p.PIN_2.into()),
                Some(p.PIN_3.into()),
                Some(p.PIN_4.into()),
                Some(p.PIN_5.into()),
                Some(p.PIN_6.into()),
                Some(p.PIN_7.into()),
                Some(p.PIN_8.into()),
                Some(p.PIN_9.into()),
                Some(p.PIN_10.into()),
                Some(p.PIN_11.into()),
                Some(p.PIN_12.into()),
                Some(p.PIN_13.into()),
                Some(p.PIN_14.into()),
                Some(p.PIN_15.into()),
                Some(p.PIN_16.into()),
                Some(p.PIN_17.into()),
                Some(p.PIN_18.into()),
                Some(p.PIN_19.into()),
                Some(p.PIN_20.into()),
                Some(p.PIN_21.into()),
                None,
                Some(p.PIN_23.into()),
                Some(p.PIN_24.into()),
                Some(p.PIN_25.into()),
                None,
                None,
                None,
                Some(p.PIN_29.into()),
            ],
        };

        let remaining = RemainingPeripherals {
            uart0: p.UART0,
            adc: p.ADC,
        };

        (bank, board, remaining)
    }

    /// Take a pin by number
    ///
    /// Returns the pin if available, or an error if:
    /// - Pin number is invalid (>= 30)
    /// - Pin belongs to the console or touch panel
    /// - Pin was already taken
    pub fn take(&mut self, pin_num: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        if pin_num as usize >= GPIO_COUNT {
            return Err(PinError::InvalidPin);
        }
        if is_reserved(pin_num) {
            return Err(PinError::Reserved);
        }
        self.pins[pin_num as usize]
            .take()
            .ok_or(PinError::AlreadyTaken)
    }

    /// Check if a pin is available
    pub fn is_available(&self, pin_num: u8) -> bool {
        self.pins
            .get(pin_num as usize)
            .is_some_and(|pin| pin.is_some())
    }
}

/// Pins with a fixed role on the board
pub struct BoardPins {
    pub console_tx: Peri<'static, PIN_0>,
    pub console_rx: Peri<'static, PIN_1>,
    pub touch_x_left: Peri<'static, PIN_22>,
    pub touch_x_right: Peri<'static, PIN_26>,
    pub touch_y_down: Peri<'static, PIN_27>,
    pub touch_y_up: Peri<'static, PIN_28>,
}

/// Non-GPIO peripherals that remain after creating the PinBank
pub struct RemainingPeripherals {
    pub uart0: Peri<'static, embassy_rp::peripherals::UART0>,
    pub adc: Peri<'static, embassy_rp::peripherals::ADC>,
}
