//! Board configuration types
//!
//! Everything the firmware needs to know about how the board is wired and
//! how the loop should behave. Defaults describe the reference board.

use heapless::String;

use super::calibration::TouchCalibration;

/// Maximum length of the echo prefix
pub const MAX_PREFIX_LEN: usize = 16;

/// Maximum GPIO number accepted in pin strings
pub const MAX_GPIO: u8 = 29;

/// Upper bound on samples averaged per touch axis
pub const MAX_TOUCH_SAMPLES: u8 = 16;

/// Default loop interval in milliseconds
pub const DEFAULT_INTERVAL_MS: u32 = 50;

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// GPIO pin number (0-29 for RP2040)
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    /// Active-low input with the internal pull-up enabled
    ///
    /// The usual wiring for a push button to ground.
    pub const fn button(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: true,
        }
    }
}

/// Button pin assignments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig {
    pub button1: PinConfig,
    pub button2: PinConfig,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            button1: PinConfig::button(3),
            button2: PinConfig::button(4),
        }
    }
}

/// Touchscreen measurement options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchConfig {
    /// Raw-to-logical mapping
    pub calibration: TouchCalibration,
    /// Samples averaged per axis
    pub samples: u8,
    /// Pressure value a contact must exceed
    pub pressure_threshold: u16,
    /// Mirror X after calibration
    pub invert_x: bool,
    /// Mirror Y after calibration
    pub invert_y: bool,
    /// Exchange X and Y after calibration and inversion
    pub swap_xy: bool,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            calibration: TouchCalibration::default(),
            samples: 4,
            pressure_threshold: 10_000,
            invert_x: false,
            invert_y: false,
            swap_xy: false,
        }
    }
}

/// How the loop reads console lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConsoleMode {
    /// Drain buffered bytes only; partial lines wait for a later tick
    #[default]
    NonBlocking,
    /// Once bytes arrive, keep reading until the line is terminated
    Blocking,
}

/// Serial console configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConsoleConfig {
    /// Baud rate
    pub baudrate: u32,
    /// Line read mode
    pub mode: ConsoleMode,
    /// Prefix written before echoed lines
    pub echo_prefix: String<MAX_PREFIX_LEN>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        let mut echo_prefix = String::new();
        let _ = echo_prefix.push_str("ECHO: ");
        Self {
            baudrate: 115200,
            mode: ConsoleMode::NonBlocking,
            echo_prefix,
        }
    }
}

/// Loop timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LoopConfig {
    /// Sleep after each tick, in milliseconds
    pub interval_ms: u32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }
}

/// Complete board configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardConfig {
    pub buttons: ButtonConfig,
    pub touch: TouchConfig,
    pub console: ConsoleConfig,
    pub timing: LoopConfig,
}

impl BoardConfig {
    /// Create the reference board configuration
    pub fn new() -> Self {
        Self::default()
    }
}
