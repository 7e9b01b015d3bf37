//! RP2040-specific HAL for the Portal input firmware
//!
//! This crate provides RP2040-specific implementations of the shared
//! `portal-hal` traits, plus RP2040-specific functionality:
//!
//! - Button inputs (`embassy_rp::gpio::Input`)
//! - Dynamic pin allocation for config-driven setup
//! - Buffered UART console
//! - Resistive touch panel plates on the ADC pins

#![no_std]

pub mod gpio;
pub mod panel;
pub mod pins;
pub mod uart;

pub use gpio::ButtonInput;
pub use panel::Rp2040Panel;
pub use pins::{BoardPins, PinBank, PinError, RemainingPeripherals, RESERVED_PINS};
pub use uart::{ConsoleError, ConsoleRx, ConsoleTx};
