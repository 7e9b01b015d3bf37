//! Portal Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that can be implemented
//! by chip-specific HALs. The polling loop and the drivers only ever talk
//! to these traits, which keeps them testable on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (portal-firmware)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  portal-core / portal-drivers           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  portal-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │  portal-hal-  │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`] - Digital input
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial console
//! - [`panel::ResistivePanel`] - 4-wire resistive touch plates

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod panel;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::InputPin;
pub use panel::{PanelError, ResistivePanel};
pub use uart::{UartConfig, UartRx, UartTx};
