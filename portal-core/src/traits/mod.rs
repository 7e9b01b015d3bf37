//! Hardware abstraction traits
//!
//! These traits define the interface between the polling loop and
//! sensor drivers. Pin- and UART-level traits live in `portal-hal`.

pub mod touch;

pub use touch::{TouchError, TouchPoint, TouchSource};
