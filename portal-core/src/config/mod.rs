//! Configuration types
//!
//! Board configuration and the parser for its TOML form.

pub mod calibration;
pub mod hardware;
pub mod parse;

pub use calibration::{map_mean, map_range, AxisRange, TouchCalibration};
pub use hardware::*;
pub use parse::{parse_config, ParseError, ParseErrorKind};
