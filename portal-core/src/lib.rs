//! Board-agnostic core logic for the Portal input firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Button edge detection
//! - Console line assembly and echo
//! - Touch point types and the touch sensor trait
//! - The polling loop that ties the peripherals together
//! - Board configuration types and the `board.toml` parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod console;
pub mod events;
pub mod input;
pub mod poll;
pub mod traits;
