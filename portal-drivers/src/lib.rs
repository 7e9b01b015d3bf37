//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in portal-core for the board's input hardware:
//!
//! - Touch sensors (4-wire resistive panel)

#![no_std]
#![deny(unsafe_code)]

pub mod touch;
