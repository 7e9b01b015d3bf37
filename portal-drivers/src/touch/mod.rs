//! Touch sensor drivers

mod resistive;

pub use resistive::ResistiveTouchscreen;
