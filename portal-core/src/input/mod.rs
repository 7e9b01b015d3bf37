//! Digital inputs

pub mod button;

pub use button::{Button, ButtonEvent, ButtonId, ButtonState};
