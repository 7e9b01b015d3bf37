//! Push-button edge detection
//!
//! A button reports a change only on the tick where its level flips, so
//! holding it down produces exactly one press and letting go exactly one
//! release.

use core::fmt;

use portal_hal::InputPin;

/// Which of the two board buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    Button1,
    Button2,
}

impl ButtonId {
    /// 1-based number as printed on the board
    pub const fn number(self) -> u8 {
        match self {
            ButtonId::Button1 => 1,
            ButtonId::Button2 => 2,
        }
    }
}

impl fmt::Display for ButtonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Button {}", self.number())
    }
}

/// Button transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    Pressed,
    Released,
}

/// Last observed state of one button
///
/// Starts released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonState {
    is_pressed: bool,
}

impl ButtonState {
    pub const fn new() -> Self {
        Self { is_pressed: false }
    }

    pub const fn is_pressed(&self) -> bool {
        self.is_pressed
    }

    /// Feed the current "is pressed" reading
    ///
    /// Returns the transition if the reading differs from the recorded
    /// state, and records the new state.
    pub fn update(&mut self, pressed_now: bool) -> Option<ButtonEvent> {
        match (self.is_pressed, pressed_now) {
            (false, true) => {
                self.is_pressed = true;
                Some(ButtonEvent::Pressed)
            }
            (true, false) => {
                self.is_pressed = false;
                Some(ButtonEvent::Released)
            }
            _ => None,
        }
    }
}

/// A button wired to an input pin
pub struct Button<P> {
    id: ButtonId,
    pin: P,
    /// If true, the button is pressed when the pin reads LOW
    active_low: bool,
    state: ButtonState,
}

impl<P: InputPin> Button<P> {
    /// Create a new button
    ///
    /// # Arguments
    /// - `id`: Which board button this is
    /// - `pin`: The input pin
    /// - `active_low`: If true, pressed reads LOW (button to ground with pull-up)
    pub fn new(id: ButtonId, pin: P, active_low: bool) -> Self {
        Self {
            id,
            pin,
            active_low,
            state: ButtonState::new(),
        }
    }

    /// Button to ground with pull-up: idle high, pressed low
    pub fn new_active_low(id: ButtonId, pin: P) -> Self {
        Self::new(id, pin, true)
    }

    pub fn id(&self) -> ButtonId {
        self.id
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Sample the pin and report an edge, if any
    pub fn poll(&mut self) -> Option<ButtonEvent> {
        let pressed = self.pin.is_high() != self.active_low;
        self.state.update(pressed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use proptest::prelude::*;

    /// Mock GPIO pin for testing
    struct MockPin<'a> {
        high: &'a Cell<bool>,
    }

    impl InputPin for MockPin<'_> {
        fn is_high(&self) -> bool {
            self.high.get()
        }
    }

    #[test]
    fn test_idle_then_press_then_release() {
        // high x3, low x2, high x2
        let levels = [true, true, true, false, false, true, true];
        let expected = [
            None,
            None,
            None,
            Some(ButtonEvent::Pressed),
            None,
            Some(ButtonEvent::Released),
            None,
        ];

        let level = Cell::new(true);
        let mut button = Button::new_active_low(ButtonId::Button1, MockPin { high: &level });

        for (raw, want) in levels.iter().zip(expected) {
            level.set(*raw);
            assert_eq!(button.poll(), want);
        }
    }

    #[test]
    fn test_stable_level_never_repeats() {
        let level = Cell::new(false);
        let mut button = Button::new_active_low(ButtonId::Button2, MockPin { high: &level });

        assert_eq!(button.poll(), Some(ButtonEvent::Pressed));
        for _ in 0..10 {
            assert_eq!(button.poll(), None);
            assert!(button.state().is_pressed());
        }
    }

    #[test]
    fn test_active_high_button() {
        let level = Cell::new(false);
        let mut button = Button::new(ButtonId::Button1, MockPin { high: &level }, false);

        assert_eq!(button.poll(), None);
        level.set(true);
        assert_eq!(button.poll(), Some(ButtonEvent::Pressed));
        level.set(false);
        assert_eq!(button.poll(), Some(ButtonEvent::Released));
    }

    #[test]
    fn test_button_id_display() {
        let mut s: heapless::String<16> = heapless::String::new();
        core::fmt::Write::write_fmt(&mut s, format_args!("{}", ButtonId::Button2)).unwrap();
        assert_eq!(s.as_str(), "Button 2");
    }

    proptest! {
        #[test]
        fn prop_one_event_per_edge(levels in proptest::collection::vec(any::<bool>(), 0..200)) {
            let mut state = ButtonState::new();
            // Raw level high = released, starting from idle
            let mut prev_high = true;

            for high in levels {
                let event = state.update(!high);
                let want = match (prev_high, high) {
                    (true, false) => Some(ButtonEvent::Pressed),
                    (false, true) => Some(ButtonEvent::Released),
                    _ => None,
                };
                prop_assert_eq!(event, want);
                prop_assert_eq!(state.is_pressed(), !high);
                prev_high = high;
            }
        }
    }
}
