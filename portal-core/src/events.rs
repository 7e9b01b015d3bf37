//! Notifications emitted by the polling loop
//!
//! Every observable effect of a tick is one of these, written to the
//! console as a single text line.

use core::fmt;

use crate::console::Line;
use crate::input::{ButtonEvent, ButtonId};
use crate::traits::TouchPoint;

/// Longest rendered notification, terminator included
pub const MAX_MESSAGE_LEN: usize = 160;

/// Something the loop observed during a tick
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Notification {
    /// A button changed state
    Button { id: ButtonId, event: ButtonEvent },
    /// The touchscreen reported a contact
    Touch(TouchPoint),
    /// A complete console line was received
    Echo(Line),
}

impl Notification {
    pub const fn pressed(id: ButtonId) -> Self {
        Notification::Button {
            id,
            event: ButtonEvent::Pressed,
        }
    }

    pub const fn released(id: ButtonId) -> Self {
        Notification::Button {
            id,
            event: ButtonEvent::Released,
        }
    }

    /// Console text for this notification, without line terminator
    ///
    /// `echo_prefix` is only used by [`Notification::Echo`].
    pub fn display<'a>(&'a self, echo_prefix: &'a str) -> Rendered<'a> {
        Rendered {
            notification: self,
            echo_prefix,
        }
    }
}

/// Text form of a [`Notification`]
pub struct Rendered<'a> {
    notification: &'a Notification,
    echo_prefix: &'a str,
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.notification {
            Notification::Button { id, event } => {
                let verb = match event {
                    ButtonEvent::Pressed => "pressed",
                    ButtonEvent::Released => "released",
                };
                write!(f, "{} {}!", id, verb)
            }
            Notification::Touch(point) => write!(f, "HI {}", point),
            Notification::Echo(line) => write!(f, "{}{}", self.echo_prefix, line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;
    use heapless::String;

    fn render(n: &Notification) -> String<MAX_MESSAGE_LEN> {
        let mut s = String::new();
        write!(s, "{}", n.display("ECHO: ")).unwrap();
        s
    }

    #[test]
    fn test_button_messages() {
        assert_eq!(
            render(&Notification::pressed(ButtonId::Button1)).as_str(),
            "Button 1 pressed!"
        );
        assert_eq!(
            render(&Notification::released(ButtonId::Button2)).as_str(),
            "Button 2 released!"
        );
    }

    #[test]
    fn test_touch_message() {
        let n = Notification::Touch(TouchPoint::with_pressure(12, 34, 50000));
        assert_eq!(render(&n).as_str(), "HI (12, 34, 50000)");
    }

    #[test]
    fn test_echo_message() {
        let n = Notification::Echo(Line::from_bytes(b"hello").unwrap());
        assert_eq!(render(&n).as_str(), "ECHO: hello");

        let n = Notification::Echo(Line::default());
        assert_eq!(render(&n).as_str(), "ECHO: ");
    }

    #[test]
    fn test_longest_echo_fits() {
        let line = Line::from_bytes(&[0xFF; crate::console::MAX_LINE_LEN]).unwrap();
        let n = Notification::Echo(line);
        let mut s: String<MAX_MESSAGE_LEN> = String::new();
        write!(s, "{}", n.display("0123456789abcdef")).unwrap();
        assert_eq!(s.len(), 16 + crate::console::MAX_LINE_LEN);
    }
}
