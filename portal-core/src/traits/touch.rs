//! Touch sensor trait

use core::fmt;

use portal_hal::PanelError;

/// Errors that can occur while reading a touch sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchError {
    /// ADC conversion error
    ConversionError,
    /// Plate pins could not be switched
    PinConfig,
}

impl From<PanelError> for TouchError {
    fn from(e: PanelError) -> Self {
        match e {
            PanelError::Conversion => TouchError::ConversionError,
            PanelError::PinConfig => TouchError::PinConfig,
        }
    }
}

/// One contact reading in logical screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchPoint {
    pub x: u16,
    pub y: u16,
    /// Contact pressure, for sensors that report it
    pub pressure: Option<u16>,
}

impl TouchPoint {
    pub const fn new(x: u16, y: u16) -> Self {
        Self {
            x,
            y,
            pressure: None,
        }
    }

    pub const fn with_pressure(x: u16, y: u16, pressure: u16) -> Self {
        Self {
            x,
            y,
            pressure: Some(pressure),
        }
    }
}

impl fmt::Display for TouchPoint {
    /// Tuple form: `(x, y, pressure)` or `(x, y)`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pressure {
            Some(z) => write!(f, "({}, {}, {})", self.x, self.y, z),
            None => write!(f, "({}, {})", self.x, self.y),
        }
    }
}

/// Trait for touch sensors
///
/// Takes `&mut self` because a reading reconfigures pins and runs ADC
/// conversions.
pub trait TouchSource {
    /// Read the current contact point, or `None` when nothing touches
    /// the sensor
    fn touch_point(&mut self) -> Result<Option<TouchPoint>, TouchError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;
    use heapless::String;

    #[test]
    fn test_display_with_pressure() {
        let mut s: String<32> = String::new();
        write!(s, "{}", TouchPoint::with_pressure(160, 120, 42000)).unwrap();
        assert_eq!(s.as_str(), "(160, 120, 42000)");
    }

    #[test]
    fn test_display_without_pressure() {
        let mut s: String<32> = String::new();
        write!(s, "{}", TouchPoint::new(1, 2)).unwrap();
        assert_eq!(s.as_str(), "(1, 2)");
    }

    #[test]
    fn test_panel_error_conversion() {
        assert_eq!(
            TouchError::from(PanelError::Conversion),
            TouchError::ConversionError
        );
        assert_eq!(TouchError::from(PanelError::PinConfig), TouchError::PinConfig);
    }
}
