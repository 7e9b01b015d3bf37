//! 4-wire resistive touch panel plates
//!
//! A resistive panel is two resistive layers (plates), each with an
//! electrode on opposite edges:
//!
//! ```text
//!   X plate:  X-left ────────── X-right
//!   Y plate:  Y-down ────────── Y-up
//! ```
//!
//! Measuring an axis means driving one plate's electrodes high/low and
//! sampling the voltage picked up by the *other* plate through an ADC.
//! Which pins can be sampled depends on the chip, so the trait is phrased
//! in terms of the three measurements a driver needs rather than raw pins.
//!
//! All samples are 16-bit full scale (0..=65535). Chips with narrower ADCs
//! must widen their readings.

/// Errors from a plate measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    /// ADC conversion failed
    Conversion,
    /// Pin cannot be reconfigured for the requested role
    PinConfig,
}

/// Plate-level access to a 4-wire resistive touch panel
pub trait ResistivePanel {
    /// Contact pressure inputs
    ///
    /// Drives Y-up high and X-left low, then samples X-right (`z1`) followed
    /// by Y-down (`z2`).
    fn sample_pressure(&mut self) -> Result<(u16, u16), PanelError>;

    /// X position
    ///
    /// Drives Y-up high and Y-down low and fills `out` with consecutive
    /// samples of X-right.
    fn sample_x(&mut self, out: &mut [u16]) -> Result<(), PanelError>;

    /// Y position
    ///
    /// Drives X-right high and X-left low and fills `out` with consecutive
    /// samples of Y-up.
    fn sample_y(&mut self, out: &mut [u16]) -> Result<(), PanelError>;
}

/// Widen an unsigned ADC reading of `bits` width to 16-bit full scale
///
/// Replicates the top bits into the low end so that full scale maps to
/// `0xFFFF` rather than `0xFFF0`.
pub const fn widen_sample(raw: u16, bits: u32) -> u16 {
    if bits >= 16 {
        return raw;
    }
    if bits == 0 {
        return 0;
    }
    let shift = 16 - bits;
    let raw = raw & ((1u16 << bits) - 1);
    let fill = if shift < bits { shift } else { bits };
    (raw << shift) | (raw >> (bits - fill))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widen_12_bit() {
        assert_eq!(widen_sample(0, 12), 0);
        assert_eq!(widen_sample(0x0FFF, 12), 0xFFFF);
        assert_eq!(widen_sample(0x0800, 12), 0x8008);
    }

    #[test]
    fn test_widen_in_const_context() {
        const FULL_SCALE: u16 = widen_sample(0x0FFF, 12);
        const EMPTY: u16 = widen_sample(0x0FFF, 0);
        assert_eq!(FULL_SCALE, 0xFFFF);
        assert_eq!(EMPTY, 0);
    }

    #[test]
    fn test_widen_16_bit_is_identity() {
        assert_eq!(widen_sample(12345, 16), 12345);
    }
}
