//! Touchscreen calibration
//!
//! Maps raw 16-bit plate readings to logical screen coordinates.

/// Raw reading range observed along one axis
///
/// `min` is the reading at logical coordinate 0 and `max` the reading at
/// the far edge. A reversed range (`min > max`) flips the axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisRange {
    pub min: u16,
    pub max: u16,
}

impl AxisRange {
    pub const fn new(min: u16, max: u16) -> Self {
        Self { min, max }
    }
}

/// Calibration for a resistive panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchCalibration {
    /// Raw X range
    pub x: AxisRange,
    /// Raw Y range
    pub y: AxisRange,
    /// Logical width in pixels
    pub width: u16,
    /// Logical height in pixels
    pub height: u16,
}

impl Default for TouchCalibration {
    /// 320x240 panel calibrated to `((5200, 59000), (5800, 57000))`
    fn default() -> Self {
        Self {
            x: AxisRange::new(5200, 59000),
            y: AxisRange::new(5800, 57000),
            width: 320,
            height: 240,
        }
    }
}

impl TouchCalibration {
    /// Uncalibrated full-scale mapping (raw readings pass through unchanged)
    pub const fn identity() -> Self {
        Self {
            x: AxisRange::new(0, u16::MAX),
            y: AxisRange::new(0, u16::MAX),
            width: u16::MAX,
            height: u16::MAX,
        }
    }

    /// Map a raw X reading to a logical X coordinate
    pub fn map_x(&self, raw: u16) -> u16 {
        map_range(raw, self.x.min, self.x.max, 0, self.width)
    }

    /// Map a raw Y reading to a logical Y coordinate
    pub fn map_y(&self, raw: u16) -> u16 {
        map_range(raw, self.y.min, self.y.max, 0, self.height)
    }

    /// Map the mean of `count` raw X readings summing to `sum`
    pub fn map_x_mean(&self, sum: u32, count: u32) -> u16 {
        map_mean(sum, count, self.x.min, self.x.max, 0, self.width)
    }

    /// Map the mean of `count` raw Y readings summing to `sum`
    pub fn map_y_mean(&self, sum: u32, count: u32) -> u16 {
        map_mean(sum, count, self.y.min, self.y.max, 0, self.height)
    }
}

/// Linear map of `value` from `[in_min, in_max]` to `[out_min, out_max]`
///
/// The result is clamped to the output range. A degenerate input range
/// maps everything to `out_min`.
pub fn map_range(value: u16, in_min: u16, in_max: u16, out_min: u16, out_max: u16) -> u16 {
    map_mean(value as u32, 1, in_min, in_max, out_min, out_max)
}

/// [`map_range`] applied to the mean of `count` readings summing to `sum`
///
/// The mean is never rounded on its own; the only truncation is of the
/// mapped result. `count == 0` maps to `out_min`.
pub fn map_mean(
    sum: u32,
    count: u32,
    in_min: u16,
    in_max: u16,
    out_min: u16,
    out_max: u16,
) -> u16 {
    if in_min == in_max || count == 0 {
        return out_min;
    }

    let n = count as i64;
    let in_span = (in_max as i64 - in_min as i64) * n;
    let out_span = out_max as i64 - out_min as i64;
    let offset = sum as i64 - in_min as i64 * n;

    let mapped = out_min as i64 + offset * out_span / in_span;

    let (lo, hi) = if out_min <= out_max {
        (out_min as i64, out_max as i64)
    } else {
        (out_max as i64, out_min as i64)
    };

    mapped.clamp(lo, hi) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_range_endpoints() {
        let cal = TouchCalibration::default();
        assert_eq!(cal.map_x(5200), 0);
        assert_eq!(cal.map_x(59000), 320);
        assert_eq!(cal.map_y(5800), 0);
        assert_eq!(cal.map_y(57000), 240);
    }

    #[test]
    fn test_map_range_midpoint() {
        let cal = TouchCalibration::default();
        // (32100 - 5200) * 320 / 53800 = 160
        assert_eq!(cal.map_x(32100), 160);
        // (31400 - 5800) * 240 / 51200 = 120
        assert_eq!(cal.map_y(31400), 120);
    }

    #[test]
    fn test_map_range_clamps() {
        let cal = TouchCalibration::default();
        assert_eq!(cal.map_x(0), 0);
        assert_eq!(cal.map_x(u16::MAX), 320);
        assert_eq!(cal.map_y(100), 0);
        assert_eq!(cal.map_y(65000), 240);
    }

    #[test]
    fn test_reversed_input_flips_axis() {
        assert_eq!(map_range(1000, 1000, 0, 0, 100), 0);
        assert_eq!(map_range(0, 1000, 0, 0, 100), 100);
        assert_eq!(map_range(250, 1000, 0, 0, 100), 75);
    }

    #[test]
    fn test_degenerate_range() {
        assert_eq!(map_range(500, 7, 7, 3, 100), 3);
    }

    #[test]
    fn test_mean_is_not_truncated_before_mapping() {
        let cal = TouchCalibration::default();
        // Mean 32268.75 maps to 161.003; a truncated mean of 32268 gives 160
        assert_eq!(cal.map_x_mean(32268 + 3 * 32269, 4), 161);
        assert_eq!(cal.map_x(32268), 160);
    }

    #[test]
    fn test_mean_of_one_matches_map_range() {
        let cal = TouchCalibration::default();
        for raw in [0, 5200, 17000, 32100, 59000, u16::MAX] {
            assert_eq!(cal.map_x_mean(raw as u32, 1), cal.map_x(raw));
        }
        assert_eq!(cal.map_y_mean(4 * 31400, 4), 120);
        assert_eq!(cal.map_y_mean(0, 0), 0);
    }

    #[test]
    fn test_identity_calibration() {
        let cal = TouchCalibration::identity();
        assert_eq!(cal.map_x(1234), 1234);
        assert_eq!(cal.map_y(u16::MAX), u16::MAX);
    }
}
