//! 4-wire resistive touchscreen
//!
//! A reading is three measurements on the panel plates:
//!
//! 1. Pressure, from the cross-plate resistance. Below the threshold the
//!    panel is considered untouched and nothing else is measured.
//! 2. X position, averaged over several samples.
//! 3. Y position, averaged over several samples.
//!
//! Averages are mapped to screen pixels through the calibration, then
//! inverted and swapped as the board's mounting requires. The mean is
//! mapped from the sample sum so it is only truncated once, after mapping.

use portal_core::config::{TouchConfig, MAX_TOUCH_SAMPLES};
use portal_core::traits::{TouchError, TouchPoint, TouchSource};
use portal_hal::ResistivePanel;

const SAMPLE_BUF_LEN: usize = MAX_TOUCH_SAMPLES as usize;

/// Resistive touchscreen driver
pub struct ResistiveTouchscreen<P> {
    panel: P,
    config: TouchConfig,
}

impl<P: ResistivePanel> ResistiveTouchscreen<P> {
    /// Create a new touchscreen driver
    ///
    /// # Arguments
    /// - `panel`: Plate access for the board's panel
    /// - `config`: Calibration, sampling and orientation settings
    pub fn new(panel: P, config: TouchConfig) -> Self {
        Self { panel, config }
    }

    pub fn config(&self) -> &TouchConfig {
        &self.config
    }

    /// Give back the panel
    pub fn release(self) -> P {
        self.panel
    }

    /// Contact pressure, 0 (none) to 65535 (firm)
    pub fn pressure(&mut self) -> Result<u16, TouchError> {
        let (z1, z2) = self.panel.sample_pressure()?;
        Ok(u16::MAX.saturating_sub(z2.saturating_sub(z1)))
    }

    /// Summed raw X and Y readings, and the number of samples in each sum
    fn raw_position(&mut self) -> Result<(u32, u32, u32), TouchError> {
        let samples = (self.config.samples as usize).clamp(1, SAMPLE_BUF_LEN);
        let mut buf = [0u16; SAMPLE_BUF_LEN];

        self.panel.sample_x(&mut buf[..samples])?;
        let x = sum(&buf[..samples]);

        self.panel.sample_y(&mut buf[..samples])?;
        let y = sum(&buf[..samples]);

        Ok((x, y, samples as u32))
    }
}

impl<P: ResistivePanel> TouchSource for ResistiveTouchscreen<P> {
    fn touch_point(&mut self) -> Result<Option<TouchPoint>, TouchError> {
        let z = self.pressure()?;
        if z <= self.config.pressure_threshold {
            return Ok(None);
        }

        let (sum_x, sum_y, count) = self.raw_position()?;
        let cal = &self.config.calibration;

        let mut x = cal.map_x_mean(sum_x, count);
        let mut y = cal.map_y_mean(sum_y, count);

        if self.config.invert_x {
            x = cal.width - x;
        }
        if self.config.invert_y {
            y = cal.height - y;
        }
        if self.config.swap_xy {
            core::mem::swap(&mut x, &mut y);
        }

        Ok(Some(TouchPoint::with_pressure(x, y, z)))
    }
}

fn sum(samples: &[u16]) -> u32 {
    samples.iter().map(|&s| s as u32).sum()
}
