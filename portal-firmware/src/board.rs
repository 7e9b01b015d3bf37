//! Board configuration loading
//!
//! `board.toml` is compiled into the firmware. build.rs has already
//! rejected malformed files, so a parse failure here means the on-target
//! parser and the build-time validator disagree; the firmware falls back
//! to the defaults rather than refusing to boot.

use defmt::*;

use portal_core::config::{parse_config, BoardConfig, ConsoleMode, PinConfig};
use portal_hal::gpio::Pull;

/// Embedded board configuration (compiled into firmware)
/// Edit board.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../board.toml");

/// Parse the embedded configuration, or fall back to defaults
pub fn load_config() -> BoardConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Loaded board.toml");
            config
        }
        Err(e) => {
            warn!(
                "board.toml line {}: {}, using built-in defaults",
                e.line, e.kind
            );
            BoardConfig::default()
        }
    }
}

/// Log the active configuration
pub fn log_config(config: &BoardConfig) {
    let b = &config.buttons;
    info!(
        "Buttons: gpio{} (inverted={}), gpio{} (inverted={})",
        b.button1.pin, b.button1.inverted, b.button2.pin, b.button2.inverted
    );

    let t = &config.touch;
    let cal = &t.calibration;
    info!(
        "Touch: x=({}, {}) y=({}, {}) -> {}x{}, samples={}, threshold={}",
        cal.x.min,
        cal.x.max,
        cal.y.min,
        cal.y.max,
        cal.width,
        cal.height,
        t.samples,
        t.pressure_threshold
    );
    if t.invert_x || t.invert_y || t.swap_xy {
        debug!(
            "Touch orientation: invert_x={}, invert_y={}, swap_xy={}",
            t.invert_x, t.invert_y, t.swap_xy
        );
    }

    let c = &config.console;
    let mode = match c.mode {
        ConsoleMode::NonBlocking => "nonblocking",
        ConsoleMode::Blocking => "blocking",
    };
    info!(
        "Console: {} baud, {} mode, prefix \"{}\"",
        c.baudrate,
        mode,
        c.echo_prefix.as_str()
    );

    info!("Loop interval: {}ms", config.timing.interval_ms);
}

/// Pull setting for a button pin
pub fn button_pull(pin: &PinConfig) -> Pull {
    if pin.pull_up {
        Pull::Up
    } else {
        Pull::None
    }
}
