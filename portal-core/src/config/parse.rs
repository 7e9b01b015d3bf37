//! Board configuration parser
//!
//! A minimal TOML subset parser that runs without an allocator, so the
//! firmware can parse its embedded `board.toml` at boot. It does NOT
//! support the full TOML spec.
//!
//! Supported features:
//! - `[section]` headers
//! - `key = value` pairs (string, integer, boolean)
//! - Two-element integer arrays: `size = [320, 240]`
//! - Comments (`# ...`), including trailing comments
//!
//! NOT supported:
//! - Multi-line strings or arrays
//! - Dotted keys and nested tables
//! - Escapes inside strings

use heapless::String;

use super::calibration::AxisRange;
use super::hardware::{BoardConfig, ConsoleMode, PinConfig, MAX_GPIO, MAX_TOUCH_SAMPLES};

/// What went wrong while parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseErrorKind {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key is not valid in its section
    UnknownKey,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Invalid pin string
    InvalidPin,
    /// Line is neither a header, a key/value pair nor a comment
    Syntax,
}

/// Parse error with the 1-based line it occurred on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Buttons,
    Touch,
    Console,
    Loop,
}

/// Parse board configuration
///
/// Keys that are not present keep their [`BoardConfig::default`] values.
pub fn parse_config(input: &str) -> Result<BoardConfig, ParseError> {
    let mut config = BoardConfig::default();
    let mut section = Section::Root;

    for (index, raw) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = strip_comment(raw).trim();

        if line.is_empty() {
            continue;
        }

        let at = |kind| ParseError {
            line: line_no,
            kind,
        };

        if line.starts_with('[') {
            if !line.ends_with(']') {
                return Err(at(ParseErrorKind::InvalidSection));
            }
            section = parse_section_header(&line[1..line.len() - 1])
                .ok_or(at(ParseErrorKind::InvalidSection))?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(at(ParseErrorKind::Syntax))?;
        apply_value(section, key, value, &mut config).map_err(at)?;
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Option<Section> {
    match header.trim() {
        "buttons" => Some(Section::Buttons),
        "touch" => Some(Section::Touch),
        "console" => Some(Section::Console),
        "loop" => Some(Section::Loop),
        _ => None,
    }
}

/// Drop a trailing `# comment` that is not inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut BoardConfig,
) -> Result<(), ParseErrorKind> {
    match section {
        Section::Buttons => match key {
            "button1" => config.buttons.button1 = parse_pin(value)?,
            "button2" => config.buttons.button2 = parse_pin(value)?,
            _ => return Err(ParseErrorKind::UnknownKey),
        },
        Section::Touch => {
            let touch = &mut config.touch;
            match key {
                "x_range" => {
                    let (min, max) = parse_pair(value)?;
                    touch.calibration.x = AxisRange::new(min, max);
                }
                "y_range" => {
                    let (min, max) = parse_pair(value)?;
                    touch.calibration.y = AxisRange::new(min, max);
                }
                "size" => {
                    let (width, height) = parse_pair(value)?;
                    touch.calibration.width = width;
                    touch.calibration.height = height;
                }
                "samples" => {
                    let samples: u8 = parse_int(value)?;
                    if samples == 0 || samples > MAX_TOUCH_SAMPLES {
                        return Err(ParseErrorKind::InvalidValue);
                    }
                    touch.samples = samples;
                }
                "pressure_threshold" => touch.pressure_threshold = parse_int(value)?,
                "invert_x" => touch.invert_x = parse_bool(value)?,
                "invert_y" => touch.invert_y = parse_bool(value)?,
                "swap_xy" => touch.swap_xy = parse_bool(value)?,
                _ => return Err(ParseErrorKind::UnknownKey),
            }
        }
        Section::Console => match key {
            "baudrate" => config.console.baudrate = parse_int(value)?,
            "mode" => config.console.mode = parse_mode(value)?,
            "echo_prefix" => {
                let prefix = parse_string(value)?;
                config.console.echo_prefix =
                    String::try_from(prefix).map_err(|_| ParseErrorKind::InvalidValue)?;
            }
            _ => return Err(ParseErrorKind::UnknownKey),
        },
        Section::Loop => match key {
            "interval_ms" => {
                let interval: u32 = parse_int(value)?;
                if interval == 0 {
                    return Err(ParseErrorKind::InvalidValue);
                }
                config.timing.interval_ms = interval;
            }
            _ => return Err(ParseErrorKind::UnknownKey),
        },
        Section::Root => return Err(ParseErrorKind::UnknownKey),
    }

    Ok(())
}

/// Parse a quoted string value
fn parse_string(value: &str) -> Result<&str, ParseErrorKind> {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        Ok(&value[1..value.len() - 1])
    } else {
        Err(ParseErrorKind::InvalidValue)
    }
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseErrorKind> {
    value.parse().map_err(|_| ParseErrorKind::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseErrorKind> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseErrorKind::InvalidValue),
    }
}

/// Parse `[a, b]`
fn parse_pair(value: &str) -> Result<(u16, u16), ParseErrorKind> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseErrorKind::InvalidValue)?;

    let mut parts = inner.split(',').map(str::trim);
    let first = parts.next().ok_or(ParseErrorKind::InvalidValue)?;
    let second = parts.next().ok_or(ParseErrorKind::InvalidValue)?;
    if parts.next().is_some() {
        return Err(ParseErrorKind::InvalidValue);
    }

    Ok((parse_int(first)?, parse_int(second)?))
}

fn parse_mode(value: &str) -> Result<ConsoleMode, ParseErrorKind> {
    match parse_string(value)? {
        "nonblocking" => Ok(ConsoleMode::NonBlocking),
        "blocking" => Ok(ConsoleMode::Blocking),
        _ => Err(ParseErrorKind::InvalidValue),
    }
}

/// Parse a pin string like "gpio11", "!gpio12", "^gpio4", "^!gpio3"
///
/// `^` enables the pull-up and `!` marks the pin active-low; they may
/// appear in either order.
pub fn parse_pin(value: &str) -> Result<PinConfig, ParseErrorKind> {
    let mut s = parse_string(value)?.trim();
    let mut pin = PinConfig::default();

    loop {
        if let Some(rest) = s.strip_prefix('^') {
            pin.pull_up = true;
            s = rest;
        } else if let Some(rest) = s.strip_prefix('!') {
            pin.inverted = true;
            s = rest;
        } else {
            break;
        }
    }

    let number = s.strip_prefix("gpio").ok_or(ParseErrorKind::InvalidPin)?;
    pin.pin = number.parse().map_err(|_| ParseErrorKind::InvalidPin)?;
    if pin.pin > MAX_GPIO {
        return Err(ParseErrorKind::InvalidPin);
    }

    Ok(pin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TouchCalibration;

    const REFERENCE: &str = r#"
# Reference board
[buttons]
button1 = "^!gpio3"
button2 = "^!gpio4"   # second button

[touch]
x_range = [5200, 59000]
y_range = [5800, 57000]
size = [320, 240]
samples = 4
pressure_threshold = 10000
invert_x = false
invert_y = false
swap_xy = false

[console]
baudrate = 115200
mode = "nonblocking"
echo_prefix = "ECHO: "

[loop]
interval_ms = 50
"#;

    #[test]
    fn test_reference_matches_defaults() {
        let config = parse_config(REFERENCE).unwrap();
        assert_eq!(config, BoardConfig::default());
    }

    #[test]
    fn test_empty_input_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), BoardConfig::default());
    }

    #[test]
    fn test_parse_pin() {
        let pin = parse_pin("\"gpio11\"").unwrap();
        assert_eq!(pin.pin, 11);
        assert!(!pin.inverted);
        assert!(!pin.pull_up);

        let pin = parse_pin("\"!^gpio5\"").unwrap();
        assert_eq!(pin.pin, 5);
        assert!(pin.inverted);
        assert!(pin.pull_up);

        assert_eq!(parse_pin("\"gpio30\""), Err(ParseErrorKind::InvalidPin));
        assert_eq!(parse_pin("\"pin3\""), Err(ParseErrorKind::InvalidPin));
        assert_eq!(parse_pin("gpio3"), Err(ParseErrorKind::InvalidValue));
    }

    #[test]
    fn test_overrides() {
        let config = parse_config(
            r#"
[touch]
size = [480, 320]
invert_y = true
swap_xy = true

[console]
mode = "blocking"
echo_prefix = "> "

[loop]
interval_ms = 20
"#,
        )
        .unwrap();

        assert_eq!(config.touch.calibration.width, 480);
        assert_eq!(config.touch.calibration.height, 320);
        assert_eq!(config.touch.calibration.x, TouchCalibration::default().x);
        assert!(config.touch.invert_y);
        assert!(config.touch.swap_xy);
        assert_eq!(config.console.mode, ConsoleMode::Blocking);
        assert_eq!(config.console.echo_prefix.as_str(), "> ");
        assert_eq!(config.timing.interval_ms, 20);
    }

    #[test]
    fn test_hash_inside_string_is_kept() {
        let config = parse_config("[console]\necho_prefix = \"#> \" # comment\n").unwrap();
        assert_eq!(config.console.echo_prefix.as_str(), "#> ");
    }

    #[test]
    fn test_errors_report_line() {
        let err = parse_config("[touch]\nsamples = 0\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.kind, ParseErrorKind::InvalidValue);

        let err = parse_config("\n[display]\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.kind, ParseErrorKind::InvalidSection);

        let err = parse_config("[loop]\ncadence = 5\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnknownKey);

        let err = parse_config("interval_ms = 5\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnknownKey);

        let err = parse_config("[touch]\nsize = [320]\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidValue);

        let err = parse_config("[loop]\njust words\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Syntax);

        let err = parse_config("[loop]\ninterval_ms = 0\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidValue);
    }

    #[test]
    fn test_firmware_board_toml_matches_defaults() {
        let shipped = include_str!("../../../portal-firmware/board.toml");
        assert_eq!(parse_config(shipped).unwrap(), BoardConfig::default());
    }
}
