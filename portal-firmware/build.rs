//! Build script for portal-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates board.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Pins wired to the console UART and the touch panel
const RESERVED_PINS: [(i64, &str); 6] = [
    (0, "console TX"),
    (1, "console RX"),
    (22, "touch X-left"),
    (26, "touch X-right"),
    (27, "touch Y-down"),
    (28, "touch Y-up"),
];

const MAX_GPIO: i64 = 29;
const MAX_TOUCH_SAMPLES: i64 = 16;
const MAX_PREFIX_LEN: usize = 16;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate board.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds board.toml as its configuration.            ║\n\
            ║  Please create one in the portal-firmware directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read board.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in board.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_buttons(&config, &mut errors);
    validate_touch(&config, &mut errors);
    validate_console(&config, &mut errors);
    validate_loop(&config, &mut errors);
    report("Invalid board configuration", &errors);

    println!("cargo:warning=board.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| format!("║  {:<64} ║", truncate_chars(line, 64)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Shorten `line` to at most `max` characters, ending in `...` when cut
fn truncate_chars(line: &str, max: usize) -> String {
    if line.chars().count() <= max {
        return line.to_string();
    }
    let end = line
        .char_indices()
        .nth(max.saturating_sub(3))
        .map_or(line.len(), |(i, _)| i);
    format!("{}...", &line[..end])
}

/// Panic with every collected error, if any
fn report(title: &str, errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Only the known sections, each a table
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        errors.push("board.toml must be a table".to_string());
        return;
    };

    for (name, value) in root {
        if !["buttons", "touch", "console", "loop"].contains(&name.as_str()) {
            errors.push(format!("unknown section [{}]", name));
        } else if !value.is_table() {
            errors.push(format!("[{}] must be a table", name));
        }
    }

    if root.get("buttons").is_none() {
        errors.push("Missing [buttons] section".to_string());
    }
}

/// Parse a pin string: optional `^`/`!` prefixes then `gpioN`
fn parse_pin(s: &str) -> Option<i64> {
    let digits = s.trim_start_matches(['^', '!']).strip_prefix("gpio")?;
    let pin: i64 = digits.parse().ok()?;
    (0..=MAX_GPIO).contains(&pin).then_some(pin)
}

fn validate_buttons(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(buttons) = config.get("buttons").and_then(|b| b.as_table()) else {
        return;
    };

    let mut pins = Vec::new();
    for key in ["button1", "button2"] {
        let pin = match buttons.get(key) {
            Some(toml::Value::String(s)) => match parse_pin(s) {
                Some(pin) => pin,
                None => {
                    errors.push(format!("[buttons] {} '{}' is not a valid pin", key, s));
                    continue;
                }
            },
            Some(_) => {
                errors.push(format!("[buttons] {} must be a pin string", key));
                continue;
            }
            None => {
                errors.push(format!("[buttons] missing '{}'", key));
                continue;
            }
        };

        if let Some((_, role)) = RESERVED_PINS.iter().find(|(p, _)| *p == pin) {
            errors.push(format!("[buttons] {} uses gpio{} ({})", key, pin, role));
        }
        if pins.contains(&pin) {
            errors.push(format!("[buttons] gpio{} assigned twice", pin));
        }
        pins.push(pin);
    }

    for key in buttons.keys() {
        if key != "button1" && key != "button2" {
            errors.push(format!("[buttons] unknown key '{}'", key));
        }
    }
}

/// Read a `[a, b]` array of non-negative 16-bit integers
fn u16_pair(value: &toml::Value) -> Option<(i64, i64)> {
    let arr = value.as_array()?;
    if arr.len() != 2 {
        return None;
    }
    let a = arr[0].as_integer()?;
    let b = arr[1].as_integer()?;
    let range = 0..=i64::from(u16::MAX);
    (range.contains(&a) && range.contains(&b)).then_some((a, b))
}

fn validate_touch(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(touch) = config.get("touch").and_then(|t| t.as_table()) else {
        return;
    };

    for (key, value) in touch {
        match key.as_str() {
            "x_range" | "y_range" => match u16_pair(value) {
                Some((a, b)) if a == b => {
                    errors.push(format!("[touch] {} must not be empty", key));
                }
                Some(_) => {}
                None => errors.push(format!("[touch] {} must be [min, max] in 0-65535", key)),
            },
            "size" => match u16_pair(value) {
                Some((w, h)) if w > 0 && h > 0 => {}
                _ => errors.push("[touch] size must be [width, height], both > 0".to_string()),
            },
            "samples" => match value.as_integer() {
                Some(n) if (1..=MAX_TOUCH_SAMPLES).contains(&n) => {}
                _ => errors.push(format!("[touch] samples must be 1-{}", MAX_TOUCH_SAMPLES)),
            },
            "pressure_threshold" => match value.as_integer() {
                Some(n) if (0..=i64::from(u16::MAX)).contains(&n) => {}
                _ => errors.push("[touch] pressure_threshold must be 0-65535".to_string()),
            },
            "invert_x" | "invert_y" | "swap_xy" => {
                if !value.is_bool() {
                    errors.push(format!("[touch] {} must be true or false", key));
                }
            }
            _ => errors.push(format!("[touch] unknown key '{}'", key)),
        }
    }
}

fn validate_console(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(console) = config.get("console").and_then(|c| c.as_table()) else {
        return;
    };

    for (key, value) in console {
        match key.as_str() {
            "baudrate" => match value.as_integer() {
                Some(n) if (1..=i64::from(u32::MAX)).contains(&n) => {}
                _ => errors.push("[console] baudrate must be a positive integer".to_string()),
            },
            "mode" => match value.as_str() {
                Some("nonblocking") | Some("blocking") => {}
                _ => errors.push("[console] mode must be 'nonblocking' or 'blocking'".to_string()),
            },
            "echo_prefix" => match value.as_str() {
                Some(s) if s.len() <= MAX_PREFIX_LEN => {}
                Some(_) => errors.push(format!(
                    "[console] echo_prefix longer than {} bytes",
                    MAX_PREFIX_LEN
                )),
                None => errors.push("[console] echo_prefix must be a string".to_string()),
            },
            _ => errors.push(format!("[console] unknown key '{}'", key)),
        }
    }
}

fn validate_loop(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(timing) = config.get("loop").and_then(|l| l.as_table()) else {
        return;
    };

    for (key, value) in timing {
        match key.as_str() {
            "interval_ms" => match value.as_integer() {
                Some(n) if (1..=i64::from(u32::MAX)).contains(&n) => {}
                _ => errors.push("[loop] interval_ms must be a positive integer".to_string()),
            },
            _ => errors.push(format!("[loop] unknown key '{}'", key)),
        }
    }
}
