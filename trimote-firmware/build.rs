//! Build script for trimote-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates trimote.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Must match `trimote_core::config::MAX_PEERS`
const MAX_PEERS: usize = 3;

/// Must match `trimote_core::config::MAX_SPEEDS`
const MAX_SPEEDS: usize = 16;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate trimote.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=trimote.toml");

    let config_path = Path::new("trimote.toml");
    if !config_path.exists() {
        fail(
            "trimote.toml not found",
            &["The firmware embeds trimote.toml; create it next to Cargo.toml".to_string()],
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read trimote.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            let lines: Vec<String> = e.to_string().lines().map(str::to_string).collect();
            fail("Invalid TOML syntax in trimote.toml", &lines);
        }
    };

    let mut errors = Vec::new();
    validate_timer(&config, &mut errors);
    validate_speed(&config, &mut errors);
    validate_buttons(&config, &mut errors);
    validate_peers(&config, &mut errors);

    if !errors.is_empty() {
        fail("Invalid configuration in trimote.toml", &errors);
    }

    println!("cargo:warning=trimote.toml validated successfully");
}

/// Abort the build with a boxed error listing
fn fail(title: &str, errors: &[String]) -> ! {
    let body = errors
        .iter()
        .map(|e| {
            let e = if e.len() > 62 {
                format!("{}...", &e[..59])
            } else {
                e.clone()
            };
            format!("║  • {:<62} ║", e)
        })
        .collect::<Vec<_>>()
        .join("\n");

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}

/// Read an optional integer key, checking its range
fn int_in_range(
    table: &toml::Table,
    section: &str,
    key: &str,
    range: std::ops::RangeInclusive<i64>,
    errors: &mut Vec<String>,
) -> Option<i64> {
    match table.get(key) {
        None => None,
        Some(toml::Value::Integer(v)) if range.contains(v) => Some(*v),
        Some(toml::Value::Integer(_)) => {
            errors.push(format!(
                "[{}] {} must be {}-{}",
                section,
                key,
                range.start(),
                range.end()
            ));
            None
        }
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            None
        }
    }
}

fn section<'a>(
    config: &'a toml::Value,
    name: &str,
    errors: &mut Vec<String>,
) -> Option<&'a toml::Table> {
    match config.get(name) {
        None => None,
        Some(toml::Value::Table(t)) => Some(t),
        Some(_) => {
            errors.push(format!("[{}] must be a table", name));
            None
        }
    }
}

/// Validate [timer]: non-zero periods, horizon a multiple of the heartbeat
fn validate_timer(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(timer) = section(config, "timer", errors) else {
        return;
    };
    let max = u32::MAX as i64;

    int_in_range(timer, "timer", "tick_period_us", 1..=max, errors);
    let heartbeat = int_in_range(timer, "timer", "heartbeat_period_ticks", 1..=max, errors)
        .unwrap_or(1000);
    let horizon = int_in_range(timer, "timer", "reset_horizon_ticks", 1..=max, errors)
        .unwrap_or(60_000);

    if horizon % heartbeat != 0 {
        errors.push(format!(
            "[timer] reset_horizon_ticks ({}) must be a multiple of heartbeat_period_ticks ({})",
            horizon, heartbeat
        ));
    }
}

/// Validate [speed]: 1..=MAX_SPEEDS non-negative i16 values, index in range
fn validate_speed(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(speed) = section(config, "speed", errors) else {
        return;
    };

    let mut len = 8;
    match speed.get("table") {
        None => {}
        Some(toml::Value::Array(values)) => {
            len = values.len();
            if values.is_empty() || values.len() > MAX_SPEEDS {
                errors.push(format!(
                    "[speed] table must have 1-{} entries",
                    MAX_SPEEDS
                ));
            }
            for (i, value) in values.iter().enumerate() {
                match value {
                    toml::Value::Integer(v) if (0..=i16::MAX as i64).contains(v) => {}
                    _ => errors.push(format!(
                        "[speed] table[{}] must be an integer 0-{}",
                        i,
                        i16::MAX
                    )),
                }
            }
        }
        Some(_) => errors.push("[speed] table must be an array".to_string()),
    }

    if let Some(index) = int_in_range(speed, "speed", "default_index", 0..=i64::MAX, errors) {
        if index as usize >= len {
            errors.push(format!(
                "[speed] default_index {} is past the end of the table",
                index
            ));
        }
    }
}

/// Validate [buttons]
fn validate_buttons(config: &toml::Value, errors: &mut Vec<String>) {
    if let Some(buttons) = section(config, "buttons", errors) {
        int_in_range(buttons, "buttons", "debounce_ms", 0..=u16::MAX as i64, errors);
    }
}

/// Validate [peer.N]: numbered 1.. in order, each with a unique valid mac
fn validate_peers(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(peers) = section(config, "peer", errors) else {
        errors.push("Missing [peer.*] section - at least one peer is required".to_string());
        return;
    };

    if peers.is_empty() || peers.len() > MAX_PEERS {
        errors.push(format!("[peer.*] must define 1-{} peers", MAX_PEERS));
    }

    let mut macs: Vec<String> = Vec::new();
    for id in 1..=peers.len() {
        let name = id.to_string();
        let Some(peer) = peers.get(&name) else {
            errors.push(format!("[peer.{}] missing - peers must be numbered 1, 2, 3", id));
            continue;
        };

        match peer.get("mac") {
            Some(toml::Value::String(mac)) => {
                if !is_mac(mac) {
                    errors.push(format!(
                        "[peer.{}] mac '{}' must look like 98:A3:16:90:16:90",
                        id, mac
                    ));
                } else if macs.contains(&mac.to_uppercase()) {
                    errors.push(format!("[peer.{}] mac '{}' is listed twice", id, mac));
                } else {
                    macs.push(mac.to_uppercase());
                }
            }
            Some(_) => errors.push(format!("[peer.{}] mac must be a string", id)),
            None => errors.push(format!("[peer.{}] missing 'mac'", id)),
        }
    }
}

fn is_mac(text: &str) -> bool {
    let parts: Vec<&str> = text.split(':').collect();
    parts.len() == 6
        && parts
            .iter()
            .all(|p| p.len() == 2 && p.chars().all(|c| c.is_ascii_hexdigit()))
}
