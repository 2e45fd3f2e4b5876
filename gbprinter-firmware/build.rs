//! Build script for gbprinter-firmware
//!
//! Puts memory.x on the linker path and rejects a broken printer.toml
//! before it gets embedded.

use std::env;
use std::fs;
use std::path::PathBuf;

/// Keys accepted in the [timing] section
const TIMING_KEYS: [&str; 3] = ["packet_timeout_ms", "pretend_print_ms", "poll_interval_ms"];

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    fs::copy("memory.x", out_dir.join("memory.x")).expect("memory.x is copied to OUT_DIR");
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=printer.toml");
    println!("cargo:rerun-if-changed=build.rs");

    let content = fs::read_to_string("printer.toml")
        .unwrap_or_else(|e| fail("cannot read printer.toml", &[e.to_string()]));
    let config: toml::Value = toml::from_str(&content)
        .unwrap_or_else(|e| fail("printer.toml is not valid TOML", &[e.to_string()]));

    let errors = validate_timing(&config);
    if !errors.is_empty() {
        fail("invalid timing in printer.toml", &errors);
    }
}

fn fail(title: &str, details: &[String]) -> ! {
    let mut message = format!("\nerror: {}\n", title);
    for detail in details {
        message.push_str(&format!("  - {}\n", detail));
    }
    panic!("{}", message);
}

/// Check the [timing] section, returning every problem found
fn validate_timing(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    let Some(root) = config.as_table() else {
        return errors;
    };

    for section in root.keys().filter(|s| *s != "timing") {
        errors.push(format!("unknown section [{}]", section));
    }

    let timing = match root.get("timing") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[timing] must be a table".to_string());
            return errors;
        }
        None => return errors,
    };

    for (key, value) in timing {
        if !TIMING_KEYS.contains(&key.as_str()) {
            errors.push(format!("[timing] unknown key '{}'", key));
            continue;
        }
        match value {
            toml::Value::Integer(ms) if *ms > 0 && *ms <= u32::MAX as i64 => {}
            _ => errors.push(format!("[timing] {} must be a positive integer", key)),
        }
    }

    let get = |key: &str| timing.get(key).and_then(|v| v.as_integer());
    let timeout = get("packet_timeout_ms").unwrap_or(100);
    let poll = get("poll_interval_ms").unwrap_or(10);
    if poll >= timeout {
        errors.push("[timing] poll_interval_ms must be below packet_timeout_ms".to_string());
    }

    errors
}
