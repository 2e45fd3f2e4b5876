//! Minimal TOML reader for the embedded printer configuration
//!
//! Handles only what `printer.toml` needs:
//! - `[timing]` section header
//! - `key = integer` pairs
//! - Comments (# ...), including after a value
//!
//! Anything else is rejected rather than ignored, so a typo in the file
//! does not silently fall back to a default.

use super::types::{ConfigError, SessionConfig};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not valid in its section
    UnknownKey,
    /// Value is not a valid integer, or the line is not `key = value`
    InvalidValue,
    /// Values parsed but do not make a usable configuration
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(err: ConfigError) -> Self {
        ParseError::Invalid(err)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Timing,
}

/// Parse TOML text into a validated SessionConfig
///
/// Keys that are not given keep their defaults.
pub fn parse_config(input: &str) -> Result<SessionConfig, ParseError> {
    let mut config = SessionConfig::DEFAULT;
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidValue)?;
        apply_value(section, key, value, &mut config)?;
    }

    config.validate()?;
    Ok(config)
}

fn parse_section_header(line: &str) -> Result<Section, ParseError> {
    let header = strip_comment(line);
    let name = header
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .ok_or(ParseError::InvalidSection)?;

    match name.trim() {
        "timing" => Ok(Section::Timing),
        _ => Err(ParseError::InvalidSection),
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(hash_pos) => line[..hash_pos].trim(),
        None => line,
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = strip_comment(line[eq_pos + 1..].trim());

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a millisecond value, allowing `_` digit separators
fn parse_ms(value: &str) -> Result<u32, ParseError> {
    let mut ms: u32 = 0;
    let mut digits = 0;

    for c in value.chars() {
        if c == '_' {
            continue;
        }
        let digit = c.to_digit(10).ok_or(ParseError::InvalidValue)?;
        ms = ms
            .checked_mul(10)
            .and_then(|v| v.checked_add(digit))
            .ok_or(ParseError::InvalidValue)?;
        digits += 1;
    }

    if digits == 0 {
        return Err(ParseError::InvalidValue);
    }
    Ok(ms)
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut SessionConfig,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Timing, "packet_timeout_ms") => config.packet_timeout_ms = parse_ms(value)?,
        (Section::Timing, "pretend_print_ms") => config.pretend_print_ms = parse_ms(value)?,
        (Section::Timing, "poll_interval_ms") => config.poll_interval_ms = parse_ms(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}
