//! Sensor placement
//!
//! The sensor position and diameter come from two vendor properties, "X,Y"
//! and "W,H". Anything short, malformed or non-positive falls back to the
//! configured defaults.

use crate::config::SensorConfig;
use crate::properties::PropertySource;

/// Shortest offset string worth parsing ("X,Y")
const MIN_OFFSET_LEN: usize = 3;
/// Shortest size string worth parsing ("WWW,HHH")
const MIN_SIZE_LEN: usize = 7;

/// Sensor position and diameter in panel pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorGeometry {
    pub x: i32,
    pub y: i32,
    pub size: i32,
}

impl SensorGeometry {
    pub fn read(props: &impl PropertySource, config: &SensorConfig) -> Self {
        let offset = props.get(&config.offset_prop).unwrap_or_default();
        let size = props.get(&config.size_prop).unwrap_or_default();
        Self {
            x: position_x(&offset, config.x),
            y: position_y(&offset, config.y),
            size: sensor_size(&size, config.size),
        }
    }
}

/// Parse a leading decimal integer the way `strtol` does: optional leading
/// whitespace and sign, then digits up to the first non-digit.
fn leading_int(s: &str) -> Option<i32> {
    let s = s.trim_start();
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digits = s[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    s[..sign_len + digits].parse().ok()
}

/// Text before the first comma, or the whole string
fn first_field(s: &str) -> &str {
    s.split_once(',').map_or(s, |(head, _)| head)
}

/// Text after the first comma, or the whole string
fn second_field(s: &str) -> &str {
    s.split_once(',').map_or(s, |(_, tail)| tail)
}

fn positive_or(value: Option<i32>, default: i32) -> i32 {
    match value {
        Some(v) if v >= 1 => v,
        _ => default,
    }
}

/// X coordinate from an "X,Y" string
pub fn position_x(offset: &str, default: i32) -> i32 {
    if offset.len() < MIN_OFFSET_LEN {
        return default;
    }
    positive_or(leading_int(first_field(offset)), default)
}

/// Y coordinate from an "X,Y" string
pub fn position_y(offset: &str, default: i32) -> i32 {
    if offset.len() < MIN_OFFSET_LEN {
        return default;
    }
    positive_or(leading_int(second_field(offset)), default)
}

/// Sensor diameter from a "W,H" string: the larger of the two
pub fn sensor_size(size: &str, default: i32) -> i32 {
    if size.len() < MIN_SIZE_LEN {
        return default;
    }
    let width = leading_int(first_field(size));
    let height = leading_int(second_field(size));
    positive_or(width.zip(height).map(|(w, h)| w.max(h)), default)
}
