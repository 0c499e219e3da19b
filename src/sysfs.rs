//! Scalar sysfs nodes
//!
//! The panel and touch drivers expose single-value toggles. Writes replace the
//! whole value and are never read back.

use crate::Result;
use std::fmt::Display;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Write `value` to the node at `path`
pub fn write_value(path: &Path, value: impl Display) -> Result<()> {
    fs::write(path, value.to_string())?;
    Ok(())
}

/// Write and log on failure. Used for fire-and-forget toggles.
pub fn set(path: &Path, value: impl Display) {
    let value = value.to_string();
    match write_value(path, &value) {
        Ok(()) => tracing::debug!("Wrote {} to {:?}", value, path),
        Err(e) => tracing::warn!("Failed to write {} to {:?}: {}", value, path, e),
    }
}

/// Parse the first whitespace-delimited token of the node, or `None`
pub fn read_value<T: FromStr>(path: &Path) -> Option<T> {
    fs::read_to_string(path)
        .ok()?
        .split_whitespace()
        .next()?
        .parse()
        .ok()
}
