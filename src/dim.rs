//! Dim layer alpha for the FOD overlay
//!
//! While the sensor area is lit at HBM the rest of the panel is covered by a
//! black layer so perceived brightness does not jump. The alpha follows the
//! panel's gamma (exponent 0.455) in its native 11-bit brightness range.

/// Panel backlight range is 0..=2047
const PANEL_MAX: i32 = 2047;
/// Above this panel level the HBM-relative curve applies
const HIGH_BRANCH_THRESHOLD: i32 = 500;
const GAMMA: f64 = 0.455;

/// Dim layer alpha (0-255) for an 8-bit framework brightness
pub fn dim_amount(brightness: i32) -> i32 {
    let panel = brightness.clamp(0, 255) * PANEL_MAX / 255;

    let alpha = if panel > HIGH_BRANCH_THRESHOLD {
        1.0 - (panel as f64 / PANEL_MAX as f64 * 430.0 / 600.0).powf(GAMMA)
    } else {
        1.0 - (panel as f64 / 1680.0).powf(GAMMA)
    };

    ((255.0 * alpha) as i32).clamp(0, 255)
}
