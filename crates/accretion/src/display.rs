//! Sizing helpers for renderers
//!
//! The engine never calls these. They map a body's mass to a marker size and
//! a color scale the way the disk animations expect.

use std::f64::consts::PI;

use crate::body::Body;

/// Scale from mass (kg) to marker size
pub const MASS_TO_SIZE_RATIO: f64 = 2.511_886_431_509_571_8e-18; // 10^-17.6

/// Marker size that saturates the color scale
pub const MAX_COLOR_VALUE: f64 = 398.107_170_553_497_3; // 10^2.6

/// Cross-section area of a sphere whose volume equals `volume`
///
/// Treats mass as volume, so marker area grows as mass^(2/3).
///
/// # Examples
///
/// ```
/// use accretion::display::area_from_volume;
///
/// // Unit sphere: V = 4/3 π, A = π
/// let area = area_from_volume(4.0 / 3.0 * std::f64::consts::PI);
/// assert!((area - std::f64::consts::PI).abs() < 1e-12);
/// ```
pub fn area_from_volume(volume: f64) -> f64 {
    let radius = (volume / (4.0 / 3.0 * PI)).cbrt();
    PI * radius * radius
}

/// Marker size for a body of `mass`
///
/// The area comes from the raw mass and is scaled afterwards.
pub fn marker_size(mass: f64, mass_to_size_ratio: f64) -> f64 {
    area_from_volume(mass) * mass_to_size_ratio
}

/// Position of `size` on a `[0, max_color_value]` color scale, clamped to `[0, 1]`
pub fn color_fraction(size: f64, max_color_value: f64) -> f64 {
    if max_color_value <= 0.0 {
        return 1.0;
    }
    (size / max_color_value).clamp(0.0, 1.0)
}

/// Marker size and color fraction for `body` with the default scales
pub fn body_marker(body: &Body) -> (f64, f64) {
    let size = marker_size(body.mass(), MASS_TO_SIZE_RATIO);
    (size, color_fraction(size, MAX_COLOR_VALUE))
}
