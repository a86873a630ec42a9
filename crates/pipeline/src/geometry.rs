//! Mapping numeric samples onto pixel extents.

use gauge_core::{GaugeError, Result};

/// Round `value` to `places` decimal digits, half away from zero.
#[inline]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Linearly rescale `x` from `domain` onto `range`, saturating at the range
/// edges.
///
/// The result is rounded to two decimals before clamping into
/// `[range.0, range.1]`.  A zero-width domain is an error.
pub fn affine(x: f64, domain: (f64, f64), range: (f64, f64)) -> Result<f64> {
    let (d0, d1) = domain;
    let (r0, r1) = range;

    let width = d1 - d0;
    if width == 0.0 {
        return Err(GaugeError::Geometry(format!(
            "degenerate domain [{d0}, {d1}]"
        )));
    }

    let y = round_to((r1 - r0) / width * (x - d0) + r0, 2);
    Ok(r0.max(r1.min(y)))
}
