// Tolerance-aware floating point comparisons

/// Default comparison tolerance, ten decimal digits.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Relative equality: the difference is scaled against the larger magnitude,
/// with a floor of 1.0 so values near zero keep an absolute tolerance.
pub fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= tolerance * scale
}

/// Greater-or-equal that treats values within tolerance as equal, so a value
/// numerically equal to a bound within float precision is not clipped.
pub fn is_greater_equal(a: f64, b: f64, tolerance: f64) -> bool {
    a > b || approx_eq(a, b, tolerance)
}
