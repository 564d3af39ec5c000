//! Scale-relative comparison of floating point values.
//!
//! Measures along a path can be anything from fractions of a meter to millions of meters, so
//! equality checks throughout the crate are relative to the magnitude of the compared values
//! instead of using a fixed epsilon.

use num_traits::Float;

/// Default comparison tolerance: square root of the machine epsilon of the floating point type.
pub fn default_tolerance<F: Float>() -> F {
    F::epsilon().sqrt()
}

/// Compares two values with the [`default_tolerance`].
///
/// Two NaN values are considered equal. This is deliberate: a NaN measure means "no measure
/// assigned", and two unassigned measures are the same thing.
pub fn approx_eq<F: Float>(a: F, b: F) -> bool {
    approx_eq_with(a, b, default_tolerance())
}

/// Compares two values with the given relative tolerance.
///
/// The values are equal if their magnitudes are both below `tolerance`, or if their difference
/// is below `tolerance` relative to the larger magnitude. Two NaN values are always equal.
pub fn approx_eq_with<F: Float>(a: F, b: F, tolerance: F) -> bool {
    if a.is_nan() || b.is_nan() {
        return a.is_nan() && b.is_nan();
    }

    let norm = a.abs().max(b.abs());
    norm < tolerance || (a - b).abs() < tolerance * norm
}
