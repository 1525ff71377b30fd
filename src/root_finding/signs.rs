//! Sign utilities for bracketing root-finding algorithms.
//! - `opposite_sign` : `true` if values have strictly opposite sign

/// Returns `true` if `x` and `y` have strictly opposite signs,
/// i.e. `x * y < 0` without the underflow of the product.
///
/// A zero on either side is *not* a sign change.
#[inline]
pub(crate) fn opposite_sign(x: f64, y: f64) -> bool {
    (x < 0.0 && y > 0.0) || (x > 0.0 && y < 0.0)
}
