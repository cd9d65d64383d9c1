//! # Utility Module
//!
//! Floating point comparison helpers used by the BSP geometry code.
//!
//! Every helper takes its tolerance as an argument. Callers pull the epsilon
//! from [`crate::bsp::BspConfig`] so that behavior does not depend on a hidden
//! constant.

/// Checks whether a value is within `epsilon` of zero (exclusive).
///
/// # Examples
///
/// ```
/// use rust_ed_bsp::utils::util::is_zero;
///
/// assert!(is_zero(0.000001, 0.00001));
/// assert!(!is_zero(0.15, 0.15));
/// assert!(is_zero(-0.1, 0.15));
/// ```
pub fn is_zero(value: f64, epsilon: f64) -> bool {
    value.abs() < epsilon
}

/// Checks whether two values differ by less than `epsilon`.
///
/// # Examples
///
/// ```
/// use rust_ed_bsp::utils::util::are_equal;
///
/// assert!(are_equal(1.0, 1.0000001, 0.000001));
/// assert!(!are_equal(1.0, 1.1, 0.000001));
/// ```
pub fn are_equal(a: f64, b: f64, epsilon: f64) -> bool {
    is_zero(a - b, epsilon)
}

/// Checks whether `t` lies in the closed `[0.0, 1.0]` range, which is the
/// range of times that land on a segment rather than its extension.
pub fn in_normal_range(t: f64) -> bool {
    (0.0..=1.0).contains(&t)
}

/// True if one value is strictly negative and the other strictly positive.
pub fn different_sign(a: f64, b: f64) -> bool {
    (a < 0.0 && b > 0.0) || (a > 0.0 && b < 0.0)
}
