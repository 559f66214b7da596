//! Fixed-length vector normalization.
//!
//! Positions, rotations and camera parameters are written in source as a run
//! of numbers of any length. [`normalize_vec`] turns whatever was written into
//! a vector of exactly the length the consumer expects.

use crate::value::Value;

/// A 3-component vector: positions, rotations (degrees), camera target.
pub type Vec3 = [f64; 3];

/// A 2-component vector: camera angle (azimuth, elevation in degrees).
pub type Vec2 = [f64; 2];

/// Normalize a declared value into a vector of exactly `N` components.
///
/// - A number vector is truncated to `N` or right-padded with `0`.
/// - A single number fills the first slot; the rest are `0`.
/// - A missing or non-numeric value yields `fallback`, or all zeros when no
///   fallback is given.
///
/// # Examples
///
/// ```
/// use spatex_core::{value::Value, vector::normalize_vec};
///
/// let v = Value::Vec(vec![1.0, 2.0]);
/// assert_eq!(normalize_vec::<3>(Some(&v), None), [1.0, 2.0, 0.0]);
/// assert_eq!(normalize_vec::<3>(Some(&Value::Num(5.0)), None), [5.0, 0.0, 0.0]);
/// assert_eq!(normalize_vec(None, Some([9.0, 9.0, 9.0])), [9.0, 9.0, 9.0]);
/// ```
pub fn normalize_vec<const N: usize>(value: Option<&Value>, fallback: Option<[f64; N]>) -> [f64; N] {
    let mut out = [0.0; N];
    match value {
        Some(Value::Vec(items)) => {
            for (slot, item) in out.iter_mut().zip(items) {
                *slot = *item;
            }
            out
        }
        Some(Value::Num(n)) => {
            if let Some(first) = out.first_mut() {
                *first = *n;
            }
            out
        }
        _ => fallback.unwrap_or(out),
    }
}
