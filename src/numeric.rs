//! Numeric conversion helpers used across the project.
//!
//! These utilities guard conversions between integer counts and the `f32`
//! domain used by the solvers. They rely on debug assertions to flag
//! unexpected magnitudes while keeping the call-sites ergonomic.

/// Largest count representable exactly in an `f32` mantissa.
const MAX_EXACT_F32_COUNT: usize = 1 << f32::MANTISSA_DIGITS;

/// Convert a collection length into `f32` for averaging.
///
/// # Examples
/// ```
/// use hostile::numeric::count_to_f32;
/// assert!((count_to_f32(4) - 4.0).abs() < f32::EPSILON);
/// ```
#[expect(
    clippy::cast_precision_loss,
    reason = "Neighbour and spawn-point counts stay far below 2^24."
)]
#[must_use]
pub fn count_to_f32(count: usize) -> f32 {
    debug_assert!(
        count <= MAX_EXACT_F32_COUNT,
        "count {count} cannot be represented exactly as f32"
    );
    count as f32
}

/// Convert a finite `f64` into `f32`, asserting that it fits the target type.
#[expect(
    clippy::cast_possible_truncation,
    reason = "Callers pass noise samples already clamped to [0, 1]."
)]
#[must_use]
pub fn narrow_f64(value: f64) -> f32 {
    debug_assert!(value.is_finite(), "expected finite f64 for f32 conversion");
    debug_assert!(
        value <= f64::from(f32::MAX),
        "f64 value {value} exceeds f32::MAX"
    );
    debug_assert!(
        value >= f64::from(f32::MIN),
        "f64 value {value} is below f32::MIN"
    );
    value as f32
}

/// Average of `sum` over `count` items, or `None` for an empty set.
#[must_use]
pub fn mean(sum: glam::Vec2, count: usize) -> Option<glam::Vec2> {
    if count == 0 {
        return None;
    }
    Some(sum / count_to_f32(count))
}
