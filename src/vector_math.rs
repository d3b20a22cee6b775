//! Small helpers for normalising, capping, rotating and smoothing vectors.
use glam::Vec2;

/// Returns the unit vector pointing along `vector`.
///
/// Non-finite input and the zero vector both yield [`Vec2::ZERO`] instead of
/// `NaN` components.
///
/// # Examples
///
/// ```
/// use glam::Vec2;
/// use hostile::vector_math::normalize_or_zero;
/// let unit = normalize_or_zero(Vec2::new(3.0, 4.0));
/// assert!((unit.x - 0.6).abs() < 1e-6);
/// assert!((unit.y - 0.8).abs() < 1e-6);
///
/// assert_eq!(normalize_or_zero(Vec2::ZERO), Vec2::ZERO);
/// assert_eq!(normalize_or_zero(Vec2::new(f32::NAN, 1.0)), Vec2::ZERO);
/// ```
#[must_use]
pub fn normalize_or_zero(vector: Vec2) -> Vec2 {
    if !vector.is_finite() {
        return Vec2::ZERO;
    }
    vector.try_normalize().unwrap_or(Vec2::ZERO)
}

/// Caps `vector` at unit length without ever amplifying it.
///
/// # Examples
///
/// ```
/// use glam::Vec2;
/// use hostile::vector_math::clamp_unit;
/// assert_eq!(clamp_unit(Vec2::new(0.5, 0.0)), Vec2::new(0.5, 0.0));
/// assert!((clamp_unit(Vec2::new(3.0, 4.0)).length() - 1.0).abs() < 1e-6);
/// ```
#[must_use]
pub fn clamp_unit(vector: Vec2) -> Vec2 {
    if vector.length_squared() > 1.0 {
        normalize_or_zero(vector)
    } else {
        vector
    }
}

/// Rotates `vector` counter-clockwise by `degrees`.
///
/// # Examples
///
/// ```
/// use glam::Vec2;
/// use hostile::vector_math::rotate_degrees;
/// let up = rotate_degrees(Vec2::X, 90.0);
/// assert!(up.x.abs() < 1e-6);
/// assert!((up.y - 1.0).abs() < 1e-6);
/// ```
#[must_use]
pub fn rotate_degrees(vector: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(vector)
}

/// Heading of `vector` in degrees, measured counter-clockwise from `+x`.
#[must_use]
pub fn heading_degrees(vector: Vec2) -> f32 {
    vector.y.atan2(vector.x).to_degrees()
}

/// Moves `current` toward `target` by `rate * dt` of the remaining gap.
///
/// The interpolation factor is clamped to `[0, 1]` so large steps settle on
/// the target instead of overshooting it.
#[must_use]
pub fn exp_smooth(current: Vec2, target: Vec2, rate: f32, dt: f32) -> Vec2 {
    current.lerp(target, (rate * dt).clamp(0.0, 1.0))
}

/// Interpolates between two headings along the shorter arc.
///
/// # Examples
///
/// ```
/// use hostile::vector_math::lerp_angle_degrees;
/// // 350° -> 10° crosses zero rather than sweeping back through 180°.
/// assert!((lerp_angle_degrees(350.0, 10.0, 0.5) - 360.0).abs() < 1e-4);
/// ```
#[must_use]
pub fn lerp_angle_degrees(from: f32, to: f32, t: f32) -> f32 {
    let wrapped = (to - from).rem_euclid(360.0);
    let delta = if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    };
    from + delta * t.clamp(0.0, 1.0)
}
