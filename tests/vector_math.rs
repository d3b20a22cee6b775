//! Vector helpers: normalisation, clamping, smoothing and heading math.

use approx::assert_relative_eq;
use glam::Vec2;
use hostile::vector_math::{
    clamp_unit, exp_smooth, heading_degrees, lerp_angle_degrees, normalize_or_zero,
};
use rstest::rstest;

#[test]
fn normalize_returns_zero_for_nan() {
    assert_eq!(normalize_or_zero(Vec2::new(f32::NAN, 1.0)), Vec2::ZERO);
}

#[test]
fn normalize_returns_normalized_vector() {
    assert_eq!(normalize_or_zero(Vec2::new(3.0, 0.0)), Vec2::X);
}

#[test]
fn clamp_never_amplifies() {
    let short = Vec2::new(0.1, 0.2);
    assert_eq!(clamp_unit(short), short);
}

#[rstest]
#[case::east(Vec2::X, 0.0)]
#[case::north(Vec2::Y, 90.0)]
#[case::west(Vec2::NEG_X, 180.0)]
#[case::south(Vec2::NEG_Y, -90.0)]
fn headings_are_counter_clockwise(#[case] vector: Vec2, #[case] expected: f32) {
    assert_relative_eq!(heading_degrees(vector), expected, epsilon = 1e-4);
}

#[test]
fn angle_lerp_takes_short_way_round() {
    assert_relative_eq!(lerp_angle_degrees(10.0, 350.0, 0.5), 0.0, epsilon = 1e-4);
    assert_relative_eq!(lerp_angle_degrees(0.0, 90.0, 2.0), 90.0, epsilon = 1e-4);
}

#[test]
fn smoothing_with_zero_rate_holds_still() {
    assert_eq!(exp_smooth(Vec2::ONE, Vec2::ZERO, 0.0, 1.0), Vec2::ONE);
}
