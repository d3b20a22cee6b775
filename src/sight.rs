//! Layers, masks and the ray-test collaborator used for line-of-sight checks.
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A physics layer index in `0..32`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Layer(pub u8);

impl Layer {
    /// Static level geometry that blocks shots.
    pub const LEVEL: Self = Self(3);
    /// The player and anything else enemies shoot at.
    pub const PLAYER: Self = Self(6);
    /// Enemy bodies.
    pub const ENEMY: Self = Self(7);
}

/// A set of [`Layer`]s packed into a bit mask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Mask matching no layer.
    pub const NONE: Self = Self(0);

    /// Mask containing a single layer. Layers past 31 yield an empty mask.
    #[must_use]
    pub const fn of(layer: Layer) -> Self {
        match 1_u32.checked_shl(layer.0 as u32) {
            Some(bits) => Self(bits),
            None => Self::NONE,
        }
    }

    /// Union of both masks.
    #[must_use]
    pub const fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Whether `layer` is part of the mask.
    #[must_use]
    pub const fn contains(self, layer: Layer) -> bool {
        let single = Self::of(layer);
        single.0 != 0 && self.0 & single.0 == single.0
    }
}

/// First collider struck by a ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Layer of the struck collider.
    pub layer: Layer,
    /// Distance from the ray origin to the hit.
    pub distance: f32,
}

/// World collaborator answering ray queries.
///
/// Implementations return the nearest collider on any layer in `mask` within
/// `max_distance` of `origin` along `direction`.
pub trait LineOfSight {
    /// Casts a ray and reports the nearest hit, if any.
    fn ray(&self, origin: Vec2, direction: Vec2, max_distance: f32, mask: LayerMask)
        -> Option<RayHit>;
}

/// Whether a ray from `origin` strikes something in `target_mask` before
/// anything in `obstruction_mask`.
///
/// # Examples
/// ```
/// use glam::Vec2;
/// use hostile::sight::{has_line_of_sight, Layer, LayerMask, LineOfSight, RayHit};
///
/// struct Wall;
/// impl LineOfSight for Wall {
///     fn ray(&self, _: Vec2, _: Vec2, _: f32, _: LayerMask) -> Option<RayHit> {
///         Some(RayHit { layer: Layer::LEVEL, distance: 2.0 })
///     }
/// }
///
/// let targets = LayerMask::of(Layer::PLAYER);
/// let level = LayerMask::of(Layer::LEVEL);
/// assert!(!has_line_of_sight(&Wall, Vec2::ZERO, Vec2::X, 10.0, targets, level));
/// ```
pub fn has_line_of_sight(
    sight: &dyn LineOfSight,
    origin: Vec2,
    direction: Vec2,
    max_distance: f32,
    target_mask: LayerMask,
    obstruction_mask: LayerMask,
) -> bool {
    sight
        .ray(
            origin,
            direction,
            max_distance,
            target_mask.with(obstruction_mask),
        )
        .is_some_and(|hit| target_mask.contains(hit.layer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct Fixed(Option<RayHit>);

    impl LineOfSight for Fixed {
        fn ray(&self, _: Vec2, _: Vec2, _: f32, _: LayerMask) -> Option<RayHit> {
            self.0
        }
    }

    #[rstest]
    #[case::hits_target(Some(Layer::PLAYER), true)]
    #[case::hits_wall(Some(Layer::LEVEL), false)]
    #[case::hits_nothing(None, false)]
    fn sight_requires_target_first(#[case] layer: Option<Layer>, #[case] expected: bool) {
        let sight = Fixed(layer.map(|l| RayHit {
            layer: l,
            distance: 1.0,
        }));
        let visible = has_line_of_sight(
            &sight,
            Vec2::ZERO,
            Vec2::X,
            5.0,
            LayerMask::of(Layer::PLAYER),
            LayerMask::of(Layer::LEVEL),
        );
        assert_eq!(visible, expected);
    }

    #[test]
    fn out_of_range_layer_is_empty() {
        assert_eq!(LayerMask::of(Layer(40)), LayerMask::NONE);
        assert!(!LayerMask(u32::MAX).contains(Layer(40)));
    }

    #[test]
    fn union_contains_both() {
        let mask = LayerMask::of(Layer::LEVEL).with(LayerMask::of(Layer::PLAYER));
        assert!(mask.contains(Layer::LEVEL));
        assert!(mask.contains(Layer::PLAYER));
        assert!(!mask.contains(Layer::ENEMY));
    }
}
