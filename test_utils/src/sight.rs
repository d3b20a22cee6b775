//! Line-of-sight stubs with scripted answers.

use std::sync::atomic::{AtomicUsize, Ordering};

use glam::Vec2;
use hostile::sight::{Layer, LayerMask, LineOfSight, RayHit};

/// Answers every ray with the same hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedSight(pub Option<RayHit>);

impl FixedSight {
    /// Every ray strikes the player first.
    ///
    /// # Examples
    /// ```
    /// use glam::Vec2;
    /// use hostile::sight::{LayerMask, LineOfSight};
    /// use test_utils::FixedSight;
    /// assert!(FixedSight::clear().ray(Vec2::ZERO, Vec2::X, 1.0, LayerMask::NONE).is_some());
    /// ```
    #[must_use]
    pub const fn clear() -> Self {
        Self(Some(RayHit {
            layer: Layer::PLAYER,
            distance: 1.0,
        }))
    }

    /// Every ray strikes level geometry first.
    #[must_use]
    pub const fn blocked() -> Self {
        Self(Some(RayHit {
            layer: Layer::LEVEL,
            distance: 0.5,
        }))
    }

    /// Every ray hits nothing.
    #[must_use]
    pub const fn empty() -> Self {
        Self(None)
    }
}

impl LineOfSight for FixedSight {
    fn ray(&self, _: Vec2, _: Vec2, _: f32, _: LayerMask) -> Option<RayHit> {
        self.0
    }
}

/// Wraps another provider and counts the rays cast through it.
#[derive(Debug, Default)]
pub struct CountingSight<S> {
    inner: S,
    casts: AtomicUsize,
}

impl<S> CountingSight<S> {
    /// Wraps `inner` with a zeroed counter.
    pub const fn new(inner: S) -> Self {
        Self {
            inner,
            casts: AtomicUsize::new(0),
        }
    }

    /// Rays cast so far.
    pub fn casts(&self) -> usize {
        self.casts.load(Ordering::SeqCst)
    }
}

impl<S: LineOfSight> LineOfSight for CountingSight<S> {
    fn ray(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        self.casts.fetch_add(1, Ordering::SeqCst);
        self.inner.ray(origin, direction, max_distance, mask)
    }
}
