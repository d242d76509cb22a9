use super::Vec2;

/// Axis-aligned bounding box given by its minimum and maximum corners,
/// in logical pixels (top-left origin).
///
/// Materials use the box as the reference frame for texture-coordinate
/// mapping: `min` is the anchor for the exact modes, `max - min` is the
/// normalization span for stretch.
///
/// Invariant (expected, not enforced): `max` component-wise ≥ `min`.
/// Use [`normalized`](Self::normalized) when the source is untrusted.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct BBox {
    pub min: Vec2,
    pub max: Vec2,
}

impl BBox {
    #[inline]
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn from_points(a: Vec2, b: Vec2) -> Self {
        Self { min: a.min(b), max: a.max(b) }
    }

    #[inline]
    pub fn size(self) -> Vec2 {
        self.max - self.min
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.max.x <= self.min.x || self.max.y <= self.min.y
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Swaps corners so that `max` ≥ `min` on both axes.
    #[inline]
    pub fn normalized(self) -> Self {
        Self {
            min: self.min.min(self.max),
            max: self.min.max(self.max),
        }
    }

    /// Grows the box by `amount` on every side.
    #[inline]
    pub fn inflated(self, amount: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(amount),
            max: self.max + Vec2::splat(amount),
        }
    }

    /// Extends the box to cover `p`.
    #[inline]
    pub fn expanded_to(self, p: Vec2) -> Self {
        Self {
            min: self.min.min(p),
            max: self.max.max(p),
        }
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let b = self.normalized();
        p.x >= b.min.x && p.y >= b.min.y && p.x < b.max.x && p.y < b.max.y
    }

    #[inline]
    pub fn intersect(self, other: BBox) -> Option<BBox> {
        let a = self.normalized();
        let b = other.normalized();

        let min = a.min.max(b.min);
        let max = a.max.min(b.max);

        if max.x <= min.x || max.y <= min.y {
            None
        } else {
            Some(BBox { min, max })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b(x0: f32, y0: f32, x1: f32, y1: f32) -> BBox {
        BBox::new(Vec2::new(x0, y0), Vec2::new(x1, y1))
    }

    // ── normalized ────────────────────────────────────────────────────────

    #[test]
    fn normalized_ordered_is_identity() {
        let bb = b(1.0, 2.0, 11.0, 22.0);
        assert_eq!(bb.normalized(), bb);
    }

    #[test]
    fn normalized_swaps_reversed_corners() {
        let bb = b(10.0, 5.0, 2.0, 1.0);
        assert_eq!(bb.normalized(), b(2.0, 1.0, 10.0, 5.0));
    }

    // ── size / center ─────────────────────────────────────────────────────

    #[test]
    fn size_and_center() {
        let bb = b(10.0, 10.0, 110.0, 60.0);
        assert_eq!(bb.size(), Vec2::new(100.0, 50.0));
        assert_eq!(bb.center(), Vec2::new(60.0, 35.0));
    }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_min_inclusive_max_exclusive() {
        let bb = b(0.0, 0.0, 10.0, 10.0);
        assert!(bb.contains(Vec2::new(0.0, 0.0)));
        assert!(bb.contains(Vec2::new(5.0, 5.0)));
        // Half-open [min, max) — the max corner is not contained.
        assert!(!bb.contains(Vec2::new(10.0, 10.0)));
    }

    // ── intersect ─────────────────────────────────────────────────────────

    #[test]
    fn intersect_overlapping() {
        let a = b(0.0, 0.0, 10.0, 10.0);
        let c = b(5.0, 5.0, 15.0, 15.0);
        assert_eq!(a.intersect(c).unwrap(), b(5.0, 5.0, 10.0, 10.0));
    }

    #[test]
    fn intersect_touching_edge_returns_none() {
        let a = b(0.0, 0.0, 10.0, 10.0);
        let c = b(10.0, 0.0, 20.0, 10.0);
        assert!(a.intersect(c).is_none());
    }

    // ── is_empty ──────────────────────────────────────────────────────────

    #[test]
    fn degenerate_box_is_empty() {
        assert!(b(3.0, 3.0, 3.0, 9.0).is_empty());
        assert!(!b(0.0, 0.0, 1.0, 1.0).is_empty());
    }
}
