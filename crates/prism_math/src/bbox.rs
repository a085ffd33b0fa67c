use glam::{DMat4, DVec3};

/// Axis-aligned bounding box stored as a min/max corner pair.
///
/// An empty box has `min` at +infinity and `max` at -infinity; unioning
/// anything into it yields that other bound unchanged.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BBox3d {
    pub min: DVec3,
    pub max: DVec3,
}

impl BBox3d {
    /// A box containing nothing.
    pub const EMPTY: BBox3d = BBox3d {
        min: DVec3::splat(f64::INFINITY),
        max: DVec3::splat(f64::NEG_INFINITY),
    };

    /// Create a box from two corner points (need not be ordered).
    pub fn from_points(a: DVec3, b: DVec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Create a box directly from ordered min/max corners.
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// True if the box contains nothing.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grow the box to include a point.
    pub fn union_point(&mut self, p: DVec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// The smallest box containing both `self` and `other`.
    pub fn union(&self, other: &BBox3d) -> BBox3d {
        BBox3d {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// The eight corner points of the box.
    pub fn corners(&self) -> [DVec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            DVec3::new(a.x, a.y, a.z),
            DVec3::new(b.x, a.y, a.z),
            DVec3::new(a.x, b.y, a.z),
            DVec3::new(b.x, b.y, a.z),
            DVec3::new(a.x, a.y, b.z),
            DVec3::new(b.x, a.y, b.z),
            DVec3::new(a.x, b.y, b.z),
            DVec3::new(b.x, b.y, b.z),
        ]
    }

    /// Transform the box by a matrix and re-align to the axes.
    ///
    /// All eight corners are transformed and re-bounded, so the result is
    /// conservative under rotation.
    pub fn transformed(&self, matrix: &DMat4) -> BBox3d {
        if self.is_empty() {
            return *self;
        }
        let mut out = BBox3d::EMPTY;
        for corner in self.corners() {
            out.union_point(matrix.transform_point3(corner));
        }
        out
    }

    /// Center point of the box.
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Per-axis size of the box.
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }
}

impl Default for BBox3d {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points_orders_corners() {
        let b = BBox3d::from_points(DVec3::new(1.0, -2.0, 3.0), DVec3::new(-1.0, 2.0, 0.0));
        assert_eq!(b.min, DVec3::new(-1.0, -2.0, 0.0));
        assert_eq!(b.max, DVec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_empty_union_identity() {
        let b = BBox3d::from_points(DVec3::ZERO, DVec3::ONE);
        let u = BBox3d::EMPTY.union(&b);
        assert_eq!(u, b);
        assert!(BBox3d::EMPTY.is_empty());
        assert!(!b.is_empty());
    }

    #[test]
    fn test_union_surrounds_both() {
        let a = BBox3d::from_points(DVec3::ZERO, DVec3::splat(5.0));
        let b = BBox3d::from_points(DVec3::splat(3.0), DVec3::splat(10.0));
        let u = a.union(&b);
        assert_eq!(u.min, DVec3::ZERO);
        assert_eq!(u.max, DVec3::splat(10.0));
    }

    #[test]
    fn test_transformed_translation() {
        let b = BBox3d::from_points(DVec3::splat(-0.5), DVec3::splat(0.5));
        let m = DMat4::from_translation(DVec3::new(2.0, 0.0, 0.0));
        let t = b.transformed(&m);
        assert_eq!(t.min, DVec3::new(1.5, -0.5, -0.5));
        assert_eq!(t.max, DVec3::new(2.5, 0.5, 0.5));
    }

    #[test]
    fn test_transformed_rotation_is_conservative() {
        let b = BBox3d::from_points(DVec3::splat(-1.0), DVec3::splat(1.0));
        let m = DMat4::from_rotation_y(std::f64::consts::FRAC_PI_4);
        let t = b.transformed(&m);
        // A rotated unit cube's aligned bound grows along the rotated axes.
        assert!(t.max.x > 1.0);
        assert!((t.max.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_transformed_empty_stays_empty() {
        let m = DMat4::from_translation(DVec3::splat(100.0));
        assert!(BBox3d::EMPTY.transformed(&m).is_empty());
    }

    #[test]
    fn test_center_and_size() {
        let b = BBox3d::from_points(DVec3::ZERO, DVec3::new(10.0, 4.0, 2.0));
        assert_eq!(b.center(), DVec3::new(5.0, 2.0, 1.0));
        assert_eq!(b.size(), DVec3::new(10.0, 4.0, 2.0));
    }
}
