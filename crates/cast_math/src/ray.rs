use crate::Vec3;

/// A ray in 3D space with an origin and a direction.
///
/// Distances returned by intersection tests are only comparable between
/// rays when `direction` is unit length. `Ray::new` does not enforce this;
/// use [`Ray::normalized`] when the direction comes from arbitrary input.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray, storing the direction as given.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Create a ray with a unit-length direction.
    ///
    /// Returns `None` when `direction` has zero length or non-finite
    /// components, so a degenerate direction never reaches an intersection test.
    pub fn normalized(origin: Vec3, direction: Vec3) -> Option<Self> {
        direction
            .try_normalize()
            .map(|direction| Self { origin, direction })
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.direction * t
    }
}
