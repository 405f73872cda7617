//! Hittable trait and hit records for ray-primitive intersection.

use cast_math::{Aabb, Interval, Ray, Vec3};

/// A single ray-primitive intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Point of intersection
    pub point: Vec3,
    /// Outward geometric normal at the intersection (unit length)
    pub normal: Vec3,
}

/// Nearest hit of a ray against a primitive list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Index of the hit primitive in the scene's primitive list
    pub primitive: usize,
    pub t: f64,
    pub point: Vec3,
    pub normal: Vec3,
}

impl HitRecord {
    pub fn new(primitive: usize, intersection: Intersection) -> Self {
        Self {
            primitive,
            t: intersection.t,
            point: intersection.point,
            normal: intersection.normal,
        }
    }
}

/// Trait for objects that can be hit by rays.
///
/// Primitives are shared read-only across render workers, hence `Send + Sync`.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object with `t` strictly inside `ray_t`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<Intersection>;

    /// Get the axis-aligned bounding box of this object.
    fn bounding_box(&self) -> Aabb;
}
