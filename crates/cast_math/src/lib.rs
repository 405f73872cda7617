//! Math types for the cast ray caster.
//!
//! Everything is double precision: `Vec3` is glam's `DVec3`.

pub use glam::DVec3 as Vec3;

mod aabb;
mod interval;
mod ray;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;

/// Minimum accepted hit distance along a ray.
///
/// Intersections at or below this distance are treated as self-intersections
/// and rejected. Also used as the parallel threshold in triangle tests.
pub const EPSILON: f64 = 1e-9;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }

    #[test]
    fn test_zero_vector_has_no_direction() {
        assert!(Vec3::ZERO.try_normalize().is_none());
        assert!(Vec3::new(f64::NAN, 0.0, 1.0).try_normalize().is_none());
    }
}
