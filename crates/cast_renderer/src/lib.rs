//! cast - a BVH-accelerated CPU ray caster.
//!
//! Every pixel casts one ray from the camera through the view plane. The
//! nearest primitive is found through a bounding volume hierarchy, and hit
//! pixels are painted a flat color. No shading, no bounces.

mod bvh;
mod error;
mod hittable;
mod progress;
mod renderer;
mod scene;
mod sphere;
mod triangle;

pub use bvh::{nearest_hit_linear, Bvh, BvhNode};
pub use error::RenderError;
pub use hittable::{HitRecord, Hittable, Intersection};
pub use progress::{AtomicProgress, RenderProgress};
pub use renderer::{
    cast_pixel, color_to_rgb8, render, Color, ImageBuffer, RenderConfig, RenderStats,
};
pub use scene::{pixel_offset, Scene, ViewPlane};
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export Vec3 and common math types from cast_math
pub use cast_math::{Aabb, Interval, Ray, Vec3, EPSILON};
